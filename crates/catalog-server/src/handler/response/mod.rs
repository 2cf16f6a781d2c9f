//! Response types for HTTP handlers.

mod errors;
mod monitors;
mod products;
mod uploads;

pub use errors::*;
pub use monitors::*;
pub use products::*;
pub use uploads::*;

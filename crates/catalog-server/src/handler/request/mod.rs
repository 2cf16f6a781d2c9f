//! Request types for HTTP handlers.

mod paginations;
mod paths;
mod products;
mod validations;

pub use paginations::*;
pub use paths::*;
pub use products::*;
pub use validations::*;

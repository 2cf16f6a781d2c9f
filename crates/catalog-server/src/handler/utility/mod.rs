//! [`CustomRoutes`] and other utilities.

mod custom_routes;

pub use custom_routes::{CustomRoutes, RouterMapFn};

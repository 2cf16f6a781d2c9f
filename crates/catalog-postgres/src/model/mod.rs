//! Database models for the catalog schema.

mod product;

pub use product::{NewProduct, Product, UpdateProduct};

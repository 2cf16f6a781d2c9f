//! Request extractors.
//!
//! Drop-in replacements for the axum extractors of the same name. Each one
//! rejects with [`handler::Error`], so every malformed request answers with
//! the JSON error document clients already handle.
//!
//! [`handler::Error`]: crate::handler::Error

pub mod reject;

pub use crate::extract::reject::{Json, Multipart, Path, Query, ValidateJson};

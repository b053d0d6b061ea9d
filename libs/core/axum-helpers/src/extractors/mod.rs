//! Custom extractors for Axum handlers.
//!
//! These wrap the stock axum extractors so every rejection is reported as
//! an [`AppError`](crate::errors::AppError) with the standard error body.

pub mod id_path;
pub mod json_body;

pub use id_path::IdPath;
pub use json_body::JsonBody;

//! Shared types and models for the rain forecast form
//!
//! This crate contains the record, form schema and prediction types shared
//! between the backend server and the browser-side WASM helpers.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;

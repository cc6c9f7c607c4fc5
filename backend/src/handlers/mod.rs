//! HTTP handlers for the rain forecast server

mod forecast;
mod health;

pub use forecast::*;
pub use health::*;

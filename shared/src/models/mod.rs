//! Domain models for the rain forecast form

mod prediction;
mod weather;

pub use prediction::*;
pub use weather::*;

// Shared constants and the crate error type
pub mod constants;
mod errors;

pub use errors::{SeoError, SeoResult};

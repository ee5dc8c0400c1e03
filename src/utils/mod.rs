// src/utils/mod.rs
pub mod error;
pub mod logging;
pub mod table_debug;

pub use error::{AppError, ExtractError, SourceError}; // Re-export error types for convenience

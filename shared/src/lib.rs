//! Shared types for the catalog admin workspace
//!
//! Common types used by `catalog-engine` and `orders-client`: the catalog
//! tree models, order records, structured error codes and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};

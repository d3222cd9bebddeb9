//! Data models
//!
//! Shared between the catalog engine, the orders client and the admin
//! frontend (JSON, camelCase field names).

pub mod catalog;
pub mod order;
pub mod product;

// Re-exports
pub use catalog::*;
pub use order::*;
pub use product::*;

//! Orders Client - REST client for the customer orders service
//!
//! Loads and edits orders through the remote API, keeping the last known
//! order list in a local cache so the admin table still works offline.

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod table;

pub use cache::{FileOrderCache, MemoryOrderCache, OrderCache};
pub use config::OrdersConfig;
pub use error::{ClientError, ClientResult};
pub use http::{NetworkOrderClient, OrderApi};
pub use service::{LoadOutcome, OrderService, SaveOutcome};
pub use table::OrdersTable;

// Re-export shared types for convenience
pub use shared::models::{Order, OrderUpdate};

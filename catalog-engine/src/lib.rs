//! Catalog Engine - in-memory catalog mutation engine
//!
//! # Modules
//!
//! - [`catalog`] - catalog tree, selection state machine, mutations and queries
//! - [`transfer`] - spreadsheet import/export and upload checks
//! - [`core`] - configuration
//! - [`utils`] - logging and input validation
//!
//! # Example
//!
//! ```ignore
//! use catalog_engine::{CatalogStore, NodeDraft, Submission};
//!
//! let store = CatalogStore::bootstrap(&config)?;
//! let store = store.upsert_category(
//!     &Submission::Single(NodeDraft::new("Travel", vec!["Flights".into()])),
//!     None,
//! )?;
//! ```

pub mod catalog;
pub mod core;
pub mod transfer;
pub mod utils;

// Re-export public types
pub use catalog::{
    CatalogStats, CatalogStore, IdGenerator, NodeDraft, ProductDraft, ProductSort, Selection,
    SelectionLevel, SequentialIds, SnowflakeIds, Submission,
};
pub use core::Config;
pub use transfer::{CsvSpreadsheet, Row, SheetFormat, SpreadsheetDecoder, SpreadsheetEncoder};
pub use utils::logger::{init_logger, init_logger_with_file};

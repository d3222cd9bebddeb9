//! Catalog tree engine
//!
//! - [`tree`] - path-copy primitives shared by every level
//! - [`draft`] - mutation inputs
//! - [`mutation`] - pure tree mutations
//! - [`selection`] - selection state machine
//! - [`store`] - tree + selection value type
//! - [`query`] - search filters and product ordering
//! - [`ids`] - product id generation
//! - [`seed`] - bootstrap datasets

pub mod draft;
pub mod ids;
pub mod mutation;
pub mod query;
pub mod seed;
pub mod selection;
pub mod store;
pub mod tree;

pub use draft::{NodeDraft, ProductDraft, Submission};
pub use ids::{IdGenerator, MIN_PRODUCT_ID, SequentialIds, SnowflakeIds};
pub use mutation::Ancestors;
pub use query::ProductSort;
pub use selection::{Selection, SelectionLevel, SelectionPath};
pub use store::{CatalogStats, CatalogStore};

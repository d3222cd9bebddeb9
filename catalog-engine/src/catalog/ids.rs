//! Product identity generation
//!
//! New products get an integer id greater than [`MIN_PRODUCT_ID`] - 1 that
//! collides with nothing in the current tree and with nothing the generator
//! handed out earlier in the session.

use std::collections::HashSet;

/// Smallest id handed to a newly created product
pub const MIN_PRODUCT_ID: i64 = 11;

/// Source of fresh product ids
pub trait IdGenerator {
    /// Return an id not contained in `taken`.
    fn next_id(&mut self, taken: &HashSet<i64>) -> i64;
}

/// Monotonic ids from [`MIN_PRODUCT_ID`], skipping taken ones.
///
/// Deterministic; used by tests and the CLI.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: i64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self {
            next: MIN_PRODUCT_ID,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, taken: &HashSet<i64>) -> i64 {
        while taken.contains(&self.next) {
            self.next += 1;
        }
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Snowflake ids (timestamp + random bits), remembering every id issued.
#[derive(Debug, Clone, Default)]
pub struct SnowflakeIds {
    issued: HashSet<i64>,
}

impl SnowflakeIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SnowflakeIds {
    fn next_id(&mut self, taken: &HashSet<i64>) -> i64 {
        loop {
            let id = shared::util::snowflake_id();
            if id >= MIN_PRODUCT_ID && !taken.contains(&id) && self.issued.insert(id) {
                return id;
            }
        }
    }
}

//! Local order cache
//!
//! Holds the last order list seen from the service, or the locally saved
//! edits when the service was unreachable.

use crate::ClientResult;
use async_trait::async_trait;
use shared::models::Order;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[async_trait]
pub trait OrderCache: Send + Sync {
    /// Cached orders; empty when nothing was stored yet
    async fn load(&self) -> ClientResult<Vec<Order>>;

    /// Replace the cached list
    async fn store(&self, orders: &[Order]) -> ClientResult<()>;
}

/// JSON file cache
#[derive(Debug, Clone)]
pub struct FileOrderCache {
    path: PathBuf,
}

impl FileOrderCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl OrderCache for FileOrderCache {
    async fn load(&self) -> ClientResult<Vec<Order>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice::<Option<Vec<Order>>>(&bytes) {
            Ok(orders) => Ok(orders.unwrap_or_default()),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring unreadable order cache");
                Ok(Vec::new())
            }
        }
    }

    async fn store(&self, orders: &[Order]) -> ClientResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(orders)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

/// In-memory cache
#[derive(Debug, Default)]
pub struct MemoryOrderCache {
    orders: Mutex<Vec<Order>>,
}

impl MemoryOrderCache {
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders: Mutex::new(orders),
        }
    }

    /// Copy of the cached list
    pub fn snapshot(&self) -> Vec<Order> {
        self.orders
            .lock()
            .map(|o| o.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

#[async_trait]
impl OrderCache for MemoryOrderCache {
    async fn load(&self) -> ClientResult<Vec<Order>> {
        Ok(self.snapshot())
    }

    async fn store(&self, orders: &[Order]) -> ClientResult<()> {
        let mut guard = self
            .orders
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = orders.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: &str, number: &str) -> Order {
        Order {
            id: id.into(),
            order_number: number.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_file_cache_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileOrderCache::new(dir.path().join("nested").join("orders.json"));
        assert!(cache.load().await.unwrap().is_empty());

        cache.store(&[order("a", "1"), order("b", "2")]).await.unwrap();
        let loaded = cache.load().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].order_number, "2");
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(FileOrderCache::new(path).load().await.unwrap().is_empty());

        let null = dir.path().join("null.json");
        std::fs::write(&null, "null").unwrap();
        assert!(FileOrderCache::new(null).load().await.unwrap().is_empty());
    }
}

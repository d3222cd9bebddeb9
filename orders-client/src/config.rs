//! Client configuration

/// Default page size of the orders table
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Orders service configuration
///
/// # Environment variables
///
/// | Variable | Default |
/// |----------|---------|
/// | ORDERS_API_URL | http://localhost:5000 |
/// | ORDERS_API_KEY | (unset) |
/// | ORDERS_CACHE_PATH | orders.json |
/// | ORDERS_TIMEOUT_SECS | 30 |
/// | ORDERS_PAGE_SIZE | 5 |
#[derive(Debug, Clone)]
pub struct OrdersConfig {
    /// Service base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Value of the `x-api-key` header
    pub api_key: Option<String>,

    /// File holding the last known order list
    pub cache_path: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Rows per table page
    pub page_size: usize,
}

impl OrdersConfig {
    /// Create a configuration for the given service
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            cache_path: "orders.json".into(),
            timeout: 30,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Load configuration from the environment
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("ORDERS_API_URL").unwrap_or_else(|_| "http://localhost:5000".into());
        let mut config = Self::new(base_url);
        config.api_key = std::env::var("ORDERS_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        if let Ok(path) = std::env::var("ORDERS_CACHE_PATH") {
            config.cache_path = path;
        }
        if let Some(timeout) = std::env::var("ORDERS_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.timeout = timeout;
        }
        if let Some(size) = std::env::var("ORDERS_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|s: &usize| *s > 0)
        {
            config.page_size = size;
        }
        config
    }

    /// Set the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the cache file
    pub fn with_cache_path(mut self, path: impl Into<String>) -> Self {
        self.cache_path = path.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the table page size (zero is ignored)
    pub fn with_page_size(mut self, size: usize) -> Self {
        if size > 0 {
            self.page_size = size;
        }
        self
    }
}

/// Catalog engine configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | CATALOG_PLACEHOLDER_IMAGE | /images/placeholder.png | Image for nodes created without one |
/// | CATALOG_SEED_PATH | (unset) | JSON catalog to load instead of the built-in seed |
/// | MAX_IMAGE_BYTES | 2097152 | Largest accepted image upload |
/// | MAX_SHEET_BYTES | 5242880 | Largest accepted spreadsheet upload |
/// | LOG_LEVEL | info | tracing level |
/// | LOG_DIR | (unset) | Directory for daily rolled log files |
/// | ENVIRONMENT | development | development, staging or production |
///
/// # Example
///
/// ```ignore
/// CATALOG_SEED_PATH=./catalog.json LOG_LEVEL=debug catalog-admin tree
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub placeholder_image: String,
    pub seed_path: Option<String>,
    pub max_image_bytes: u64,
    pub max_sheet_bytes: u64,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// development | staging | production
    pub environment: String,
}

pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "/images/placeholder.png";
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 2 * 1024 * 1024;
pub const DEFAULT_MAX_SHEET_BYTES: u64 = 5 * 1024 * 1024;

impl Config {
    /// Load configuration from the environment
    ///
    /// Unset or unparsable variables take their defaults.
    pub fn from_env() -> Self {
        Self {
            placeholder_image: std::env::var("CATALOG_PLACEHOLDER_IMAGE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER_IMAGE.into()),
            seed_path: std::env::var("CATALOG_SEED_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            max_image_bytes: std::env::var("MAX_IMAGE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_IMAGE_BYTES),
            max_sheet_bytes: std::env::var("MAX_SHEET_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_SHEET_BYTES),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Whether this is a production environment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Whether this is a development environment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    /// Built-in defaults, ignoring the environment
    fn default() -> Self {
        Self {
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.into(),
            seed_path: None,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            max_sheet_bytes: DEFAULT_MAX_SHEET_BYTES,
            log_level: "info".into(),
            log_dir: None,
            environment: "development".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.max_image_bytes, 2_097_152);
        assert_eq!(config.max_sheet_bytes, 5_242_880);
        assert_eq!(config.placeholder_image, DEFAULT_PLACEHOLDER_IMAGE);
        assert!(config.is_development());
        assert!(!config.is_production());
    }
}

//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity (leaf level of the catalog)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique across the whole catalog, assigned once at creation
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Strictly positive
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// Case-insensitive match against name or description.
    ///
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_name_or_description() {
        let product = Product {
            id: 1,
            name: "Smart Pen".to_string(),
            description: "Seamless digital note-taking".to_string(),
            price: Decimal::from(2999),
            features: vec![],
            image: String::new(),
        };
        assert!(product.matches("pen"));
        assert!(product.matches("digital"));
        assert!(!product.matches("notebook"));
    }

    #[test]
    fn test_price_accepts_float_json() {
        let product: Product =
            serde_json::from_str(r#"{"id": 3, "name": "Organizer", "price": 14.99}"#).unwrap();
        assert_eq!(product.price, Decimal::new(1499, 2));
        assert!(product.features.is_empty());
    }
}

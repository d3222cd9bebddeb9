//! Read-side views: search filters and product ordering
//!
//! Filters are case-insensitive substring matches. A blank query matches
//! everything. Results are the stored `Arc`s, never copies.

use shared::models::{Category, Product, SubSubcategory, Subcategory};
use std::cmp::Ordering;
use std::sync::Arc;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

fn needle(query: &str) -> Option<String> {
    let q = query.trim();
    (!q.is_empty()).then(|| q.to_lowercase())
}

fn name_matches(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(needle)
}

fn sub_subcategory_matches(sub_sub: &SubSubcategory, needle: &str) -> bool {
    name_matches(&sub_sub.name, needle) || sub_sub.products.iter().any(|p| p.matches(needle))
}

fn subcategory_matches(sub: &Subcategory, needle: &str) -> bool {
    name_matches(&sub.name, needle)
        || sub
            .sub_subcategories
            .iter()
            .any(|ss| sub_subcategory_matches(ss, needle))
}

/// Root categories whose name, or any descendant's name or product
/// description, contains `query`. Matching categories are returned whole.
pub fn filter_categories(categories: &[Arc<Category>], query: &str) -> Vec<Arc<Category>> {
    let Some(needle) = needle(query) else {
        return categories.to_vec();
    };
    categories
        .iter()
        .filter(|c| {
            name_matches(&c.name, &needle)
                || c.subcategories.iter().any(|s| subcategory_matches(s, &needle))
        })
        .cloned()
        .collect()
}

/// Subcategories of `category` whose name contains `query`
pub fn filter_subcategories(category: &Category, query: &str) -> Vec<Arc<Subcategory>> {
    match needle(query) {
        Some(needle) => category
            .subcategories
            .iter()
            .filter(|s| name_matches(&s.name, &needle))
            .cloned()
            .collect(),
        None => category.subcategories.clone(),
    }
}

/// Sub-subcategories of `sub` whose name contains `query`
pub fn filter_sub_subcategories(sub: &Subcategory, query: &str) -> Vec<Arc<SubSubcategory>> {
    match needle(query) {
        Some(needle) => sub
            .sub_subcategories
            .iter()
            .filter(|ss| name_matches(&ss.name, &needle))
            .cloned()
            .collect(),
        None => sub.sub_subcategories.clone(),
    }
}

/// Products whose name or description contains `query`
pub fn filter_products(products: &[Arc<Product>], query: &str) -> Vec<Arc<Product>> {
    match needle(query) {
        Some(needle) => products
            .iter()
            .filter(|p| p.matches(&needle))
            .cloned()
            .collect(),
        None => products.to_vec(),
    }
}

/// The other products of the same sub-subcategory
pub fn related_products(sub_sub: &SubSubcategory, product_id: i64) -> Vec<Arc<Product>> {
    sub_sub
        .products
        .iter()
        .filter(|p| p.id != product_id)
        .cloned()
        .collect()
}

// =============================================================================
// Sorting
// =============================================================================

/// Product ordering offered by the product list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
}

impl ProductSort {
    /// Parse a sort key (`name-asc`, `name-desc`, `price-asc`, `price-desc`)
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "name-asc" => Some(Self::NameAsc),
            "name-desc" => Some(Self::NameDesc),
            "price-asc" => Some(Self::PriceAsc),
            "price-desc" => Some(Self::PriceDesc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }
}

/// Accent and case insensitive sort key: NFD, combining marks removed,
/// lower-cased.
pub fn collation_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Stable sort by `key`; an unknown key keeps the input order.
pub fn sort_products(products: &[Arc<Product>], key: &str) -> Vec<Arc<Product>> {
    match ProductSort::parse(key) {
        Some(sort) => sort_products_by(products, sort),
        None => {
            if !key.is_empty() {
                tracing::debug!(key, "Unknown product sort key, keeping order");
            }
            products.to_vec()
        }
    }
}

/// Stable sort by a parsed ordering
pub fn sort_products_by(products: &[Arc<Product>], sort: ProductSort) -> Vec<Arc<Product>> {
    let mut sorted = products.to_vec();
    match sort {
        ProductSort::NameAsc => sorted.sort_by(|a, b| compare_names(&a.name, &b.name)),
        ProductSort::NameDesc => sorted.sort_by(|a, b| compare_names(&b.name, &a.name)),
        ProductSort::PriceAsc => sorted.sort_by(|a, b| a.price.cmp(&b.price)),
        ProductSort::PriceDesc => sorted.sort_by(|a, b| b.price.cmp(&a.price)),
    }
    sorted
}

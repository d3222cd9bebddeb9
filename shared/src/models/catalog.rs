//! Catalog tree models
//!
//! The catalog is a fixed four level tree:
//! Category → Subcategory → SubSubcategory → Product.
//!
//! Child collections hold `Arc`s so that copying a parent copies pointers only.
//! A mutation rebuilds the nodes along one root-to-leaf path and every other
//! subtree stays shared with the previous tree.

use super::product::Product;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Category entity (level 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique among root categories; the lookup key for mutations
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub subcategories: Vec<Arc<Subcategory>>,
}

/// Subcategory entity (level 2)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub features: Vec<String>,
    /// Name of the owning category (denormalized, containment is authoritative)
    #[serde(default)]
    pub parent_id: String,
    #[serde(default)]
    pub sub_subcategories: Vec<Arc<SubSubcategory>>,
}

/// Sub-subcategory entity (level 3)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubSubcategory {
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub features: Vec<String>,
    /// Name of the owning subcategory
    #[serde(default)]
    pub parent_id: String,
    #[serde(default)]
    pub products: Vec<Arc<Product>>,
}

/// The whole catalog: the ordered root sequence of categories
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    pub categories: Vec<Arc<Category>>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories: categories.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category(&self, name: &str) -> Option<&Arc<Category>> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Iterate every product in the tree, depth first
    pub fn products(&self) -> impl Iterator<Item = &Arc<Product>> {
        self.categories
            .iter()
            .flat_map(|c| c.subcategories.iter())
            .flat_map(|s| s.sub_subcategories.iter())
            .flat_map(|ss| ss.products.iter())
    }
}

impl Category {
    pub fn subcategory(&self, name: &str) -> Option<&Arc<Subcategory>> {
        self.subcategories.iter().find(|s| s.name == name)
    }
}

impl Subcategory {
    pub fn sub_subcategory(&self, name: &str) -> Option<&Arc<SubSubcategory>> {
        self.sub_subcategories.iter().find(|s| s.name == name)
    }
}

impl SubSubcategory {
    pub fn product(&self, id: i64) -> Option<&Arc<Product>> {
        self.products.iter().find(|p| p.id == id)
    }
}

/// The three grouping levels of the tree (everything above products)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeLevel {
    Category,
    Subcategory,
    #[serde(rename = "Sub-Subcategory")]
    SubSubcategory,
}

impl NodeLevel {
    pub const ALL: [NodeLevel; 3] = [
        NodeLevel::Category,
        NodeLevel::Subcategory,
        NodeLevel::SubSubcategory,
    ];

    /// Display label, also the stem of spreadsheet column names
    pub fn label(&self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Subcategory => "Subcategory",
            Self::SubSubcategory => "Sub-Subcategory",
        }
    }

    /// Plural used in export file names
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Category => "categories",
            Self::Subcategory => "subcategories",
            Self::SubSubcategory => "sub-subcategories",
        }
    }

    /// The level whose selection a mutation at this level requires
    pub fn parent(&self) -> Option<NodeLevel> {
        match self {
            Self::Category => None,
            Self::Subcategory => Some(Self::Category),
            Self::SubSubcategory => Some(Self::Subcategory),
        }
    }

    /// Parse a label case-insensitively (`"sub-subcategory"`, `"Category"`, ...)
    pub fn parse(raw: &str) -> Option<NodeLevel> {
        let normalized = raw.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "category" | "categories" => Some(Self::Category),
            "subcategory" | "subcategories" => Some(Self::Subcategory),
            "sub-subcategory" | "sub-subcategories" | "subsubcategory" => {
                Some(Self::SubSubcategory)
            }
            _ => None,
        }
    }
}

impl fmt::Display for NodeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

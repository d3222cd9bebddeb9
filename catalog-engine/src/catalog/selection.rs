//! Selection state machine
//!
//! The selection is a chain of up to four node references, always an
//! ancestor/descendant path of one tree. States are ordered
//! `None < Category < Subcategory < SubSubcategory < Product`; selecting at a
//! level clears every deeper level and [`Selection::back`] drops the deepest.
//!
//! Node references are `Arc`s into a specific tree. After a mutation the
//! selection is re-resolved by key path against the new tree, truncating at
//! the first level that no longer exists.

use shared::error::{AppError, AppResult};
use shared::models::{Catalog, Category, NodeLevel, Product, SubSubcategory, Subcategory};
use std::sync::Arc;

use super::tree::Keyed;

/// Depth of the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SelectionLevel {
    None,
    Category,
    Subcategory,
    SubSubcategory,
    Product,
}

impl From<NodeLevel> for SelectionLevel {
    fn from(level: NodeLevel) -> Self {
        match level {
            NodeLevel::Category => Self::Category,
            NodeLevel::Subcategory => Self::Subcategory,
            NodeLevel::SubSubcategory => Self::SubSubcategory,
        }
    }
}

/// Keys of the selected nodes, root first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionPath {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub sub_subcategory: Option<String>,
    pub product: Option<i64>,
}

impl SelectionPath {
    /// Keep only the levels up to and including `level`
    pub fn truncated(mut self, level: SelectionLevel) -> Self {
        if level < SelectionLevel::Product {
            self.product = None;
        }
        if level < SelectionLevel::SubSubcategory {
            self.sub_subcategory = None;
        }
        if level < SelectionLevel::Subcategory {
            self.subcategory = None;
        }
        if level < SelectionLevel::Category {
            self.category = None;
        }
        self
    }
}

/// Current selection path
///
/// Fields are private: every constructor keeps the chain consistent, a deeper
/// level is only ever set when all shallower levels are.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    category: Option<Arc<Category>>,
    subcategory: Option<Arc<Subcategory>>,
    sub_subcategory: Option<Arc<SubSubcategory>>,
    product: Option<Arc<Product>>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> Option<&Arc<Category>> {
        self.category.as_ref()
    }

    pub fn subcategory(&self) -> Option<&Arc<Subcategory>> {
        self.subcategory.as_ref()
    }

    pub fn sub_subcategory(&self) -> Option<&Arc<SubSubcategory>> {
        self.sub_subcategory.as_ref()
    }

    pub fn product(&self) -> Option<&Arc<Product>> {
        self.product.as_ref()
    }

    /// Deepest selected level
    pub fn level(&self) -> SelectionLevel {
        if self.product.is_some() {
            SelectionLevel::Product
        } else if self.sub_subcategory.is_some() {
            SelectionLevel::SubSubcategory
        } else if self.subcategory.is_some() {
            SelectionLevel::Subcategory
        } else if self.category.is_some() {
            SelectionLevel::Category
        } else {
            SelectionLevel::None
        }
    }

    pub fn path(&self) -> SelectionPath {
        SelectionPath {
            category: self.category.as_ref().map(|c| c.name.clone()),
            subcategory: self.subcategory.as_ref().map(|s| s.name.clone()),
            sub_subcategory: self.sub_subcategory.as_ref().map(|s| s.name.clone()),
            product: self.product.as_ref().map(|p| p.id),
        }
    }

    /// Names along the selected path, root first
    pub fn breadcrumbs(&self) -> Vec<String> {
        let mut crumbs = Vec::with_capacity(4);
        if let Some(c) = &self.category {
            crumbs.push(c.name.clone());
        }
        if let Some(s) = &self.subcategory {
            crumbs.push(s.name.clone());
        }
        if let Some(ss) = &self.sub_subcategory {
            crumbs.push(ss.name.clone());
        }
        if let Some(p) = &self.product {
            crumbs.push(p.name.clone());
        }
        crumbs
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Resolve a key path against `catalog`, stopping at the first level that
    /// is unset or no longer present.
    pub fn from_path(catalog: &Catalog, path: &SelectionPath) -> Self {
        let mut selection = Selection::default();

        let Some(category) = path.category.as_deref().and_then(|k| catalog.category(k)) else {
            return selection;
        };
        selection.category = Some(Arc::clone(category));

        let Some(sub) = path.subcategory.as_deref().and_then(|k| category.subcategory(k)) else {
            return selection;
        };
        selection.subcategory = Some(Arc::clone(sub));

        let Some(sub_sub) = path
            .sub_subcategory
            .as_deref()
            .and_then(|k| sub.sub_subcategory(k))
        else {
            return selection;
        };
        selection.sub_subcategory = Some(Arc::clone(sub_sub));

        if let Some(product) = path.product.and_then(|id| sub_sub.product(id)) {
            selection.product = Some(Arc::clone(product));
        }
        selection
    }

    /// Re-resolve this selection against a (possibly newer) tree
    pub fn resolve(&self, catalog: &Catalog) -> Self {
        let resolved = Self::from_path(catalog, &self.path());
        if resolved.level() < self.level() {
            tracing::debug!(
                from = ?self.level(),
                to = ?resolved.level(),
                "Selection truncated after tree change"
            );
        }
        resolved
    }

    /// Whether every selected node is reference-identical to the node at the
    /// same path in `catalog`.
    pub fn is_consistent_with(&self, catalog: &Catalog) -> bool {
        let resolved = Self::from_path(catalog, &self.path());
        resolved.level() == self.level()
            && same(&self.category, &resolved.category)
            && same(&self.subcategory, &resolved.subcategory)
            && same(&self.sub_subcategory, &resolved.sub_subcategory)
            && same(&self.product, &resolved.product)
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Select a root category, clearing every deeper level
    pub fn select_category(&self, catalog: &Catalog, name: &str) -> AppResult<Self> {
        let category = catalog.category(name).ok_or_else(|| Category::missing(name))?;
        Ok(Selection {
            category: Some(Arc::clone(category)),
            ..Selection::default()
        })
    }

    /// Select a subcategory of the selected category
    pub fn select_subcategory(&self, name: &str) -> AppResult<Self> {
        let category = self.category.as_ref().ok_or_else(|| {
            AppError::missing_parent(NodeLevel::Subcategory.label(), NodeLevel::Category.label())
        })?;
        let sub = category
            .subcategory(name)
            .ok_or_else(|| Subcategory::missing(name))?;
        Ok(Selection {
            category: Some(Arc::clone(category)),
            subcategory: Some(Arc::clone(sub)),
            ..Selection::default()
        })
    }

    /// Select a sub-subcategory of the selected subcategory
    pub fn select_sub_subcategory(&self, name: &str) -> AppResult<Self> {
        let sub = self.subcategory.as_ref().ok_or_else(|| {
            AppError::missing_parent(
                NodeLevel::SubSubcategory.label(),
                NodeLevel::Subcategory.label(),
            )
        })?;
        let sub_sub = sub
            .sub_subcategory(name)
            .ok_or_else(|| SubSubcategory::missing(name))?;
        Ok(Selection {
            category: self.category.clone(),
            subcategory: Some(Arc::clone(sub)),
            sub_subcategory: Some(Arc::clone(sub_sub)),
            product: None,
        })
    }

    /// Select a product of the selected sub-subcategory
    pub fn select_product(&self, id: i64) -> AppResult<Self> {
        let sub_sub = self.sub_subcategory.as_ref().ok_or_else(|| {
            AppError::missing_parent("Product", NodeLevel::SubSubcategory.label())
        })?;
        let product = sub_sub.product(id).ok_or_else(|| Product::missing(&id))?;
        Ok(Selection {
            product: Some(Arc::clone(product)),
            ..self.clone()
        })
    }

    /// Clear exactly the deepest selected level
    pub fn back(&self) -> Self {
        let mut next = self.clone();
        match self.level() {
            SelectionLevel::Product => next.product = None,
            SelectionLevel::SubSubcategory => next.sub_subcategory = None,
            SelectionLevel::Subcategory => next.subcategory = None,
            SelectionLevel::Category => next.category = None,
            SelectionLevel::None => {}
        }
        next
    }
}

fn same<T>(a: &Option<Arc<T>>, b: &Option<Arc<T>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

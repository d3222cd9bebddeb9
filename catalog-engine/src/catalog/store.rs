//! CatalogStore - the catalog tree plus the current selection
//!
//! A value type: every operation takes `&self` and returns a new store, the
//! caller swaps it in as one atomic state replacement. Trees are never
//! mutated in place, so an old store stays a consistent snapshot.
//!
//! # Selection following
//!
//! After each mutation the selection is rebuilt from its key path against the
//! new tree. Before resolving, the key at the mutated level is adjusted:
//!
//! - an edit that renames the selected node moves the key to the new name
//! - a single submission selects the submitted node, clearing deeper levels
//!   when that is a different node than before
//!
//! Levels whose key no longer resolves are cleared together with every
//! deeper level.

use super::draft::{NodeDraft, ProductDraft, Submission};
use super::ids::IdGenerator;
use super::mutation::{self, Ancestors};
use super::query;
use super::seed;
use super::selection::{Selection, SelectionLevel, SelectionPath};
use crate::core::Config;
use crate::transfer::{self, Row, SheetExport};
use serde::Serialize;
use shared::error::{AppError, AppResult};
use shared::models::{Catalog, Category, NodeLevel, Product, SubSubcategory, Subcategory};
use std::collections::HashSet;
use std::sync::Arc;

/// Node counts per level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub categories: usize,
    pub subcategories: usize,
    pub sub_subcategories: usize,
    pub products: usize,
}

impl CatalogStats {
    pub fn of(catalog: &Catalog) -> Self {
        let mut stats = CatalogStats {
            categories: catalog.categories.len(),
            ..Default::default()
        };
        for category in &catalog.categories {
            stats.subcategories += category.subcategories.len();
            for sub in &category.subcategories {
                stats.sub_subcategories += sub.sub_subcategories.len();
                for sub_sub in &sub.sub_subcategories {
                    stats.products += sub_sub.products.len();
                }
            }
        }
        stats
    }
}

#[derive(Debug, Clone)]
pub struct CatalogStore {
    catalog: Catalog,
    selection: Selection,
    placeholder_image: String,
    /// Every product id seen or issued this session
    issued_ids: HashSet<i64>,
}

impl CatalogStore {
    pub fn new(catalog: Catalog, placeholder_image: impl Into<String>) -> Self {
        let issued_ids = catalog.products().map(|p| p.id).collect();
        Self {
            catalog,
            selection: Selection::default(),
            placeholder_image: placeholder_image.into(),
            issued_ids,
        }
    }

    /// Store over the configured seed file, or the built-in demo catalog
    pub fn bootstrap(config: &Config) -> AppResult<Self> {
        let catalog = match &config.seed_path {
            Some(path) => seed::load_catalog(path)?,
            None => seed::bootstrap_catalog(&config.placeholder_image),
        };
        Ok(Self::new(catalog, config.placeholder_image.clone()))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn placeholder_image(&self) -> &str {
        &self.placeholder_image
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats::of(&self.catalog)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create or edit root categories
    pub fn upsert_category(
        &self,
        submission: &Submission<NodeDraft>,
        editing_key: Option<&str>,
    ) -> AppResult<Self> {
        self.upsert_nodes(NodeLevel::Category, submission, editing_key)
    }

    /// Create or edit subcategories of the selected category
    pub fn upsert_subcategory(
        &self,
        submission: &Submission<NodeDraft>,
        editing_key: Option<&str>,
    ) -> AppResult<Self> {
        self.upsert_nodes(NodeLevel::Subcategory, submission, editing_key)
    }

    /// Create or edit sub-subcategories of the selected subcategory
    pub fn upsert_sub_subcategory(
        &self,
        submission: &Submission<NodeDraft>,
        editing_key: Option<&str>,
    ) -> AppResult<Self> {
        self.upsert_nodes(NodeLevel::SubSubcategory, submission, editing_key)
    }

    /// Create or edit nodes at `level`, scoped to the selected ancestors
    pub fn upsert_nodes(
        &self,
        level: NodeLevel,
        submission: &Submission<NodeDraft>,
        editing_key: Option<&str>,
    ) -> AppResult<Self> {
        let out = mutation::upsert_nodes(
            &self.catalog,
            level,
            Ancestors::of(&self.selection),
            submission,
            editing_key,
            &self.placeholder_image,
        )?;

        let path = self.followed_path(level, submission, editing_key, out.edited.as_deref());
        let next = self.with_tree(out.parent, &path, self.issued_ids.clone());
        tracing::info!(
            level = level.label(),
            items = submission.len(),
            editing = editing_key.unwrap_or(""),
            selection = ?next.selection.level(),
            "Catalog nodes upserted"
        );
        Ok(next)
    }

    /// Create a product in the selected sub-subcategory, or replace the
    /// product `editing_id` there.
    pub fn upsert_product(
        &self,
        draft: &ProductDraft,
        editing_id: Option<i64>,
        ids: &mut dyn IdGenerator,
    ) -> AppResult<Self> {
        let out = mutation::upsert_product(
            &self.catalog,
            Ancestors::of(&self.selection),
            draft,
            editing_id,
            &self.placeholder_image,
            ids,
            &self.issued_ids,
        )?;

        let mut issued_ids = self.issued_ids.clone();
        issued_ids.insert(out.id);
        let next = self.with_tree(out.catalog, &self.selection.path(), issued_ids);
        tracing::info!(
            id = out.id,
            created = out.created,
            products = next.stats().products,
            "Product upserted"
        );
        Ok(next)
    }

    /// Decode-independent bulk import: turn rows into drafts for `level` and
    /// merge them as one batch. Returns the new store and the number of items.
    pub fn import_rows(&self, level: NodeLevel, rows: &[Row]) -> AppResult<(Self, usize)> {
        let drafts = transfer::import_bulk(
            level,
            rows,
            Ancestors::of(&self.selection),
            &self.placeholder_image,
        )?;
        let count = drafts.len();
        let next = self.upsert_nodes(level, &Submission::Batch(drafts), None)?;
        Ok((next, count))
    }

    fn with_tree(&self, catalog: Catalog, path: &SelectionPath, issued_ids: HashSet<i64>) -> Self {
        let selection = Selection::from_path(&catalog, path);
        debug_assert!(selection.is_consistent_with(&catalog));
        let next = Self {
            catalog,
            selection,
            placeholder_image: self.placeholder_image.clone(),
            issued_ids,
        };
        tracing::debug!(stats = ?next.stats(), "Catalog tree replaced");
        next
    }

    fn followed_path(
        &self,
        level: NodeLevel,
        submission: &Submission<NodeDraft>,
        editing_key: Option<&str>,
        edited: Option<&str>,
    ) -> SelectionPath {
        let mut path = self.selection.path();
        let changed = {
            let slot = match level {
                NodeLevel::Category => &mut path.category,
                NodeLevel::Subcategory => &mut path.subcategory,
                NodeLevel::SubSubcategory => &mut path.sub_subcategory,
            };
            if let (Some(key), Some(new_name)) = (editing_key, edited)
                && slot.as_deref() == Some(key)
            {
                *slot = Some(new_name.to_string());
            }
            match submission {
                Submission::Single(draft) => {
                    let name = draft.name.trim();
                    let changed = slot.as_deref() != Some(name);
                    *slot = Some(name.to_string());
                    changed
                }
                Submission::Batch(_) => false,
            }
        };
        if changed {
            path = path.truncated(SelectionLevel::from(level));
        }
        path
    }

    // =========================================================================
    // Selection
    // =========================================================================

    fn with_selection(&self, selection: Selection) -> Self {
        Self {
            selection,
            ..self.clone()
        }
    }

    pub fn select_category(&self, name: &str) -> AppResult<Self> {
        let selection = self.selection.select_category(&self.catalog, name)?;
        Ok(self.with_selection(selection))
    }

    pub fn select_subcategory(&self, name: &str) -> AppResult<Self> {
        let selection = self.selection.select_subcategory(name)?;
        Ok(self.with_selection(selection))
    }

    pub fn select_sub_subcategory(&self, name: &str) -> AppResult<Self> {
        let selection = self.selection.select_sub_subcategory(name)?;
        Ok(self.with_selection(selection))
    }

    pub fn select_product(&self, id: i64) -> AppResult<Self> {
        let selection = self.selection.select_product(id)?;
        Ok(self.with_selection(selection))
    }

    /// Clear the deepest selected level
    pub fn back(&self) -> Self {
        self.with_selection(self.selection.back())
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Root categories matching `query` at any depth
    pub fn filtered_categories(&self, query: &str) -> Vec<Arc<Category>> {
        query::filter_categories(&self.catalog.categories, query)
    }

    /// Subcategories of the selected category matching `query`
    pub fn visible_subcategories(&self, query: &str) -> Vec<Arc<Subcategory>> {
        self.selection
            .category()
            .map(|c| query::filter_subcategories(c, query))
            .unwrap_or_default()
    }

    /// Sub-subcategories of the selected subcategory matching `query`
    pub fn visible_sub_subcategories(&self, query: &str) -> Vec<Arc<SubSubcategory>> {
        self.selection
            .subcategory()
            .map(|s| query::filter_sub_subcategories(s, query))
            .unwrap_or_default()
    }

    /// Products of the selected sub-subcategory, filtered then sorted
    pub fn sorted_products(&self, query: &str, sort_key: &str) -> Vec<Arc<Product>> {
        self.selection
            .sub_subcategory()
            .map(|ss| query::sort_products(&query::filter_products(&ss.products, query), sort_key))
            .unwrap_or_default()
    }

    /// Siblings of the selected product
    pub fn related_products(&self) -> Vec<Arc<Product>> {
        match (self.selection.sub_subcategory(), self.selection.product()) {
            (Some(ss), Some(p)) => query::related_products(ss, p.id),
            _ => Vec::new(),
        }
    }

    /// Export the sibling group shown at `level`
    pub fn export(&self, level: NodeLevel) -> AppResult<SheetExport> {
        let export = match level {
            NodeLevel::Category => transfer::export_level(level, None, &self.catalog.categories),
            NodeLevel::Subcategory => {
                let category = self.selection.category().ok_or_else(|| {
                    AppError::missing_parent(level.label(), NodeLevel::Category.label())
                })?;
                transfer::export_level(level, Some(&category.name), &category.subcategories)
            }
            NodeLevel::SubSubcategory => {
                let sub = self.selection.subcategory().ok_or_else(|| {
                    AppError::missing_parent(level.label(), NodeLevel::Subcategory.label())
                })?;
                transfer::export_level(level, Some(&sub.name), &sub.sub_subcategories)
            }
        };
        Ok(export)
    }
}

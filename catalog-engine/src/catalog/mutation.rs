//! Tree mutations
//!
//! Pure functions from an old tree to a new one. Ancestors are addressed by
//! key; every draft is validated before anything is rebuilt, so a failed call
//! never produces a partial tree.

use super::draft::{NodeDraft, ProductDraft, Submission};
use super::ids::IdGenerator;
use super::selection::Selection;
use super::tree::{Branch, GroupUpsert, update_child, upsert_group};
use shared::error::{AppError, AppResult};
use shared::models::{Catalog, NodeLevel, Product};
use std::collections::HashSet;
use std::sync::Arc;

/// Keys of the ancestors a mutation is scoped to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ancestors<'a> {
    pub category: Option<&'a str>,
    pub subcategory: Option<&'a str>,
    pub sub_subcategory: Option<&'a str>,
}

impl<'a> Ancestors<'a> {
    pub fn new(
        category: Option<&'a str>,
        subcategory: Option<&'a str>,
        sub_subcategory: Option<&'a str>,
    ) -> Self {
        Self {
            category,
            subcategory,
            sub_subcategory,
        }
    }

    /// Ancestors named by the current selection
    pub fn of(selection: &'a Selection) -> Self {
        Self {
            category: selection.category().map(|c| c.name.as_str()),
            subcategory: selection.subcategory().map(|s| s.name.as_str()),
            sub_subcategory: selection.sub_subcategory().map(|s| s.name.as_str()),
        }
    }

    fn category_for(&self, level: &str) -> AppResult<&'a str> {
        self.category
            .ok_or_else(|| AppError::missing_parent(level, NodeLevel::Category.label()))
    }

    fn subcategory_for(&self, level: &str) -> AppResult<&'a str> {
        self.subcategory
            .ok_or_else(|| AppError::missing_parent(level, NodeLevel::Subcategory.label()))
    }

    fn sub_subcategory_for(&self, level: &str) -> AppResult<&'a str> {
        self.sub_subcategory
            .ok_or_else(|| AppError::missing_parent(level, NodeLevel::SubSubcategory.label()))
    }
}

/// Validate and trim every draft of a submission
pub fn normalize_submission(submission: &Submission<NodeDraft>) -> AppResult<Submission<NodeDraft>> {
    Ok(match submission {
        Submission::Single(draft) => Submission::Single(draft.normalized()?),
        Submission::Batch(drafts) => Submission::Batch(
            drafts
                .iter()
                .map(NodeDraft::normalized)
                .collect::<AppResult<Vec<_>>>()?,
        ),
    })
}

/// Merge or append root categories
pub fn upsert_categories(
    catalog: &Catalog,
    submission: &Submission<NodeDraft>,
    editing_key: Option<&str>,
    placeholder_image: &str,
) -> AppResult<GroupUpsert<Catalog>> {
    let submission = normalize_submission(submission)?;
    upsert_group(catalog, "", &submission, editing_key, placeholder_image)
}

/// Merge or append subcategories of `ancestors.category`
pub fn upsert_subcategories(
    catalog: &Catalog,
    ancestors: Ancestors<'_>,
    submission: &Submission<NodeDraft>,
    editing_key: Option<&str>,
    placeholder_image: &str,
) -> AppResult<GroupUpsert<Catalog>> {
    let label = NodeLevel::Subcategory.label();
    let category = ancestors.category_for(label)?;
    let submission = normalize_submission(submission)?;

    let mut edited = None;
    let catalog = update_child(catalog, category, |cat| {
        let out = upsert_group(cat, &cat.name, &submission, editing_key, placeholder_image)?;
        edited = out.edited;
        Ok(out.parent)
    })?;
    Ok(GroupUpsert {
        parent: catalog,
        edited,
    })
}

/// Merge or append sub-subcategories of `ancestors.subcategory`
pub fn upsert_sub_subcategories(
    catalog: &Catalog,
    ancestors: Ancestors<'_>,
    submission: &Submission<NodeDraft>,
    editing_key: Option<&str>,
    placeholder_image: &str,
) -> AppResult<GroupUpsert<Catalog>> {
    let label = NodeLevel::SubSubcategory.label();
    let category = ancestors.category_for(label)?;
    let subcategory = ancestors.subcategory_for(label)?;
    let submission = normalize_submission(submission)?;

    let mut edited = None;
    let catalog = update_child(catalog, category, |cat| {
        update_child(cat, subcategory, |sub| {
            let out = upsert_group(sub, &sub.name, &submission, editing_key, placeholder_image)?;
            edited = out.edited;
            Ok(out.parent)
        })
    })?;
    Ok(GroupUpsert {
        parent: catalog,
        edited,
    })
}

/// Dispatch a group submission to the mutation for `level`
pub fn upsert_nodes(
    catalog: &Catalog,
    level: NodeLevel,
    ancestors: Ancestors<'_>,
    submission: &Submission<NodeDraft>,
    editing_key: Option<&str>,
    placeholder_image: &str,
) -> AppResult<GroupUpsert<Catalog>> {
    match level {
        NodeLevel::Category => {
            upsert_categories(catalog, submission, editing_key, placeholder_image)
        }
        NodeLevel::Subcategory => {
            upsert_subcategories(catalog, ancestors, submission, editing_key, placeholder_image)
        }
        NodeLevel::SubSubcategory => {
            upsert_sub_subcategories(catalog, ancestors, submission, editing_key, placeholder_image)
        }
    }
}

/// Result of [`upsert_product`]
#[derive(Debug)]
pub struct ProductUpsert {
    pub catalog: Catalog,
    /// Id of the created or replaced product
    pub id: i64,
    pub created: bool,
}

/// Replace the product `editing_id` or append a new one to
/// `ancestors.sub_subcategory`.
///
/// New ids avoid every id in the tree and every id in `retired`.
pub fn upsert_product(
    catalog: &Catalog,
    ancestors: Ancestors<'_>,
    draft: &ProductDraft,
    editing_id: Option<i64>,
    placeholder_image: &str,
    ids: &mut dyn IdGenerator,
    retired: &HashSet<i64>,
) -> AppResult<ProductUpsert> {
    let label = "Product";
    let category = ancestors.category_for(label)?;
    let subcategory = ancestors.subcategory_for(label)?;
    let sub_subcategory = ancestors.sub_subcategory_for(label)?;
    let draft = draft.normalized()?;

    let mut assigned = None;
    let catalog = update_child(catalog, category, |cat| {
        update_child(cat, subcategory, |sub| {
            update_child(sub, sub_subcategory, |sub_sub| match editing_id {
                Some(id) => {
                    let updated = update_child(sub_sub, &id, |current| {
                        Ok(Product {
                            id: current.id,
                            name: draft.name.clone(),
                            description: draft.description.clone(),
                            price: draft.price,
                            features: draft.features.clone(),
                            image: draft.image.clone().unwrap_or_else(|| current.image.clone()),
                        })
                    })?;
                    assigned = Some(id);
                    Ok(updated)
                }
                None => {
                    let mut taken: HashSet<i64> = catalog.products().map(|p| p.id).collect();
                    taken.extend(retired.iter().copied());
                    let id = ids.next_id(&taken);
                    let mut products = sub_sub.children().to_vec();
                    products.push(Arc::new(Product {
                        id,
                        name: draft.name.clone(),
                        description: draft.description.clone(),
                        price: draft.price,
                        features: draft.features.clone(),
                        image: draft
                            .image
                            .clone()
                            .unwrap_or_else(|| placeholder_image.to_string()),
                    }));
                    assigned = Some(id);
                    Ok(sub_sub.with_children(products))
                }
            })
        })
    })?;

    let id = assigned.ok_or_else(|| AppError::internal("Product mutation assigned no id"))?;
    Ok(ProductUpsert {
        catalog,
        id,
        created: editing_id.is_none(),
    })
}

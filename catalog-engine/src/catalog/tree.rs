//! Path-copy primitives over the catalog tree
//!
//! Every level of the tree is a [`Branch`] whose children are keyed nodes.
//! [`update_child`] rebuilds one parent with one rewritten child and shares all
//! other children by pointer; deeper updates are nested calls, so the nodes on
//! the root-to-target path are the only ones ever copied.
//!
//! [`upsert_group`] applies name-keyed merge/append semantics to one sibling
//! group of category-like nodes.

use super::draft::{NodeDraft, Submission};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Catalog, Category, NodeLevel, Product, SubSubcategory, Subcategory};
use std::sync::Arc;

// =============================================================================
// Traits
// =============================================================================

/// A node with an identity key among its siblings
pub trait Keyed {
    type Key: ?Sized + PartialEq;

    fn key(&self) -> &Self::Key;

    /// Error reported when no sibling carries `key`
    fn missing(key: &Self::Key) -> AppError;
}

/// A node that owns an ordered child collection
pub trait Branch {
    type Child: Keyed;

    fn children(&self) -> &[Arc<Self::Child>];

    /// Copy of `self` with the child collection replaced
    fn with_children(&self, children: Vec<Arc<Self::Child>>) -> Self;
}

/// A category-like node that can be created from or merged with a [`NodeDraft`]
pub trait GroupNode: Keyed<Key = str> {
    const LEVEL: NodeLevel;

    /// New node with an empty child collection
    fn from_draft(draft: &NodeDraft, parent_id: &str, placeholder_image: &str) -> Self;

    /// Field-wise merge: name, image and features come from the draft, the
    /// child collection is kept. Children are restamped when the name changes.
    fn merged(&self, draft: &NodeDraft, parent_id: &str) -> Self;
}

// =============================================================================
// Keyed / Branch impls
// =============================================================================

impl Keyed for Category {
    type Key = str;

    fn key(&self) -> &str {
        &self.name
    }

    fn missing(key: &str) -> AppError {
        AppError::with_message(
            ErrorCode::CategoryNotFound,
            format!("Category '{}' not found", key),
        )
    }
}

impl Keyed for Subcategory {
    type Key = str;

    fn key(&self) -> &str {
        &self.name
    }

    fn missing(key: &str) -> AppError {
        AppError::with_message(
            ErrorCode::SubcategoryNotFound,
            format!("Subcategory '{}' not found", key),
        )
    }
}

impl Keyed for SubSubcategory {
    type Key = str;

    fn key(&self) -> &str {
        &self.name
    }

    fn missing(key: &str) -> AppError {
        AppError::with_message(
            ErrorCode::SubSubcategoryNotFound,
            format!("Sub-subcategory '{}' not found", key),
        )
    }
}

impl Keyed for Product {
    type Key = i64;

    fn key(&self) -> &i64 {
        &self.id
    }

    fn missing(key: &i64) -> AppError {
        AppError::with_message(
            ErrorCode::ProductNotFound,
            format!("Product {} not found", key),
        )
        .with_detail("id", *key)
    }
}

impl Branch for Catalog {
    type Child = Category;

    fn children(&self) -> &[Arc<Category>] {
        &self.categories
    }

    fn with_children(&self, children: Vec<Arc<Category>>) -> Self {
        Catalog {
            categories: children,
        }
    }
}

impl Branch for Category {
    type Child = Subcategory;

    fn children(&self) -> &[Arc<Subcategory>] {
        &self.subcategories
    }

    fn with_children(&self, children: Vec<Arc<Subcategory>>) -> Self {
        Category {
            name: self.name.clone(),
            image: self.image.clone(),
            features: self.features.clone(),
            subcategories: children,
        }
    }
}

impl Branch for Subcategory {
    type Child = SubSubcategory;

    fn children(&self) -> &[Arc<SubSubcategory>] {
        &self.sub_subcategories
    }

    fn with_children(&self, children: Vec<Arc<SubSubcategory>>) -> Self {
        Subcategory {
            name: self.name.clone(),
            image: self.image.clone(),
            features: self.features.clone(),
            parent_id: self.parent_id.clone(),
            sub_subcategories: children,
        }
    }
}

impl Branch for SubSubcategory {
    type Child = Product;

    fn children(&self) -> &[Arc<Product>] {
        &self.products
    }

    fn with_children(&self, children: Vec<Arc<Product>>) -> Self {
        SubSubcategory {
            name: self.name.clone(),
            image: self.image.clone(),
            features: self.features.clone(),
            parent_id: self.parent_id.clone(),
            products: children,
        }
    }
}

// =============================================================================
// GroupNode impls
// =============================================================================

fn merged_image(current: &str, draft: &NodeDraft) -> String {
    draft
        .image
        .clone()
        .unwrap_or_else(|| current.to_string())
}

impl GroupNode for Category {
    const LEVEL: NodeLevel = NodeLevel::Category;

    fn from_draft(draft: &NodeDraft, _parent_id: &str, placeholder_image: &str) -> Self {
        Category {
            name: draft.name.clone(),
            image: draft.image_or(placeholder_image),
            features: draft.features.clone(),
            subcategories: Vec::new(),
        }
    }

    fn merged(&self, draft: &NodeDraft, _parent_id: &str) -> Self {
        let subcategories = if draft.name == self.name {
            self.subcategories.clone()
        } else {
            self.subcategories
                .iter()
                .map(|s| {
                    Arc::new(Subcategory {
                        parent_id: draft.name.clone(),
                        ..Subcategory::clone(s)
                    })
                })
                .collect()
        };
        Category {
            name: draft.name.clone(),
            image: merged_image(&self.image, draft),
            features: draft.features.clone(),
            subcategories,
        }
    }
}

impl GroupNode for Subcategory {
    const LEVEL: NodeLevel = NodeLevel::Subcategory;

    fn from_draft(draft: &NodeDraft, parent_id: &str, placeholder_image: &str) -> Self {
        Subcategory {
            name: draft.name.clone(),
            image: draft.image_or(placeholder_image),
            features: draft.features.clone(),
            parent_id: parent_id.to_string(),
            sub_subcategories: Vec::new(),
        }
    }

    fn merged(&self, draft: &NodeDraft, parent_id: &str) -> Self {
        let sub_subcategories = if draft.name == self.name {
            self.sub_subcategories.clone()
        } else {
            self.sub_subcategories
                .iter()
                .map(|s| {
                    Arc::new(SubSubcategory {
                        parent_id: draft.name.clone(),
                        ..SubSubcategory::clone(s)
                    })
                })
                .collect()
        };
        Subcategory {
            name: draft.name.clone(),
            image: merged_image(&self.image, draft),
            features: draft.features.clone(),
            parent_id: parent_id.to_string(),
            sub_subcategories,
        }
    }
}

impl GroupNode for SubSubcategory {
    const LEVEL: NodeLevel = NodeLevel::SubSubcategory;

    fn from_draft(draft: &NodeDraft, parent_id: &str, placeholder_image: &str) -> Self {
        SubSubcategory {
            name: draft.name.clone(),
            image: draft.image_or(placeholder_image),
            features: draft.features.clone(),
            parent_id: parent_id.to_string(),
            products: Vec::new(),
        }
    }

    fn merged(&self, draft: &NodeDraft, parent_id: &str) -> Self {
        SubSubcategory {
            name: draft.name.clone(),
            image: merged_image(&self.image, draft),
            features: draft.features.clone(),
            parent_id: parent_id.to_string(),
            products: self.products.clone(),
        }
    }
}

// =============================================================================
// Path copy
// =============================================================================

/// Rebuild `parent` with the child keyed `key` replaced by `f(child)`.
///
/// Siblings of the rewritten child are shared with `parent`.
pub fn update_child<P, F>(
    parent: &P,
    key: &<P::Child as Keyed>::Key,
    f: F,
) -> AppResult<P>
where
    P: Branch,
    F: FnOnce(&P::Child) -> AppResult<P::Child>,
{
    let children = parent.children();
    let idx = children
        .iter()
        .position(|c| c.key() == key)
        .ok_or_else(|| <P::Child as Keyed>::missing(key))?;

    let updated = f(&children[idx])?;

    let mut next = children.to_vec();
    next[idx] = Arc::new(updated);
    Ok(parent.with_children(next))
}

/// Result of [`upsert_group`]
#[derive(Debug)]
pub struct GroupUpsert<P> {
    pub parent: P,
    /// Final name of the node addressed by the editing key, if it was edited
    pub edited: Option<String>,
}

/// Merge or append every draft of `submission` into the children of `parent`.
///
/// - `editing_key` naming an existing child: that child is merged in place.
/// - Otherwise the draft is appended, unless a sibling already has its name:
///   single submissions fail with `DuplicateName`, batch items merge into the
///   existing sibling (later rows win).
/// - Renaming the edited child onto another sibling's name is `DuplicateName`.
///
/// Drafts are applied in input order.
pub fn upsert_group<P>(
    parent: &P,
    parent_id: &str,
    submission: &Submission<NodeDraft>,
    editing_key: Option<&str>,
    placeholder_image: &str,
) -> AppResult<GroupUpsert<P>>
where
    P: Branch,
    P::Child: GroupNode,
{
    let level = <P::Child as GroupNode>::LEVEL;
    let mut children = parent.children().to_vec();
    let mut edited_name: Option<String> = None;

    for draft in submission.items() {
        // The edited node is tracked by its current name, which changes
        // after a rename within the same batch.
        let edit_target = edited_name
            .as_deref()
            .or(editing_key)
            .and_then(|k| children.iter().position(|c| c.key() == k));

        let collision = children.iter().position(|c| c.key() == draft.name.as_str());

        match (edit_target, collision) {
            (Some(idx), Some(other)) if other != idx => {
                return Err(AppError::duplicate_name(level.label(), &draft.name));
            }
            (Some(idx), _) => {
                children[idx] = Arc::new(children[idx].merged(draft, parent_id));
                edited_name = Some(draft.name.clone());
            }
            (None, Some(existing)) => {
                if submission.is_single() {
                    return Err(AppError::duplicate_name(level.label(), &draft.name));
                }
                tracing::debug!(
                    level = level.label(),
                    name = %draft.name,
                    "Batch item matches an existing sibling, merging"
                );
                children[existing] = Arc::new(children[existing].merged(draft, parent_id));
            }
            (None, None) => {
                children.push(Arc::new(<P::Child as GroupNode>::from_draft(
                    draft,
                    parent_id,
                    placeholder_image,
                )));
            }
        }
    }

    Ok(GroupUpsert {
        parent: parent.with_children(children),
        edited: edited_name,
    })
}

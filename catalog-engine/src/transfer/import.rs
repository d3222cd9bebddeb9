//! Bulk import: decoded rows to node drafts
//!
//! Pure transform, the tree is not touched. The drafts are merged by the
//! caller as one batch submission.

use super::spreadsheet::Row;
use crate::catalog::draft::NodeDraft;
use crate::catalog::mutation::Ancestors;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::NodeLevel;
use shared::util::split_list;
use std::collections::BTreeSet;

/// Name columns accepted for `level`, in lookup order
pub fn expected_name_columns(level: NodeLevel) -> Vec<String> {
    let label = level.label();
    let lower = label.to_lowercase();
    vec![
        format!("{} Name", label),
        format!("{} name", lower),
        label.to_string(),
        lower,
        "Name".to_string(),
        "name".to_string(),
    ]
}

fn first_value<'a>(row: &'a Row, columns: &[&str]) -> Option<&'a str> {
    columns
        .iter()
        .filter_map(|c| row.get(*c))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
}

fn parent_for(level: NodeLevel, ancestors: Ancestors<'_>) -> AppResult<Option<String>> {
    let missing = |parent: NodeLevel| {
        AppError::missing_parent(level.label(), parent.label())
    };
    match level {
        NodeLevel::Category => Ok(None),
        NodeLevel::Subcategory => ancestors
            .category
            .map(|c| Some(c.to_string()))
            .ok_or_else(|| missing(NodeLevel::Category)),
        NodeLevel::SubSubcategory => {
            ancestors.category.ok_or_else(|| missing(NodeLevel::Category))?;
            ancestors
                .subcategory
                .map(|s| Some(s.to_string()))
                .ok_or_else(|| missing(NodeLevel::Subcategory))
        }
    }
}

/// Build drafts for `level` from decoded rows.
///
/// - The name is the first non-blank value among [`expected_name_columns`];
///   rows without one are dropped.
/// - `Features`/`features` is comma split, blanks removed.
/// - `Image`/`image` falls back to `placeholder_image`.
/// - `parent_id` is the selected ancestor's name.
///
/// Fails when no header matches a name column or when no row yields a draft;
/// both errors carry the expected and found columns.
pub fn import_bulk(
    level: NodeLevel,
    rows: &[Row],
    ancestors: Ancestors<'_>,
    placeholder_image: &str,
) -> AppResult<Vec<NodeDraft>> {
    let parent_id = parent_for(level, ancestors)?;

    let expected = expected_name_columns(level);
    let expected_refs: Vec<&str> = expected.iter().map(String::as_str).collect();
    let found: BTreeSet<&str> = rows
        .iter()
        .flat_map(|r| r.keys().map(String::as_str))
        .collect();

    if !found.iter().any(|h| expected_refs.contains(h)) {
        let found_list = if found.is_empty() {
            "none".to_string()
        } else {
            found.iter().copied().collect::<Vec<_>>().join(", ")
        };
        return Err(AppError::with_message(
            ErrorCode::NoNameColumn,
            format!(
                "Invalid file format. Expected a column named one of: {}. Found: {}",
                expected.join(", "),
                found_list
            ),
        )
        .with_detail("expected", expected.clone())
        .with_detail("found", found.iter().map(|s| s.to_string()).collect::<Vec<_>>()));
    }

    let mut dropped = 0usize;
    let drafts: Vec<NodeDraft> = rows
        .iter()
        .filter_map(|row| {
            let Some(name) = first_value(row, &expected_refs) else {
                dropped += 1;
                return None;
            };
            let features = first_value(row, &["Features", "features"])
                .map(split_list)
                .unwrap_or_default();
            let image = first_value(row, &["Image", "image"]).unwrap_or(placeholder_image);
            Some(NodeDraft {
                name: name.to_string(),
                image: Some(image.to_string()),
                features,
                parent_id: parent_id.clone(),
            })
        })
        .collect();

    if dropped > 0 {
        tracing::warn!(level = level.label(), dropped, "Rows without a name were skipped");
    }

    if drafts.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::NoValidRows,
            format!(
                "No valid {} entries found. Ensure the '{}' column contains non-empty names.",
                level.label().to_lowercase(),
                expected[0]
            ),
        )
        .with_detail("expected", expected.clone())
        .with_detail("found", found.iter().map(|s| s.to_string()).collect::<Vec<_>>()));
    }

    tracing::debug!(level = level.label(), items = drafts.len(), "Rows imported");
    Ok(drafts)
}

//! Sibling group export
//!
//! One row per node with the columns `"{Level} Name"`, `"Image"` and
//! `"Features"` (comma joined). The import side reads the same columns back.

use super::spreadsheet::Row;
use shared::models::{Category, NodeLevel, SubSubcategory, Subcategory};
use std::sync::Arc;

pub const IMAGE_COLUMN: &str = "Image";
pub const FEATURES_COLUMN: &str = "Features";

/// Fields a node contributes to an export row
pub trait SheetNode {
    fn name(&self) -> &str;
    fn image(&self) -> &str;
    fn features(&self) -> &[String];
}

macro_rules! impl_sheet_node {
    ($($ty:ty),*) => {
        $(
            impl SheetNode for $ty {
                fn name(&self) -> &str {
                    &self.name
                }

                fn image(&self) -> &str {
                    &self.image
                }

                fn features(&self) -> &[String] {
                    &self.features
                }
            }
        )*
    };
}

impl_sheet_node!(Category, Subcategory, SubSubcategory);

/// `"{Level} Name"`
pub fn name_column(level: NodeLevel) -> String {
    format!("{} Name", level.label())
}

/// Column order of an export sheet
pub fn export_columns(level: NodeLevel) -> Vec<String> {
    vec![
        name_column(level),
        IMAGE_COLUMN.to_string(),
        FEATURES_COLUMN.to_string(),
    ]
}

pub fn export_rows<N: SheetNode>(level: NodeLevel, nodes: &[Arc<N>]) -> Vec<Row> {
    let name_col = name_column(level);
    nodes
        .iter()
        .map(|node| {
            let mut row = Row::new();
            row.insert(name_col.clone(), node.name().to_string());
            row.insert(IMAGE_COLUMN.to_string(), node.image().to_string());
            row.insert(FEATURES_COLUMN.to_string(), node.features().join(", "));
            row
        })
        .collect()
}

/// `categories`, `{category}_subcategories` or `{subcategory}_sub-subcategories`
/// plus the extension.
pub fn export_file_name(level: NodeLevel, parent: Option<&str>, ext: &str) -> String {
    format!("{}.{}", file_stem(level, parent), ext)
}

fn file_stem(level: NodeLevel, parent: Option<&str>) -> String {
    match (level, parent) {
        (NodeLevel::Category, _) | (_, None) => level.plural().to_string(),
        (_, Some(parent)) => format!("{}_{}", parent, level.plural()),
    }
}

/// A ready-to-encode export
#[derive(Debug, Clone, PartialEq)]
pub struct SheetExport {
    pub level: NodeLevel,
    pub file_stem: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl SheetExport {
    pub fn file_name(&self, ext: &str) -> String {
        format!("{}.{}", self.file_stem, ext)
    }
}

pub fn export_level<N: SheetNode>(
    level: NodeLevel,
    parent: Option<&str>,
    nodes: &[Arc<N>],
) -> SheetExport {
    SheetExport {
        level,
        file_stem: file_stem(level, parent),
        columns: export_columns(level),
        rows: export_rows(level, nodes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(export_file_name(NodeLevel::Category, None, "csv"), "categories.csv");
        assert_eq!(
            export_file_name(NodeLevel::Subcategory, Some("Travel"), "xlsx"),
            "Travel_subcategories.xlsx"
        );
        assert_eq!(
            export_file_name(NodeLevel::SubSubcategory, Some("Air"), "csv"),
            "Air_sub-subcategories.csv"
        );
    }

    #[test]
    fn test_rows_join_features() {
        let nodes = vec![Arc::new(Category {
            name: "Travel".into(),
            image: "t.png".into(),
            features: vec!["Flights".into(), "Hotels".into()],
            subcategories: vec![],
        })];
        let rows = export_rows(NodeLevel::Category, &nodes);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Category Name"], "Travel");
        assert_eq!(rows[0]["Image"], "t.png");
        assert_eq!(rows[0]["Features"], "Flights, Hotels");

        let export = export_level(NodeLevel::Category, None, &nodes);
        assert_eq!(export.columns, vec!["Category Name", "Image", "Features"]);
        assert_eq!(export.file_name("csv"), "categories.csv");
    }
}

//! Spreadsheet import/export through the CSV codec

use catalog_engine::catalog::Ancestors;
use catalog_engine::catalog::seed::bootstrap_catalog;
use catalog_engine::transfer::upload::{FileCandidate, UploadPolicy};
use catalog_engine::transfer::{self, import_bulk};
use catalog_engine::{
    CatalogStore, CsvSpreadsheet, NodeDraft, Row, SheetFormat, SpreadsheetDecoder,
    SpreadsheetEncoder, Submission,
};
use shared::error::ErrorCode;
use shared::models::{Catalog, NodeLevel};
use std::io::Write;

const PLACEHOLDER: &str = "placeholder.png";

fn row(cells: &[(&str, &str)]) -> Row {
    cells
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_bulk_import_scenario() {
    let rows = vec![
        row(&[("Category Name", "A"), ("Features", "x, y")]),
        row(&[("Category Name", "")]),
        row(&[("name", "B")]),
    ];
    let items = import_bulk(NodeLevel::Category, &rows, Ancestors::default(), PLACEHOLDER).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "A");
    assert_eq!(items[0].features, vec!["x", "y"]);
    assert_eq!(items[1].name, "B");
    assert!(items[1].features.is_empty());
}

#[test]
fn test_category_round_trip_keeps_names_and_features() {
    let store = CatalogStore::new(bootstrap_catalog("seed.png"), PLACEHOLDER);
    let export = store.export(NodeLevel::Category).unwrap();
    assert_eq!(export.file_name("csv"), "categories.csv");

    let codec = CsvSpreadsheet::new();
    let bytes = codec.encode(&export.rows, &export.columns).unwrap();
    let rows = codec.decode(&bytes, SheetFormat::DelimitedText).unwrap();
    let items = import_bulk(NodeLevel::Category, &rows, Ancestors::default(), PLACEHOLDER).unwrap();

    let original: Vec<(String, Vec<String>)> = store
        .catalog()
        .categories
        .iter()
        .map(|c| (c.name.clone(), c.features.clone()))
        .collect();
    let imported: Vec<(String, Vec<String>)> = items
        .iter()
        .map(|d| (d.name.clone(), d.features.clone()))
        .collect();
    assert_eq!(original, imported);
    assert_eq!(items[0].image.as_deref(), Some("seed.png"));
}

#[test]
fn test_reimport_into_empty_catalog_rebuilds_groups() {
    let source = CatalogStore::new(bootstrap_catalog(PLACEHOLDER), PLACEHOLDER)
        .select_category("Operating Expenses")
        .unwrap();
    let export = source.export(NodeLevel::Subcategory).unwrap();
    assert_eq!(export.file_stem, "Operating Expenses_subcategories");

    let codec = CsvSpreadsheet::new();
    let rows = codec
        .decode(
            &codec.encode(&export.rows, &export.columns).unwrap(),
            SheetFormat::DelimitedText,
        )
        .unwrap();

    let target = CatalogStore::new(Catalog::default(), PLACEHOLDER)
        .upsert_category(
            &Submission::Single(NodeDraft::new("Operating Expenses", vec![])),
            None,
        )
        .unwrap();
    let (target, count) = target.import_rows(NodeLevel::Subcategory, &rows).unwrap();
    assert_eq!(count, 2);

    let category = target.catalog().category("Operating Expenses").unwrap();
    let names: Vec<&str> = category.subcategories.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Office Supplies", "Software Subscriptions"]);
    assert!(category.subcategories.iter().all(|s| s.parent_id == "Operating Expenses"));
    assert!(category.subcategories.iter().all(|s| s.sub_subcategories.is_empty()));
}

#[test]
fn test_import_merges_into_existing_siblings() {
    let store = CatalogStore::new(bootstrap_catalog(PLACEHOLDER), PLACEHOLDER)
        .select_category("Operating Expenses")
        .unwrap()
        .select_subcategory("Office Supplies")
        .unwrap();
    let rows = vec![
        row(&[("Sub-Subcategory Name", "Stationery"), ("Features", "Writing, Ink")]),
        row(&[("Sub-Subcategory Name", "Filing")]),
    ];
    let (next, count) = store.import_rows(NodeLevel::SubSubcategory, &rows).unwrap();
    assert_eq!(count, 2);

    let office = next.selection().subcategory().unwrap();
    let names: Vec<&str> = office.sub_subcategories.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Stationery", "Desk Accessories", "Filing"]);
    let stationery = office.sub_subcategory("Stationery").unwrap();
    assert_eq!(stationery.features, vec!["Writing", "Ink"]);
    assert_eq!(stationery.products.len(), 2);
}

#[test]
fn test_import_without_name_column_changes_nothing() {
    let store = CatalogStore::new(bootstrap_catalog(PLACEHOLDER), PLACEHOLDER);
    let rows = vec![row(&[("Title", "A"), ("Features", "x")])];
    let err = store.import_rows(NodeLevel::Category, &rows).unwrap_err();
    assert_eq!(err.code, ErrorCode::NoNameColumn);
    assert!(err.message.contains("Category Name"));
    assert!(err.message.contains("Found: Features, Title"));
    assert_eq!(store.stats().categories, 2);
}

#[test]
fn test_upload_check_then_decode_file() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "Name,Features").unwrap();
    writeln!(file, "Travel,\"Flights, Hotels\"").unwrap();

    let candidate = FileCandidate::from_path(file.path()).unwrap();
    let format = UploadPolicy::default().check_spreadsheet(&candidate).unwrap();
    assert_eq!(format, SheetFormat::DelimitedText);

    let bytes = std::fs::read(file.path()).unwrap();
    let rows = CsvSpreadsheet::new().decode(&bytes, format).unwrap();
    let items = transfer::import_bulk(NodeLevel::Category, &rows, Ancestors::default(), PLACEHOLDER)
        .unwrap();
    assert_eq!(items[0].name, "Travel");
    assert_eq!(items[0].features, vec!["Flights", "Hotels"]);
}

#[test]
fn test_comma_features_are_rejected_so_round_trip_holds() {
    let store = CatalogStore::new(Catalog::default(), PLACEHOLDER);
    let err = store
        .upsert_category(
            &Submission::Single(NodeDraft::new("Travel", vec!["Fast, cheap".into()])),
            None,
        )
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(store.stats().categories, 0);

    let store = store
        .upsert_category(
            &Submission::Single(NodeDraft::new(
                "Travel",
                vec!["Fast and cheap".into(), "Door-to-door".into()],
            )),
            None,
        )
        .unwrap();
    let export = store.export(NodeLevel::Category).unwrap();
    let codec = CsvSpreadsheet::new();
    let rows = codec
        .decode(
            &codec.encode(&export.rows, &export.columns).unwrap(),
            SheetFormat::DelimitedText,
        )
        .unwrap();
    let items = import_bulk(NodeLevel::Category, &rows, Ancestors::default(), PLACEHOLDER).unwrap();
    assert_eq!(items[0].features, store.catalog().categories[0].features);
}

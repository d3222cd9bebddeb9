//! Spreadsheet transfer
//!
//! - [`import`] - decoded rows to validated node drafts
//! - [`export`] - sibling groups to flat rows
//! - [`spreadsheet`] - decoder/encoder contracts and the CSV implementation
//! - [`upload`] - file checks before anything is decoded

pub mod export;
pub mod import;
pub mod spreadsheet;
pub mod upload;

pub use export::{SheetExport, SheetNode, export_file_name, export_level, export_rows};
pub use import::{expected_name_columns, import_bulk};
pub use spreadsheet::{CsvSpreadsheet, Row, SheetFormat, SpreadsheetDecoder, SpreadsheetEncoder};
pub use upload::{FileCandidate, UploadKind, UploadPolicy};

//! Spreadsheet decoder/encoder contracts
//!
//! The engine only sees rows: column header to cell text. How a file becomes
//! rows is up to the decoder. [`CsvSpreadsheet`] handles delimited text;
//! binary workbooks are reported as unsupported.

use shared::error::{AppError, AppResult, ErrorCode};
use std::collections::BTreeMap;
use std::path::Path;

/// One decoded row: column header to cell value
pub type Row = BTreeMap<String, String>;

/// Declared layout of an uploaded spreadsheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    /// CSV and friends
    DelimitedText,
    /// xls / xlsx
    Workbook,
}

impl SheetFormat {
    /// Detect the format from a file name's extension
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::DelimitedText),
            "xls" | "xlsx" => Some(Self::Workbook),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::DelimitedText => "csv",
            Self::Workbook => "xlsx",
        }
    }
}

/// Turns raw file bytes into rows
pub trait SpreadsheetDecoder {
    fn decode(&self, bytes: &[u8], format: SheetFormat) -> AppResult<Vec<Row>>;
}

/// Turns rows into file bytes; `columns` fixes the column order
pub trait SpreadsheetEncoder {
    fn encode(&self, rows: &[Row], columns: &[String]) -> AppResult<Vec<u8>>;
}

/// Delimited text spreadsheets via the `csv` crate
#[derive(Debug, Clone, Copy)]
pub struct CsvSpreadsheet {
    delimiter: u8,
}

impl CsvSpreadsheet {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl Default for CsvSpreadsheet {
    fn default() -> Self {
        Self::new()
    }
}

fn csv_error(err: csv::Error) -> AppError {
    AppError::invalid_format(format!(
        "Failed to parse Excel/CSV file. Please ensure it is a valid file. ({})",
        err
    ))
}

impl SpreadsheetDecoder for CsvSpreadsheet {
    fn decode(&self, bytes: &[u8], format: SheetFormat) -> AppResult<Vec<Row>> {
        if format == SheetFormat::Workbook {
            return Err(AppError::with_message(
                ErrorCode::UnsupportedFileType,
                "Workbook files are not supported, save the sheet as CSV",
            )
            .with_detail("format", format.extension()));
        }

        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(bytes);

        let headers = reader.headers().map_err(csv_error)?.clone();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            // Short records get empty cells, extra cells without a header are dropped
            let row: Row = headers
                .iter()
                .enumerate()
                .filter(|(_, header)| !header.is_empty())
                .map(|(i, header)| (header.to_string(), record.get(i).unwrap_or("").to_string()))
                .collect();
            rows.push(row);
        }

        tracing::debug!(rows = rows.len(), columns = headers.len(), "Decoded CSV sheet");
        Ok(rows)
    }
}

impl SpreadsheetEncoder for CsvSpreadsheet {
    fn encode(&self, rows: &[Row], columns: &[String]) -> AppResult<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new());
        writer.write_record(columns).map_err(csv_error)?;
        for row in rows {
            writer
                .write_record(columns.iter().map(|c| row.get(c).map(String::as_str).unwrap_or("")))
                .map_err(csv_error)?;
        }
        writer
            .into_inner()
            .map_err(|e| AppError::internal(format!("Failed to flush CSV output: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(SheetFormat::from_file_name("a.CSV"), Some(SheetFormat::DelimitedText));
        assert_eq!(SheetFormat::from_file_name("b.xlsx"), Some(SheetFormat::Workbook));
        assert_eq!(SheetFormat::from_file_name("c.xls"), Some(SheetFormat::Workbook));
        assert_eq!(SheetFormat::from_file_name("d.txt"), None);
        assert_eq!(SheetFormat::from_file_name("noext"), None);
    }

    #[test]
    fn test_decode_fills_missing_cells_and_skips_blank_rows() {
        let csv = "\u{feff}Category Name, Features\nA,\"x, y\"\n,\nB\n";
        let rows = CsvSpreadsheet::new()
            .decode(csv.as_bytes(), SheetFormat::DelimitedText)
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Category Name"], "A");
        assert_eq!(rows[0]["Features"], "x, y");
        assert_eq!(rows[1]["Category Name"], "B");
        assert_eq!(rows[1]["Features"], "");
    }

    #[test]
    fn test_workbook_is_unsupported() {
        let err = CsvSpreadsheet::new()
            .decode(b"PK\x03\x04", SheetFormat::Workbook)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedFileType);
    }

    #[test]
    fn test_encode_uses_column_order() {
        let mut row = Row::new();
        row.insert("Name".into(), "Pens, Gel".into());
        row.insert("Image".into(), "p.png".into());
        let bytes = CsvSpreadsheet::new()
            .encode(&[row], &["Name".to_string(), "Image".to_string(), "Features".to_string()])
            .unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "Name,Image,Features\n\"Pens, Gel\",p.png,\n");
    }

    #[test]
    fn test_semicolon_delimiter() {
        let rows = CsvSpreadsheet::with_delimiter(b';')
            .decode(b"name;features\nTravel;Flights, Hotels\n", SheetFormat::DelimitedText)
            .unwrap();
        assert_eq!(rows[0]["name"], "Travel");
        assert_eq!(rows[0]["features"], "Flights, Hotels");
    }
}

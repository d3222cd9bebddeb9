//! Upload checks
//!
//! Runs before any bytes are decoded. Images are accepted by MIME type only;
//! spreadsheets by MIME type or by extension.

use super::spreadsheet::SheetFormat;
use crate::core::Config;
use shared::error::{AppError, AppResult, ErrorCode};
use std::path::Path;

/// Accepted image MIME types
pub const IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif"];

/// Accepted spreadsheet MIME types
pub const SHEET_TYPES: &[&str] = &[
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "text/csv",
    "application/octet-stream",
];

/// Accepted spreadsheet extensions
pub const SHEET_EXTENSIONS: &[&str] = &["xls", "xlsx", "csv"];

/// A file as the browser describes it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    /// Declared MIME type, if any
    pub mime: Option<String>,
    pub size: u64,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, mime: Option<&str>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime: mime.map(str::to_string),
            size,
        }
    }

    /// Describe a file on disk, guessing its MIME type from the extension
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let size = std::fs::metadata(path)?.len();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        Ok(Self {
            name,
            mime: None,
            size,
        })
    }

    /// Declared MIME type, or a guess from the extension
    pub fn effective_mime(&self) -> Option<String> {
        self.mime
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(|m| m.to_ascii_lowercase())
            .or_else(|| {
                mime_guess::from_path(&self.name)
                    .first()
                    .map(|m| m.essence_str().to_string())
            })
    }

    fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
    }
}

/// What the upload is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// Node or product image from a single-item form
    Image,
    /// Bulk upload spreadsheet
    Spreadsheet,
}

/// Size limits per upload kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_image_bytes: u64,
    pub max_sheet_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

fn megabytes(bytes: u64) -> u64 {
    bytes / 1024 / 1024
}

impl UploadPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_image_bytes: config.max_image_bytes,
            max_sheet_bytes: config.max_sheet_bytes,
        }
    }

    pub fn check(&self, kind: UploadKind, file: &FileCandidate) -> AppResult<()> {
        match kind {
            UploadKind::Image => self.check_image(file),
            UploadKind::Spreadsheet => self.check_spreadsheet(file).map(|_| ()),
        }
    }

    pub fn check_image(&self, file: &FileCandidate) -> AppResult<()> {
        let mime = file.effective_mime().unwrap_or_default();
        if !IMAGE_TYPES.contains(&mime.as_str()) {
            return Err(AppError::with_message(
                ErrorCode::UnsupportedFileType,
                "Please upload a valid image (JPEG, PNG, or GIF)",
            )
            .with_detail("mime", mime));
        }
        if file.size > self.max_image_bytes {
            return Err(AppError::with_message(
                ErrorCode::FileTooLarge,
                format!(
                    "Image size must be less than {}MB",
                    megabytes(self.max_image_bytes)
                ),
            )
            .with_detail("size", file.size)
            .with_detail("max", self.max_image_bytes));
        }
        Ok(())
    }

    /// Check a bulk upload file and report the format it should be decoded as
    pub fn check_spreadsheet(&self, file: &FileCandidate) -> AppResult<SheetFormat> {
        let mime = file.effective_mime().unwrap_or_default();
        let ext = file.extension().unwrap_or_default();
        if !SHEET_TYPES.contains(&mime.as_str()) && !SHEET_EXTENSIONS.contains(&ext.as_str()) {
            return Err(AppError::with_message(
                ErrorCode::UnsupportedFileType,
                "Please upload a valid Excel or CSV file",
            )
            .with_detail("mime", mime)
            .with_detail("name", file.name.clone()));
        }
        if file.size > self.max_sheet_bytes {
            return Err(AppError::with_message(
                ErrorCode::FileTooLarge,
                format!(
                    "File size must be less than {}MB",
                    megabytes(self.max_sheet_bytes)
                ),
            )
            .with_detail("size", file.size)
            .with_detail("max", self.max_sheet_bytes));
        }

        let format = SheetFormat::from_file_name(&file.name).unwrap_or(match mime.as_str() {
            "text/csv" => SheetFormat::DelimitedText,
            _ => SheetFormat::Workbook,
        });
        Ok(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: u64 = 1024 * 1024;

    #[test]
    fn test_images_by_mime_and_size() {
        let policy = UploadPolicy::default();
        assert!(policy.check_image(&FileCandidate::new("a.png", Some("image/png"), 2 * MIB)).is_ok());
        assert!(policy.check_image(&FileCandidate::new("a.gif", None, 10)).is_ok());

        let err = policy
            .check_image(&FileCandidate::new("a.png", Some("image/png"), 2 * MIB + 1))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::FileTooLarge);
        assert_eq!(err.message, "Image size must be less than 2MB");

        let err = policy
            .check_image(&FileCandidate::new("a.webp", Some("image/webp"), 10))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedFileType);
        assert!(err.is_validation());
    }

    #[test]
    fn test_spreadsheets_by_mime_or_extension() {
        let policy = UploadPolicy::default();
        let format = policy
            .check_spreadsheet(&FileCandidate::new("rows.csv", Some("text/plain"), 100))
            .unwrap();
        assert_eq!(format, SheetFormat::DelimitedText);

        let format = policy
            .check_spreadsheet(&FileCandidate::new("export", Some("text/csv"), 100))
            .unwrap();
        assert_eq!(format, SheetFormat::DelimitedText);

        let format = policy
            .check_spreadsheet(&FileCandidate::new("book.XLSX", None, 100))
            .unwrap();
        assert_eq!(format, SheetFormat::Workbook);

        let err = policy
            .check_spreadsheet(&FileCandidate::new("notes.txt", Some("text/plain"), 100))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedFileType);

        let err = policy
            .check(UploadKind::Spreadsheet, &FileCandidate::new("rows.csv", None, 5 * MIB + 1))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::FileTooLarge);
        assert_eq!(err.message, "File size must be less than 5MB");
    }

    #[test]
    fn test_limits_follow_config() {
        let config = Config {
            max_image_bytes: 10,
            ..Config::default()
        };
        let policy = UploadPolicy::from_config(&config);
        let err = policy
            .check(UploadKind::Image, &FileCandidate::new("a.jpg", Some("image/jpeg"), 11))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::FileTooLarge);
    }
}

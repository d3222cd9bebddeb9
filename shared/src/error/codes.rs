//! Unified error codes for the catalog workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 6xxx: Catalog errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the admin frontend can
/// switch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Orders ====================
    /// Order not found
    OrderNotFound = 4001,
    /// One or more editable order fields are empty
    OrderFieldsIncomplete = 4002,
    /// Order could not be synchronized with the remote service
    OrderSyncFailed = 4003,

    // ==================== 6xxx: Catalog ====================
    /// Mutation needs an ancestor selection that is not set
    MissingParent = 6001,
    /// Sibling with the same name already exists
    DuplicateName = 6002,
    /// Category not found
    CategoryNotFound = 6003,
    /// Subcategory not found
    SubcategoryNotFound = 6004,
    /// Sub-subcategory not found
    SubSubcategoryNotFound = 6005,
    /// Product not found
    ProductNotFound = 6006,
    /// Price is not a positive number
    InvalidPrice = 6007,
    /// Feature list contains a blank entry
    BlankFeature = 6008,
    /// Spreadsheet has no recognizable name column
    NoNameColumn = 6101,
    /// Spreadsheet produced no valid rows
    NoValidRows = 6102,
    /// Uploaded file type is not accepted
    UnsupportedFileType = 6201,
    /// Uploaded file exceeds the size limit
    FileTooLarge = 6202,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Configuration error
    ConfigError = 9002,
    /// Filesystem error
    IoError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Orders
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderFieldsIncomplete => "Please fill in all editable fields",
            ErrorCode::OrderSyncFailed => "Failed to synchronize order with server",

            // Catalog
            ErrorCode::MissingParent => "Parent selection is required",
            ErrorCode::DuplicateName => "An item with this name already exists",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::SubcategoryNotFound => "Subcategory not found",
            ErrorCode::SubSubcategoryNotFound => "Sub-subcategory not found",
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::InvalidPrice => "Please enter a valid price",
            ErrorCode::BlankFeature => "All features must be filled or removed",
            ErrorCode::NoNameColumn => "Spreadsheet has no name column",
            ErrorCode::NoValidRows => "Spreadsheet has no valid entries",
            ErrorCode::UnsupportedFileType => "Unsupported file type",
            ErrorCode::FileTooLarge => "File is too large",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::IoError => "File system error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Orders
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderFieldsIncomplete),
            4003 => Ok(ErrorCode::OrderSyncFailed),

            // Catalog
            6001 => Ok(ErrorCode::MissingParent),
            6002 => Ok(ErrorCode::DuplicateName),
            6003 => Ok(ErrorCode::CategoryNotFound),
            6004 => Ok(ErrorCode::SubcategoryNotFound),
            6005 => Ok(ErrorCode::SubSubcategoryNotFound),
            6006 => Ok(ErrorCode::ProductNotFound),
            6007 => Ok(ErrorCode::InvalidPrice),
            6008 => Ok(ErrorCode::BlankFeature),
            6101 => Ok(ErrorCode::NoNameColumn),
            6102 => Ok(ErrorCode::NoValidRows),
            6201 => Ok(ErrorCode::UnsupportedFileType),
            6202 => Ok(ErrorCode::FileTooLarge),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::ConfigError),
            9003 => Ok(ErrorCode::IoError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::MissingParent.code(), 6001);
        assert_eq!(ErrorCode::DuplicateName.code(), 6002);
        assert_eq!(ErrorCode::NoValidRows.code(), 6102);
        assert_eq!(ErrorCode::IoError.code(), 9003);
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(6999), Err(InvalidErrorCode(6999)));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::MissingParent).unwrap();
        assert_eq!(json, "6001");
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("10000");
        assert!(result.is_err());
    }

    #[test]
    fn test_roundtrip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::OrderSyncFailed,
            ErrorCode::MissingParent,
            ErrorCode::FileTooLarge,
            ErrorCode::InternalError,
        ];

        for code in codes {
            let json = serde_json::to_string(&code).unwrap();
            let parsed: ErrorCode = serde_json::from_str(&json).unwrap();
            assert_eq!(code, parsed);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::NotFound), "3");
        assert_eq!(format!("{}", ErrorCode::BlankFeature), "6008");
    }
}

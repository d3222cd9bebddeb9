//! Input validation helpers
//!
//! Centralized text length constants and validation functions shared by the
//! mutation boundary and the spreadsheet importer.

use shared::error::{AppError, AppResult, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Node and product names
pub const MAX_NAME_LEN: usize = 200;

/// Product descriptions
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// A single feature entry
pub const MAX_FEATURE_LEN: usize = 200;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::required(field));
    }
    let len = trimmed.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate a feature list: every entry must be filled in.
///
/// Commas are rejected as well: the spreadsheet `Features` cell is comma
/// separated.
pub fn validate_features(features: &[String]) -> AppResult<()> {
    if let Some(index) = features.iter().position(|f| f.trim().is_empty()) {
        return Err(AppError::new(ErrorCode::BlankFeature).with_detail("index", index));
    }
    if let Some(index) = features.iter().position(|f| f.contains(',')) {
        return Err(AppError::validation("Features cannot contain a comma")
            .with_detail("field", "features")
            .with_detail("index", index));
    }
    if let Some(long) = features
        .iter()
        .map(|f| f.trim().chars().count())
        .find(|len| *len > MAX_FEATURE_LEN)
    {
        return Err(AppError::validation(format!(
            "Feature is too long ({long} chars, max {MAX_FEATURE_LEN})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Pen", "Name", MAX_NAME_LEN).is_ok());

        let err = validate_required_text("  ", "Name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "Name is required");

        let long = "x".repeat(MAX_NAME_LEN + 1);
        let err = validate_required_text(&long, "Name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        // limit counts characters, not bytes
        let accented = "é".repeat(MAX_NAME_LEN);
        assert!(validate_required_text(&accented, "Name", MAX_NAME_LEN).is_ok());
        let err = validate_required_text(&format!("{accented}é"), "Name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.message, format!("Name is too long ({} chars, max {MAX_NAME_LEN})", MAX_NAME_LEN + 1));
    }

    #[test]
    fn test_features() {
        assert!(validate_features(&[]).is_ok());
        assert!(validate_features(&["a".into(), "b".into()]).is_ok());

        let err = validate_features(&["a".into(), "".into()]).unwrap_err();
        assert_eq!(err.code, ErrorCode::BlankFeature);
        assert_eq!(err.detail("index").unwrap(), 1);

        let err = validate_features(&["Fast".into(), "Fast, cheap".into()]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.is_validation());
        assert_eq!(err.detail("index").unwrap(), 1);
    }
}

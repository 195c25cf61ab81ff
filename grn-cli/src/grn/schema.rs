//! Upload schema validation

use std::collections::HashSet;

use super::columns::REQUIRED_COLUMNS;
use super::types::SheetData;

/// Error when required columns are absent from an upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// Missing display-column names, sorted.
    pub missing: Vec<String>,
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "upload is missing required columns: {}", self.missing.join(", "))
    }
}

impl std::error::Error for SchemaError {}

/// Check that every required column is present in the sheet header.
///
/// Extra columns are tolerated; they are simply ignored downstream. This
/// must run before normalization or any store access.
pub fn validate_columns(sheet: &SheetData) -> Result<(), SchemaError> {
    let present: HashSet<&str> = sheet.headers.iter().map(String::as_str).collect();

    let mut missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !present.contains(**col))
        .map(|col| col.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        missing.sort();
        Err(SchemaError { missing })
    }
}

//! Generate an empty upload template

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};

use crate::grn::columns::REQUIRED_COLUMNS;

/// Write an empty .xlsx template with the required header row, for
/// operators to fill in and upload.
pub fn write_template(path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Vendor GRN")?;

    let bold = Format::new().set_bold();
    for (col, name) in REQUIRED_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &bold)?;
        worksheet.set_column_width(col as u16, name.len() as f64 + 4.0)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::read_sheet;

    #[test]
    fn test_template_headers_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.xlsx");

        write_template(&path).unwrap();
        let sheet = read_sheet(&path).unwrap();

        assert_eq!(sheet.headers, REQUIRED_COLUMNS.map(String::from).to_vec());
        assert!(sheet.rows.is_empty());
    }
}

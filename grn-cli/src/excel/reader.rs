//! Read uploaded GRN sheets into raw row data

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{Data, Reader, Xlsx, open_workbook};

use crate::grn::SheetData;

/// Read the first worksheet of an .xlsx file.
///
/// The first row is treated as the header; data rows are stringified and
/// padded to the header width. Typing of individual cells is deferred to
/// the normalizer.
pub fn read_sheet(path: &Path) -> Result<SheetData> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .context("Excel file has no sheets")?
        .clone();

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {sheet_name}"))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(cell_text).collect(),
        None => return Ok(SheetData::default()),
    };

    let width = headers.len();
    let data = rows
        .map(|row| {
            let mut cells: Vec<String> = row.iter().take(width).map(cell_text).collect();
            cells.resize(width, String::new());
            cells
        })
        .collect();

    Ok(SheetData {
        headers,
        rows: data,
    })
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 => (*f as i64).to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        _ => String::new(),
    }
}

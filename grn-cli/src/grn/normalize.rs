//! Lenient type normalization for uploaded rows
//!
//! Quantity cells become non-negative integers, everything else becomes a
//! trimmed string. Coercion never fails: a cell that cannot be used as a
//! quantity is defaulted to zero and reported back as a warning so the
//! operator can spot data-quality problems in the source sheet.

use std::collections::HashMap;

use serde::Serialize;

use super::types::{GrnRecord, Quantities, SheetData};

/// A non-blank quantity cell that had to be defaulted to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoercionWarning {
    /// 1-based sheet row, counting the header as row 1.
    pub row: usize,
    pub column: String,
    pub value: String,
}

/// Result of normalizing a sheet.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub records: Vec<GrnRecord>,
    pub warnings: Vec<CoercionWarning>,
}

/// Normalize every row of a validated sheet into `GrnRecord`s.
///
/// Normalization is idempotent: rendering a normalized record back to cells
/// and normalizing again yields the identical record.
pub fn normalize(sheet: &SheetData) -> Normalized {
    let index: HashMap<&str, usize> = sheet
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.as_str(), i))
        .collect();

    let mut records = Vec::with_capacity(sheet.rows.len());
    let mut warnings = Vec::new();

    for (row_idx, row) in sheet.rows.iter().enumerate() {
        let text = |name: &str| cell(&index, row, name).trim().to_string();
        let mut qty = |name: &str| -> i64 {
            let raw = cell(&index, row, name).trim();
            let (value, coerced) = coerce_quantity(raw);
            if coerced {
                warnings.push(CoercionWarning {
                    row: row_idx + 2,
                    column: name.to_string(),
                    value: raw.to_string(),
                });
            }
            value
        };

        let quantities = Quantities {
            invoice: qty("Invoice Qty"),
            received: qty("Received Qty"),
            short_excess: qty("Short Excess Qty"),
            damage: qty("Damage Qty"),
            actual_grn: qty("Actual GRN Qty"),
            ekart_grn: qty("Ekart GRN Qty"),
            makali_grn: qty("Makali GRN Qty"),
            sto: qty("STO Qty"),
        };

        records.push(GrnRecord {
            vendor_name: text("Vendor Name"),
            po_number: text("PO Number"),
            reference_no: text("Reference No"),
            sku: text("SKU"),
            name: text("Name"),
            quantities,
            warehouse: text("Warehouse"),
            status: text("Status"),
            grn_no: text("GRN No"),
            k12_to_sspl_po: text("K12 to SSPL PO"),
            k12_to_sspl_grn: text("K12 to SSPL GRN"),
            po: text("PO"),
            out_bound: text("Out Bound"),
            bill: text("Bill"),
            grn: text("GRN"),
        });
    }

    Normalized { records, warnings }
}

fn cell<'a>(index: &HashMap<&str, usize>, row: &'a [String], name: &str) -> &'a str {
    index
        .get(name)
        .and_then(|&i| row.get(i))
        .map(String::as_str)
        .unwrap_or("")
}

/// Coerce a cell to a non-negative quantity. Returns the value and whether
/// a non-blank cell had to be defaulted. Blank cells are silently zero;
/// integral floats ("3.0", an Excel artifact) parse cleanly.
fn coerce_quantity(raw: &str) -> (i64, bool) {
    if raw.is_empty() {
        return (0, false);
    }
    if let Ok(v) = raw.parse::<i64>() {
        return if v < 0 { (0, true) } else { (v, false) };
    }
    if let Ok(f) = raw.parse::<f64>() {
        if f.fract() == 0.0 && f >= 0.0 && f <= i64::MAX as f64 {
            return (f as i64, false);
        }
        return (0, true);
    }
    (0, true)
}

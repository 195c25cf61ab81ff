//! Repository layer for database operations
//!
//! Free functions over an injected `SqlitePool`; nothing outside this layer
//! writes to `vendor_grn_data`, and the only write path is the staged merge.

pub mod main_table;
pub mod staging;

use crate::grn::columns::{QTY_COLUMNS, REQUIRED_COLUMNS, store_column};

/// Name of the durable warehouse table.
pub const MAIN_TABLE: &str = "vendor_grn_data";

/// Store columns in upload order plus the bookkeeping timestamp, as a
/// comma-separated SQL column list.
pub(crate) fn store_column_list() -> String {
    let mut cols: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| store_column(c)).collect();
    cols.push("last_updated".to_string());
    cols.join(", ")
}

/// SET clause for the merge's matched branch: every quantity column
/// accumulates the staged value, and last_updated takes a bound timestamp.
pub(crate) fn accumulate_set_clause() -> String {
    let mut parts: Vec<String> = QTY_COLUMNS
        .iter()
        .map(|c| {
            let col = store_column(c);
            format!("{col} = {col} + excluded.{col}")
        })
        .collect();
    parts.push("last_updated = ?".to_string());
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_list_shape() {
        let list = store_column_list();
        assert!(list.starts_with("vendor_name, po_number, reference_no, sku, name"));
        assert!(list.ends_with("po, out_bound, bill, grn, last_updated"));
        assert_eq!(list.split(", ").count(), REQUIRED_COLUMNS.len() + 1);
    }

    #[test]
    fn test_accumulate_clause_covers_every_quantity() {
        let clause = accumulate_set_clause();
        assert!(clause.contains("invoice_qty = invoice_qty + excluded.invoice_qty"));
        assert!(clause.contains("sto_qty = sto_qty + excluded.sto_qty"));
        assert!(clause.ends_with("last_updated = ?"));
        assert_eq!(clause.matches("excluded.").count(), QTY_COLUMNS.len());
    }
}

//! Column schema for vendor GRN uploads

/// Display-name columns every upload must contain, in template order.
pub const REQUIRED_COLUMNS: [&str; 22] = [
    "Vendor Name",
    "PO Number",
    "Reference No",
    "SKU",
    "Name",
    "Invoice Qty",
    "Received Qty",
    "Short Excess Qty",
    "Damage Qty",
    "Actual GRN Qty",
    "Warehouse",
    "Status",
    "GRN No",
    "Ekart GRN Qty",
    "Makali GRN Qty",
    "K12 to SSPL PO",
    "K12 to SSPL GRN",
    "STO Qty",
    "PO",
    "Out Bound",
    "Bill",
    "GRN",
];

/// Quantity columns summed during aggregation and accumulated on merge.
pub const QTY_COLUMNS: [&str; 8] = [
    "Invoice Qty",
    "Received Qty",
    "Short Excess Qty",
    "Damage Qty",
    "Actual GRN Qty",
    "Ekart GRN Qty",
    "Makali GRN Qty",
    "STO Qty",
];

/// Store column name for a display column ("Invoice Qty" -> "invoice_qty").
pub fn store_column(display: &str) -> String {
    display
        .split_whitespace()
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

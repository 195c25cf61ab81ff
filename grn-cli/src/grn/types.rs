//! Core record types for the GRN pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw parse result of an uploaded sheet: header names plus stringified
/// cell rows, each row padded to the header width.
#[derive(Debug, Clone, Default)]
pub struct SheetData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// The eight GRN quantity counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantities {
    pub invoice: i64,
    pub received: i64,
    pub short_excess: i64,
    pub damage: i64,
    pub actual_grn: i64,
    pub ekart_grn: i64,
    pub makali_grn: i64,
    pub sto: i64,
}

impl Quantities {
    /// Accumulate another set of counters into this one.
    pub fn add(&mut self, other: &Quantities) {
        self.invoice = self.invoice.saturating_add(other.invoice);
        self.received = self.received.saturating_add(other.received);
        self.short_excess = self.short_excess.saturating_add(other.short_excess);
        self.damage = self.damage.saturating_add(other.damage);
        self.actual_grn = self.actual_grn.saturating_add(other.actual_grn);
        self.ekart_grn = self.ekart_grn.saturating_add(other.ekart_grn);
        self.makali_grn = self.makali_grn.saturating_add(other.makali_grn);
        self.sto = self.sto.saturating_add(other.sto);
    }
}

/// One normalized upload row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrnRecord {
    pub vendor_name: String,
    pub po_number: String,
    pub reference_no: String,
    pub sku: String,
    pub name: String,
    pub quantities: Quantities,
    pub warehouse: String,
    pub status: String,
    pub grn_no: String,
    pub k12_to_sspl_po: String,
    pub k12_to_sspl_grn: String,
    pub po: String,
    pub out_bound: String,
    pub bill: String,
    pub grn: String,
}

impl GrnRecord {
    /// Natural aggregation key: (Reference No, SKU).
    pub fn key(&self) -> (&str, &str) {
        (&self.reference_no, &self.sku)
    }
}

/// One record per distinct key within a single uploaded batch, with
/// quantities summed across the contributing rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedRecord {
    pub record: GrnRecord,
    pub last_updated: DateTime<Utc>,
}

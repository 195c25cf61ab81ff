//! Group-and-sum aggregation over normalized GRN rows
//!
//! Uploads routinely contain several rows for the same (Reference No, SKU)
//! pair, e.g. split shipments. Aggregation collapses each key to a single
//! record whose quantities are the sum of the contributing rows.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::types::{AggregatedRecord, GrnRecord};

/// Aggregate normalized rows by (Reference No, SKU).
///
/// Output order is first-seen input order, which keeps results
/// deterministic. Descriptive fields take the value from the first row of
/// the group; later disagreeing rows are ignored (first-wins policy).
/// `batch_time` is attached to every output record as its `last_updated`.
pub fn aggregate(records: Vec<GrnRecord>, batch_time: DateTime<Utc>) -> Vec<AggregatedRecord> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut out: Vec<AggregatedRecord> = Vec::new();

    for record in records {
        let key = (record.reference_no.clone(), record.sku.clone());
        match index.get(&key) {
            Some(&i) => out[i].record.quantities.add(&record.quantities),
            None => {
                index.insert(key, out.len());
                out.push(AggregatedRecord {
                    record,
                    last_updated: batch_time,
                });
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grn::types::Quantities;
    use std::collections::HashSet;

    fn record(reference_no: &str, sku: &str, vendor: &str, invoice: i64, received: i64) -> GrnRecord {
        GrnRecord {
            vendor_name: vendor.to_string(),
            reference_no: reference_no.to_string(),
            sku: sku.to_string(),
            quantities: Quantities {
                invoice,
                received,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_split_shipment_rows_are_summed() {
        // The canonical scenario: two REF1/A100 rows with invoice 3 and 7.
        let rows = vec![
            record("REF1", "A100", "Acme", 3, 0),
            record("REF1", "A100", "Acme", 7, 0),
        ];
        let out = aggregate(rows, Utc::now());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].record.key(), ("REF1", "A100"));
        assert_eq!(out[0].record.quantities.invoice, 10);
    }

    #[test]
    fn test_every_distinct_key_appears_exactly_once() {
        let rows = vec![
            record("REF1", "A100", "Acme", 1, 2),
            record("REF2", "A100", "Acme", 3, 4),
            record("REF1", "B200", "Acme", 5, 6),
            record("REF1", "A100", "Acme", 7, 8),
        ];
        let out = aggregate(rows, Utc::now());
        let keys: HashSet<(String, String)> = out
            .iter()
            .map(|r| (r.record.reference_no.clone(), r.record.sku.clone()))
            .collect();
        assert_eq!(out.len(), 3);
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn test_sums_are_exact_per_field() {
        let rows = vec![
            record("REF1", "A100", "Acme", 1, 10),
            record("REF1", "A100", "Acme", 2, 20),
            record("REF1", "A100", "Acme", 3, 30),
        ];
        let out = aggregate(rows, Utc::now());
        assert_eq!(out[0].record.quantities.invoice, 6);
        assert_eq!(out[0].record.quantities.received, 60);
        assert_eq!(out[0].record.quantities.damage, 0);
    }

    #[test]
    fn test_descriptive_fields_are_first_wins() {
        let rows = vec![
            record("REF1", "A100", "Acme", 1, 0),
            record("REF1", "A100", "Globex", 2, 0),
        ];
        let out = aggregate(rows, Utc::now());
        assert_eq!(out[0].record.vendor_name, "Acme");
    }

    #[test]
    fn test_output_is_first_seen_order() {
        let rows = vec![
            record("REF2", "B200", "Acme", 1, 0),
            record("REF1", "A100", "Acme", 1, 0),
            record("REF2", "B200", "Acme", 1, 0),
        ];
        let out = aggregate(rows, Utc::now());
        assert_eq!(out[0].record.key(), ("REF2", "B200"));
        assert_eq!(out[1].record.key(), ("REF1", "A100"));
    }

    #[test]
    fn test_single_row_group_passes_through() {
        let rows = vec![record("REF1", "A100", "Acme", 5, 9)];
        let batch_time = Utc::now();
        let out = aggregate(rows.clone(), batch_time);
        assert_eq!(out[0].record, rows[0]);
        assert_eq!(out[0].last_updated, batch_time);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(aggregate(vec![], Utc::now()).is_empty());
    }
}

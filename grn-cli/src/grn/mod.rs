//! Domain core for vendor GRN uploads
//!
//! The pipeline is: validate the sheet header, normalize cells into typed
//! records, then aggregate rows sharing a (Reference No, SKU) key.

pub mod aggregate;
pub mod columns;
pub mod normalize;
pub mod schema;
pub mod types;

pub use types::{AggregatedRecord, GrnRecord, Quantities, SheetData};

//! Merge and read operations for the vendor_grn_data warehouse table
//!
//! The table holds one logical row per (reference_no, sku) across all
//! uploads. Merging a staged batch accumulates quantities into matching
//! rows and inserts unmatched staged rows verbatim, as a single upsert
//! statement over the whole batch.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::{MAIN_TABLE, accumulate_set_clause, staging::StagedBatch, store_column_list};

/// Create the warehouse table if it does not exist yet.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS vendor_grn_data (
            vendor_name TEXT NOT NULL DEFAULT '',
            po_number TEXT NOT NULL DEFAULT '',
            reference_no TEXT NOT NULL,
            sku TEXT NOT NULL,
            name TEXT NOT NULL DEFAULT '',
            invoice_qty INTEGER NOT NULL DEFAULT 0,
            received_qty INTEGER NOT NULL DEFAULT 0,
            short_excess_qty INTEGER NOT NULL DEFAULT 0,
            damage_qty INTEGER NOT NULL DEFAULT 0,
            actual_grn_qty INTEGER NOT NULL DEFAULT 0,
            warehouse TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL DEFAULT '',
            grn_no TEXT NOT NULL DEFAULT '',
            ekart_grn_qty INTEGER NOT NULL DEFAULT 0,
            makali_grn_qty INTEGER NOT NULL DEFAULT 0,
            k12_to_sspl_po TEXT NOT NULL DEFAULT '',
            k12_to_sspl_grn TEXT NOT NULL DEFAULT '',
            sto_qty INTEGER NOT NULL DEFAULT 0,
            po TEXT NOT NULL DEFAULT '',
            out_bound TEXT NOT NULL DEFAULT '',
            bill TEXT NOT NULL DEFAULT '',
            grn TEXT NOT NULL DEFAULT '',
            last_updated TEXT NOT NULL,
            PRIMARY KEY (reference_no, sku)
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create vendor_grn_data table")?;

    Ok(())
}

/// Merge a staged batch into the warehouse table.
///
/// Matching rows get each quantity incremented by the staged value and
/// their `last_updated` set to `merged_at`; unmatched staged rows are
/// inserted as-is. One statement covers the whole batch, so SQLite's
/// statement atomicity makes the merge all-or-nothing. Returns the number
/// of rows written.
pub async fn merge_staged(
    pool: &SqlitePool,
    staged: &StagedBatch,
    merged_at: DateTime<Utc>,
) -> Result<u64> {
    let cols = store_column_list();
    let sql = format!(
        "INSERT INTO {MAIN_TABLE} ({cols})
         SELECT {cols} FROM {table}
         WHERE true
         ON CONFLICT(reference_no, sku) DO UPDATE SET {set_clause}",
        table = staged.table,
        set_clause = accumulate_set_clause()
    );

    let result = sqlx::query(&sql)
        .bind(merged_at)
        .execute(pool)
        .await
        .context("Failed to merge staged batch into vendor_grn_data")?;

    Ok(result.rows_affected())
}

/// One row of the live visibility view.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LiveRow {
    pub reference_no: String,
    pub sku: String,
    pub invoice_qty: i64,
    pub received_qty: i64,
    pub actual_grn_qty: i64,
    pub last_updated: DateTime<Utc>,
}

/// Per-key quantity totals (the aggregate view variant).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct KeyTotals {
    pub reference_no: String,
    pub sku: String,
    pub invoice_qty: i64,
    pub received_qty: i64,
    pub short_excess_qty: i64,
    pub damage_qty: i64,
    pub actual_grn_qty: i64,
    pub ekart_grn_qty: i64,
    pub makali_grn_qty: i64,
    pub sto_qty: i64,
}

/// All warehouse rows, most recently updated first. Returns an empty vec
/// when the table is empty.
pub async fn fetch_live(pool: &SqlitePool, limit: Option<i64>) -> Result<Vec<LiveRow>> {
    let rows = sqlx::query_as::<_, LiveRow>(
        "SELECT reference_no, sku, invoice_qty, received_qty, actual_grn_qty, last_updated
         FROM vendor_grn_data
         ORDER BY last_updated DESC
         LIMIT ?",
    )
    .bind(limit.unwrap_or(-1))
    .fetch_all(pool)
    .await
    .context("Failed to read vendor_grn_data")?;

    Ok(rows)
}

/// Quantity sums grouped by (reference_no, sku), ordered by key.
pub async fn fetch_totals(pool: &SqlitePool) -> Result<Vec<KeyTotals>> {
    let rows = sqlx::query_as::<_, KeyTotals>(
        "SELECT
            reference_no,
            sku,
            SUM(invoice_qty) AS invoice_qty,
            SUM(received_qty) AS received_qty,
            SUM(short_excess_qty) AS short_excess_qty,
            SUM(damage_qty) AS damage_qty,
            SUM(actual_grn_qty) AS actual_grn_qty,
            SUM(ekart_grn_qty) AS ekart_grn_qty,
            SUM(makali_grn_qty) AS makali_grn_qty,
            SUM(sto_qty) AS sto_qty
         FROM vendor_grn_data
         GROUP BY reference_no, sku
         ORDER BY reference_no, sku",
    )
    .fetch_all(pool)
    .await
    .context("Failed to read vendor_grn_data totals")?;

    Ok(rows)
}

//! Per-upload staging tables for aggregated GRN batches
//!
//! Each upload lands in its own uniquely named staging table, so two
//! overlapping uploads can never interleave truncate/load steps on shared
//! state. The table exists only for the duration of one upload cycle.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::grn::AggregatedRecord;
use crate::grn::columns::REQUIRED_COLUMNS;

use super::store_column_list;

/// Handle to a loaded staging table.
#[derive(Debug)]
pub struct StagedBatch {
    pub table: String,
    pub rows: usize,
}

/// Create a fresh staging table and bulk-load the aggregated batch into it
/// inside one transaction. If this fails, nothing is staged and the merge
/// must not run.
pub async fn stage_batch(pool: &SqlitePool, batch: &[AggregatedRecord]) -> Result<StagedBatch> {
    let table = format!("staging_vendor_grn_{}", Uuid::new_v4().simple());

    let mut tx = pool
        .begin()
        .await
        .context("Failed to begin staging transaction")?;

    // Table name is generated locally, never user input.
    let ddl = format!(
        "CREATE TABLE {table} (
            vendor_name TEXT NOT NULL,
            po_number TEXT NOT NULL,
            reference_no TEXT NOT NULL,
            sku TEXT NOT NULL,
            name TEXT NOT NULL,
            invoice_qty INTEGER NOT NULL,
            received_qty INTEGER NOT NULL,
            short_excess_qty INTEGER NOT NULL,
            damage_qty INTEGER NOT NULL,
            actual_grn_qty INTEGER NOT NULL,
            warehouse TEXT NOT NULL,
            status TEXT NOT NULL,
            grn_no TEXT NOT NULL,
            ekart_grn_qty INTEGER NOT NULL,
            makali_grn_qty INTEGER NOT NULL,
            k12_to_sspl_po TEXT NOT NULL,
            k12_to_sspl_grn TEXT NOT NULL,
            sto_qty INTEGER NOT NULL,
            po TEXT NOT NULL,
            out_bound TEXT NOT NULL,
            bill TEXT NOT NULL,
            grn TEXT NOT NULL,
            last_updated TEXT NOT NULL
        )"
    );
    sqlx::query(&ddl)
        .execute(&mut *tx)
        .await
        .context("Failed to create staging table")?;

    let placeholders = vec!["?"; REQUIRED_COLUMNS.len() + 1].join(", ");
    let insert = format!(
        "INSERT INTO {table} ({cols}) VALUES ({placeholders})",
        cols = store_column_list()
    );

    for staged in batch {
        let r = &staged.record;
        let q = &r.quantities;
        sqlx::query(&insert)
            .bind(&r.vendor_name)
            .bind(&r.po_number)
            .bind(&r.reference_no)
            .bind(&r.sku)
            .bind(&r.name)
            .bind(q.invoice)
            .bind(q.received)
            .bind(q.short_excess)
            .bind(q.damage)
            .bind(q.actual_grn)
            .bind(&r.warehouse)
            .bind(&r.status)
            .bind(&r.grn_no)
            .bind(q.ekart_grn)
            .bind(q.makali_grn)
            .bind(&r.k12_to_sspl_po)
            .bind(&r.k12_to_sspl_grn)
            .bind(q.sto)
            .bind(&r.po)
            .bind(&r.out_bound)
            .bind(&r.bill)
            .bind(&r.grn)
            .bind(staged.last_updated)
            .execute(&mut *tx)
            .await
            .context("Failed to stage GRN batch")?;
    }

    tx.commit()
        .await
        .context("Failed to commit staging transaction")?;

    Ok(StagedBatch {
        table,
        rows: batch.len(),
    })
}

/// Drop a staging table after its batch has been merged. Best effort; a
/// leftover table is harmless since every upload gets a fresh one.
pub async fn drop_staging(pool: &SqlitePool, staged: &StagedBatch) -> Result<()> {
    sqlx::query(&format!("DROP TABLE IF EXISTS {}", staged.table))
        .execute(pool)
        .await
        .context("Failed to drop staging table")?;
    Ok(())
}

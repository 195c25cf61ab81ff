//! Upload pipeline handler
//!
//! One upload cycle: read -> validate -> normalize -> aggregate -> stage ->
//! merge. Every failure aborts the whole cycle; the operator fixes the
//! sheet or the environment and re-runs.

use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use sqlx::SqlitePool;

use crate::excel;
use crate::grn::{aggregate, normalize, schema};
use crate::store::repository::{main_table, staging};

pub async fn run(pool: &SqlitePool, file: &Path, dry_run: bool) -> Result<()> {
    let sheet = excel::read_sheet(file)?;
    schema::validate_columns(&sheet)?;

    let normalized = normalize::normalize(&sheet);
    for warning in &normalized.warnings {
        log::warn!(
            "row {}, column {:?}: unusable quantity {:?} defaulted to 0",
            warning.row,
            warning.column,
            warning.value
        );
    }

    let raw_rows = normalized.records.len();
    let warning_count = normalized.warnings.len();
    let batch = aggregate::aggregate(normalized.records, Utc::now());

    println!(
        "{raw_rows} raw rows -> {} aggregated keys ({warning_count} quantity warnings)",
        batch.len()
    );
    for staged in &batch {
        let (reference_no, sku) = staged.record.key();
        let q = &staged.record.quantities;
        println!(
            "  {reference_no} / {sku}: invoice {}, received {}, actual GRN {}",
            q.invoice, q.received, q.actual_grn
        );
    }

    if dry_run {
        println!("{}", "Dry run, nothing written".yellow());
        return Ok(());
    }

    let staged = staging::stage_batch(pool, &batch).await?;
    log::info!("staged {} rows into {}", staged.rows, staged.table);

    let merged = main_table::merge_staged(pool, &staged, Utc::now()).await?;
    if let Err(err) = staging::drop_staging(pool, &staged).await {
        log::warn!("leaving staging table {} behind: {err:#}", staged.table);
    }

    println!(
        "{}",
        format!("Merged {merged} rows into vendor_grn_data").green()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grn::columns::REQUIRED_COLUMNS;
    use rust_xlsxwriter::Workbook;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        main_table::ensure_schema(&pool).await.unwrap();
        pool
    }

    fn write_upload(path: &Path, headers: &[&str], rows: &[Vec<&str>]) {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        for (col, header) in headers.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header).unwrap();
        }
        for (row_idx, row) in rows.iter().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                if !cell.is_empty() {
                    worksheet
                        .write_string((row_idx + 1) as u32, col as u16, *cell)
                        .unwrap();
                }
            }
        }
        workbook.save(path).unwrap();
    }

    fn grn_row<'a>(reference_no: &'a str, sku: &'a str, invoice: &'a str) -> Vec<&'a str> {
        let mut cells = vec![""; REQUIRED_COLUMNS.len()];
        let col = |name| REQUIRED_COLUMNS.iter().position(|c| *c == name).unwrap();
        cells[col("Reference No")] = reference_no;
        cells[col("SKU")] = sku;
        cells[col("Invoice Qty")] = invoice;
        cells
    }

    async fn staging_table_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master
             WHERE type = 'table' AND name LIKE 'staging_vendor_grn_%'",
        )
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_upload_cycle_merges_split_shipments() {
        let pool = memory_pool().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload.xlsx");
        write_upload(
            &path,
            &REQUIRED_COLUMNS,
            &[grn_row("REF1", "A100", "3"), grn_row("REF1", "A100", "7")],
        );

        run(&pool, &path, false).await.unwrap();

        let totals = main_table::fetch_totals(&pool).await.unwrap();
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].reference_no, "REF1");
        assert_eq!(totals[0].sku, "A100");
        assert_eq!(totals[0].invoice_qty, 10);
        assert_eq!(staging_table_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_missing_column_rejected_before_any_store_mutation() {
        let pool = memory_pool().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload.xlsx");
        let headers: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| *c != "SKU")
            .collect();
        write_upload(&path, &headers, &[]);

        let err = run(&pool, &path, false).await.unwrap_err();
        assert!(err.downcast_ref::<schema::SchemaError>().is_some());
        assert!(main_table::fetch_live(&pool, None).await.unwrap().is_empty());
        assert_eq!(staging_table_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let pool = memory_pool().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload.xlsx");
        write_upload(&path, &REQUIRED_COLUMNS, &[grn_row("REF1", "A100", "3")]);

        run(&pool, &path, true).await.unwrap();

        assert!(main_table::fetch_live(&pool, None).await.unwrap().is_empty());
        assert_eq!(staging_table_count(&pool).await, 0);
    }
}

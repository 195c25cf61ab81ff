//! Live warehouse view handler

use anyhow::{Context, Result};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::store::repository::main_table;

pub async fn run(
    pool: &SqlitePool,
    totals: bool,
    limit: Option<i64>,
    json: bool,
    csv: bool,
) -> Result<()> {
    if totals {
        let rows = main_table::fetch_totals(pool).await?;
        if json {
            print_json(&rows)?;
        } else if csv {
            print_csv(&rows)?;
        } else {
            print_totals(&rows);
        }
    } else {
        let rows = main_table::fetch_live(pool, limit).await?;
        if json {
            print_json(&rows)?;
        } else if csv {
            print_csv(&rows)?;
        } else {
            print_live(&rows);
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(rows: &[T]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(rows).context("Failed to render JSON")?);
    Ok(())
}

fn print_csv<T: Serialize>(rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        writer.serialize(row).context("Failed to write CSV row")?;
    }
    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

fn print_live(rows: &[main_table::LiveRow]) {
    if rows.is_empty() {
        println!("vendor_grn_data is empty");
        return;
    }
    println!(
        "{:<20} {:<16} {:>12} {:>12} {:>14}  {}",
        "Reference No", "SKU", "Invoice Qty", "Received Qty", "Actual GRN Qty", "Last Updated"
    );
    for row in rows {
        println!(
            "{:<20} {:<16} {:>12} {:>12} {:>14}  {}",
            row.reference_no,
            row.sku,
            row.invoice_qty,
            row.received_qty,
            row.actual_grn_qty,
            row.last_updated.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
}

fn print_totals(rows: &[main_table::KeyTotals]) {
    if rows.is_empty() {
        println!("vendor_grn_data is empty");
        return;
    }
    println!(
        "{:<20} {:<16} {:>10} {:>10} {:>12} {:>10} {:>12} {:>10} {:>11} {:>8}",
        "Reference No",
        "SKU",
        "Invoice",
        "Received",
        "Short/Excess",
        "Damage",
        "Actual GRN",
        "Ekart GRN",
        "Makali GRN",
        "STO"
    );
    for row in rows {
        println!(
            "{:<20} {:<16} {:>10} {:>10} {:>12} {:>10} {:>12} {:>10} {:>11} {:>8}",
            row.reference_no,
            row.sku,
            row.invoice_qty,
            row.received_qty,
            row.short_excess_qty,
            row.damage_qty,
            row.actual_grn_qty,
            row.ekart_grn_qty,
            row.makali_grn_qty,
            row.sto_qty
        );
    }
}

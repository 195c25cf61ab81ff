//! Command-line surface

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "grn-cli",
    about = "Vendor GRN upload, aggregation and warehouse visibility",
    version
)]
pub struct Cli {
    /// SQLite database path (overrides GRN_DB and the default location)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate, aggregate and merge an Excel upload into the warehouse table
    Upload {
        /// Path to the .xlsx upload
        file: PathBuf,

        /// Run the pipeline and show the preview without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Write an empty upload template with the required headers
    Template {
        /// Where to write the .xlsx template
        path: PathBuf,
    },

    /// Show the live warehouse table
    View {
        /// Show per-key quantity totals instead of recent rows
        #[arg(long)]
        totals: bool,

        /// Maximum number of rows to show
        #[arg(long)]
        limit: Option<i64>,

        /// Emit JSON instead of a table
        #[arg(long, conflicts_with = "csv")]
        json: bool,

        /// Emit CSV instead of a table
        #[arg(long)]
        csv: bool,
    },
}

//! Vendor GRN upload and warehouse visibility CLI

mod cli;
mod config;
mod excel;
mod grn;
mod store;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Cli { db, command } = Cli::parse();

    match command {
        Command::Template { path } => cli::commands::template::run(&path)?,
        Command::Upload { file, dry_run } => {
            let pool = open_pool(db).await?;
            cli::commands::upload::run(&pool, &file, dry_run).await?;
        }
        Command::View {
            totals,
            limit,
            json,
            csv,
        } => {
            let pool = open_pool(db).await?;
            cli::commands::view::run(&pool, totals, limit, json, csv).await?;
        }
    }

    Ok(())
}

async fn open_pool(db: Option<std::path::PathBuf>) -> Result<sqlx::SqlitePool> {
    let path = config::database_path(db)?;
    log::debug!("using database at {}", path.display());
    config::connect(&path).await
}

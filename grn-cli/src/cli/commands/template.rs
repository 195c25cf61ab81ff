//! Template generation handler

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::excel;

pub fn run(path: &Path) -> Result<()> {
    excel::write_template(path)?;
    println!("{}", format!("Template written to {}", path.display()).green());
    Ok(())
}

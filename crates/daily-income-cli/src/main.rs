//! daily_income CLI - Monthly income workbook generator
//!
//! Writes `Daily Income <Mon>.<year>.xlsx` for one month into the output
//! directory.

use anyhow::{Context, Result};
use clap::Parser;
use daily_income_core::MonthSheet;
use daily_income_render::ExcelRenderer;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "daily_income")]
#[command(author, version, about = "Generate an Excel sheet to record daily business income", long_about = None)]
struct Cli {
    /// Month of the income workbook (1-12)
    month: u32,

    /// Year of the income workbook
    #[arg(allow_negative_numbers = true)]
    year: i32,

    /// Output directory
    #[arg(long, value_name = "PATH", default_value = ".")]
    output: PathBuf,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let sheet = MonthSheet::new(cli.month, cli.year)?;
    tracing::debug!(
        month = sheet.month,
        year = sheet.year,
        days = sheet.rows.len(),
        "building income workbook"
    );

    let path = ExcelRenderer::new()
        .save(&sheet, &cli.output)
        .with_context(|| {
            format!(
                "Failed to write {} into {}",
                sheet.file_name(),
                cli.output.display()
            )
        })?;

    tracing::info!(path = %path.display(), "wrote income workbook");

    Ok(())
}

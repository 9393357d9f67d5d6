//! Preview command - show what a document would import.

use std::path::PathBuf;

use clap::Args;
use console::style;

use facturi_core::{Conversion, InvoiceParser};

use super::load_config;
use super::output::format_preview;

/// Arguments for the preview command.
#[derive(Args)]
pub struct PreviewArgs {
    /// Word document (path, or file name in the inbox)
    #[arg(required = true)]
    input: PathBuf,

    /// Print the parsed blocks as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: PreviewArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let parser = InvoiceParser::from_config(&config.extraction)?;
    let path = config.resolve_document(&args.input);

    let result = parser.parse_file(&path, Conversion::None)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.invoices)?);
        return Ok(());
    }

    print!("{}", format_preview(&result));
    println!(
        "{} {} invoices, {} rows in {}",
        style("ℹ").blue(),
        result.invoices.len(),
        result.row_count(),
        path.display()
    );

    Ok(())
}

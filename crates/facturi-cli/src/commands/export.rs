//! Export command - write a workbook without touching the database.

use std::path::PathBuf;

use clap::Args;
use console::style;
use rust_decimal::Decimal;

use facturi_core::{Conversion, InvoiceParser};

use super::import::exporter_for;
use super::{load_config, CurrencyArg};
use crate::rates::resolve_conversion;

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// Word document (path, or file name in the inbox)
    #[arg(required = true)]
    input: PathBuf,

    /// Price currency (default: from config)
    #[arg(long, value_enum, conflicts_with = "raw")]
    currency: Option<CurrencyArg>,

    /// Fixed USD to RUB rate instead of the live one
    #[arg(long)]
    rate: Option<Decimal>,

    /// Do not fetch the live rate
    #[arg(long)]
    offline: bool,

    /// Keep prices as written in the document
    #[arg(long)]
    raw: bool,

    /// Export directory (default: from config)
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

pub async fn run(args: ExportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let parser = InvoiceParser::from_config(&config.extraction)?;
    let path = config.resolve_document(&args.input);

    let conversion = if args.raw {
        Conversion::None
    } else {
        let currency = args
            .currency
            .map(Into::into)
            .unwrap_or(config.currency.default_currency);
        resolve_conversion(currency, args.rate, args.offline, &config.currency).await
    };

    let result = parser.parse_file(&path, conversion)?;
    let exporter = exporter_for(&config, args.export_dir.as_deref());
    let output = exporter.export(&path, &result.invoices)?;

    println!(
        "{} Exported {} invoices ({} rows) to {}",
        style("✓").green(),
        result.invoices.len(),
        result.row_count(),
        output.display()
    );

    Ok(())
}

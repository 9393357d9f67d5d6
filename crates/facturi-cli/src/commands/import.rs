//! Import command - preview, confirm, store and export one document.

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use facturi_core::models::config::FacturiConfig;
use facturi_core::{Conversion, ExtractionResult, InsertReport, InvoiceParser, ProductStore, WorkbookExporter};

use super::output::{format_preview, format_products, OutputFormat};
use super::{confirm, load_config, CurrencyArg};
use crate::rates::resolve_conversion;

/// Arguments for the import command.
#[derive(Args)]
pub struct ImportArgs {
    /// Word document (path, or file name in the inbox)
    #[arg(required = true)]
    input: PathBuf,

    /// Price currency (default: from config)
    #[arg(long, value_enum)]
    currency: Option<CurrencyArg>,

    /// Fixed USD to RUB rate instead of the live one
    #[arg(long)]
    rate: Option<Decimal>,

    /// Do not fetch the live rate
    #[arg(long)]
    offline: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,

    /// Do not write a workbook
    #[arg(long)]
    no_export: bool,

    /// Export directory (default: from config)
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

/// What happened to one imported document.
pub(crate) struct ImportOutcome {
    pub report: InsertReport,
    pub workbook: Option<PathBuf>,
    pub export_error: Option<String>,
}

pub async fn run(args: ImportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let parser = InvoiceParser::from_config(&config.extraction)?;
    let path = config.resolve_document(&args.input);

    let result = parser.parse_file(&path, Conversion::None)?;

    print!("{}", format_preview(&result));

    if result.row_count() == 0 {
        println!("{} No product rows found in {}", style("⚠").yellow(), path.display());
    }

    if !args.yes {
        let question = format!(
            "Import {} rows from {} invoices?",
            result.row_count(),
            result.invoices.len()
        );
        if !confirm(&question)? {
            println!("{} Import cancelled", style("ℹ").blue());
            return Ok(());
        }
    }

    let currency = args
        .currency
        .map(Into::into)
        .unwrap_or(config.currency.default_currency);
    let conversion = resolve_conversion(currency, args.rate, args.offline, &config.currency).await;
    let converted = result.converted(conversion);
    if let Some(currency) = converted.conversion.currency() {
        println!("{} Prices in {}", style("ℹ").blue(), currency);
    }

    let store = ProductStore::open(&config.paths.database)?;
    let exporter = (!args.no_export).then(|| exporter_for(&config, args.export_dir.as_deref()));

    let outcome = store_and_export(&store, exporter.as_ref(), &path, &converted);
    print_outcome(&outcome);

    println!();
    print!("{}", format_products(&store.load_all()?, OutputFormat::Text)?);

    Ok(())
}

/// Exporter for the configured directory, or `override_dir` when given.
pub(crate) fn exporter_for(config: &FacturiConfig, override_dir: Option<&Path>) -> WorkbookExporter {
    let dir = override_dir.unwrap_or(config.paths.export_dir.as_path());
    WorkbookExporter::new(dir)
}

/// Insert the converted rows and write the workbook.
///
/// Export problems are recorded in the outcome rather than returned; rows
/// already inserted stay in the database.
pub(crate) fn store_and_export(
    store: &ProductStore,
    exporter: Option<&WorkbookExporter>,
    source: &Path,
    result: &ExtractionResult,
) -> ImportOutcome {
    let report = store.insert_rows(result.rows());
    debug!(
        "Inserted {} rows from {} ({} failed)",
        report.inserted,
        source.display(),
        report.failed
    );

    let mut outcome = ImportOutcome {
        report,
        workbook: None,
        export_error: None,
    };

    if let Some(exporter) = exporter {
        match exporter.export(source, &result.invoices) {
            Ok(path) => outcome.workbook = Some(path),
            Err(e) => {
                warn!("Export of {} failed: {}", source.display(), e);
                outcome.export_error = Some(e.to_string());
            }
        }
    }

    outcome
}

fn print_outcome(outcome: &ImportOutcome) {
    println!(
        "{} Inserted {} rows",
        style("✓").green(),
        outcome.report.inserted
    );
    if outcome.report.failed > 0 {
        println!(
            "{} {} rows could not be inserted",
            style("⚠").yellow(),
            outcome.report.failed
        );
    }
    if let Some(path) = &outcome.workbook {
        println!("{} Workbook saved to {}", style("✓").green(), path.display());
    }
    if let Some(error) = &outcome.export_error {
        println!("{} Export failed: {}", style("⚠").yellow(), error);
    }
}

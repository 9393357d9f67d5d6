//! Batch import of many documents without prompts.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tracing::{error, warn};

use facturi_core::{Conversion, InvoiceParser, ProductStore, WorkbookExporter};

use super::import::{exporter_for, store_and_export, ImportOutcome};
use super::{load_config, CurrencyArg};
use crate::rates::resolve_conversion;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching the documents
    #[arg(required = true)]
    input: String,

    /// Price currency (default: from config)
    #[arg(long, value_enum)]
    currency: Option<CurrencyArg>,

    /// Fixed USD to RUB rate instead of the live one
    #[arg(long)]
    rate: Option<Decimal>,

    /// Do not fetch the live rate
    #[arg(long)]
    offline: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Also write summary.csv into the export directory
    #[arg(long)]
    summary: bool,

    /// Do not write workbooks
    #[arg(long)]
    no_export: bool,

    /// Export directory (default: from config)
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

/// Result of importing a single file.
struct FileResult {
    path: PathBuf,
    invoices: usize,
    rows: usize,
    outcome: Option<ImportOutcome>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("docx"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to import",
        style("ℹ").blue(),
        files.len()
    );

    let currency = args
        .currency
        .map(Into::into)
        .unwrap_or(config.currency.default_currency);
    let conversion = resolve_conversion(currency, args.rate, args.offline, &config.currency).await;

    let parser = InvoiceParser::from_config(&config.extraction)?;
    let store = ProductStore::open(&config.paths.database)?;
    let exporter = (!args.no_export).then(|| exporter_for(&config, args.export_dir.as_deref()));

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match import_file(&path, &parser, conversion, &store, exporter.as_ref()) {
            Ok(result) => results.push(result),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to import {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        invoices: 0,
                        rows: 0,
                        outcome: None,
                        error: Some(error_msg),
                    });
                } else {
                    pb.abandon();
                    error!("Failed to import {}: {}", path.display(), error_msg);
                    anyhow::bail!("Import failed: {}", error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    if args.summary {
        let summary_dir = args
            .export_dir
            .clone()
            .unwrap_or_else(|| config.paths.export_dir.clone());
        fs::create_dir_all(&summary_dir)?;
        let summary_path = summary_dir.join("summary.csv");

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let inserted: usize = results
        .iter()
        .filter_map(|r| r.outcome.as_ref())
        .map(|o| o.report.inserted)
        .sum();

    println!();
    println!(
        "{} Imported {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} rows inserted, {} files failed",
        style(inserted).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn import_file(
    path: &Path,
    parser: &InvoiceParser,
    conversion: Conversion,
    store: &ProductStore,
    exporter: Option<&WorkbookExporter>,
) -> anyhow::Result<FileResult> {
    let result = parser.parse_file(path, conversion)?;
    let outcome = store_and_export(store, exporter, path, &result);

    Ok(FileResult {
        path: path.to_path_buf(),
        invoices: result.invoices.len(),
        rows: result.row_count(),
        outcome: Some(outcome),
        error: None,
    })
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "invoices",
        "rows",
        "inserted",
        "failed",
        "workbook",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        match &result.outcome {
            Some(outcome) => {
                let workbook = outcome
                    .workbook
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                wtr.write_record([
                    filename,
                    "success",
                    &result.invoices.to_string(),
                    &result.rows.to_string(),
                    &outcome.report.inserted.to_string(),
                    &outcome.report.failed.to_string(),
                    &workbook,
                    outcome.export_error.as_deref().unwrap_or(""),
                ])?;
            }
            None => {
                wtr.write_record([
                    filename,
                    "error",
                    "",
                    "",
                    "",
                    "",
                    "",
                    result.error.as_deref().unwrap_or(""),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

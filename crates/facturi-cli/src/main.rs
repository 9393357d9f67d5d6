//! CLI application for importing invoice tables from Word documents.

mod commands;
mod rates;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, clear, config, export, files, import, preview, rate, show, tables};

/// Invoice import - Extract product tables from Word invoices into SQLite and Excel
#[derive(Parser)]
#[command(name = "facturi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List Word documents in the inbox directory
    Files(files::FilesArgs),

    /// Show the invoices and rows found in a document
    Preview(preview::PreviewArgs),

    /// Import a document into the database and export it to Excel
    Import(import::ImportArgs),

    /// Import multiple documents
    Batch(batch::BatchArgs),

    /// Export a document to Excel without importing it
    Export(export::ExportArgs),

    /// Show imported rows
    Show(show::ShowArgs),

    /// Delete all imported rows
    Clear(clear::ClearArgs),

    /// Show the USD to RUB rate used for conversion
    Rate(rate::RateArgs),

    /// List database tables
    Tables,

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Files(args) => files::run(args, config_path).await,
        Commands::Preview(args) => preview::run(args, config_path).await,
        Commands::Import(args) => import::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Export(args) => export::run(args, config_path).await,
        Commands::Show(args) => show::run(args, config_path).await,
        Commands::Clear(args) => clear::run(args, config_path).await,
        Commands::Rate(args) => rate::run(args, config_path).await,
        Commands::Tables => tables::run(config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}

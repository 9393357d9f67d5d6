//! Show command - list everything in the product table.

use clap::Args;

use facturi_core::ProductStore;

use super::load_config;
use super::output::{format_products, OutputFormat};

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub async fn run(args: ShowArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = ProductStore::open(&config.paths.database)?;

    let products = store.load_all()?;
    let output = format_products(&products, args.format)?;

    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }

    Ok(())
}

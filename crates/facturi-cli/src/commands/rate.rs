//! Rate command - show the USD to RUB rate an import would use.

use clap::Args;
use console::style;

use super::load_config;
use crate::rates::{resolve_rate, RateSource};

/// Arguments for the rate command.
#[derive(Args)]
pub struct RateArgs {
    /// Do not fetch the live rate
    #[arg(long)]
    offline: bool,
}

pub async fn run(args: RateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let (rate, source) = resolve_rate(None, args.offline, &config.currency).await;

    let label = match source {
        RateSource::Live => style(source.to_string()).green(),
        _ => style(source.to_string()).yellow(),
    };
    println!("1 USD = {} RUB ({})", rate, label);

    Ok(())
}

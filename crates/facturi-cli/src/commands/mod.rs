//! CLI subcommands.

pub mod batch;
pub mod clear;
pub mod config;
pub mod export;
pub mod files;
pub mod import;
pub mod output;
pub mod preview;
pub mod rate;
pub mod show;
pub mod tables;

use std::path::{Path, PathBuf};

use console::Term;
use tracing::debug;

use facturi_core::models::config::FacturiConfig;
use facturi_core::Currency;

/// Currency choices on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum CurrencyArg {
    /// US dollars, prices marked with $
    Usd,
    /// Russian rubles, prices converted and marked with ₽
    Rub,
}

impl From<CurrencyArg> for Currency {
    fn from(arg: CurrencyArg) -> Self {
        match arg {
            CurrencyArg::Usd => Currency::Usd,
            CurrencyArg::Rub => Currency::Rub,
        }
    }
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("facturi")
        .join("config.json")
}

/// Load configuration from `--config`, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FacturiConfig> {
    if let Some(path) = config_path {
        debug!("Loading config from {}", path);
        return Ok(FacturiConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(FacturiConfig::from_file(&default_path)?)
    } else {
        Ok(FacturiConfig::default())
    }
}

/// Ask a yes/no question on the terminal. Anything but `y`/`yes` is a no.
pub fn confirm(question: &str) -> anyhow::Result<bool> {
    let term = Term::stderr();
    term.write_str(&format!("{} [y/N] ", question))?;
    let answer = term.read_line()?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "d" | "da"))
}

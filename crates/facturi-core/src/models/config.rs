//! Configuration structures for the import pipeline.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::Currency;

/// Main configuration for facturi.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FacturiConfig {
    /// File locations.
    pub paths: PathsConfig,

    /// Block and row extraction configuration.
    pub extraction: ExtractionConfig,

    /// Currency conversion configuration.
    pub currency: CurrencyConfig,

    /// Guarded operations.
    pub security: SecurityConfig,
}

/// Filesystem locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory scanned for `.docx` files.
    pub inbox_dir: PathBuf,

    /// SQLite database file.
    pub database: PathBuf,

    /// Directory receiving exported workbooks.
    pub export_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            inbox_dir: PathBuf::from("."),
            database: PathBuf::from("facturi.db"),
            export_dir: PathBuf::from("xls"),
        }
    }
}

/// Invoice extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Token a line must start with to open a new invoice block.
    pub block_marker: String,

    /// Substrings identifying table header lines to drop.
    pub header_keywords: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            block_marker: "Заявка".to_string(),
            header_keywords: [
                "п/п",
                "Код",
                "Бар-код",
                "Наименование товара",
                "Кол-во",
                "Сумма отп.",
                "|товара|",
                "(USD)",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Currency conversion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    /// Currency used when none is given on the command line.
    pub default_currency: Currency,

    /// Page scraped for the live USD rate.
    pub rate_url: String,

    /// Rate used when the live rate cannot be obtained.
    pub fallback_rate: Decimal,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            default_currency: Currency::Usd,
            rate_url: "https://www.cbpmr.net/kursval.php?lang=ru".to_string(),
            fallback_rate: crate::invoice::DEFAULT_RUB_RATE,
            timeout_secs: 10,
        }
    }
}

/// Settings for guarded operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Password required to wipe the product table.
    pub clear_password: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            clear_password: "pased".to_string(),
        }
    }
}

impl FacturiConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Resolve a document argument: existing paths are used as-is,
    /// bare names are looked up in the inbox directory.
    pub fn resolve_document(&self, name: &std::path::Path) -> PathBuf {
        if name.exists() || name.components().count() > 1 {
            name.to_path_buf()
        } else {
            self.paths.inbox_dir.join(name)
        }
    }
}

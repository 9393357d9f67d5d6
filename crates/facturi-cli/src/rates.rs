//! USD to RUB rate lookup with a fixed fallback.

use std::time::Duration;

use reqwest::StatusCode;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use facturi_core::invoice::rules::{FieldExtractor, RateExtractor};
use facturi_core::models::config::CurrencyConfig;
use facturi_core::{Conversion, Currency};

/// Where the conversion rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    /// Given on the command line.
    Manual,
    /// Read from the rate page.
    Live,
    /// Configured fallback.
    Fallback,
}

impl std::fmt::Display for RateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateSource::Manual => write!(f, "manual"),
            RateSource::Live => write!(f, "live"),
            RateSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// Fetch the live USD rate, falling back to the configured constant on any failure.
pub async fn fetch_usd_rate(config: &CurrencyConfig) -> (Decimal, RateSource) {
    match try_fetch(config).await {
        Ok(Some(rate)) => {
            info!("USD rate from {}: {}", config.rate_url, rate);
            (rate, RateSource::Live)
        }
        Ok(None) => {
            warn!("No USD rate found on {}, using {}", config.rate_url, config.fallback_rate);
            (config.fallback_rate, RateSource::Fallback)
        }
        Err(e) => {
            warn!("Failed to fetch USD rate: {}, using {}", e, config.fallback_rate);
            (config.fallback_rate, RateSource::Fallback)
        }
    }
}

async fn try_fetch(config: &CurrencyConfig) -> anyhow::Result<Option<Decimal>> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("facturi/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;

    debug!("GET {}", config.rate_url);
    let response = client.get(&config.rate_url).send().await?;

    if response.status() != StatusCode::OK {
        anyhow::bail!("rate page returned status {}", response.status());
    }

    let html = response.text().await?;
    Ok(RateExtractor::new().extract(&html))
}

/// Rate to use for RUB conversion.
pub async fn resolve_rate(
    manual: Option<Decimal>,
    offline: bool,
    config: &CurrencyConfig,
) -> (Decimal, RateSource) {
    match manual {
        Some(rate) => (rate, RateSource::Manual),
        None if offline => (config.fallback_rate, RateSource::Fallback),
        None => fetch_usd_rate(config).await,
    }
}

/// Conversion for the chosen currency. The rate is only looked up for RUB.
pub async fn resolve_conversion(
    currency: Currency,
    manual: Option<Decimal>,
    offline: bool,
    config: &CurrencyConfig,
) -> Conversion {
    match currency {
        Currency::Usd => Conversion::Usd,
        Currency::Rub => {
            let (rate, source) = resolve_rate(manual, offline, config).await;
            debug!("RUB conversion rate {} ({})", rate, source);
            Conversion::Rub { rate }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_config() -> CurrencyConfig {
        CurrencyConfig {
            rate_url: "http://127.0.0.1:9/kursval.php".to_string(),
            timeout_secs: 1,
            ..CurrencyConfig::default()
        }
    }

    #[tokio::test]
    async fn test_manual_rate_wins() {
        let config = unreachable_config();
        let rate = Decimal::new(175, 1);
        assert_eq!(
            resolve_rate(Some(rate), false, &config).await,
            (rate, RateSource::Manual)
        );
    }

    #[tokio::test]
    async fn test_offline_uses_fallback() {
        let config = unreachable_config();
        assert_eq!(
            resolve_rate(None, true, &config).await,
            (config.fallback_rate, RateSource::Fallback)
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_falls_back() {
        let config = unreachable_config();
        let (rate, source) = fetch_usd_rate(&config).await;
        assert_eq!(rate, Decimal::new(161, 1));
        assert_eq!(source, RateSource::Fallback);
    }

    #[tokio::test]
    async fn test_usd_needs_no_rate() {
        let config = unreachable_config();
        assert_eq!(
            resolve_conversion(Currency::Usd, None, false, &config).await,
            Conversion::Usd
        );
    }
}

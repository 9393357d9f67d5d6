//! Exchange rate extraction from the published rate page.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::patterns::USD_RATE;
use super::FieldExtractor;

/// USD rate extractor for HTML rate pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct RateExtractor;

impl RateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for RateExtractor {
    type Output = Decimal;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        parse_rate(text)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        USD_RATE
            .captures_iter(text)
            .filter_map(|caps| Decimal::from_str(&caps[1]).ok())
            .collect()
    }
}

/// First decimal number following `USD` on the same line.
pub fn parse_rate(html: &str) -> Option<Decimal> {
    let caps = USD_RATE.captures(html)?;
    Decimal::from_str(&caps[1]).ok()
}

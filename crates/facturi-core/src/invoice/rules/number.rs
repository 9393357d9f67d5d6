//! Invoice number extraction from block marker lines.

use regex::Regex;

use super::patterns::INVOICE_NUMBER;
use super::FieldExtractor;

/// Extracts `<marker> № <digits>` invoice numbers.
#[derive(Debug, Clone)]
pub struct InvoiceNumberExtractor {
    pattern: Regex,
}

impl InvoiceNumberExtractor {
    /// Extractor for the default `Заявка` marker.
    pub fn new() -> Self {
        Self {
            pattern: (*INVOICE_NUMBER).clone(),
        }
    }

    /// Extractor for a custom marker token.
    pub fn for_marker(marker: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(r"{}\s*№\s*(\d+)", regex::escape(marker)))?;
        Ok(Self { pattern })
    }
}

impl Default for InvoiceNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for InvoiceNumberExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.pattern.captures(text).map(|caps| caps[1].to_string())
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.pattern
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .collect()
    }
}

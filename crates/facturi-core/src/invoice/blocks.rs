//! Splitting document paragraphs into per-invoice blocks.

use tracing::trace;

use super::rules::{FieldExtractor, HeaderFilter, InvoiceNumberExtractor};
use crate::models::product::InvoiceBlock;

/// Splits a flat paragraph list into invoice blocks.
///
/// A block starts at every line beginning with the marker token. Lines
/// before the first marker form their own block. Header and separator
/// lines are dropped before marker detection.
#[derive(Debug, Clone)]
pub struct BlockSplitter {
    marker: String,
    filter: HeaderFilter,
    numbers: InvoiceNumberExtractor,
}

impl BlockSplitter {
    /// Create a splitter for the given marker and header filter.
    pub fn new(marker: impl Into<String>, filter: HeaderFilter) -> Result<Self, regex::Error> {
        let marker = marker.into();
        let numbers = InvoiceNumberExtractor::for_marker(&marker)?;
        Ok(Self {
            marker,
            filter,
            numbers,
        })
    }

    /// Split lines into blocks.
    pub fn split<S: AsRef<str>>(&self, lines: &[S]) -> Vec<InvoiceBlock> {
        let mut blocks = Vec::new();
        let mut current: Vec<String> = Vec::new();

        for line in lines.iter().map(AsRef::as_ref) {
            if self.filter.is_header_or_separator(line) {
                trace!("Dropping header line: {}", line);
                continue;
            }

            if line.starts_with(self.marker.as_str()) && !current.is_empty() {
                blocks.push(self.finish_block(std::mem::take(&mut current)));
            }
            current.push(line.to_string());
        }

        if !current.is_empty() {
            blocks.push(self.finish_block(current));
        }

        blocks
    }

    fn finish_block(&self, lines: Vec<String>) -> InvoiceBlock {
        let number = lines
            .first()
            .filter(|first| first.starts_with(self.marker.as_str()))
            .and_then(|first| self.numbers.extract(first));

        InvoiceBlock { number, lines }
    }
}

impl Default for BlockSplitter {
    fn default() -> Self {
        Self {
            marker: "Заявка".to_string(),
            filter: HeaderFilter::default(),
            numbers: InvoiceNumberExtractor::new(),
        }
    }
}

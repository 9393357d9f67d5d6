//! Invoice parser combining block splitting, row extraction and conversion.

use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::blocks::BlockSplitter;
use super::conversion::Conversion;
use super::rules::{FieldExtractor, HeaderFilter, RowExtractor};
use super::Result;
use crate::docx;
use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::product::{InvoiceBlock, ParsedInvoice, ProductRow};

/// Result of parsing one document.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Parsed invoices, one per block.
    pub invoices: Vec<ParsedInvoice>,
    /// Number of non-empty paragraphs read.
    pub paragraph_count: usize,
    /// Conversion applied to the rows.
    pub conversion: Conversion,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ExtractionResult {
    /// Total number of rows across all invoices.
    pub fn row_count(&self) -> usize {
        self.invoices.iter().map(|i| i.rows.len()).sum()
    }

    /// All rows in document order.
    pub fn rows(&self) -> impl Iterator<Item = &ProductRow> {
        self.invoices.iter().flat_map(|i| i.rows.iter())
    }

    /// Copy of this result with prices converted.
    ///
    /// Only unconverted results are rewritten; a result that already carries
    /// a conversion is returned unchanged.
    pub fn converted(&self, conversion: Conversion) -> ExtractionResult {
        let mut result = self.clone();

        if self.conversion != Conversion::None {
            warn!("Rows already converted ({:?}), keeping them", self.conversion);
            return result;
        }

        for invoice in &mut result.invoices {
            conversion.apply_all(&mut invoice.rows);
        }
        result.conversion = conversion;
        result
    }
}

/// Parser turning document paragraphs into product rows.
#[derive(Debug, Clone, Default)]
pub struct InvoiceParser {
    splitter: BlockSplitter,
    rows: RowExtractor,
}

impl InvoiceParser {
    /// Create a parser with the default marker and header keywords.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> crate::Result<Self> {
        let filter = HeaderFilter::new(config.header_keywords.iter().cloned());
        let splitter = BlockSplitter::new(config.block_marker.clone(), filter)
            .map_err(|e| crate::FacturiError::Config(format!("invalid block marker: {}", e)))?;
        Ok(Self {
            splitter,
            rows: RowExtractor::new(),
        })
    }

    /// Split paragraphs into invoice blocks.
    pub fn split<S: AsRef<str>>(&self, paragraphs: &[S]) -> Vec<InvoiceBlock> {
        self.splitter.split(paragraphs)
    }

    /// Extract the rows of one block and convert their prices.
    pub fn parse_block(&self, block: InvoiceBlock, conversion: Conversion) -> ParsedInvoice {
        let mut rows: Vec<ProductRow> = block
            .lines
            .iter()
            .filter_map(|line| self.rows.extract(line))
            .collect();
        conversion.apply_all(&mut rows);

        ParsedInvoice { block, rows }
    }

    /// Parse a paragraph list.
    pub fn parse<S: AsRef<str>>(
        &self,
        paragraphs: &[S],
        conversion: Conversion,
    ) -> Result<ExtractionResult> {
        let start = Instant::now();

        if paragraphs.is_empty() {
            return Err(ExtractionError::NoText);
        }

        let blocks = self.split(paragraphs);
        if blocks.is_empty() {
            return Err(ExtractionError::NoBlocks);
        }

        let invoices: Vec<ParsedInvoice> = blocks
            .into_iter()
            .map(|block| self.parse_block(block, conversion))
            .collect();

        let result = ExtractionResult {
            invoices,
            paragraph_count: paragraphs.len(),
            conversion,
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        debug!(
            "Parsed {} paragraphs into {} blocks with {} rows",
            result.paragraph_count,
            result.invoices.len(),
            result.row_count()
        );

        Ok(result)
    }

    /// Read a `.docx` file and parse it.
    pub fn parse_file(&self, path: &Path, conversion: Conversion) -> crate::Result<ExtractionResult> {
        info!("Processing file: {}", path.display());
        let paragraphs = docx::extract_paragraphs(path)?;
        Ok(self.parse(&paragraphs, conversion)?)
    }
}

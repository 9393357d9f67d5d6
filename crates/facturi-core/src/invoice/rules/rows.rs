//! Product row extraction from fixed-width table lines.

use super::patterns::PRODUCT_ROW;
use super::FieldExtractor;
use crate::models::product::ProductRow;

/// Extractor for invoice table rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowExtractor;

impl RowExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for RowExtractor {
    type Output = ProductRow;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        parse_row(text)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        text.lines().filter_map(parse_row).collect()
    }
}

/// Parse one table line. The leading ordinal is dropped.
pub fn parse_row(line: &str) -> Option<ProductRow> {
    let caps = PRODUCT_ROW.captures(line)?;

    Some(ProductRow {
        producer_id: caps[2].to_string(),
        barcode: caps[3].to_string(),
        product_name: caps[4].to_string(),
        quantity_in_box: caps[5].to_string(),
        order_price: caps[6].to_string(),
        total: caps[7].to_string(),
    })
}

//! Product row and invoice block models.

use serde::{Deserialize, Serialize};

/// Column names shared by the `produse` table and exported sheets.
pub const PRODUCT_COLUMNS: [&str; 6] = [
    "IDPRODUCER",
    "BARCODE",
    "ROPRODUCTNAME",
    "QUANTITYINBOX",
    "ORDERPRICE",
    "TOTAL",
];

/// One product line parsed from an invoice table.
///
/// All fields are kept as text, exactly as they appear in the document
/// (after optional price conversion).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductRow {
    /// Producer identifier.
    pub producer_id: String,

    /// Product barcode.
    pub barcode: String,

    /// Product name.
    pub product_name: String,

    /// Quantity in box.
    pub quantity_in_box: String,

    /// Order (unit) price.
    pub order_price: String,

    /// Line total.
    pub total: String,
}

impl ProductRow {
    /// Fields in column order.
    pub fn fields(&self) -> [&str; 6] {
        [
            &self.producer_id,
            &self.barcode,
            &self.product_name,
            &self.quantity_in_box,
            &self.order_price,
            &self.total,
        ]
    }
}

/// A product row as persisted, with its surrogate key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredProduct {
    /// Auto-increment row id.
    pub id: i64,

    /// Stored fields.
    #[serde(flatten)]
    pub row: ProductRow,
}

/// Price currency chosen by the operator at import time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    /// US dollars; prices are kept and marked with `$`.
    Usd,
    /// Russian rubles; prices are converted and marked with `₽`.
    Rub,
}

impl Currency {
    /// Symbol prefixed to converted price fields.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Rub => "₽",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::Usd
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Usd => write!(f, "USD ($)"),
            Currency::Rub => write!(f, "RUB (₽)"),
        }
    }
}

/// Lines belonging to one invoice.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvoiceBlock {
    /// Invoice number taken from the marker line, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    /// Block lines, header and separator lines already removed.
    pub lines: Vec<String>,
}

/// An invoice block together with the product rows parsed from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedInvoice {
    /// Source block.
    pub block: InvoiceBlock,

    /// Rows matched in the block.
    pub rows: Vec<ProductRow>,
}

impl ParsedInvoice {
    /// Worksheet title for this invoice, given its 1-based position.
    pub fn sheet_title(&self, index: usize) -> String {
        match &self.block.number {
            Some(number) => format!("Заявка № {}", number),
            None => format!("Factura {}", index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_title() {
        let numbered = ParsedInvoice {
            block: InvoiceBlock {
                number: Some("123".to_string()),
                lines: vec![],
            },
            rows: vec![],
        };
        assert_eq!(numbered.sheet_title(1), "Заявка № 123");

        let unnumbered = ParsedInvoice {
            block: InvoiceBlock::default(),
            rows: vec![],
        };
        assert_eq!(unnumbered.sheet_title(3), "Factura 3");
    }

    #[test]
    fn test_stored_product_serializes_flat() {
        let stored = StoredProduct {
            id: 7,
            row: ProductRow {
                producer_id: "1".to_string(),
                ..Default::default()
            },
        };
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["producer_id"], "1");
    }
}

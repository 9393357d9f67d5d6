//! Rule-based extractors for invoice documents.

pub mod headers;
pub mod number;
pub mod patterns;
pub mod rate;
pub mod rows;

pub use headers::{HeaderFilter, DEFAULT_HEADER_KEYWORDS};
pub use number::InvoiceNumberExtractor;
pub use rate::{parse_rate, RateExtractor};
pub use rows::{parse_row, RowExtractor};
pub use patterns::*;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

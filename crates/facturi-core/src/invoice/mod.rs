//! Invoice block and row extraction module.

mod blocks;
mod conversion;
mod parser;
pub mod rules;

pub use blocks::BlockSplitter;
pub use conversion::{Conversion, DEFAULT_RUB_RATE};
pub use parser::{ExtractionResult, InvoiceParser};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

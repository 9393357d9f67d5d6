//! Core library for importing invoice tables from Word documents.
//!
//! This crate provides:
//! - DOCX paragraph extraction
//! - Invoice block splitting and fixed-shape row parsing
//! - Price conversion (USD markup, RUB conversion)
//! - SQLite persistence of product rows
//! - XLSX export with one worksheet per invoice

pub mod error;
pub mod models;
pub mod docx;
pub mod invoice;
pub mod store;
pub mod export;

pub use error::{FacturiError, Result};
pub use models::config::FacturiConfig;
pub use models::product::{Currency, InvoiceBlock, ParsedInvoice, ProductRow, StoredProduct};
pub use docx::{DocxExtractor, DocumentProcessor};
pub use invoice::{Conversion, ExtractionResult, InvoiceParser};
pub use store::{InsertReport, ProductStore};
pub use export::WorkbookExporter;

//! Word document (DOCX) processing module.

mod extractor;

pub use extractor::DocxExtractor;

use std::path::Path;

use tracing::debug;

use crate::error::DocumentError;

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Trait for word-processing document readers.
pub trait DocumentProcessor {
    /// Load a document from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Number of body paragraphs, empty ones included.
    fn paragraph_count(&self) -> usize;

    /// Trimmed, non-empty body paragraphs in document order.
    fn paragraphs(&self) -> Result<Vec<String>>;
}

/// Read a `.docx` file and return its non-empty paragraphs.
pub fn extract_paragraphs(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(DocumentError::NotFound(path.to_path_buf()));
    }

    let data = std::fs::read(path)?;
    let mut extractor = DocxExtractor::new();
    extractor.load(&data)?;

    let paragraphs = extractor.paragraphs()?;
    debug!(
        "{}: {} paragraphs, {} non-empty",
        path.display(),
        extractor.paragraph_count(),
        paragraphs.len()
    );

    Ok(paragraphs)
}

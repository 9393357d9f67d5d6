//! Error types for the facturi-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the facturi library.
#[derive(Error, Debug)]
pub enum FacturiError {
    /// Document reading error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Invoice extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Database error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Workbook export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Password check failed for a guarded operation.
    #[error("access denied: incorrect password")]
    AccessDenied,
}

/// Errors related to reading word-processing documents.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file could not be read.
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a readable ZIP package.
    #[error("invalid package: {0}")]
    Package(String),

    /// A required part is missing from the package.
    #[error("missing part: {0}")]
    MissingPart(String),

    /// The document XML could not be parsed.
    #[error("XML parse error: {0}")]
    Xml(String),

    /// No document has been loaded yet.
    #[error("no document loaded")]
    NotLoaded,
}

/// Errors related to invoice extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The document contains no non-empty paragraphs.
    #[error("no text found in document")]
    NoText,

    /// No invoice blocks could be formed from the text.
    #[error("no invoice blocks found")]
    NoBlocks,

    /// A value could not be parsed.
    #[error("failed to parse {field}: {value}")]
    Parse { field: String, value: String },
}

/// Errors related to the SQLite product store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying SQLite failure.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

/// Errors related to workbook export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Underlying XLSX writer failure.
    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Nothing to write.
    #[error("no invoice blocks to export")]
    Empty,
}

impl From<zip::result::ZipError> for DocumentError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::FileNotFound => {
                DocumentError::MissingPart("word/document.xml".to_string())
            }
            other => DocumentError::Package(other.to_string()),
        }
    }
}

impl From<quick_xml::Error> for DocumentError {
    fn from(err: quick_xml::Error) -> Self {
        DocumentError::Xml(err.to_string())
    }
}

impl From<rusqlite::Error> for FacturiError {
    fn from(err: rusqlite::Error) -> Self {
        FacturiError::Store(StoreError::Sqlite(err))
    }
}

impl From<rust_xlsxwriter::XlsxError> for FacturiError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        FacturiError::Export(ExportError::Xlsx(err))
    }
}

/// Result type for the facturi library.
pub type Result<T> = std::result::Result<T, FacturiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FacturiError::from(ExtractionError::NoBlocks);
        assert_eq!(err.to_string(), "extraction error: no invoice blocks found");

        let err = FacturiError::from(DocumentError::NotFound(PathBuf::from("a.docx")));
        assert_eq!(err.to_string(), "document error: file not found: a.docx");
    }

    #[test]
    fn test_missing_zip_entry_maps_to_missing_part() {
        let err: DocumentError = zip::result::ZipError::FileNotFound.into();
        assert!(matches!(err, DocumentError::MissingPart(_)));
    }
}

//! DOCX paragraph extraction using zip and quick-xml.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, trace};

use super::{DocumentProcessor, Result};
use crate::error::DocumentError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Paragraph extractor for DOCX packages.
///
/// Only top-level body paragraphs are collected; paragraphs nested in
/// tables are skipped, as is text of paragraphs nested inside runs
/// (text boxes and their fallback copies). Run tabs become `\t` and
/// breaks become `\n`.
pub struct DocxExtractor {
    paragraphs: Option<Vec<String>>,
}

impl DocxExtractor {
    /// Create a new DOCX extractor.
    pub fn new() -> Self {
        Self { paragraphs: None }
    }

    /// Parse `word/document.xml` content into raw paragraph texts.
    pub fn parse_document_xml(xml: &str) -> Result<Vec<String>> {
        let mut reader = Reader::from_str(xml);

        let mut paragraphs = Vec::new();
        let mut current = String::new();
        let mut table_depth: u32 = 0;
        let mut paragraph_depth: u32 = 0;
        let mut run_depth: u32 = 0;
        let mut in_text = false;

        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"tbl" => table_depth += 1,
                    b"p" if table_depth == 0 => {
                        if paragraph_depth == 0 {
                            current.clear();
                        }
                        paragraph_depth += 1;
                    }
                    b"r" if paragraph_depth > 0 && table_depth == 0 => run_depth += 1,
                    b"t" if run_depth > 0 && paragraph_depth == 1 => in_text = true,
                    _ => {}
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"p" if table_depth == 0 && paragraph_depth == 0 => {
                        paragraphs.push(String::new());
                    }
                    b"tab" if run_depth > 0 && paragraph_depth == 1 => current.push('\t'),
                    b"br" | b"cr" if run_depth > 0 && paragraph_depth == 1 => current.push('\n'),
                    _ => {}
                },
                Event::Text(e) if in_text => {
                    let text = e
                        .unescape()
                        .map_err(|err| DocumentError::Xml(err.to_string()))?;
                    current.push_str(&text);
                }
                Event::End(e) => match e.local_name().as_ref() {
                    b"tbl" => table_depth = table_depth.saturating_sub(1),
                    b"p" if table_depth == 0 && paragraph_depth > 0 => {
                        paragraph_depth -= 1;
                        if paragraph_depth == 0 {
                            paragraphs.push(std::mem::take(&mut current));
                        }
                    }
                    b"r" if run_depth > 0 => run_depth -= 1,
                    b"t" => in_text = false,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        trace!("Parsed {} raw paragraphs", paragraphs.len());
        Ok(paragraphs)
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentProcessor for DocxExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
        let mut part = archive.by_name(DOCUMENT_PART)?;

        let mut xml = String::new();
        part.read_to_string(&mut xml)
            .map_err(|e| DocumentError::Package(format!("{}: {}", DOCUMENT_PART, e)))?;

        let xml = xml.strip_prefix('\u{feff}').unwrap_or(&xml);
        let paragraphs = Self::parse_document_xml(xml)?;
        debug!("Loaded DOCX with {} paragraphs", paragraphs.len());

        self.paragraphs = Some(paragraphs);
        Ok(())
    }

    fn paragraph_count(&self) -> usize {
        self.paragraphs.as_ref().map(Vec::len).unwrap_or(0)
    }

    fn paragraphs(&self) -> Result<Vec<String>> {
        let paragraphs = self.paragraphs.as_ref().ok_or(DocumentError::NotLoaded)?;

        Ok(paragraphs
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect())
    }
}

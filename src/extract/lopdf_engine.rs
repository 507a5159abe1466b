//! Primary engine: lopdf with content-stream layout analysis.

use lopdf::{Dictionary, Document as LopdfDocument, Object};

use crate::error::{Error, Result};
use crate::model::Page;

use super::layout::{self, decode_pdf_bytes};
use super::{DocumentInfo, EngineOutput, ExtractionEngine};

/// Extracts pages with font size, weight and position per line.
///
/// Pages whose content stream cannot be laid out fall back to lopdf's
/// plain text extraction, without font metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfEngine;

impl LopdfEngine {
    /// Create the engine.
    pub fn new() -> Self {
        Self
    }

    fn extract_page(doc: &LopdfDocument, number: u32, id: lopdf::ObjectId) -> Page {
        match layout::page_lines(doc, id) {
            Ok(lines) if !lines.is_empty() => return Page::from_lines(number, lines),
            Ok(_) => {}
            Err(e) => log::debug!("Layout analysis failed on page {}: {}", number, e),
        }

        match doc.extract_text(&[number]) {
            Ok(text) => Page::from_text(number, text),
            Err(e) => {
                log::warn!("No text extracted from page {}: {}", number, e);
                Page::from_text(number, String::new())
            }
        }
    }
}

impl ExtractionEngine for LopdfEngine {
    fn name(&self) -> &str {
        "lopdf"
    }

    fn extract(&self, data: &[u8]) -> Result<EngineOutput> {
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        let info = read_document_info(&doc);
        let pages = doc
            .get_pages()
            .into_iter()
            .map(|(number, id)| Self::extract_page(&doc, number, id))
            .collect();

        Ok(EngineOutput { pages, info })
    }
}

/// Read the document information dictionary.
fn read_document_info(doc: &LopdfDocument) -> DocumentInfo {
    let dict = doc.trailer.get(b"Info").ok().and_then(|info| match info {
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    });

    DocumentInfo {
        title: dict.and_then(|d| string_entry(doc, d, b"Title")),
        version: doc.version.to_string(),
    }
}

fn string_entry(doc: &LopdfDocument, dict: &Dictionary, key: &[u8]) -> Option<String> {
    let obj = match dict.get(key).ok()? {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    match obj {
        Object::String(bytes, _) => {
            let text = decode_pdf_bytes(bytes).trim().to_string();
            (!text.is_empty()).then_some(text)
        }
        _ => None,
    }
}

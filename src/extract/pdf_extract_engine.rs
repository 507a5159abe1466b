//! Secondary engine: plain per-page text via pdf-extract.

use crate::error::Result;
use crate::model::Page;

use super::{DocumentInfo, EngineOutput, ExtractionEngine};

/// Extracts plain text per page. Lines carry no font metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractEngine;

impl PdfExtractEngine {
    /// Create the engine.
    pub fn new() -> Self {
        Self
    }
}

impl ExtractionEngine for PdfExtractEngine {
    fn name(&self) -> &str {
        "pdf-extract"
    }

    fn extract(&self, data: &[u8]) -> Result<EngineOutput> {
        let texts = pdf_extract::extract_text_from_mem_by_pages(data)?;
        let pages = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Page::from_text(i as u32 + 1, text.replace('\u{c}', "\n")))
            .collect();

        Ok(EngineOutput {
            pages,
            info: DocumentInfo::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_garbage() {
        let engine = PdfExtractEngine::new();
        assert_eq!(engine.name(), "pdf-extract");
        let result = std::panic::catch_unwind(|| engine.extract(b"not a pdf at all"));
        // Either a clean error or a panic; never a successful parse.
        assert!(!matches!(result, Ok(Ok(_))));
    }
}

//! Text extraction with a primary and a fallback engine.
//!
//! The [`Extractor`] tries the layout-aware lopdf engine first. When it
//! fails, panics, or yields no text, the pdf-extract engine is tried. Both
//! engines produce the same [`Page`]/[`Line`](crate::model::Line) model, so
//! later stages never know which engine ran.

mod layout;
mod lopdf_engine;
mod pdf_extract_engine;

pub use lopdf_engine::LopdfEngine;
pub use pdf_extract_engine::PdfExtractEngine;

use std::any::Any;
use std::fmt;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::detect;
use crate::error::{Error, Result};
use crate::model::Page;

/// Which slot of the extractor an engine occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    /// Tried first; may expose font metadata
    Primary,
    /// Tried when the primary fails or finds no text
    Fallback,
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::Primary => f.write_str("primary"),
            EngineKind::Fallback => f.write_str("fallback"),
        }
    }
}

/// Document-level information reported by an engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    /// Title from the document information dictionary
    pub title: Option<String>,
    /// PDF version, empty when unknown
    pub version: String,
}

/// What an engine returns for one document.
#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// Pages in document order, numbered from 1
    pub pages: Vec<Page>,
    /// Document information
    pub info: DocumentInfo,
}

impl EngineOutput {
    /// Whether any page carries text.
    pub fn has_text(&self) -> bool {
        self.pages.iter().any(Page::has_text)
    }
}

/// A PDF text extraction engine.
pub trait ExtractionEngine {
    /// Short engine name for diagnostics.
    fn name(&self) -> &str;

    /// Extract every page of a PDF held in memory.
    fn extract(&self, data: &[u8]) -> Result<EngineOutput>;
}

/// Result of extracting one document.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Slot of the engine that produced the pages
    pub engine: EngineKind,
    /// Name of that engine
    pub engine_name: String,
    /// Extracted pages
    pub pages: Vec<Page>,
    /// Document information, merged across engines
    pub info: DocumentInfo,
}

impl ExtractionResult {
    fn from_output(engine: EngineKind, engine_name: &str, output: EngineOutput) -> Self {
        Self {
            engine,
            engine_name: engine_name.to_string(),
            pages: output.pages,
            info: output.info,
        }
    }

    /// Whether no page carries any text.
    pub fn is_empty(&self) -> bool {
        !self.pages.iter().any(Page::has_text)
    }

    /// Number of pages extracted.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Whether any line carries font metadata.
    pub fn has_layout(&self) -> bool {
        self.pages.iter().any(Page::has_layout)
    }
}

/// Runs the primary engine and falls back to the secondary one.
pub struct Extractor {
    primary: Box<dyn ExtractionEngine>,
    fallback: Box<dyn ExtractionEngine>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor")
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

impl Extractor {
    /// Extractor with lopdf as primary and pdf-extract as fallback.
    pub fn new() -> Self {
        Self::with_engines(Box::new(LopdfEngine::new()), Box::new(PdfExtractEngine::new()))
    }

    /// Extractor with custom engines.
    pub fn with_engines(
        primary: Box<dyn ExtractionEngine>,
        fallback: Box<dyn ExtractionEngine>,
    ) -> Self {
        Self { primary, fallback }
    }

    /// Read and extract a PDF file.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<ExtractionResult> {
        let data = fs::read(path.as_ref())?;
        self.extract_bytes(&data)
    }

    /// Extract a PDF held in memory.
    ///
    /// A document both engines can open but neither finds text in is
    /// returned with empty pages. [`Error::UnreadablePdf`] is returned only
    /// when both engines fail.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<ExtractionResult> {
        let header = detect::sniff(data)?;
        log::debug!("PDF header version {:?} at offset {}", header.version, header.offset);

        let primary_name = self.primary.name();
        let (primary_empty, primary_reason) =
            match run_guarded(self.primary.as_ref(), EngineKind::Primary, data) {
                Ok(output) if output.has_text() => {
                    return Ok(ExtractionResult::from_output(
                        EngineKind::Primary,
                        primary_name,
                        output,
                    ));
                }
                Ok(output) => {
                    log::info!("{} engine found no text, trying fallback", primary_name);
                    (Some(output), "no text".to_string())
                }
                Err(e) => {
                    log::warn!("{}, trying fallback", e);
                    (None, error_reason(e))
                }
            };

        let fallback_name = self.fallback.name();
        match run_guarded(self.fallback.as_ref(), EngineKind::Fallback, data) {
            Ok(mut output) if output.has_text() => {
                if let Some(primary) = &primary_empty {
                    merge_info(&mut output.info, &primary.info);
                }
                Ok(ExtractionResult::from_output(
                    EngineKind::Fallback,
                    fallback_name,
                    output,
                ))
            }
            Ok(output) => match primary_empty {
                Some(primary) => Ok(ExtractionResult::from_output(
                    EngineKind::Primary,
                    primary_name,
                    primary,
                )),
                None => Ok(ExtractionResult::from_output(
                    EngineKind::Fallback,
                    fallback_name,
                    output,
                )),
            },
            Err(e) => match primary_empty {
                Some(primary) => {
                    log::debug!("{}", e);
                    Ok(ExtractionResult::from_output(
                        EngineKind::Primary,
                        primary_name,
                        primary,
                    ))
                }
                None => Err(Error::UnreadablePdf {
                    primary: primary_reason,
                    fallback: error_reason(e),
                }),
            },
        }
    }
}

/// Run an engine, converting errors and panics into
/// [`Error::ExtractionFailed`].
fn run_guarded(
    engine: &dyn ExtractionEngine,
    kind: EngineKind,
    data: &[u8],
) -> Result<EngineOutput> {
    match panic::catch_unwind(AssertUnwindSafe(|| engine.extract(data))) {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(Error::ExtractionFailed { reason, .. })) | Ok(Err(Error::Other(reason))) => {
            Err(Error::ExtractionFailed {
                engine: kind,
                reason,
            })
        }
        Ok(Err(e)) => Err(Error::ExtractionFailed {
            engine: kind,
            reason: e.to_string(),
        }),
        Err(payload) => Err(Error::ExtractionFailed {
            engine: kind,
            reason: format!("panicked: {}", panic_message(payload.as_ref())),
        }),
    }
}

fn error_reason(err: Error) -> String {
    match err {
        Error::ExtractionFailed { reason, .. } => reason,
        other => other.to_string(),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn merge_info(target: &mut DocumentInfo, source: &DocumentInfo) {
    if target.title.is_none() {
        target.title = source.title.clone();
    }
    if target.version.is_empty() {
        target.version = source.version.clone();
    }
}

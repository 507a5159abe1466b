//! # pdf-outline
//!
//! Heuristic outline extraction for PDF documents.
//!
//! This library reads a PDF, finds its title and its H1/H2/H3 headings with
//! page numbers, and renders them as a small JSON document. No trained
//! model is involved: headings are recognised from numbering, letter case,
//! font size and weight, after filtering dates, page numbers, running
//! headers and similar noise.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_outline::{extract_outline, render, JsonFormat};
//!
//! fn main() -> pdf_outline::Result<()> {
//!     let outline = extract_outline("document.pdf")?;
//!     println!("{}", render::to_json(&outline, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Dual engine**: lopdf with layout analysis, pdf-extract as fallback
//! - **Font-aware levels**: sizes are ranked against each document's body text
//! - **Noise filtering**: dates, page numbers, TOC leaders, running footers
//! - **Batch mode**: a directory of PDFs in, one JSON file per PDF out

pub mod batch;
pub mod classify;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod options;
pub mod outline;
pub mod render;
pub mod title;

// Re-export commonly used types
pub use batch::{discover_pdfs, run_batch, BatchReport, BatchRunner, FileOutcome, FileStatus};
pub use classify::{
    HeadingCandidate, HeadingPattern, LineClassifier, NoiseKind, PageContext, Verdict,
};
pub use detect::{is_pdf_bytes, sniff, PdfHeader};
pub use error::{Error, Result};
pub use extract::{EngineKind, ExtractionEngine, ExtractionResult, Extractor};
pub use model::{HeadingLevel, Line, OutlineDocument, OutlineEntry, Page};
pub use options::{HeuristicConfig, HierarchyPolicy, OutlineOptions};
pub use outline::{assemble, OutlineAssembler};
pub use render::JsonFormat;
pub use title::{resolve_title, Title, TitleResolver, TitleSource};

use std::path::Path;

/// Extract the outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::extract_outline;
///
/// let outline = extract_outline("document.pdf").unwrap();
/// println!("{}: {} headings", outline.title, outline.outline.len());
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<OutlineDocument> {
    Ok(Outliner::new().extract(path)?.document)
}

/// Extract the outline of a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::{extract_outline_with_options, OutlineOptions};
///
/// let options = OutlineOptions::new().repair_hierarchy();
/// let outline = extract_outline_with_options("document.pdf", options).unwrap();
/// ```
pub fn extract_outline_with_options<P: AsRef<Path>>(
    path: P,
    options: OutlineOptions,
) -> Result<OutlineDocument> {
    Ok(Outliner::new().with_options(options).extract(path)?.document)
}

/// Extract the outline of a PDF held in memory.
pub fn extract_outline_bytes(data: &[u8]) -> Result<OutlineDocument> {
    Ok(Outliner::new().extract_bytes(data, None)?.document)
}

/// Convert a PDF to outline JSON.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::{to_json, JsonFormat};
///
/// let json = to_json("document.pdf", JsonFormat::Pretty).unwrap();
/// std::fs::write("document.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let outline = extract_outline(path)?;
    render::to_json(&outline, format)
}

/// Builder running the whole pipeline on one document.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::Outliner;
///
/// let json = Outliner::new()
///     .repair_hierarchy()
///     .with_max_heading_words(8)
///     .extract("document.pdf")?
///     .to_json()?;
/// # Ok::<(), pdf_outline::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Outliner {
    options: OutlineOptions,
    extractor: Extractor,
}

impl Outliner {
    /// Create a new builder with default options and engines.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all options.
    pub fn with_options(mut self, options: OutlineOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the heuristic thresholds.
    pub fn with_heuristics(mut self, heuristics: HeuristicConfig) -> Self {
        self.options.heuristics = heuristics;
        self
    }

    /// Use custom extraction engines.
    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Clamp level jumps in the outline.
    pub fn repair_hierarchy(mut self) -> Self {
        self.options.hierarchy = HierarchyPolicy::Repair;
        self
    }

    /// Emit single-line JSON.
    pub fn compact(mut self) -> Self {
        self.options.format = JsonFormat::Compact;
        self
    }

    /// Set the word limit for case-based headings.
    pub fn with_max_heading_words(mut self, n: usize) -> Self {
        self.options.heuristics.max_heading_words = n;
        self
    }

    /// Keep running headers and footers.
    pub fn without_footer_filter(mut self) -> Self {
        self.options.heuristics.footer_filter = false;
        self
    }

    /// The options in use.
    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    /// Run the pipeline on a PDF file.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<OutlineResult> {
        let path = path.as_ref();
        let extraction = self.extractor.extract_file(path)?;
        let stem = path.file_stem().map(|s| s.to_string_lossy().to_string());
        Ok(self.build(extraction, stem.as_deref()))
    }

    /// Run the pipeline on a PDF held in memory.
    ///
    /// `file_stem`, when given, marks a metadata title equal to it as a
    /// placeholder.
    pub fn extract_bytes(&self, data: &[u8], file_stem: Option<&str>) -> Result<OutlineResult> {
        let extraction = self.extractor.extract_bytes(data)?;
        Ok(self.build(extraction, file_stem))
    }

    /// Resolve the title and assemble the outline of extracted pages.
    pub fn build(&self, extraction: ExtractionResult, file_stem: Option<&str>) -> OutlineResult {
        let pages = &extraction.pages;
        if extraction.is_empty() {
            log::warn!("No text found in any of {} pages", pages.len());
        }

        let classifier = LineClassifier::new(pages, &self.options.heuristics);

        let mut resolver = TitleResolver::new(&classifier);
        if let Some(stem) = file_stem {
            resolver = resolver.with_file_stem(stem);
        }
        let title = resolver.resolve(extraction.info.title.as_deref(), pages);
        log::debug!("Title from {}: {:?}", title.source, title.text);

        let mut entries = OutlineAssembler::new(&classifier).assemble_with_title(pages, &title);
        outline::apply_policy(&mut entries, self.options.hierarchy);

        let document = OutlineDocument::new(title.text.clone(), entries);
        if document.is_empty() {
            log::debug!("No headings found");
        }

        OutlineResult {
            document,
            title,
            classifier,
            extraction,
            format: self.options.format,
        }
    }
}

/// One line and the classifier's decision about it.
#[derive(Debug, Clone)]
pub struct LineVerdict<'a> {
    /// The line
    pub line: &'a Line,
    /// The decision
    pub verdict: Verdict,
}

/// Result of running the pipeline on one document.
#[derive(Debug)]
pub struct OutlineResult {
    /// The outline document
    pub document: OutlineDocument,
    /// How the title was found
    pub title: Title,
    /// Extracted pages and engine information
    pub extraction: ExtractionResult,
    classifier: LineClassifier,
    format: JsonFormat,
}

impl OutlineResult {
    /// Convert to JSON in the configured format.
    pub fn to_json(&self) -> Result<String> {
        render::to_json(&self.document, self.format)
    }

    /// Write the JSON to a file, creating parent directories.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        render::write_outline(&self.document, path.as_ref(), self.format)
    }

    /// The document's body font size, if the engine reported font sizes.
    pub fn body_font_size(&self) -> Option<f32> {
        self.classifier.baseline().body_size()
    }

    /// The classifier built for this document.
    pub fn classifier(&self) -> &LineClassifier {
        &self.classifier
    }

    /// Every line of every page with its verdict, in reading order.
    pub fn line_verdicts(&self) -> Vec<LineVerdict<'_>> {
        self.extraction
            .pages
            .iter()
            .flat_map(|page| {
                page.lines.iter().map(move |line| LineVerdict {
                    line,
                    verdict: self.classifier.inspect(line, &PageContext::of(line, page)),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{DocumentInfo, EngineOutput};

    struct TextEngine(Vec<&'static str>, Option<&'static str>);

    impl ExtractionEngine for TextEngine {
        fn name(&self) -> &str {
            "text"
        }

        fn extract(&self, _data: &[u8]) -> Result<EngineOutput> {
            Ok(EngineOutput {
                pages: self
                    .0
                    .iter()
                    .enumerate()
                    .map(|(i, t)| Page::from_text(i as u32 + 1, *t))
                    .collect(),
                info: DocumentInfo {
                    title: self.1.map(String::from),
                    version: "1.4".into(),
                },
            })
        }
    }

    fn outliner(pages: Vec<&'static str>, title: Option<&'static str>) -> Outliner {
        Outliner::new().with_extractor(Extractor::with_engines(
            Box::new(TextEngine(pages, title)),
            Box::new(TextEngine(vec![], None)),
        ))
    }

    #[test]
    fn test_outliner_builder() {
        let outliner = Outliner::new()
            .repair_hierarchy()
            .compact()
            .with_max_heading_words(6)
            .without_footer_filter();

        assert_eq!(outliner.options().hierarchy, HierarchyPolicy::Repair);
        assert_eq!(outliner.options().format, JsonFormat::Compact);
        assert_eq!(outliner.options().heuristics.max_heading_words, 6);
        assert!(!outliner.options().heuristics.footer_filter);
    }

    #[test]
    fn test_pipeline_with_metadata_title() {
        let result = outliner(
            vec![
                "Annual Report\nsome prose goes here, honestly.",
                "1. Introduction\nbody text continues here.\n1.1 Scope",
            ],
            Some("Annual Report"),
        )
        .extract_bytes(b"%PDF-1.4", Some("report"))
        .unwrap();

        assert_eq!(result.document.title, "Annual Report");
        assert_eq!(result.title.source, TitleSource::Metadata);
        let texts: Vec<_> = result.document.outline.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["1. Introduction", "1.1 Scope"]);
        assert_eq!(result.document.outline[0].page, 2);
    }

    #[test]
    fn test_pipeline_json_is_stable() {
        let outliner = outliner(vec!["OVERVIEW\n2. Methods\n04/10/2024"], None);
        let first = outliner.extract_bytes(b"%PDF-1.4", None).unwrap().to_json().unwrap();
        let second = outliner.extract_bytes(b"%PDF-1.4", None).unwrap().to_json().unwrap();
        assert_eq!(first, second);
        assert!(render::validate_outline_json(&first).is_ok());
    }

    #[test]
    fn test_line_verdicts_cover_every_line() {
        let result = outliner(vec!["OVERVIEW\n3\nplain words here"], None)
            .extract_bytes(b"%PDF-1.4", None)
            .unwrap();
        let verdicts = result.line_verdicts();
        assert_eq!(verdicts.len(), 3);
        assert_eq!(verdicts[1].verdict, Verdict::Noise(NoiseKind::PageNumber));
        assert_eq!(verdicts[2].verdict, Verdict::Body);
        assert_eq!(result.body_font_size(), None);
    }

    #[test]
    fn test_extract_outline_bytes_rejects_non_pdf() {
        assert!(matches!(
            extract_outline_bytes(b"<!DOCTYPE html>"),
            Err(Error::UnknownFormat)
        ));
        assert!(extract_outline_bytes(&[]).is_err());
    }
}

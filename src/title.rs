//! Document title resolution.
//!
//! Sources, in order: the metadata title unless it is a placeholder, the
//! largest-font lines on page 1, the first H1 heading of the leading
//! pages, then the first meaningful line of page 1.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::classify::{FontTier, HeadingPattern, LineClassifier, PageContext, Verdict};
use crate::model::{HeadingLevel, Line, Page};
use crate::options::HeuristicConfig;

static FILE_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(?:pdf|docx?|pptx?|xlsx?|tex|dvi|indd|rtf|odt)$").expect("valid regex")
});
static PRODUCER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^microsoft\s+(?:word|powerpoint|excel)\s+-\s+").expect("valid regex")
});

/// Where a resolved title came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSource {
    /// Document information dictionary
    Metadata,
    /// Largest font run on page 1
    Typography,
    /// First H1 heading of the leading pages
    Heading,
    /// First meaningful line of page 1
    FirstLine,
    /// Nothing usable
    None,
}

impl fmt::Display for TitleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TitleSource::Metadata => "metadata",
            TitleSource::Typography => "typography",
            TitleSource::Heading => "heading",
            TitleSource::FirstLine => "first-line",
            TitleSource::None => "none",
        };
        f.write_str(label)
    }
}

/// A resolved title and the page lines it was taken from.
#[derive(Debug, Clone, PartialEq)]
pub struct Title {
    /// Title text, `""` when none was found
    pub text: String,
    /// Source of the title
    pub source: TitleSource,
    /// `(page, line index)` of every line the title was built from
    pub lines: Vec<(u32, usize)>,
}

impl Title {
    fn new(text: String, source: TitleSource, lines: Vec<(u32, usize)>) -> Self {
        Self {
            text,
            source,
            lines,
        }
    }

    fn none() -> Self {
        Self::new(String::new(), TitleSource::None, Vec::new())
    }
}

/// Resolves the title of one document.
#[derive(Debug)]
pub struct TitleResolver<'a> {
    classifier: &'a LineClassifier,
    file_stem: Option<String>,
}

impl<'a> TitleResolver<'a> {
    /// Create a resolver using a document's classifier.
    pub fn new(classifier: &'a LineClassifier) -> Self {
        Self {
            classifier,
            file_stem: None,
        }
    }

    /// Treat a metadata title equal to this file stem as a placeholder.
    pub fn with_file_stem(mut self, stem: impl Into<String>) -> Self {
        self.file_stem = Some(stem.into());
        self
    }

    /// Resolve the title.
    pub fn resolve(&self, metadata_title: Option<&str>, pages: &[Page]) -> Title {
        if let Some(title) = metadata_title.map(str::trim) {
            if !is_placeholder(title, self.file_stem.as_deref()) {
                return Title::new(title.to_string(), TitleSource::Metadata, Vec::new());
            }
            log::debug!("Ignoring placeholder metadata title {:?}", title);
        }

        self.typographic_title(pages)
            .or_else(|| self.heading_title(pages))
            .or_else(|| self.first_line_title(pages))
            .unwrap_or_else(Title::none)
    }

    fn config(&self) -> &HeuristicConfig {
        self.classifier.config()
    }

    fn usable(&self, line: &Line, page: &Page) -> bool {
        let text = line.clean_text();
        text.chars().any(char::is_alphabetic)
            && self
                .classifier
                .noise(&text, &PageContext::of(line, page))
                .is_none()
    }

    /// Consecutive lines set in the largest font on page 1.
    fn typographic_title(&self, pages: &[Page]) -> Option<Title> {
        let page = pages.first()?;
        let largest = page
            .lines
            .iter()
            .filter(|l| self.usable(l, page))
            .filter_map(|l| l.font_size)
            .fold(None, |max: Option<f32>, s| Some(max.map_or(s, |m| m.max(s))))?;

        let baseline = self.classifier.baseline();
        if baseline.tier(largest, self.config()) != Some(FontTier::Large) {
            return None;
        }

        let same_size = |l: &Line| l.font_size.is_some_and(|s| (s - largest).abs() < 0.5);
        let start = page
            .lines
            .iter()
            .position(|l| same_size(l) && self.usable(l, page))?;

        let run: Vec<&Line> = page.lines[start..]
            .iter()
            .take_while(|l| same_size(l))
            .filter(|l| self.usable(l, page))
            .take(self.config().max_title_lines)
            .collect();

        let text = run
            .iter()
            .map(|l| l.clean_text())
            .collect::<Vec<_>>()
            .join(" ");
        let lines = run.iter().map(|l| (page.number, l.index)).collect();
        Some(Title::new(text, TitleSource::Typography, lines))
    }

    /// First non-numbered H1 on the leading pages.
    fn heading_title(&self, pages: &[Page]) -> Option<Title> {
        let limit = self.config().title_scan_pages;
        pages
            .iter()
            .take_while(|p| p.number <= limit)
            .flat_map(|page| page.lines.iter().map(move |line| (page, line)))
            .find_map(|(page, line)| {
                match self.classifier.inspect(line, &PageContext::of(line, page)) {
                    Verdict::Heading(c)
                        if c.level == HeadingLevel::H1
                            && c.pattern != HeadingPattern::Numbered =>
                    {
                        Some(Title::new(
                            c.text,
                            TitleSource::Heading,
                            vec![(page.number, line.index)],
                        ))
                    }
                    _ => None,
                }
            })
    }

    /// First non-noise line of page 1 longer than three characters.
    fn first_line_title(&self, pages: &[Page]) -> Option<Title> {
        let page = pages.first()?;
        page.lines
            .iter()
            .find(|l| l.clean_text().chars().count() > 3 && self.usable(l, page))
            .map(|line| {
                let text = truncate_at_word(&line.clean_text(), self.config().max_title_chars);
                Title::new(text, TitleSource::FirstLine, vec![(page.number, line.index)])
            })
    }
}

/// Resolve a title with the default thresholds.
pub fn resolve_title(metadata_title: Option<&str>, pages: &[Page]) -> String {
    let classifier = LineClassifier::new(pages, &HeuristicConfig::default());
    TitleResolver::new(&classifier)
        .resolve(metadata_title, pages)
        .text
}

/// Whether a metadata title is a generic placeholder.
pub fn is_placeholder(title: &str, file_stem: Option<&str>) -> bool {
    let title = title.trim();
    if title.chars().count() <= 2 || !title.chars().any(char::is_alphanumeric) {
        return true;
    }
    let lower = title.to_lowercase();
    if lower == "untitled" || lower.starts_with("untitled document") {
        return true;
    }
    if file_stem.is_some_and(|stem| stem.trim().to_lowercase() == lower) {
        return true;
    }
    FILE_LIKE.is_match(title) || PRODUCER_PREFIX.is_match(title)
}

/// Cut text to at most `max` characters, preferring a word boundary.
pub fn truncate_at_word(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    let boundary = match cut.rfind(char::is_whitespace) {
        Some(pos) if pos > 0 => &cut[..pos],
        _ => cut.as_str(),
    };
    boundary.trim_end().to_string()
}

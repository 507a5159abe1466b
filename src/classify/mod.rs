//! Line classification: noise filtering and heading detection.
//!
//! A [`LineClassifier`] is built once per document. Construction measures
//! the document's body font size and its running header/footer lines; after
//! that each line is judged on its own text, font and page position.

mod font;
mod noise;
mod patterns;
mod running;

pub use font::{FontBaseline, FontTier};
pub use noise::{detect_noise, is_date, is_page_number, is_punctuation_only, NoiseKind};
pub use patterns::{is_title_case, is_uppercase_heading, numbered_depth, HeadingPattern};
pub use running::{in_edge_zone, running_key, RunningText};

use std::fmt;

use crate::model::{HeadingLevel, Line, OutlineEntry, Page};
use crate::options::HeuristicConfig;

/// Where a line sits in its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageContext {
    /// Page number (1-indexed)
    pub page: u32,
    /// Line position, 0 = topmost
    pub position: usize,
    /// Lines on the page
    pub total_lines: usize,
}

impl PageContext {
    /// Create a context.
    pub fn new(page: u32, position: usize, total_lines: usize) -> Self {
        Self {
            page,
            position,
            total_lines,
        }
    }

    /// Context of a line on its page.
    pub fn of(line: &Line, page: &Page) -> Self {
        Self::new(page.number, line.index, page.lines.len())
    }
}

/// A line accepted as a heading.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    /// Inferred level
    pub level: HeadingLevel,
    /// Trimmed text with whitespace collapsed, original casing
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Shape that matched
    pub pattern: HeadingPattern,
    /// Font size of the line, when known
    pub font_size: Option<f32>,
}

impl HeadingCandidate {
    /// Convert into an outline entry.
    pub fn into_entry(self) -> Option<OutlineEntry> {
        OutlineEntry::new(self.level, self.text, self.page)
    }
}

/// The full decision for one line.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Rejected by a noise filter
    Noise(NoiseKind),
    /// Plain body text
    Body,
    /// Accepted heading
    Heading(HeadingCandidate),
}

impl Verdict {
    /// The heading, if accepted.
    pub fn heading(&self) -> Option<&HeadingCandidate> {
        match self {
            Verdict::Heading(candidate) => Some(candidate),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Noise(kind) => write!(f, "noise:{}", kind),
            Verdict::Body => f.write_str("body"),
            Verdict::Heading(c) => write!(f, "{} ({})", c.level, c.pattern),
        }
    }
}

/// Classifies the lines of one document.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    config: HeuristicConfig,
    baseline: FontBaseline,
    running: RunningText,
}

impl LineClassifier {
    /// Build a classifier for a document's pages.
    pub fn new(pages: &[Page], config: &HeuristicConfig) -> Self {
        let baseline = FontBaseline::from_pages(pages);
        let running = RunningText::from_pages(pages, config);
        log::debug!(
            "Body font size {:?}, {} running header/footer keys",
            baseline.body_size(),
            running.recurring_count()
        );
        Self {
            config: config.clone(),
            baseline,
            running,
        }
    }

    /// The document's font statistics.
    pub fn baseline(&self) -> &FontBaseline {
        &self.baseline
    }

    /// The thresholds in use.
    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }

    /// Accept a line as a heading or reject it.
    pub fn classify(&self, line: &Line, ctx: &PageContext) -> Option<HeadingCandidate> {
        match self.inspect(line, ctx) {
            Verdict::Heading(candidate) => Some(candidate),
            _ => None,
        }
    }

    /// Judge a line, reporting why it was rejected.
    pub fn inspect(&self, line: &Line, ctx: &PageContext) -> Verdict {
        let verdict = self.judge(line, ctx);
        log::trace!("p{} #{} {:?}: {}", ctx.page, ctx.position, line.text, verdict);
        verdict
    }

    /// Noise check only: the lexical filters plus running text.
    ///
    /// A line recurring verbatim is running text. A line that only recurs
    /// with its digits masked is running text unless it is heading-shaped,
    /// so `CHAPTER 1`, `CHAPTER 2`, ... on successive pages stay headings.
    pub fn noise(&self, text: &str, ctx: &PageContext) -> Option<NoiseKind> {
        if let Some(kind) = detect_noise(text, &self.config) {
            return Some(kind);
        }
        if !self.config.footer_filter {
            return None;
        }
        let (position, total) = (ctx.position, ctx.total_lines);
        if self.running.is_running(text, position, total)
            || (self.running.is_running_masked(text, position, total)
                && !self.is_heading_shaped(text))
        {
            return Some(NoiseKind::RunningText);
        }
        None
    }

    fn is_heading_shaped(&self, text: &str) -> bool {
        numbered_depth(text).is_some()
            || is_uppercase_heading(text, &self.config)
            || is_title_case(text, &self.config)
    }

    fn judge(&self, line: &Line, ctx: &PageContext) -> Verdict {
        let text = line.clean_text();
        if let Some(kind) = self.noise(&text, ctx) {
            return Verdict::Noise(kind);
        }
        if text.chars().count() > self.config.max_heading_chars || ends_like_sentence(&text) {
            return Verdict::Body;
        }

        let tier = self.baseline.line_tier(line, &self.config);
        match self.match_heading(&text, line, tier) {
            Some((level, pattern)) => Verdict::Heading(HeadingCandidate {
                level,
                text,
                page: ctx.page,
                pattern,
                font_size: line.font_size,
            }),
            None => Verdict::Body,
        }
    }

    fn match_heading(
        &self,
        text: &str,
        line: &Line,
        tier: Option<FontTier>,
    ) -> Option<(HeadingLevel, HeadingPattern)> {
        // Footnotes and fine print never head a section.
        if tier == Some(FontTier::Small) {
            return None;
        }

        if let Some(depth) = numbered_depth(text) {
            return HeadingLevel::from_depth(depth).map(|l| (l, HeadingPattern::Numbered));
        }

        if is_uppercase_heading(text, &self.config) {
            let level = match tier {
                Some(FontTier::Large) => HeadingLevel::H1,
                Some(FontTier::Medium) => HeadingLevel::H2,
                _ if text.split_whitespace().count() <= self.config.short_caps_words => {
                    HeadingLevel::H1
                }
                _ => HeadingLevel::H2,
            };
            return Some((level, HeadingPattern::Uppercase));
        }

        if is_title_case(text, &self.config) {
            let level = match tier {
                Some(FontTier::Large) | Some(FontTier::Medium) => HeadingLevel::H2,
                Some(_) if self.config.require_emphasis && !line.is_bold() => return None,
                _ => HeadingLevel::H3,
            };
            return Some((level, HeadingPattern::TitleCase));
        }

        None
    }
}

/// Whether a line ends the way running prose does.
pub fn ends_like_sentence(text: &str) -> bool {
    if text.ends_with("...") || text.ends_with('…') {
        return false;
    }
    text.ends_with(['.', ',', ';', '!', '?'])
}

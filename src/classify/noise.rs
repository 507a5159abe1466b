//! Lexical noise filters: dates, page numbers, leaders, boilerplate.

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::options::HeuristicConfig;

/// Why a line was rejected before heading matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoiseKind {
    /// Blank after trimming
    Empty,
    /// Fewer characters than the minimum
    TooShort,
    /// Only punctuation and symbols
    Punctuation,
    /// A calendar date
    Date,
    /// A standalone page number
    PageNumber,
    /// A table-of-contents entry with leaders
    TocLeader,
    /// Copyright notice, URL or e-mail address
    Boilerplate,
    /// Too many words for a heading
    TooManyWords,
    /// Running header or footer
    RunningText,
}

impl NoiseKind {
    /// Short label for diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            NoiseKind::Empty => "empty",
            NoiseKind::TooShort => "too-short",
            NoiseKind::Punctuation => "punctuation",
            NoiseKind::Date => "date",
            NoiseKind::PageNumber => "page-number",
            NoiseKind::TocLeader => "toc-leader",
            NoiseKind::Boilerplate => "boilerplate",
            NoiseKind::TooManyWords => "too-many-words",
            NoiseKind::RunningText => "running-text",
        }
    }
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static NUMERIC_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{2}|\d{4})$").expect("valid regex")
});
static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})[/.\-](\d{1,2})[/.\-](\d{1,2})$").expect("valid regex"));
static MONTH_FIRST_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([a-z]{3,9})\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})$")
        .expect("valid regex")
});
static DAY_FIRST_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2})(?:st|nd|rd|th)?\s+([a-z]{3,9})\.?,?\s+(\d{4})$")
        .expect("valid regex")
});
static PAGE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)^(?:
            page\s+\d+(?:\s+of\s+\d+)?
          | \d+\s+of\s+\d+
          | [-–—]\s*\d+\s*[-–—]
          | \d{1,4}
          | m{0,3}(?:cm|cd|d?c{0,3})(?:xc|xl|l?x{0,3})(?:ix|iv|v?i{0,3})
        )$",
    )
    .expect("valid regex")
});
static PAGE_FOOTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\S\s*[-–—|·•,]\s*(?:page|pg\.?|p\.)\s*\d+(?:\s*(?:of|/)\s*\d+)?$")
        .expect("valid regex")
});
static TOC_LEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\.{4,}|(?:\.\s){3,}|_{4,}|…{2,})\s*(?:\d+|[ivxlcdm]+)$").expect("valid regex")
});
static BOILERPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)^(?:
            copyright\b.*
          | ©.*
          | \(c\)\s*\d{4}.*
          | .*\ball\s+rights\s+reserved\b.*
          | (?:https?://|www\.)\S+
          | [\w.+\-]+@[\w\-]+(?:\.[\w\-]+)+
        )$",
    )
    .expect("valid regex")
});

/// Check a trimmed, whitespace-collapsed line against every lexical filter.
///
/// Running headers and footers need document context and are checked by
/// the classifier.
pub fn detect_noise(text: &str, config: &HeuristicConfig) -> Option<NoiseKind> {
    if text.is_empty() {
        return Some(NoiseKind::Empty);
    }
    if text.chars().count() < config.min_chars {
        // Short numbers are still reported as page numbers.
        if PAGE_NUMBER.is_match(text) {
            return Some(NoiseKind::PageNumber);
        }
        return Some(NoiseKind::TooShort);
    }
    if is_punctuation_only(text) {
        return Some(NoiseKind::Punctuation);
    }
    if is_date(text) {
        return Some(NoiseKind::Date);
    }
    if PAGE_NUMBER.is_match(text) || PAGE_FOOTER.is_match(text) {
        return Some(NoiseKind::PageNumber);
    }
    if TOC_LEADER.is_match(text) {
        return Some(NoiseKind::TocLeader);
    }
    if BOILERPLATE.is_match(text) {
        return Some(NoiseKind::Boilerplate);
    }
    if text.split_whitespace().count() > config.max_line_words {
        return Some(NoiseKind::TooManyWords);
    }
    None
}

/// Whether the text has no letters or digits.
pub fn is_punctuation_only(text: &str) -> bool {
    !text.chars().any(char::is_alphanumeric)
}

/// Whether the text is a real calendar date in a common layout.
pub fn is_date(text: &str) -> bool {
    if let Some(caps) = NUMERIC_DATE.captures(text) {
        let normalized = format!("{}/{}/{}", &caps[1], &caps[2], &caps[3]);
        let formats: &[&str] = if caps[3].len() == 4 {
            &["%d/%m/%Y", "%m/%d/%Y"]
        } else {
            &["%d/%m/%y", "%m/%d/%y"]
        };
        return parses(&normalized, formats);
    }
    if let Some(caps) = ISO_DATE.captures(text) {
        let normalized = format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]);
        return parses(&normalized, &["%Y-%m-%d"]);
    }
    if let Some(caps) = MONTH_FIRST_DATE.captures(text) {
        let normalized = format!("{} {} {}", &caps[1], &caps[2], &caps[3]);
        return parses(&normalized, &["%B %d %Y", "%b %d %Y"]);
    }
    if let Some(caps) = DAY_FIRST_DATE.captures(text) {
        let normalized = format!("{} {} {}", &caps[1], &caps[2], &caps[3]);
        return parses(&normalized, &["%d %B %Y", "%d %b %Y"]);
    }
    false
}

fn parses(text: &str, formats: &[&str]) -> bool {
    formats
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(text, fmt).is_ok())
}

/// Whether the text is a standalone page number.
pub fn is_page_number(text: &str) -> bool {
    PAGE_NUMBER.is_match(text)
}

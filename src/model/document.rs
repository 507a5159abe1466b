//! Outline document types: the persisted unit of the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A heading level in the three-tier outline hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level section
    H1,
    /// Subsection
    H2,
    /// Sub-subsection
    H3,
}

impl HeadingLevel {
    /// Depth of the level, 1 for H1.
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Level for a numbering depth; anything past three clamps to H3.
    pub fn from_depth(depth: usize) -> Option<Self> {
        match depth {
            0 => None,
            1 => Some(HeadingLevel::H1),
            2 => Some(HeadingLevel::H2),
            _ => Some(HeadingLevel::H3),
        }
    }

    /// The schema label (`"H1"`, `"H2"`, `"H3"`).
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One heading in the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level
    pub level: HeadingLevel,

    /// Heading text, trimmed
    pub text: String,

    /// Page the heading occurs on (1-indexed)
    pub page: u32,
}

impl OutlineEntry {
    /// Create an entry, or `None` if the text is blank, punctuation-only,
    /// or the page is 0.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Option<Self> {
        let text = text.into().trim().to_string();
        if page == 0 || !text.chars().any(char::is_alphanumeric) {
            return None;
        }
        Some(Self { level, text, page })
    }
}

/// The extracted outline of one PDF.
///
/// Field order matches the output schema: `title` first, then `outline`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineDocument {
    /// Document title, `""` when none could be found
    pub title: String,

    /// Headings in reading order
    pub outline: Vec<OutlineEntry>,
}

impl OutlineDocument {
    /// Create a document from a title and its entries.
    pub fn new(title: impl Into<String>, outline: Vec<OutlineEntry>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// Whether the outline has no headings.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Count headings at a given level.
    pub fn count_level(&self, level: HeadingLevel) -> usize {
        self.outline.iter().filter(|e| e.level == level).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_depth_clamps() {
        assert_eq!(HeadingLevel::from_depth(0), None);
        assert_eq!(HeadingLevel::from_depth(1), Some(HeadingLevel::H1));
        assert_eq!(HeadingLevel::from_depth(2), Some(HeadingLevel::H2));
        assert_eq!(HeadingLevel::from_depth(3), Some(HeadingLevel::H3));
        assert_eq!(HeadingLevel::from_depth(5), Some(HeadingLevel::H3));
    }

    #[test]
    fn test_entry_rejects_blank_and_punctuation() {
        assert!(OutlineEntry::new(HeadingLevel::H1, "   ", 1).is_none());
        assert!(OutlineEntry::new(HeadingLevel::H1, "--- * ---", 1).is_none());
        assert!(OutlineEntry::new(HeadingLevel::H1, "Scope", 0).is_none());

        let entry = OutlineEntry::new(HeadingLevel::H2, "  2.1 Scope ", 4).unwrap();
        assert_eq!(entry.text, "2.1 Scope");
        assert_eq!(entry.page, 4);
    }

    #[test]
    fn test_entry_serializes_schema_fields() {
        let entry = OutlineEntry::new(HeadingLevel::H3, "1.2.3 Deep Detail", 5).unwrap();
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"level":"H3","text":"1.2.3 Deep Detail","page":5}"#);
    }

    #[test]
    fn test_document_key_order() {
        let doc = OutlineDocument::new("Report", vec![]);
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"{"title":"Report","outline":[]}"#);
    }
}

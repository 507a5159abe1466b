//! Page-level types produced by the extraction engines.

use serde::{Deserialize, Serialize};

/// A single extracted page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Raw extracted text of the page
    pub text: String,

    /// Lines in top-to-bottom reading order
    pub lines: Vec<Line>,
}

impl Page {
    /// Build a page from raw text, one [`Line`] per text line.
    ///
    /// Used by engines that expose no layout information; the lines carry
    /// no font metadata.
    pub fn from_text(number: u32, text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = text
            .lines()
            .enumerate()
            .map(|(index, line)| Line::new(line, number, index))
            .collect();
        Self {
            number,
            text,
            lines,
        }
    }

    /// Build a page from laid-out lines. The raw text is the lines joined
    /// with newlines.
    pub fn from_lines(number: u32, mut lines: Vec<Line>) -> Self {
        for (index, line) in lines.iter_mut().enumerate() {
            line.page = number;
            line.index = index;
        }
        let text = lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            number,
            text,
            lines,
        }
    }

    /// Whether the page carries any non-whitespace text.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Whether any line on the page carries a font size.
    pub fn has_layout(&self) -> bool {
        self.lines.iter().any(|l| l.font_size.is_some())
    }

    /// Number of lines on the page.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// One line of text with optional typographic metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Text content, untrimmed
    pub text: String,

    /// Dominant font size in points
    pub font_size: Option<f32>,

    /// Whether the line is predominantly set in a bold face
    pub bold: Option<bool>,

    /// Left edge in PDF user space
    pub x: Option<f32>,

    /// Owning page number (1-indexed)
    pub page: u32,

    /// Position within the page, 0 = topmost
    pub index: usize,
}

impl Line {
    /// Create a line without font metadata.
    pub fn new(text: impl Into<String>, page: u32, index: usize) -> Self {
        Self {
            text: text.into(),
            page,
            index,
            ..Default::default()
        }
    }

    /// Attach font size and boldness.
    pub fn with_font(mut self, size: f32, bold: bool) -> Self {
        self.font_size = Some(size);
        self.bold = Some(bold);
        self
    }

    /// Attach the left edge position.
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = Some(x);
        self
    }

    /// Text with surrounding whitespace removed and inner runs collapsed.
    pub fn clean_text(&self) -> String {
        collapse_whitespace(&self.text)
    }

    /// Whether the line is bold. Unknown counts as not bold.
    pub fn is_bold(&self) -> bool {
        self.bold.unwrap_or(false)
    }
}

/// Trim and collapse every whitespace run to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_text_numbers_lines() {
        let page = Page::from_text(3, "Title\n\nBody text here");
        assert_eq!(page.number, 3);
        assert_eq!(page.line_count(), 3);
        assert_eq!(page.lines[2].text, "Body text here");
        assert_eq!(page.lines[2].index, 2);
        assert!(page.lines.iter().all(|l| l.page == 3));
        assert!(!page.has_layout());
    }

    #[test]
    fn test_page_from_lines_rewrites_positions() {
        let lines = vec![
            Line::new("A heading", 0, 9).with_font(18.0, true),
            Line::new("body", 0, 9).with_font(10.0, false),
        ];
        let page = Page::from_lines(2, lines);
        assert_eq!(page.text, "A heading\nbody");
        assert_eq!(page.lines[1].index, 1);
        assert_eq!(page.lines[0].page, 2);
        assert!(page.has_layout());
    }

    #[test]
    fn test_empty_page_has_no_text() {
        let page = Page::from_text(1, "  \n\t\n");
        assert!(!page.has_text());
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        let line = Line::new("  2.1   Method \t Overview ", 1, 0);
        assert_eq!(line.clean_text(), "2.1 Method Overview");
        assert!(!line.is_bold());
    }
}

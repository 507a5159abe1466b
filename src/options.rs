//! Heuristic thresholds and pipeline options.

use crate::render::JsonFormat;

/// Every threshold used by the classifier and title resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicConfig {
    /// Lines shorter than this (after trim) are noise
    pub min_chars: usize,

    /// Lines with more words than this are body text
    pub max_line_words: usize,

    /// Lines longer than this are body text
    pub max_heading_chars: usize,

    /// Word limit for uppercase and title-case headings
    pub max_heading_words: usize,

    /// Uppercase lines with at most this many words default to H1
    pub short_caps_words: usize,

    /// Minimum length of a title-case heading
    pub min_title_chars: usize,

    /// Comparable-size title-case lines must be bold when font data exists.
    /// Off by default: such lines are H3.
    pub require_emphasis: bool,

    /// Filter running headers and footers
    pub footer_filter: bool,

    /// Lines at the top or bottom of a page considered header/footer zone
    pub edge_zone_lines: usize,

    /// Pages an edge line must recur on to count as running text
    pub footer_min_pages: usize,

    /// Size ratio to body text for the large tier
    pub large_ratio: f32,

    /// Size ratio to body text for the medium tier
    pub medium_ratio: f32,

    /// Size ratio to body text below which a line is small
    pub comparable_ratio: f32,

    /// Leading pages scanned for a title heading
    pub title_scan_pages: u32,

    /// Maximum lines joined into a typographic title
    pub max_title_lines: usize,

    /// Fallback titles are truncated to this many characters
    pub max_title_chars: usize,
}

impl HeuristicConfig {
    /// Create a config with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum line length.
    pub fn with_min_chars(mut self, n: usize) -> Self {
        self.min_chars = n;
        self
    }

    /// Set the word count above which a line is body text.
    pub fn with_max_line_words(mut self, n: usize) -> Self {
        self.max_line_words = n;
        self
    }

    /// Set the character limit for headings.
    pub fn with_max_heading_chars(mut self, n: usize) -> Self {
        self.max_heading_chars = n;
        self
    }

    /// Set the word limit for case-based headings.
    pub fn with_max_heading_words(mut self, n: usize) -> Self {
        self.max_heading_words = n;
        self
    }

    /// Set the word limit for short uppercase headings.
    pub fn with_short_caps_words(mut self, n: usize) -> Self {
        self.short_caps_words = n;
        self
    }

    /// Set the minimum title-case heading length.
    pub fn with_min_title_chars(mut self, n: usize) -> Self {
        self.min_title_chars = n;
        self
    }

    /// Require bold for comparable-size title-case headings.
    pub fn with_require_emphasis(mut self, on: bool) -> Self {
        self.require_emphasis = on;
        self
    }

    /// Enable or disable running header/footer filtering.
    pub fn with_footer_filter(mut self, on: bool) -> Self {
        self.footer_filter = on;
        self
    }

    /// Set the header/footer zone depth and recurrence threshold.
    pub fn with_edge_zone(mut self, lines: usize, min_pages: usize) -> Self {
        self.edge_zone_lines = lines;
        self.footer_min_pages = min_pages.max(2);
        self
    }

    /// Set the font tier ratios (large, medium, comparable).
    pub fn with_tier_ratios(mut self, large: f32, medium: f32, comparable: f32) -> Self {
        self.large_ratio = large;
        self.medium_ratio = medium;
        self.comparable_ratio = comparable;
        self
    }

    /// Set how many leading pages are scanned for a title.
    pub fn with_title_scan_pages(mut self, pages: u32) -> Self {
        self.title_scan_pages = pages.max(1);
        self
    }

    /// Set the maximum fallback title length.
    pub fn with_max_title_chars(mut self, n: usize) -> Self {
        self.max_title_chars = n;
        self
    }
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            min_chars: 3,
            max_line_words: 20,
            max_heading_chars: 100,
            max_heading_words: 12,
            short_caps_words: 4,
            min_title_chars: 5,
            require_emphasis: false,
            footer_filter: true,
            edge_zone_lines: 3,
            footer_min_pages: 3,
            large_ratio: 1.5,
            medium_ratio: 1.15,
            comparable_ratio: 0.9,
            title_scan_pages: 2,
            max_title_lines: 3,
            max_title_chars: 120,
        }
    }
}

/// What to do with level jumps in the assembled outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HierarchyPolicy {
    /// Keep the levels as classified
    #[default]
    Preserve,
    /// Clamp each entry to at most one level below the previous one
    Repair,
}

/// Options for the whole pipeline.
#[derive(Debug, Clone, Default)]
pub struct OutlineOptions {
    /// Classifier and title thresholds
    pub heuristics: HeuristicConfig,

    /// Level post-processing
    pub hierarchy: HierarchyPolicy,

    /// JSON layout
    pub format: JsonFormat,
}

impl OutlineOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heuristic thresholds.
    pub fn with_heuristics(mut self, heuristics: HeuristicConfig) -> Self {
        self.heuristics = heuristics;
        self
    }

    /// Set the hierarchy policy.
    pub fn with_hierarchy(mut self, policy: HierarchyPolicy) -> Self {
        self.hierarchy = policy;
        self
    }

    /// Enable hierarchy repair.
    pub fn repair_hierarchy(mut self) -> Self {
        self.hierarchy = HierarchyPolicy::Repair;
        self
    }

    /// Set the JSON layout.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Single-line JSON.
    pub fn compact(mut self) -> Self {
        self.format = JsonFormat::Compact;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = HeuristicConfig::default();
        assert_eq!(config.min_chars, 3);
        assert_eq!(config.max_line_words, 20);
        assert_eq!(config.max_heading_words, 12);
        assert_eq!(config.short_caps_words, 4);
        assert_eq!(config.footer_min_pages, 3);
        assert!(!config.require_emphasis);
        assert!(config.footer_filter);
        assert!((config.large_ratio - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_config_builder() {
        let config = HeuristicConfig::new()
            .with_max_heading_words(8)
            .with_footer_filter(false)
            .with_edge_zone(2, 1)
            .with_title_scan_pages(0);
        assert_eq!(config.max_heading_words, 8);
        assert!(!config.footer_filter);
        assert_eq!(config.edge_zone_lines, 2);
        assert_eq!(config.footer_min_pages, 2);
        assert_eq!(config.title_scan_pages, 1);
    }

    #[test]
    fn test_outline_options_builder() {
        let options = OutlineOptions::new().repair_hierarchy().compact();
        assert_eq!(options.hierarchy, HierarchyPolicy::Repair);
        assert_eq!(options.format, JsonFormat::Compact);

        let defaults = OutlineOptions::default();
        assert_eq!(defaults.hierarchy, HierarchyPolicy::Preserve);
        assert_eq!(defaults.format, JsonFormat::Pretty);
    }
}

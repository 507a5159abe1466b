//! Outline assembly: classify every line in reading order, then dedup.

use unicode_normalization::UnicodeNormalization;

use crate::classify::{LineClassifier, PageContext};
use crate::model::{HeadingLevel, Line, OutlineEntry, Page};
use crate::options::{HeuristicConfig, HierarchyPolicy};
use crate::title::Title;

/// Builds the outline of one document.
#[derive(Debug)]
pub struct OutlineAssembler<'a> {
    classifier: &'a LineClassifier,
}

impl<'a> OutlineAssembler<'a> {
    /// Create an assembler using a document's classifier.
    pub fn new(classifier: &'a LineClassifier) -> Self {
        Self { classifier }
    }

    /// Classify every line, page by page and top to bottom.
    pub fn assemble(&self, pages: &[Page]) -> Vec<OutlineEntry> {
        self.collect(pages, |_, _| false)
    }

    /// Like [`assemble`](Self::assemble), but leaves out the lines the title
    /// was taken from and the first heading repeating the title.
    pub fn assemble_with_title(&self, pages: &[Page], title: &Title) -> Vec<OutlineEntry> {
        let title_key = normalize_key(&title.text);
        let scan_pages = self.classifier.config().title_scan_pages;
        let mut repeat_dropped = title_key.is_empty();

        self.collect(pages, |page, line| {
            if title.lines.contains(&(page.number, line.index)) {
                return true;
            }
            if !repeat_dropped
                && page.number <= scan_pages
                && normalize_key(&line.text) == title_key
            {
                repeat_dropped = true;
                return true;
            }
            false
        })
    }

    fn collect<F>(&self, pages: &[Page], mut skip: F) -> Vec<OutlineEntry>
    where
        F: FnMut(&Page, &Line) -> bool,
    {
        let mut entries = Vec::new();
        for page in pages {
            for line in &page.lines {
                if skip(page, line) {
                    continue;
                }
                let candidate = self.classifier.classify(line, &PageContext::of(line, page));
                if let Some(entry) = candidate.and_then(|c| c.into_entry()) {
                    entries.push(entry);
                }
            }
        }
        dedup_consecutive(entries)
    }
}

/// Assemble an outline with the default thresholds.
pub fn assemble(pages: &[Page]) -> Vec<OutlineEntry> {
    let classifier = LineClassifier::new(pages, &HeuristicConfig::default());
    OutlineAssembler::new(&classifier).assemble(pages)
}

/// Drop entries repeating the previous entry's normalized text on the same
/// page.
pub fn dedup_consecutive(entries: Vec<OutlineEntry>) -> Vec<OutlineEntry> {
    let mut result: Vec<OutlineEntry> = Vec::with_capacity(entries.len());
    let mut last_key = String::new();
    for entry in entries {
        let key = normalize_key(&entry.text);
        if let Some(prev) = result.last() {
            if prev.page == entry.page && key == last_key {
                continue;
            }
        }
        last_key = key;
        result.push(entry);
    }
    result
}

/// NFKC, lowercase, whitespace collapsed.
pub fn normalize_key(text: &str) -> String {
    let normalized: String = text.nfkc().collect();
    normalized
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Apply a hierarchy policy in place.
pub fn apply_policy(entries: &mut [OutlineEntry], policy: HierarchyPolicy) {
    if policy == HierarchyPolicy::Repair {
        repair_hierarchy(entries);
    }
}

/// Clamp every entry to at most one level below its predecessor. The first
/// entry becomes H1.
pub fn repair_hierarchy(entries: &mut [OutlineEntry]) {
    let mut previous = 0u8;
    for entry in entries.iter_mut() {
        let depth = entry.level.depth().min(previous + 1);
        if let Some(level) = HeadingLevel::from_depth(depth as usize) {
            entry.level = level;
        }
        previous = depth;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::title::TitleSource;

    fn entry(level: HeadingLevel, text: &str, page: u32) -> OutlineEntry {
        OutlineEntry::new(level, text, page).unwrap()
    }

    #[test]
    fn test_assemble_reading_order() {
        let pages = vec![
            Page::from_text(1, "INTRODUCTION\nSome body prose that is not a heading."),
            Page::from_text(2, "1. Scope\n1.1 Goals\nbody\n1.1.1 Detail"),
        ];
        let outline = assemble(&pages);
        let texts: Vec<_> = outline.iter().map(|e| (e.text.as_str(), e.level, e.page)).collect();
        assert_eq!(
            texts,
            vec![
                ("INTRODUCTION", HeadingLevel::H1, 1),
                ("1. Scope", HeadingLevel::H1, 2),
                ("1.1 Goals", HeadingLevel::H2, 2),
                ("1.1.1 Detail", HeadingLevel::H3, 2),
            ]
        );
    }

    #[test]
    fn test_dedup_consecutive_same_page_only() {
        let entries = vec![
            entry(HeadingLevel::H1, "Overview", 1),
            entry(HeadingLevel::H1, "OVERVIEW", 1),
            entry(HeadingLevel::H1, "Overview", 2),
            entry(HeadingLevel::H2, "Scope", 2),
            entry(HeadingLevel::H1, "Overview", 2),
        ];
        let result = dedup_consecutive(entries);
        let pages: Vec<_> = result.iter().map(|e| (e.text.as_str(), e.page)).collect();
        assert_eq!(
            pages,
            vec![("Overview", 1), ("Overview", 2), ("Scope", 2), ("Overview", 2)]
        );
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("  Ｒｅｓｕｌｔｓ \t And  Notes "), "results and notes");
    }

    #[test]
    fn test_assemble_with_title_drops_title_line() {
        let pages = vec![Page::from_text(
            1,
            "ANNUAL REPORT\nbody prose, not a heading,\nANNUAL REPORT\nSUMMARY",
        )];
        let classifier = LineClassifier::new(&pages, &HeuristicConfig::default());
        let title = Title {
            text: "Annual Report".to_string(),
            source: TitleSource::Metadata,
            lines: Vec::new(),
        };
        let outline = OutlineAssembler::new(&classifier).assemble_with_title(&pages, &title);
        let texts: Vec<_> = outline.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["ANNUAL REPORT", "SUMMARY"]);
    }

    #[test]
    fn test_assemble_with_title_skips_source_lines() {
        let pages = vec![Page::from_text(1, "PROJECT\nPLAN\nGOALS")];
        let classifier = LineClassifier::new(&pages, &HeuristicConfig::default());
        let title = Title {
            text: "PROJECT PLAN".to_string(),
            source: TitleSource::Typography,
            lines: vec![(1, 0), (1, 1)],
        };
        let outline = OutlineAssembler::new(&classifier).assemble_with_title(&pages, &title);
        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].text, "GOALS");
    }

    #[test]
    fn test_repair_hierarchy() {
        let mut entries = vec![
            entry(HeadingLevel::H3, "Orphan", 1),
            entry(HeadingLevel::H1, "Top", 1),
            entry(HeadingLevel::H3, "Jump", 2),
            entry(HeadingLevel::H3, "Sibling", 2),
            entry(HeadingLevel::H2, "Back", 3),
        ];
        repair_hierarchy(&mut entries);
        let levels: Vec<_> = entries.iter().map(|e| e.level).collect();
        assert_eq!(
            levels,
            vec![
                HeadingLevel::H1,
                HeadingLevel::H1,
                HeadingLevel::H2,
                HeadingLevel::H3,
                HeadingLevel::H2,
            ]
        );
        for pair in entries.windows(2) {
            assert!(pair[1].level.depth() <= pair[0].level.depth() + 1);
        }
    }

    #[test]
    fn test_preserve_policy_is_noop() {
        let mut entries = vec![entry(HeadingLevel::H3, "Deep", 1)];
        apply_policy(&mut entries, HierarchyPolicy::Preserve);
        assert_eq!(entries[0].level, HeadingLevel::H3);
        apply_policy(&mut entries, HierarchyPolicy::Repair);
        assert_eq!(entries[0].level, HeadingLevel::H1);
    }
}

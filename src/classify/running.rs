//! Running header and footer detection.
//!
//! Lines near the top or bottom of a page are keyed twice: by their
//! normalized text, and with digit runs masked so `Page 3 of 10` and
//! `Page 4 of 10` share a key. A key seen in the edge zone of enough pages
//! marks running text. Masked matches are only trusted by the classifier
//! for lines that are not heading-shaped, so `CHAPTER 1`, `CHAPTER 2`, ...
//! survive.

use std::collections::{BTreeSet, HashMap};

use unicode_normalization::UnicodeNormalization;

use crate::model::Page;
use crate::options::HeuristicConfig;

/// Edge-zone keys of one document and the pages they occur on.
#[derive(Debug, Clone, Default)]
pub struct RunningText {
    pages_by_key: HashMap<String, BTreeSet<u32>>,
    pages_by_masked: HashMap<String, BTreeSet<u32>>,
    zone: usize,
    min_pages: usize,
}

impl RunningText {
    /// Scan the edge zone of every page.
    pub fn from_pages(pages: &[Page], config: &HeuristicConfig) -> Self {
        let mut table = Self {
            pages_by_key: HashMap::new(),
            pages_by_masked: HashMap::new(),
            zone: config.edge_zone_lines,
            min_pages: config.footer_min_pages,
        };
        for page in pages {
            let total = page.lines.len();
            for (position, line) in page.lines.iter().enumerate() {
                if !in_edge_zone(position, total, table.zone) {
                    continue;
                }
                let key = normalized_key(&line.text);
                if !key.chars().any(char::is_alphanumeric) {
                    continue;
                }
                table
                    .pages_by_masked
                    .entry(mask_digits(&key))
                    .or_default()
                    .insert(page.number);
                table.pages_by_key.entry(key).or_default().insert(page.number);
            }
        }
        table
    }

    /// Whether a line at this position recurs verbatim as header or footer
    /// text.
    pub fn is_running(&self, text: &str, position: usize, total_lines: usize) -> bool {
        in_edge_zone(position, total_lines, self.zone)
            && self.recurs(&self.pages_by_key, &normalized_key(text))
    }

    /// Whether a line at this position recurs once digit runs are masked,
    /// as page-numbered footers do.
    pub fn is_running_masked(&self, text: &str, position: usize, total_lines: usize) -> bool {
        in_edge_zone(position, total_lines, self.zone)
            && self.recurs(&self.pages_by_masked, &running_key(text))
    }

    fn recurs(&self, table: &HashMap<String, BTreeSet<u32>>, key: &str) -> bool {
        table
            .get(key)
            .is_some_and(|pages| pages.len() >= self.min_pages)
    }

    /// Number of distinct recurring masked keys.
    pub fn recurring_count(&self) -> usize {
        self.pages_by_masked
            .values()
            .filter(|pages| pages.len() >= self.min_pages)
            .count()
    }
}

/// Whether a line position is in the top or bottom `zone` lines of a page.
pub fn in_edge_zone(position: usize, total_lines: usize, zone: usize) -> bool {
    position < zone || position + zone >= total_lines
}

/// NFKC-normalized, lowercased, whitespace-collapsed text.
fn normalized_key(text: &str) -> String {
    let normalized: String = text.nfkc().collect::<String>().to_lowercase();
    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// [`normalized_key`] with every digit run replaced by `#`.
pub fn running_key(text: &str) -> String {
    mask_digits(&normalized_key(text))
}

fn mask_digits(key: &str) -> String {
    let mut masked = String::with_capacity(key.len());
    let mut in_digits = false;
    for c in key.chars() {
        if c.is_ascii_digit() {
            if !in_digits {
                masked.push('#');
                in_digits = true;
            }
        } else {
            in_digits = false;
            masked.push(c);
        }
    }
    masked
}

//! Body-text font baseline and size tiers.

use std::collections::BTreeMap;

use crate::model::{Line, Page};
use crate::options::HeuristicConfig;

/// Size of a line relative to the body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FontTier {
    /// Below the comparable ratio
    Small,
    /// Roughly body size
    Comparable,
    /// Noticeably larger
    Medium,
    /// Display size
    Large,
}

/// Font size statistics of one document.
#[derive(Debug, Clone, Default)]
pub struct FontBaseline {
    /// Characters set at each size, keyed in tenths of a point
    histogram: BTreeMap<i32, usize>,
    body_size: Option<f32>,
}

impl FontBaseline {
    /// Collect statistics over every line that carries a font size.
    pub fn from_pages(pages: &[Page]) -> Self {
        let mut baseline = Self::default();
        for line in pages.iter().flat_map(|p| &p.lines) {
            if let Some(size) = line.font_size {
                baseline.add_size(size, line.text.trim().chars().count());
            }
        }
        baseline.analyze();
        baseline
    }

    /// Add a font size observation weighted by character count.
    pub fn add_size(&mut self, size: f32, chars: usize) {
        if size <= 0.0 || chars == 0 {
            return;
        }
        let key = (size * 10.0).round() as i32;
        *self.histogram.entry(key).or_insert(0) += chars;
    }

    /// Recompute the body size: the most common size, smallest on ties.
    pub fn analyze(&mut self) {
        let mut best: Option<(i32, usize)> = None;
        for (&key, &count) in &self.histogram {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((key, count));
            }
        }
        self.body_size = best.map(|(key, _)| key as f32 / 10.0);
    }

    /// Body text size, `None` when the document has no font metadata.
    pub fn body_size(&self) -> Option<f32> {
        self.body_size
    }

    /// Largest size observed.
    pub fn max_size(&self) -> Option<f32> {
        self.histogram.keys().next_back().map(|&k| k as f32 / 10.0)
    }

    /// Tier of a size relative to the body size.
    pub fn tier(&self, size: f32, config: &HeuristicConfig) -> Option<FontTier> {
        let body = self.body_size?;
        let ratio = size / body;
        let tier = if ratio >= config.large_ratio {
            FontTier::Large
        } else if ratio >= config.medium_ratio {
            FontTier::Medium
        } else if ratio >= config.comparable_ratio {
            FontTier::Comparable
        } else {
            FontTier::Small
        };
        Some(tier)
    }

    /// Tier of a line, `None` when either side lacks font metadata.
    pub fn line_tier(&self, line: &Line, config: &HeuristicConfig) -> Option<FontTier> {
        line.font_size.and_then(|size| self.tier(size, config))
    }
}

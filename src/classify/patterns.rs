//! Lexical heading shapes: numbered, all-uppercase and title-case lines.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::options::HeuristicConfig;

/// Which heading shape a line matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingPattern {
    /// `1.`, `2.1`, `3.4.1` prefixes
    Numbered,
    /// No lowercase letters
    Uppercase,
    /// Significant words capitalized
    TitleCase,
}

impl HeadingPattern {
    /// Short label for diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingPattern::Numbered => "numbered",
            HeadingPattern::Uppercase => "uppercase",
            HeadingPattern::TitleCase => "title-case",
        }
    }
}

impl fmt::Display for HeadingPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static NUMBERED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,3}(?:\.\d{1,3})*)(\.?)\s+(\S.*)$").expect("valid regex")
});

/// Words that stay lowercase inside a title-case heading.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "nor", "for", "of", "in", "on", "at", "to", "by", "with",
    "from", "into", "over", "as", "vs", "via", "per", "upon", "about", "its", "their",
];

/// Numbering depth of a `N.`, `N.N` or `N.N.N` heading.
///
/// A single number needs its trailing dot (`1. Scope`, not `2024 Annual
/// Report`). The first number must be positive, and the text after the
/// numbering must start with a letter that is not lowercase.
pub fn numbered_depth(text: &str) -> Option<usize> {
    let caps = NUMBERED.captures(text)?;
    let number = &caps[1];
    let depth = number.split('.').count();
    if depth == 1 && caps[2].is_empty() {
        return None;
    }
    if number.split('.').next()?.parse::<u32>().ok()? == 0 {
        return None;
    }
    let first_letter = caps[3].chars().find(|c| c.is_alphabetic())?;
    if first_letter.is_lowercase() {
        return None;
    }
    Some(depth)
}

/// A line with letters, none lowercase, within the word limit.
pub fn is_uppercase_heading(text: &str, config: &HeuristicConfig) -> bool {
    let mut letters = 0;
    for c in text.chars() {
        if c.is_alphabetic() {
            if c.is_lowercase() {
                return false;
            }
            letters += 1;
        } else if !(c.is_numeric() || c.is_whitespace() || is_punctuation(c)) {
            return false;
        }
    }
    letters >= 2 && text.split_whitespace().count() <= config.max_heading_words
}

/// A line whose first word and significant words are capitalized.
pub fn is_title_case(text: &str, config: &HeuristicConfig) -> bool {
    if text.chars().count() < config.min_title_chars || text.ends_with('.') {
        return false;
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() || words.len() > config.max_heading_words {
        return false;
    }
    if !words[0]
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() && c.is_uppercase())
    {
        return false;
    }

    words[1..].iter().all(|word| {
        let bare = word.trim_start_matches(|c: char| !c.is_alphanumeric());
        match bare.chars().next() {
            Some(c) if c.is_alphabetic() => {
                !c.is_lowercase() || is_stop_word(bare)
            }
            _ => true,
        }
    })
}

fn is_stop_word(word: &str) -> bool {
    let word = word
        .trim_end_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    STOP_WORDS.contains(&word.as_str())
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || ('\u{2010}'..='\u{205E}').contains(&c) || c == '\u{00B7}'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_depths() {
        assert_eq!(numbered_depth("1. Introduction"), Some(1));
        assert_eq!(numbered_depth("2.1 Methodology"), Some(2));
        assert_eq!(numbered_depth("2.1. Methodology"), Some(2));
        assert_eq!(numbered_depth("1.2.3 Deep Detail"), Some(3));
        assert_eq!(numbered_depth("1.2.3.4 Deeper"), Some(4));
    }

    #[test]
    fn test_numbered_rejections() {
        assert_eq!(numbered_depth("2024 Annual Report"), None);
        assert_eq!(numbered_depth("1 Introduction"), None);
        assert_eq!(numbered_depth("3.5 million people"), None);
        assert_eq!(numbered_depth("0. Preface"), None);
        assert_eq!(numbered_depth("1.2 3.4"), None);
        assert_eq!(numbered_depth("1234. Too long"), None);
        assert_eq!(numbered_depth("Introduction"), None);
    }

    #[test]
    fn test_uppercase() {
        let config = HeuristicConfig::default();
        assert!(is_uppercase_heading("INTRODUCTION", &config));
        assert!(is_uppercase_heading("RESULTS AND DISCUSSION", &config));
        assert!(is_uppercase_heading("PART 2: DESIGN — OVERVIEW", &config));
        assert!(!is_uppercase_heading("Introduction", &config));
        assert!(!is_uppercase_heading("12345", &config));
        assert!(!is_uppercase_heading("A", &config));
        assert!(!is_uppercase_heading("TOTAL ≥ 5", &config));

        let long = "WORD ".repeat(13);
        assert!(!is_uppercase_heading(long.trim(), &config));
    }

    #[test]
    fn test_title_case() {
        let config = HeuristicConfig::default();
        assert!(is_title_case("Experimental Setup", &config));
        assert!(is_title_case("Results and Discussion", &config));
        assert!(is_title_case("The State of the Art", &config));
        assert!(is_title_case("Appendix A: Data Tables", &config));
        assert!(is_title_case("Introduction", &config));

        assert!(!is_title_case("This is a sentence", &config));
        assert!(!is_title_case("Works Cited.", &config));
        assert!(!is_title_case("Tiny", &config));
        assert!(!is_title_case("lowercase Start", &config));
    }

    #[test]
    fn test_pattern_labels() {
        assert_eq!(HeadingPattern::Numbered.to_string(), "numbered");
        assert_eq!(HeadingPattern::TitleCase.as_str(), "title-case");
    }
}

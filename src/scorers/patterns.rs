//! Case-insensitive regex families shared by the built-in scorers

use crate::models::MatchHighlight;
use crate::text::char_offset;
use regex::Regex;

/// A named family of case-insensitive patterns
#[derive(Debug)]
pub struct PatternSet {
    category: &'static str,
    regexes: Vec<Regex>,
}

impl PatternSet {
    /// Compile `patterns`; each is matched case-insensitively.
    ///
    /// Only called from `OnceLock` initializers with literal patterns.
    pub fn new(category: &'static str, patterns: &[&str]) -> Self {
        let regexes = patterns
            .iter()
            .map(|p| Regex::new(&format!("(?i){p}")).expect("valid regex"))
            .collect();
        Self { category, regexes }
    }

    /// Total non-overlapping matches across all patterns
    pub fn count(&self, text: &str) -> usize {
        self.regexes.iter().map(|r| r.find_iter(text).count()).sum()
    }

    pub fn any_match(&self, text: &str) -> bool {
        self.regexes.iter().any(|r| r.is_match(text))
    }

    /// Number of patterns that match at least once
    pub fn distinct_matches(&self, text: &str) -> usize {
        self.regexes.iter().filter(|r| r.is_match(text)).count()
    }

    /// Every match as a highlight, positions in characters
    pub fn highlights(&self, text: &str) -> Vec<MatchHighlight> {
        self.regexes
            .iter()
            .flat_map(|r| r.find_iter(text))
            .map(|m| MatchHighlight::new(m.as_str(), self.category, char_offset(text, m.start())))
            .collect()
    }

    /// Byte ranges of every match
    pub fn spans(&self, text: &str) -> Vec<(usize, usize)> {
        self.regexes
            .iter()
            .flat_map(|r| r.find_iter(text))
            .map(|m| (m.start(), m.end()))
            .collect()
    }
}

/// Per-100-word rate
pub fn per_100(count: usize, word_count: usize) -> f64 {
    if word_count == 0 {
        0.0
    } else {
        count as f64 * 100.0 / word_count as f64
    }
}

/// Round to `places` decimals for details output
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_and_highlights() {
        let set = PatternSet::new("filler", &[r"\bsimply put\b", r"\bgame[ -]?changer\b"]);
        let text = "Simply put, it is a game-changer. A real Gamechanger.";
        assert_eq!(set.count(text), 3);
        assert!(set.any_match(text));
        assert_eq!(set.distinct_matches(text), 2);

        let hl = set.highlights(text);
        assert_eq!(hl.len(), 3);
        assert!(hl.iter().all(|h| h.category == "filler"));
        assert!(hl.iter().any(|h| h.text == "Simply put" && h.position == 0));
    }

    #[test]
    fn test_highlight_positions_are_chars() {
        let set = PatternSet::new("x", &[r"\bbecause\b"]);
        let hl = set.highlights("naïve because");
        assert_eq!(hl[0].position, 6);
    }

    #[test]
    fn test_rates() {
        assert_eq!(per_100(3, 150), 2.0);
        assert_eq!(per_100(3, 0), 0.0);
        assert_eq!(round_to(1.23456, 2), 1.23);
    }
}

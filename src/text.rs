//! Text helpers shared by the scorers, the content-type detector and the pipeline

use regex::Regex;
use std::sync::OnceLock;

static PARAGRAPH_BREAK: OnceLock<Regex> = OnceLock::new();

fn paragraph_break() -> &'static Regex {
    PARAGRAPH_BREAK.get_or_init(|| Regex::new(r"\n\s*\n").expect("valid regex"))
}

/// Whitespace-delimited token count
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Length in characters (not bytes)
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Convert a byte index from a regex match into a character offset
pub fn char_offset(text: &str, byte_idx: usize) -> usize {
    text.get(..byte_idx).map_or(0, |prefix| prefix.chars().count())
}

/// Split after `.`, `!` or `?` when followed by whitespace.
///
/// Pieces keep their original text (untrimmed); empty pieces are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut iter = text.char_indices().peekable();

    while let Some((i, c)) = iter.next() {
        if c.is_whitespace() && matches!(prev, Some('.' | '!' | '?')) {
            out.push(&text[start..i]);
            let mut next_start = text.len();
            while let Some(&(j, d)) = iter.peek() {
                if d.is_whitespace() {
                    iter.next();
                } else {
                    next_start = j;
                    break;
                }
            }
            start = next_start;
            prev = None;
            continue;
        }
        prev = Some(c);
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out.retain(|s| !s.trim().is_empty());
    out
}

/// Trimmed sentences longer than `min_chars` characters
pub fn sentences_longer_than(text: &str, min_chars: usize) -> Vec<&str> {
    split_sentences(text)
        .into_iter()
        .map(str::trim)
        .filter(|s| s.chars().count() > min_chars)
        .collect()
}

/// Split on blank lines. Returns trimmed, non-empty paragraphs in document order.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    paragraph_break()
        .split(text.trim())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// First `max_chars` characters, with `...` appended when truncated
pub fn preview(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

/// Heuristic English syllable count (vowel groups, silent trailing `e`)
pub fn syllable_count(word: &str) -> usize {
    let word = word.trim().to_lowercase();
    if word.chars().count() <= 2 {
        return 1;
    }
    let word = word.strip_suffix('e').unwrap_or(&word);

    let mut count = 0;
    let mut prev_vowel = false;
    for c in word.chars() {
        let is_vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = is_vowel;
    }
    count.max(1)
}

/// Host and path of an absolute URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts<'a> {
    /// Lowercased host without `www.`, port or userinfo
    pub host: String,
    /// Path component (no query or fragment)
    pub path: &'a str,
}

/// Split `scheme://host/path?query` into host and path.
///
/// Returns `None` for relative URLs or an empty host.
pub fn parse_url(url: &str) -> Option<UrlParts<'_>> {
    let url = url.trim();
    let rest = &url[url.find("://")? + 3..];

    let host_end = rest.find(&['/', '?', '#'][..]).unwrap_or(rest.len());
    let authority = &rest[..host_end];
    let after = &rest[host_end..];
    let path_end = after.find(&['?', '#'][..]).unwrap_or(after.len());

    let host = authority.rsplit('@').next().unwrap_or(authority);
    let host = host.split(':').next().unwrap_or(host).to_ascii_lowercase();
    let host = match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    };
    if host.is_empty() {
        return None;
    }

    Some(UrlParts {
        host,
        path: &after[..path_end],
    })
}

/// Round for presentation (3 decimals)
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_and_char_counts() {
        assert_eq!(word_count("  one two\nthree\t four "), 4);
        assert_eq!(word_count("   "), 0);
        assert_eq!(char_count("héllo"), 5);
    }

    #[test]
    fn test_char_offset_multibyte() {
        let text = "café latte";
        let byte = text.find("latte").unwrap();
        assert_eq!(byte, 6);
        assert_eq!(char_offset(text, byte), 5);
    }

    #[test]
    fn test_split_sentences() {
        let s = split_sentences("First one. Second one!  Third?\nFourth without end");
        assert_eq!(s, vec!["First one.", "Second one!", "Third?", "Fourth without end"]);
        // Decimal points are not sentence breaks
        assert_eq!(split_sentences("Version 2.5 shipped.").len(), 1);
    }

    #[test]
    fn test_split_paragraphs() {
        let text = "\n\nAlpha beta.\n\n  \n\nGamma\ndelta.\n\n";
        assert_eq!(split_paragraphs(text), vec!["Alpha beta.", "Gamma\ndelta."]);
        assert!(split_paragraphs("   ").is_empty());
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 80), "short");
        assert_eq!(preview("abcdef", 3), "abc...");
    }

    #[test]
    fn test_syllable_count() {
        assert_eq!(syllable_count("a"), 1);
        assert_eq!(syllable_count("cake"), 1);
        assert_eq!(syllable_count("readable"), 2);
        assert_eq!(syllable_count("optimization"), 5);
    }

    #[test]
    fn test_parse_url() {
        let parts = parse_url("https://www.Reuters.com/world/story?id=1#top").unwrap();
        assert_eq!(parts.host, "reuters.com");
        assert_eq!(parts.path, "/world/story");

        let parts = parse_url("http://user@docs.python.org:8080").unwrap();
        assert_eq!(parts.host, "docs.python.org");
        assert_eq!(parts.path, "");

        assert!(parse_url("not a url").is_none());
        assert!(parse_url("https:///path").is_none());
    }
}

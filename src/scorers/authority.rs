//! Source authority scorer
//!
//! Judges where content comes from rather than what it says. With a `url` in
//! the metadata the host is looked up in a reputation table and the URL path
//! is checked for editorial vs promotional structure; without one only the
//! in-text author attribution and citation density are used.

use super::base::Scorer;
use super::patterns::{round_to, PatternSet};
use crate::models::{MatchHighlight, Metadata, ScoreResult};
use crate::text::{char_offset, parse_url, word_count};
use std::sync::OnceLock;

const MIN_WORDS: usize = 20;
const MAX_AUTHOR_SIGNALS: usize = 5;
const UNKNOWN_DOMAIN_SCORE: f64 = 0.45;
const CITATION_PREVIEW_CHARS: usize = 60;

/// Established publishers, journals, institutions and engineering sources
const HIGH_AUTHORITY_DOMAINS: &[(&str, f64)] = &[
    ("reuters.com", 0.90),
    ("apnews.com", 0.90),
    ("bbc.com", 0.85),
    ("bbc.co.uk", 0.85),
    ("nytimes.com", 0.85),
    ("washingtonpost.com", 0.80),
    ("theguardian.com", 0.80),
    ("wsj.com", 0.80),
    ("ft.com", 0.80),
    ("economist.com", 0.80),
    ("propublica.org", 0.85),
    ("theatlantic.com", 0.75),
    ("newyorker.com", 0.75),
    ("npr.org", 0.80),
    ("pbs.org", 0.80),
    ("nature.com", 0.95),
    ("science.org", 0.95),
    ("thelancet.com", 0.90),
    ("nejm.org", 0.90),
    ("bmj.com", 0.90),
    ("cell.com", 0.90),
    ("pnas.org", 0.90),
    ("arxiv.org", 0.80),
    ("pubmed.ncbi.nlm.nih.gov", 0.85),
    ("scholar.google.com", 0.75),
    ("jstor.org", 0.85),
    ("springer.com", 0.80),
    ("wiley.com", 0.80),
    ("acm.org", 0.85),
    ("ieee.org", 0.85),
    ("cdc.gov", 0.90),
    ("nih.gov", 0.90),
    ("who.int", 0.85),
    ("nasa.gov", 0.90),
    ("noaa.gov", 0.85),
    ("fda.gov", 0.85),
    ("europa.eu", 0.80),
    ("un.org", 0.80),
    ("worldbank.org", 0.80),
    ("github.com", 0.65),
    ("stackoverflow.com", 0.65),
    ("engineering.fb.com", 0.80),
    ("blog.google", 0.75),
    ("aws.amazon.com", 0.70),
    ("cloud.google.com", 0.70),
    ("docs.microsoft.com", 0.70),
    ("learn.microsoft.com", 0.70),
    ("developer.mozilla.org", 0.85),
    ("web.dev", 0.75),
    ("research.google", 0.85),
    ("ai.meta.com", 0.80),
    ("openai.com", 0.75),
    ("anthropic.com", 0.75),
    ("deepmind.google", 0.85),
    ("martinfowler.com", 0.80),
    ("jvns.ca", 0.75),
    ("danluu.com", 0.75),
    ("rachelbythebay.com", 0.75),
    ("simonwillison.net", 0.75),
    ("paulgraham.com", 0.75),
    ("joelonsoftware.com", 0.75),
    ("blog.codinghorror.com", 0.70),
    ("brandur.org", 0.70),
    ("brookings.edu", 0.80),
    ("rand.org", 0.80),
    ("pewresearch.org", 0.85),
    ("nber.org", 0.85),
    ("ssrn.com", 0.75),
    ("wikipedia.org", 0.65),
    ("britannica.com", 0.75),
    ("snopes.com", 0.70),
    ("factcheck.org", 0.75),
    ("politifact.com", 0.70),
];

/// Content farms, tabloids, misinformation-prone sites and unvetted hosting
const LOW_AUTHORITY_DOMAINS: &[(&str, f64)] = &[
    ("ehow.com", 0.20),
    ("wikihow.com", 0.35),
    ("about.com", 0.30),
    ("hubpages.com", 0.20),
    ("squidoo.com", 0.15),
    ("ezinearticles.com", 0.15),
    ("articlesbase.com", 0.15),
    ("buzzle.com", 0.15),
    ("examiner.com", 0.20),
    ("suite101.com", 0.15),
    ("buzzfeed.com", 0.35),
    ("dailymail.co.uk", 0.30),
    ("thesun.co.uk", 0.25),
    ("nypost.com", 0.35),
    ("foxnews.com", 0.35),
    ("infowars.com", 0.10),
    ("naturalnews.com", 0.10),
    ("breitbart.com", 0.20),
    ("zerohedge.com", 0.20),
    ("rt.com", 0.20),
    ("medium.com", 0.40),
    ("substack.com", 0.40),
    ("blogspot.com", 0.30),
    ("wordpress.com", 0.30),
    ("tumblr.com", 0.25),
    ("livejournal.com", 0.25),
    ("sites.google.com", 0.25),
    ("weebly.com", 0.25),
    ("wix.com", 0.25),
    ("jimdo.com", 0.25),
    ("answers.com", 0.20),
    ("ask.com", 0.25),
    ("quora.com", 0.35),
    ("yahoo.com", 0.35),
];

/// Fallback for unknown hosts, checked in order
const TLD_AUTHORITY: &[(&str, f64)] = &[
    (".edu", 0.80),
    (".gov", 0.85),
    (".mil", 0.85),
    (".org", 0.55),
    (".int", 0.70),
    (".com", 0.50),
    (".net", 0.45),
    (".co", 0.45),
    (".io", 0.45),
    (".dev", 0.50),
    (".app", 0.45),
    (".info", 0.35),
    (".biz", 0.30),
    (".xyz", 0.30),
    (".click", 0.20),
    (".top", 0.20),
    (".site", 0.30),
    (".online", 0.30),
    (".space", 0.30),
];

/// How a host was resolved against the reputation tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainMatch {
    Exact,
    Suffix,
    Tld,
    Unknown,
}

impl DomainMatch {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainMatch::Exact => "exact",
            DomainMatch::Suffix => "suffix",
            DomainMatch::Tld => "tld",
            DomainMatch::Unknown => "unknown",
        }
    }

    fn is_known(&self) -> bool {
        matches!(self, DomainMatch::Exact | DomainMatch::Suffix)
    }
}

fn lookup(table: &[(&str, f64)], host: &str) -> Option<f64> {
    table.iter().find(|(d, _)| *d == host).map(|(_, s)| *s)
}

fn lookup_either(host: &str) -> Option<f64> {
    lookup(HIGH_AUTHORITY_DOMAINS, host).or_else(|| lookup(LOW_AUTHORITY_DOMAINS, host))
}

/// Reputation of a host: exact entry, then parent domains
/// (`blog.nytimes.com` -> `nytimes.com`), then the TLD table.
pub fn domain_reputation(host: &str) -> (f64, DomainMatch) {
    if host.is_empty() {
        return (UNKNOWN_DOMAIN_SCORE, DomainMatch::Unknown);
    }
    if let Some(score) = lookup_either(host) {
        return (score, DomainMatch::Exact);
    }

    let labels: Vec<&str> = host.split('.').collect();
    // Parent domains with at least two labels
    for i in 1..labels.len().saturating_sub(1) {
        let suffix = labels[i..].join(".");
        if let Some(score) = lookup_either(&suffix) {
            return (score, DomainMatch::Suffix);
        }
    }

    TLD_AUTHORITY
        .iter()
        .find(|(tld, _)| host.ends_with(tld))
        .map(|(_, score)| (*score, DomainMatch::Tld))
        .unwrap_or((UNKNOWN_DOMAIN_SCORE, DomainMatch::Unknown))
}

static URL_POSITIVE: OnceLock<PatternSet> = OnceLock::new();
static URL_NEGATIVE: OnceLock<PatternSet> = OnceLock::new();
static AUTHOR: OnceLock<PatternSet> = OnceLock::new();
static CITATION: OnceLock<PatternSet> = OnceLock::new();

fn url_positive() -> &'static PatternSet {
    URL_POSITIVE.get_or_init(|| {
        PatternSet::new(
            "url_positive",
            &[
                r"/research/",
                r"/docs/",
                r"/documentation/",
                r"/papers?/",
                r"/publications?/",
                r"/proceedings/",
                r"/technical/",
                r"/engineering/",
                r"/science/",
                r"/analysis/",
                r"/report/",
                r"/studies/",
                r"/blog/[\w-]{10,}",
                r"/articles?/\d{4}/",
            ],
        )
    })
}

fn url_negative() -> &'static PatternSet {
    URL_NEGATIVE.get_or_init(|| {
        PatternSet::new(
            "url_negative",
            &[
                r"/sponsored[/-]",
                r"/partner[/-]",
                r"/adverti[sz]",
                r"/affiliate[/-]",
                r"/promo(?:tion)?[/-]",
                r"/\d+-(?:best|top|ways|things|tips|secrets|hacks|tricks)\b",
                r"/(?:best|top|ultimate|definitive)-\d+",
                r"/slideshow[/-]",
                r"/gallery[/-]",
                r"/click[/-]",
                r"/redirect[/-]",
                r"\?utm_",
                r"&utm_",
            ],
        )
    })
}

/// Bylines, credentials and editorial roles. Name-shaped and credential
/// tokens stay case-sensitive so "by the way" or "10 ms" do not count.
fn author() -> &'static PatternSet {
    AUTHOR.get_or_init(|| {
        PatternSet::new(
            "author_signal",
            &[
                r"\bby\s+(?-i:[A-Z][a-z]+\s+[A-Z][a-z]+)\b",
                r"\b(?:Dr|Prof|Professor)\.\s+(?-i:[A-Z][a-z]+)",
                r"\b(?:author|reporter|correspondent|journalist|editor|columnist):\s*\S+",
                r"\b(?:written|reported|authored|edited)\s+by\b",
                r"\b(?-i:Ph\.?D|M\.?D|J\.?D|M\.?S)\b",
                r"\bstaff\s+(?:writer|reporter|correspondent|editor)\b",
                r"\b(?:senior|chief|lead|managing)\s+(?:editor|writer|reporter|correspondent|analyst)\b",
                r"\babout\s+the\s+author\b",
                r"\b(?:bio|biography|profile)\s*:",
            ],
        )
    })
}

fn citation() -> &'static PatternSet {
    CITATION.get_or_init(|| {
        PatternSet::new(
            "citation",
            &[
                r"https?://\S{10,}",
                r"\[\d+\]",
                r"\b10\.\d{4,}/\S+",
                r"\baccording to\b",
                r"\b(?:research|studies|data|evidence|a report)\s+(?:shows?|suggests?|indicates?|found)\b",
                r"\b(?:published|reported)\s+(?:in|by)\b",
                r"\(\d{4}\)",
                r"\b(?:et\s+al\.?|ibid\.?)\b",
                r"\bpeer[- ]reviewed\b",
                r"\b(?:journal|proceedings)\s+of\b",
                r"\bfigure\s+\d+\b",
                r"\btable\s+\d+\b",
            ],
        )
    })
}

/// Editorial path segments raise the score, promotional ones lower it.
/// Highlights carry position 0 since they refer to the URL, not the text.
fn url_structure(url: &str) -> (f64, Vec<MatchHighlight>) {
    let positive: Vec<MatchHighlight> = url_positive()
        .highlights(url)
        .into_iter()
        .map(|h| MatchHighlight::new(h.text, h.category, 0))
        .collect();
    let negative: Vec<MatchHighlight> = url_negative()
        .highlights(url)
        .into_iter()
        .map(|h| MatchHighlight::new(h.text, h.category, 0))
        .collect();

    let pos = url_positive().distinct_matches(url);
    let neg = url_negative().distinct_matches(url);
    let score = if pos == 0 && neg == 0 {
        0.5
    } else {
        (0.5 + pos as f64 * 0.15 - neg as f64 * 0.20).clamp(0.0, 1.0)
    };

    let mut highlights = positive;
    highlights.extend(negative);
    (score, highlights)
}

fn author_signals(text: &str) -> (f64, Vec<MatchHighlight>) {
    let mut highlights = author().highlights(text);
    highlights.truncate(MAX_AUTHOR_SIGNALS);

    let score = match highlights.len() {
        0 => 0.25,
        1 => 0.55,
        2 => 0.70,
        n => (0.70 + (n - 2) as f64 * 0.10).min(1.0),
    };
    (score, highlights)
}

/// Citation score over citations per 100 words; over-citation costs a little.
fn citation_density(text: &str, wc: usize) -> (f64, Vec<MatchHighlight>) {
    let highlights: Vec<MatchHighlight> = citation()
        .spans(text)
        .into_iter()
        .map(|(start, end)| {
            let snippet: String = text[start..end].chars().take(CITATION_PREVIEW_CHARS).collect();
            MatchHighlight::new(snippet, "citation", char_offset(text, start))
        })
        .collect();

    let density = highlights.len() as f64 * 100.0 / wc.max(1) as f64;
    let score = if density < 0.5 {
        0.25
    } else if density < 1.5 {
        0.25 + (density - 0.5) * 0.45
    } else if density < 4.0 {
        0.70 + (density - 1.5) * 0.12
    } else {
        (1.0 - (density - 4.0) * 0.05).max(0.7)
    };
    (score.clamp(0.0, 1.0), highlights)
}

/// Source credibility: domain reputation, author signals, citations
#[derive(Debug, Default)]
pub struct AuthorityScorer;

impl AuthorityScorer {
    pub fn new() -> Self {
        Self
    }

    fn explain(score: f64, domain: Option<(&str, DomainMatch)>) -> String {
        let quality = if score >= 0.7 {
            "High source authority"
        } else if score >= 0.5 {
            "Moderate source authority"
        } else {
            "Low source authority"
        };
        match domain {
            None => {
                format!("{quality}. No URL metadata, scored on author and citation signals only.")
            }
            Some((host, m)) if m.is_known() => format!("{quality}. Known domain: {host}."),
            Some((host, _)) => format!("{quality}. Domain: {host}."),
        }
    }
}

impl Scorer for AuthorityScorer {
    fn name(&self) -> &'static str {
        "authority"
    }

    fn description(&self) -> &'static str {
        "Source authority: domain reputation, author signals, citations"
    }

    fn default_weight(&self) -> f64 {
        0.5
    }

    fn score(&self, text: &str, metadata: Option<&Metadata>) -> ScoreResult {
        let wc = word_count(text);
        if wc < MIN_WORDS {
            return ScoreResult::insufficient(self.name(), wc, "source authority");
        }

        let url = metadata.and_then(Metadata::url);
        let parsed = url.and_then(|u| parse_url(u).map(|parts| (u, parts.host)));

        let (author_score, author_highlights) = author_signals(text);
        let (citation_score, citation_highlights) = citation_density(text, wc);

        let mut highlights = Vec::new();
        let result = match &parsed {
            Some((url, host)) => {
                let (domain_score, domain_match) = domain_reputation(host);
                let (url_score, url_highlights) = url_structure(url);
                highlights.extend(url_highlights);

                let score = domain_score * 0.35
                    + url_score * 0.20
                    + author_score * 0.25
                    + citation_score * 0.20;
                ScoreResult::new(
                    self.name(),
                    score,
                    Self::explain(score, Some((host.as_str(), domain_match))),
                )
                .with_detail("mode", "url")
                .with_detail("domain", host.as_str())
                .with_detail("domain_score", round_to(domain_score, 3))
                .with_detail("domain_match_type", domain_match.as_str())
                .with_detail("url_score", round_to(url_score, 3))
            }
            None => {
                let score = author_score * 0.55 + citation_score * 0.45;
                ScoreResult::new(self.name(), score, Self::explain(score, None))
                    .with_detail("mode", "text-only")
            }
        };

        highlights.extend(author_highlights);
        highlights.extend(citation_highlights);

        result
            .with_detail("author_score", round_to(author_score, 3))
            .with_detail("citation_score", round_to(citation_score, 3))
            .with_detail("word_count", wc)
            .with_highlights(highlights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORTED: &str = "By Jane Doe, staff writer. According to the survey published in \
        the Journal of Applied Statistics (2021), response times fell by a third. The data \
        shows the effect held across regions, as summarized in table 2 and figure 3 of the \
        report [1].";

    const BARE: &str = "Here are some thoughts on productivity that I have been having \
        lately while working from home and trying to keep a routine that sticks.";

    #[test]
    fn test_short_text_is_neutral() {
        let result = AuthorityScorer::new().score("Trust me on this.", None);
        assert_eq!(result.score, 0.5);
        assert_eq!(result.explanation, "Too short to assess source authority.");
    }

    #[test]
    fn test_domain_reputation_lookup() {
        assert_eq!(domain_reputation("nature.com"), (0.95, DomainMatch::Exact));
        assert_eq!(domain_reputation("blog.nytimes.com"), (0.85, DomainMatch::Suffix));
        assert_eq!(domain_reputation("someone.medium.com"), (0.40, DomainMatch::Suffix));
        assert_eq!(domain_reputation("cs.stateuniversity.edu"), (0.80, DomainMatch::Tld));
        assert_eq!(domain_reputation("example.museum"), (0.45, DomainMatch::Unknown));
    }

    #[test]
    fn test_url_structure() {
        let (neutral, hl) = url_structure("https://example.com/");
        assert_eq!(neutral, 0.5);
        assert!(hl.is_empty());

        let (good, _) = url_structure("https://example.com/research/papers/caching");
        assert!((good - 0.8).abs() < 1e-9);

        let (bad, hl) = url_structure("https://example.com/10-best-gadgets?utm_source=x");
        assert!((bad - 0.1).abs() < 1e-9);
        assert!(hl.iter().all(|h| h.category == "url_negative" && h.position == 0));
    }

    #[test]
    fn test_author_signals_are_case_aware() {
        let (score, hl) = author_signals("Written by Jane Doe, Ph.D.");
        assert_eq!(hl.len(), 3);
        assert!((score - 0.8).abs() < 1e-9);

        let (score, hl) = author_signals("by the way, it takes 10 ms");
        assert!(hl.is_empty());
        assert_eq!(score, 0.25);
    }

    #[test]
    fn test_text_only_mode() {
        let scorer = AuthorityScorer::new();
        let reported = scorer.score(REPORTED, None);
        let bare = scorer.score(BARE, None);
        assert_eq!(reported.detail("mode").unwrap(), "text-only");
        assert!(reported.detail("domain").is_none());
        assert!(reported.score > bare.score);
        // No signals at all: 0.25 on both halves
        assert!((bare.score - 0.25).abs() < 1e-9);
        assert!(bare.explanation.contains("No URL metadata"));
    }

    #[test]
    fn test_url_mode_uses_domain() {
        let scorer = AuthorityScorer::new();
        let reuters = Metadata::with_url("https://www.reuters.com/world/story");
        let ehow = Metadata::with_url("https://ehow.com/7-best-tips");
        let trusted = scorer.score(REPORTED, Some(&reuters));
        let farm = scorer.score(REPORTED, Some(&ehow));

        assert_eq!(trusted.detail("mode").unwrap(), "url");
        assert_eq!(trusted.detail("domain").unwrap(), "reuters.com");
        assert_eq!(trusted.detail("domain_match_type").unwrap(), "exact");
        assert!(trusted.explanation.contains("Known domain: reuters.com"));
        assert!(trusted.score > farm.score);
    }

    #[test]
    fn test_relative_url_falls_back_to_text_only() {
        let result = AuthorityScorer::new().score(BARE, Some(&Metadata::with_url("/local/path")));
        assert_eq!(result.detail("mode").unwrap(), "text-only");
    }
}

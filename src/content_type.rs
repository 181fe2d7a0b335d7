//! Content-type auto-detection
//!
//! Classifies text as technical, news or opinion from lightweight regex
//! signals, optionally nudged by the source URL. The winning category names
//! the profile the pipeline applies; weak evidence falls back to "default".

use crate::models::Metadata;
use crate::text::{parse_url, word_count};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// Name reported when no category clears the threshold
pub const DEFAULT_CONTENT_TYPE: &str = "default";

/// Minimum density a category needs to win
const CONFIDENCE_THRESHOLD: f64 = 0.15;

/// Additive density boost for a matching source URL
const URL_BOOST: f64 = 0.3;

/// Detected content type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentType {
    /// Profile name: "technical", "news", "opinion" or "default"
    pub name: String,
    /// Winning density, 0.0 to 1.0
    pub confidence: f64,
    /// Match counts per signal for the winning category
    #[serde(default)]
    pub signals: BTreeMap<String, usize>,
}

impl ContentType {
    fn fallback(confidence: f64) -> Self {
        Self {
            name: DEFAULT_CONTENT_TYPE.to_string(),
            confidence,
            signals: BTreeMap::new(),
        }
    }

    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_CONTENT_TYPE
    }
}

/// Built-in content categories, in tie-break priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentCategory {
    Technical,
    News,
    Opinion,
}

impl ContentCategory {
    pub const ALL: [ContentCategory; 3] = [
        ContentCategory::Technical,
        ContentCategory::News,
        ContentCategory::Opinion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentCategory::Technical => "technical",
            ContentCategory::News => "news",
            ContentCategory::Opinion => "opinion",
        }
    }

    fn patterns(&self) -> &'static [(&'static str, Regex)] {
        match self {
            ContentCategory::Technical => technical_patterns(),
            ContentCategory::News => news_patterns(),
            ContentCategory::Opinion => opinion_patterns(),
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type LabeledPatterns = Vec<(&'static str, Regex)>;

fn compile(patterns: &[(&'static str, &str)]) -> LabeledPatterns {
    patterns
        .iter()
        .map(|(label, p)| (*label, Regex::new(&format!("(?i){p}")).expect("valid regex")))
        .collect()
}

static TECHNICAL: OnceLock<LabeledPatterns> = OnceLock::new();
static NEWS: OnceLock<LabeledPatterns> = OnceLock::new();
static OPINION: OnceLock<LabeledPatterns> = OnceLock::new();

fn technical_patterns() -> &'static [(&'static str, Regex)] {
    TECHNICAL.get_or_init(|| {
        compile(&[
            ("code_fence", r"```"),
            ("inline_code", r"`[a-zA-Z_]\w*(?:\(\))?`"),
            ("version", r"\bv\d+\.\d+"),
            ("measurement", r"\b\d+(?:\.\d+)?(?:ms|s|gb|mb|kb|mhz|ghz|fps|rpm|%)\b"),
            (
                "we_did",
                r"\bwe (?:deployed|tested|found|measured|observed|implemented|migrated|built)\b",
            ),
            ("performance", r"\b(?:p50|p95|p99|latency|throughput|benchmark)\b"),
            ("function_call", r"\b[a-zA-Z_]\w*\([^)]*\)"),
            ("protocol", r"\b(?:API|SDK|CLI|ORM|SQL|HTTP|TCP|UDP|DNS|TLS|SSL)\b"),
            ("keyword", r"\b(?:def|class|import|return|function|const|let|var)\b"),
            ("infrastructure", r"\b(?:docker|kubernetes|k8s|nginx|postgres|redis|kafka)\b"),
            ("architecture", r"\b(?:monolith|microservice|pipeline|deploy|CI/CD)\b"),
        ])
    })
}

fn news_patterns() -> &'static [(&'static str, Regex)] {
    NEWS.get_or_init(|| {
        compile(&[
            ("according_to", r"\baccording to\b"),
            ("sources", r"\bsources? (?:say|said|told|confirmed|reported|familiar)\b"),
            ("statement", r#"\b(?:said|told|stated|announced|confirmed) (?:in |that |")"#),
            (
                "spokesperson",
                r"\b(?:spokesperson|official|representative|analyst) (?:said|told|for)\b",
            ),
            ("byline", r"(?:^|\n)\s*By [A-Z][a-z]+ [A-Z][a-z]+"),
            ("weekday", r"\b(?:Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)\b"),
            (
                "date",
                r"\b(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|Aug(?:ust)?|Sep(?:tember)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\s+\d{1,2}",
            ),
            ("attribution", r"\b(?:he|she|they) (?:said|added|noted|explained|argued)\b"),
            ("reported", r"\breported (?:by|that|on)\b"),
            ("wire_service", r"\b(?:Reuters|AP|AFP|Bloomberg|CNN|BBC|NYT)\b"),
        ])
    })
}

fn opinion_patterns() -> &'static [(&'static str, Regex)] {
    OPINION.get_or_init(|| {
        compile(&[
            ("first_person_view", r"\bI (?:think|believe|feel|argue|contend|suspect|would)\b"),
            ("in_my_view", r"\bin my (?:experience|view|opinion|estimation)\b"),
            ("personally", r"\bpersonally\b"),
            ("to_me", r"\bto me\b"),
            ("contrast", r"\b(?:that said|however|on the other hand|nevertheless)\b"),
            ("problem_framing", r"\bthe (?:problem|issue|trouble) (?:with|is)\b"),
            (
                "contrarian",
                r"\bwhat (?:most people|many|nobody|few) (?:don't |fail to )?(?:realize|understand|see|get)\b",
            ),
            ("we_should", r"\bwe should\b"),
            ("id_argue", r"\bI'?d (?:argue|suggest|say|recommend)\b"),
            ("my_take", r"\bmy (?:take|view|read|sense) (?:is|on)\b"),
            ("unpopular", r"\bunpopular opinion\b"),
            ("heres_the_thing", r"\bhere'?s (?:the thing|why|what)\b"),
        ])
    })
}

const NEWS_DOMAINS: &[&str] = &[
    "reuters.com",
    "bbc.com",
    "bbc.co.uk",
    "nytimes.com",
    "washingtonpost.com",
    "theguardian.com",
    "apnews.com",
    "bloomberg.com",
    "cnn.com",
    "npr.org",
    "aljazeera.com",
    "politico.com",
    "axios.com",
];

const TECHNICAL_DOMAINS: &[&str] = &[
    "github.com",
    "stackoverflow.com",
    "arxiv.org",
    "developer.mozilla.org",
    "docs.python.org",
    "kubernetes.io",
    "docs.docker.com",
];

const NEWS_PATHS: &[&str] = &[
    "/news/",
    "/politics/",
    "/world/",
    "/breaking/",
    "/business/",
    "/economy/",
    "/markets/",
];

const TECHNICAL_PATHS: &[&str] = &["/docs/", "/engineering/", "/api/", "/technical/"];

const OPINION_PATHS: &[&str] = &[
    "/opinion/",
    "/editorial/",
    "/column/",
    "/commentary/",
    "/op-ed/",
];

static TECHNICAL_BLOG_PATH: OnceLock<Regex> = OnceLock::new();

fn technical_blog_path() -> &'static Regex {
    TECHNICAL_BLOG_PATH.get_or_init(|| {
        Regex::new(r"/blog/.*(?:engineering|infrastructure|scale|deploy|migration)")
            .expect("valid regex")
    })
}

/// Categories whose URL signals match, as density boosts
fn url_boosts(url: &str) -> BTreeMap<&'static str, f64> {
    let mut boosts = BTreeMap::new();
    let Some(parts) = parse_url(url) else {
        return boosts;
    };
    let path = parts.path.to_lowercase();
    let path_has = |needles: &[&str]| needles.iter().any(|n| path.contains(n));

    if NEWS_DOMAINS.contains(&parts.host.as_str()) || path_has(NEWS_PATHS) {
        boosts.insert(ContentCategory::News.as_str(), URL_BOOST);
    }
    if TECHNICAL_DOMAINS.contains(&parts.host.as_str())
        || path_has(TECHNICAL_PATHS)
        || technical_blog_path().is_match(&path)
    {
        boosts.insert(ContentCategory::Technical.as_str(), URL_BOOST);
    }
    if path_has(OPINION_PATHS) {
        boosts.insert(ContentCategory::Opinion.as_str(), URL_BOOST);
    }
    boosts
}

/// Classify `text`, using `metadata.url` as a secondary hint.
///
/// Density is matches per 100 words, capped at 1.0. A URL boost applies only
/// to categories that already have textual signal. Ties go to the earlier
/// category in [`ContentCategory::ALL`].
pub fn detect_content_type(text: &str, metadata: Option<&Metadata>) -> ContentType {
    let wc = word_count(text);
    if wc == 0 {
        return ContentType::fallback(0.0);
    }

    let boosts = metadata
        .and_then(Metadata::url)
        .map(url_boosts)
        .unwrap_or_default();

    let mut best: Option<(ContentCategory, f64, BTreeMap<String, usize>)> = None;
    for category in ContentCategory::ALL {
        let mut total_hits = 0usize;
        let mut signals = BTreeMap::new();
        for (label, regex) in category.patterns() {
            let hits = regex.find_iter(text).count();
            if hits > 0 {
                total_hits += hits;
                signals.insert((*label).to_string(), hits);
            }
        }

        let mut density = (total_hits as f64 / (wc as f64 / 100.0)).min(1.0);
        if density > 0.0 {
            if let Some(boost) = boosts.get(category.as_str()) {
                density = (density + boost).min(1.0);
            }
        }

        let better = match &best {
            Some((_, best_density, _)) => density > *best_density,
            None => true,
        };
        if better {
            best = Some((category, density, signals));
        }
    }

    match best {
        Some((category, density, signals)) if density >= CONFIDENCE_THRESHOLD => ContentType {
            name: category.as_str().to_string(),
            confidence: density,
            signals,
        },
        Some((_, density, _)) => ContentType::fallback(density),
        None => ContentType::fallback(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TECHNICAL_TEXT: &str = "We deployed the new cache layer on Kubernetes last week. \
        The p99 latency dropped from 340ms to 120ms after we migrated from the monolith. \
        Calling fetch_user() now hits redis first, and the API returns in 15ms.";

    const NEWS_TEXT: &str = "The company announced on Monday that it would cut 200 jobs, \
        according to a statement. A spokesperson said that the decision was final. \
        Sources familiar with the matter told Reuters the cuts began March 3.";

    const OPINION_TEXT: &str = "I think the problem with most productivity advice is that \
        it assumes everyone works the same way. In my experience, personally, the advice \
        backfires. Here's the thing: we should stop pretending one system fits all.";

    #[test]
    fn test_detects_technical() {
        let ct = detect_content_type(TECHNICAL_TEXT, None);
        assert_eq!(ct.name, "technical");
        assert!(ct.confidence >= CONFIDENCE_THRESHOLD);
        assert!(ct.signals.contains_key("infrastructure"));
    }

    #[test]
    fn test_detects_news() {
        let ct = detect_content_type(NEWS_TEXT, None);
        assert_eq!(ct.name, "news");
        assert!(ct.signals.contains_key("according_to"));
    }

    #[test]
    fn test_detects_opinion() {
        let ct = detect_content_type(OPINION_TEXT, None);
        assert_eq!(ct.name, "opinion");
    }

    #[test]
    fn test_empty_text_is_default() {
        let ct = detect_content_type("   ", None);
        assert!(ct.is_default());
        assert_eq!(ct.confidence, 0.0);
        assert!(ct.signals.is_empty());
    }

    #[test]
    fn test_url_alone_never_wins() {
        let text = "The garden was quiet and green after the long rain, and birds \
            moved between the hedges looking for seeds near the old stone wall.";
        let meta = Metadata::with_url("https://www.reuters.com/world/europe/story");
        let ct = detect_content_type(text, Some(&meta));
        assert!(ct.is_default());
        assert_eq!(ct.confidence, 0.0);
    }

    #[test]
    fn test_url_boosts_existing_signal() {
        // One news signal in 1000 words: density 0.1, below threshold alone
        let mut text = String::from("according to ");
        text.push_str(&"word ".repeat(998));
        assert!(detect_content_type(&text, None).is_default());

        let meta = Metadata::with_url("https://example.com/news/2024/item");
        let ct = detect_content_type(&text, Some(&meta));
        assert_eq!(ct.name, "news");
        assert!((ct.confidence - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_below_threshold_records_density() {
        let mut text = String::from("we should ");
        text.push_str(&"word ".repeat(998));
        let ct = detect_content_type(&text, None);
        assert!(ct.is_default());
        assert!((ct.confidence - 0.1).abs() < 1e-9);
        assert!(ct.signals.is_empty());
    }

    #[test]
    fn test_tie_prefers_priority_order() {
        // One technical and one opinion signal in a short text: both densities cap at 1.0
        let ct = detect_content_type("latency matters. we should care", None);
        assert_eq!(ct.name, "technical");
    }

    #[test]
    fn test_url_boosts_by_host_and_path() {
        let boosts = url_boosts("https://github.com/org/repo");
        assert_eq!(boosts.get("technical"), Some(&URL_BOOST));
        let boosts = url_boosts("https://example.com/blog/2023/scaling-infrastructure");
        assert_eq!(boosts.get("technical"), Some(&URL_BOOST));
        let boosts = url_boosts("https://paper.example/opinion/why");
        assert_eq!(boosts.get("opinion"), Some(&URL_BOOST));
        assert!(url_boosts("relative/path").is_empty());
    }
}

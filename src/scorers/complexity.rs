//! Reading time and complexity profile scorer
//!
//! Measures whether cognitive load is well calibrated: jargon that gets
//! explained, data over padding, even pacing across paragraphs. Rewards clear
//! expert writing and penalizes both needless complexity and dumbing down.
//! Reading level and sentence structure belong to the readability scorer.

use super::base::Scorer;
use super::patterns::{per_100, round_to, PatternSet};
use crate::confidence::confidence_interval;
use crate::models::{MatchHighlight, Metadata, ScoreResult};
use crate::text::{char_offset, split_paragraphs, syllable_count};
use regex::Regex;
use std::sync::OnceLock;

const MIN_WORDS: usize = 30;

/// Jargon, concepts, data, oversimplification, needless complexity, pacing, syllables
const SIGNAL_TYPES: usize = 7;

const PROSE_WPM: f64 = 238.0;
const CODE_WPM: f64 = 100.0;
const LIST_WPM: f64 = 300.0;

static ACRONYM: OnceLock<Regex> = OnceLock::new();
static JARGON: OnceLock<PatternSet> = OnceLock::new();
static CONCEPTS: OnceLock<PatternSet> = OnceLock::new();
static DATA_DENSITY: OnceLock<PatternSet> = OnceLock::new();
static OVERSIMPLIFICATION: OnceLock<PatternSet> = OnceLock::new();
static NEEDLESS: OnceLock<PatternSet> = OnceLock::new();
static CODE_BLOCK: OnceLock<Regex> = OnceLock::new();
static LIST_ITEM: OnceLock<Regex> = OnceLock::new();

/// Uppercase acronyms (case-sensitive)
fn acronym() -> &'static Regex {
    ACRONYM.get_or_init(|| Regex::new(r"\b[A-Z]{2,5}\b").expect("valid regex"))
}

fn jargon() -> &'static PatternSet {
    JARGON.get_or_init(|| {
        PatternSet::new(
            "jargon",
            &[
                r"\b\w+ization\b",
                r"\b\w+arity\b",
                r"\b\w+ivity\b",
                r"\b(?:algorithm|heuristic|mutex|semaphore|inference|polymorphism)\b",
                r"\b(?:abstraction|encapsulation|idempotent|deterministic|stochastic)\b",
                r"\b(?:concurrency|throughput|latency|middleware|microservice)\b",
                r"\b(?:refactor|deploy|endpoint|payload|schema|runtime)\b",
                r"\w+\(\)",
                r"\w+\.\w+\(\)",
            ],
        )
    })
}

/// Phrases that introduce or explain a concept
fn concepts() -> &'static PatternSet {
    CONCEPTS.get_or_init(|| {
        PatternSet::new(
            "concept_intro",
            &[
                r"\bdefined as\b",
                r"\brefers to\b",
                r"\bis known as\b",
                r"\bi\.e\.",
                r"\bin other words\b",
                r"\bwe define\b",
                r"\bwe introduce\b",
                r"\bthe concept of\b",
                r"\bwhich means\b",
                r"\bmeaning that\b",
                r"\bthat is,",
                r"\balso (?:called|known as|referred to as)\b",
            ],
        )
    })
}

fn data_density() -> &'static PatternSet {
    DATA_DENSITY.get_or_init(|| {
        PatternSet::new(
            "data_density",
            &[
                r"\d+(?:\.\d+)?%",
                r"\$\d[\d,]*(?:\.\d+)?",
                r"\d+(?:\.\d+)?\s*(?:ms|MB|GB|TB|KB|MHz|GHz|Gbps|Mbps)\b",
                r"\d+x\b",
                r"\d+(?:\.\d+)?–\d+(?:\.\d+)?",
                r"\d+(?:\.\d+)?-\d+(?:\.\d+)?%",
            ],
        )
    })
}

fn oversimplification() -> &'static PatternSet {
    OVERSIMPLIFICATION.get_or_init(|| {
        PatternSet::new(
            "oversimplification",
            &[
                r"\bsimply put\b",
                r"\bjust (?:use|do|add|run|set|put)\b",
                r"\ball you need (?:to do|is)\b",
                r"\bit'?s (?:really |very )?simple\b",
                r"\bbasically\b",
                r"\bjust (?:a )?simple\b",
                r"\bthere'?s nothing to it\b",
                r"\beasy as pie\b",
            ],
        )
    })
}

fn needless() -> &'static PatternSet {
    NEEDLESS.get_or_init(|| {
        PatternSet::new(
            "needless_complexity",
            &[
                r"\butilize\b",
                r"\bleverage\b",
                r"\bsynergy\b",
                r"\bsynergize\b",
                r"\baforementioned\b",
                r"\bnotwithstanding\b",
                r"\bit should be noted that\b",
                r"\bthe fact that\b",
                r"\bin order to\b",
                r"\bprior to\b",
                r"\bsubsequent to\b",
                r"\bwith respect to\b",
                r"\bin terms of\b",
                r"\bfacilitate\b",
                r"\boperationalize\b",
            ],
        )
    })
}

fn code_block() -> &'static Regex {
    CODE_BLOCK.get_or_init(|| Regex::new(r"(?s)```.*?```").expect("valid regex"))
}

fn list_item() -> &'static Regex {
    LIST_ITEM
        .get_or_init(|| Regex::new(r"(?m)^[ \t]*(?:[-*•]|\d+\.)[ \t]+.+$").expect("valid regex"))
}

fn jargon_count(text: &str) -> usize {
    jargon().count(text) + acronym().find_iter(text).count()
}

/// Fraction of words with three or more syllables
fn polysyllabic_rate(words: &[&str]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let poly = words.iter().filter(|w| syllable_count(w) >= 3).count();
    poly as f64 / words.len() as f64
}

/// Minutes to read, with code read slower and list items faster than prose
pub fn reading_time_minutes(text: &str, word_count: usize) -> f64 {
    let code_words: usize = code_block()
        .find_iter(text)
        .map(|m| m.as_str().split_whitespace().count())
        .sum();
    let list_words: usize = list_item()
        .find_iter(text)
        .map(|m| m.as_str().split_whitespace().count())
        .sum();
    let prose_words = word_count.saturating_sub(code_words + list_words);

    let minutes = prose_words as f64 / PROSE_WPM
        + code_words as f64 / CODE_WPM
        + list_words as f64 / LIST_WPM;
    round_to(minutes.max(0.1), 1)
}

/// Coarse level from polysyllabic, jargon and concept rates
pub fn complexity_level(poly_rate: f64, jargon_rate: f64, concept_rate: f64) -> &'static str {
    let composite = poly_rate * 2.0 + jargon_rate * 0.3 + concept_rate * 0.2;
    if composite >= 1.5 {
        "expert"
    } else if composite >= 0.8 {
        "advanced"
    } else if composite >= 0.3 {
        "intermediate"
    } else {
        "beginner"
    }
}

/// Mean and standard deviation of per-paragraph jargon density.
/// Paragraphs under five words are skipped.
fn paragraph_jargon_pacing(paragraphs: &[&str]) -> (f64, f64) {
    let densities: Vec<f64> = paragraphs
        .iter()
        .filter_map(|p| {
            let wc = p.split_whitespace().count();
            (wc >= 5).then(|| per_100(jargon_count(p), wc))
        })
        .collect();
    if densities.is_empty() {
        return (0.0, 0.0);
    }
    let n = densities.len() as f64;
    let mean = densities.iter().sum::<f64>() / n;
    if densities.len() < 2 {
        return (mean, 0.0);
    }
    let variance = densities.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

fn explanation_balance(jargon: usize, concepts: usize, jargon_rate: f64) -> f64 {
    if jargon > 0 && concepts > 0 {
        let ratio = concepts as f64 / jargon as f64;
        if ratio >= 0.3 {
            0.20
        } else if ratio >= 0.15 {
            0.10
        } else {
            0.0
        }
    } else if jargon_rate > 3.0 && concepts == 0 {
        -0.15
    } else {
        0.0
    }
}

/// Reading time and complexity profile: jargon density, concept pacing, cognitive load
#[derive(Debug, Default)]
pub struct ComplexityScorer;

impl ComplexityScorer {
    pub fn new() -> Self {
        Self
    }

    fn explain(score: f64, level: &str, minutes: f64) -> String {
        let quality = if score >= 0.7 {
            "Well-calibrated complexity: technical depth with clear explanations"
        } else if score >= 0.5 {
            "Moderate complexity calibration"
        } else if score >= 0.35 {
            "Complexity could be better calibrated"
        } else {
            "Poor complexity calibration: unnecessarily complex or oversimplified"
        };
        format!("{quality} ({minutes:.1} min read, {level} level).")
    }
}

impl Scorer for ComplexityScorer {
    fn name(&self) -> &'static str {
        "complexity"
    }

    fn description(&self) -> &'static str {
        "Reading time + complexity profile: jargon density, concept pacing, cognitive load"
    }

    fn default_weight(&self) -> f64 {
        0.5
    }

    fn score(&self, text: &str, _metadata: Option<&Metadata>) -> ScoreResult {
        let words: Vec<&str> = text.split_whitespace().collect();
        let wc = words.len();
        if wc < MIN_WORDS {
            return ScoreResult::insufficient(self.name(), wc, "complexity profile");
        }

        let jargon_total = jargon_count(text);
        let concept_total = concepts().count(text);
        let data_total = data_density().count(text);
        let oversimplify_total = oversimplification().count(text);
        let needless_total = needless().count(text);

        let jargon_rate = per_100(jargon_total, wc);
        let concept_rate = per_100(concept_total, wc);
        let data_rate = per_100(data_total, wc);
        let oversimplify_rate = per_100(oversimplify_total, wc);
        let needless_rate = per_100(needless_total, wc);

        let alpha_words: Vec<&str> = words
            .iter()
            .copied()
            .filter(|w| w.chars().all(char::is_alphabetic))
            .collect();
        let poly_rate = polysyllabic_rate(&alpha_words);

        let paragraphs = split_paragraphs(text);
        let (avg_density, density_std_dev) = paragraph_jargon_pacing(&paragraphs);

        let mut score = 0.40;
        score += explanation_balance(jargon_total, concept_total, jargon_rate);
        score -= (needless_rate * 0.06).min(0.15);

        if oversimplify_total > 0 && jargon_total > 3 {
            score -= (oversimplify_rate * 0.04).min(0.10);
        } else if oversimplify_rate > 2.0 && jargon_total <= 2 {
            score -= 0.08;
        }

        if data_rate > 1.0 {
            score += (data_rate * 0.03).min(0.10);
        }

        if paragraphs.len() >= 3 {
            if density_std_dev < 3.0 {
                score += 0.05;
            } else if density_std_dev > 8.0 {
                score -= 0.05;
            }
        }

        if (0.15..=0.30).contains(&poly_rate) {
            score += 0.08;
        } else if poly_rate > 0.40 {
            score -= 0.08;
        } else if poly_rate < 0.08 {
            score -= 0.05;
        }

        if wc > 1000 {
            if jargon_total >= 10 && concept_total >= 4 && needless_total <= 2 {
                score += 0.10;
            } else if jargon_total >= 5 && concept_total >= 2 {
                score += 0.05;
            }
        }
        let score = score.clamp(0.0, 1.0);

        let minutes = reading_time_minutes(text, wc);
        let level = complexity_level(poly_rate, jargon_rate, concept_rate);

        let mut highlights = jargon().highlights(text);
        highlights.extend(
            acronym()
                .find_iter(text)
                .map(|m| MatchHighlight::new(m.as_str(), "jargon", char_offset(text, m.start()))),
        );
        highlights.extend(concepts().highlights(text));
        highlights.extend(oversimplification().highlights(text));
        highlights.extend(needless().highlights(text));
        highlights.extend(data_density().highlights(text));

        let signals = jargon_total + concept_total + data_total + oversimplify_total + needless_total;
        let (lower, upper) = confidence_interval(score, wc, signals, SIGNAL_TYPES);

        ScoreResult::new(self.name(), score, Self::explain(score, level, minutes))
            .with_detail("reading_time_minutes", minutes)
            .with_detail("complexity_level", level)
            .with_detail("polysyllabic_rate", round_to(poly_rate, 3))
            .with_detail("jargon_count", jargon_total)
            .with_detail("jargon_rate_per_100w", round_to(jargon_rate, 2))
            .with_detail("concept_intro_count", concept_total)
            .with_detail("concept_intro_rate_per_100w", round_to(concept_rate, 2))
            .with_detail("oversimplification_count", oversimplify_total)
            .with_detail("needless_complexity_count", needless_total)
            .with_detail("data_density_rate_per_100w", round_to(data_rate, 2))
            .with_detail("avg_paragraph_density", round_to(avg_density, 2))
            .with_detail("paragraph_density_variance", round_to(density_std_dev, 2))
            .with_detail("word_count", wc)
            .with_highlights(highlights)
            .with_interval(lower, upper)
    }
}

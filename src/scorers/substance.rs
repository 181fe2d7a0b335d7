//! Substance density scorer
//!
//! Measures how much concrete, specific content a text carries relative to
//! filler. High-substance writing has data points, examples, named tools and
//! causal reasoning; low-substance writing is vague, hedging and generic.

use super::base::Scorer;
use super::patterns::{per_100, round_to, PatternSet};
use crate::confidence::confidence_interval;
use crate::models::{Metadata, ScoreResult};
use crate::text::{sentences_longer_than, word_count};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

const MIN_WORDS: usize = 20;

static FILLER: OnceLock<PatternSet> = OnceLock::new();
static HEDGES: OnceLock<PatternSet> = OnceLock::new();
static SPECIFICITY: OnceLock<PatternSet> = OnceLock::new();
static GENERIC_STARTERS: OnceLock<PatternSet> = OnceLock::new();
static WORD: OnceLock<Regex> = OnceLock::new();

/// Phrases that add no information
fn filler() -> &'static PatternSet {
    FILLER.get_or_init(|| {
        PatternSet::new(
            "filler",
            &[
                r"\bin today'?s (?:world|age|society|landscape|environment)\b",
                r"\bit'?s (?:important|worth noting|no secret|safe to say|widely known)\b",
                r"\bas (?:we all know|everyone knows|you may know|mentioned (?:above|earlier|before))\b",
                r"\bwithout further ado\b",
                r"\bin (?:this|the following) (?:article|post|guide|blog|piece)\b",
                r"\blet'?s (?:dive in|get started|take a (?:look|closer look)|explore|delve)\b",
                r"\b(?:first and foremost|last but not least|at the end of the day)\b",
                r"\bneedless to say\b",
                r"\bthe (?:fact of the matter|bottom line|reality) is\b",
                r"\bwhen it comes to\b",
                r"\bin (?:order|an effort) to\b",
                r"\bit goes without saying\b",
                r"\bthere'?s no denying\b",
                r"\byou (?:might|may) (?:be wondering|ask yourself)\b",
                r"\bhave you ever (?:wondered|thought about|asked yourself)\b",
                r"\b(?:simply put|put simply|to put it simply)\b",
                r"\b(?:in conclusion|to summarize|to sum up|all in all)\b",
                r"\blook no further\b",
                r"\bunlock (?:the (?:power|potential|secrets?|full)|your)\b",
                r"\btake (?:your .+ )?to the next level\b",
                r"\bgame[ -]?changer\b",
                r"\bleverage (?:the power of|cutting[ -]edge)\b",
                r"\bseamless(?:ly)?\b",
                r"\brobust (?:and|yet) (?:scalable|flexible)\b",
                r"\bcutting[ -]edge\b",
                r"\bstate[ -]of[ -]the[ -]art\b",
                r"\bone[ -]stop[ -]shop\b",
            ],
        )
    })
}

/// Hedges that weaken claims without adding specificity
fn hedges() -> &'static PatternSet {
    HEDGES.get_or_init(|| {
        PatternSet::new(
            "hedge",
            &[
                r"\bgenerally speaking\b",
                r"\bfor the most part\b",
                r"\bin (?:many|some|most) cases\b",
                r"\btends to (?:be|have)\b",
                r"\bcan (?:sometimes|often|potentially)\b",
                r"\bmore or less\b",
                r"\bresults may vary\b",
                r"\byour mileage may vary\b",
                r"\bdepending on (?:various|several|many) factors\b",
                r"\bit depends\b",
                r"\bvaries (?:widely|greatly|significantly)\b",
            ],
        )
    })
}

/// Markers of concrete, specific content
fn specificity() -> &'static PatternSet {
    SPECIFICITY.get_or_init(|| {
        PatternSet::new(
            "specificity",
            &[
                r"\b\d+(?:\.\d+)?%",
                r"\$\d+[\d,]*(?:\.\d+)?",
                r"\b\d{4}\b",
                r"\bv\d+\.\d+",
                r"\b\d+(?:\.\d+)?\s*(?:ms|seconds?|minutes?|hours?|days?|GB|MB|KB|TB)\b",
                r"\b(?:for example|e\.g\.|specifically|in particular|concretely)\b",
                r"\bbecause\b",
                r"\b(?:however|but|although|whereas|despite)\b",
                r"`.+?`",
                r"\bhttps?://\S+",
                r"\b(?:faster|slower|better|worse|cheaper|larger|smaller) than\b",
                r"\b(?:we|I) (?:found|noticed|discovered|observed|measured|tested|built|ran|saw)\b",
                r"\bif (?:your|the) \w+ (?:is|are|has|exceeds?|needs?|requires?)\b",
                r"\b[a-z_]{2,}(?:\(\)|\.)[a-z_]+",
                r"\b(?:increased|decreased|improved|reduced|dropped|grew|rose|fell) by\b",
                r"\b\d+(?:\.\d+)?\s*(?:x|×)\b",
                r"\b\d+-(?:node|server|core|thread|user|table|day|week|month|year)\b",
                r"\b(?:from|between) \d+.{0,20}(?:to|and) \d+",
                r"\b(?:approximately|roughly|about|around) \d+",
                r"\b(?:step|phase|stage) \d+\b",
                r"\b(?:figure|table|section|chapter|appendix) \d+\b",
            ],
        )
    })
}

/// Sentence openings typical of generic, template-like prose
fn generic_starters() -> &'static PatternSet {
    GENERIC_STARTERS.get_or_init(|| {
        PatternSet::new(
            "generic_start",
            &[
                r"^(?:This|It|There) (?:is|are|was|were|has been) ",
                r"^(?:One of the|Another|The first|The key|A (?:key|major|critical|important)) ",
                r"^(?:In|With|By|Through|Using) (?:the|this|today's) ",
                r"^(?:Whether you're|If you're|As a) ",
            ],
        )
    })
}

fn word_re() -> &'static Regex {
    WORD.get_or_init(|| Regex::new(r"\b[a-z]+\b").expect("valid regex"))
}

/// Length-adjusted vocabulary richness in [0, 1].
///
/// Compares distinct words against the Heaps'-law expectation `7 * n^0.55`
/// (capped at 80% of n), mapping a ratio of 0.5 to 0.0 and 1.5 to 1.0.
fn vocabulary_richness(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let words: Vec<&str> = word_re().find_iter(&lower).map(|m| m.as_str()).collect();
    if words.is_empty() {
        return 0.0;
    }
    let n = words.len() as f64;
    let unique = words.iter().collect::<HashSet<_>>().len() as f64;
    let expected = (7.0 * n.powf(0.55)).min(n * 0.80);
    if expected <= 0.0 {
        return 0.0;
    }
    (unique / expected - 0.5).clamp(0.0, 1.0)
}

/// Mean per-sentence density: 0.5 base, +0.3 specific, -0.3 filler, -0.1 generic opening
fn sentence_info_density(sentences: &[&str]) -> f64 {
    if sentences.is_empty() {
        return 0.0;
    }
    let total: f64 = sentences
        .iter()
        .map(|sent| {
            let mut s: f64 = 0.5;
            if specificity().any_match(sent) {
                s += 0.3;
            }
            if filler().any_match(sent) {
                s -= 0.3;
            }
            if generic_starters().any_match(sent) {
                s -= 0.1;
            }
            s.clamp(0.0, 1.0)
        })
        .sum();
    total / sentences.len() as f64
}

/// Information density: concrete specifics versus vague filler
#[derive(Debug, Default)]
pub struct SubstanceScorer;

impl SubstanceScorer {
    pub fn new() -> Self {
        Self
    }

    fn explain(score: f64, filler: usize, specific: usize, hedge: usize) -> String {
        let quality = if score >= 0.7 {
            "High substance density"
        } else if score >= 0.5 {
            "Moderate substance density"
        } else {
            "Low substance density, mostly filler or generic content"
        };
        let mut parts = vec![quality.to_string()];
        if specific > 3 {
            parts.push(format!(
                "Found {specific} specificity markers (data, examples, code)"
            ));
        }
        if filler > 2 {
            parts.push(format!("Found {filler} filler phrases"));
        }
        if hedge > 2 {
            parts.push(format!("Found {hedge} vague hedges"));
        }
        format!("{}.", parts.join(". "))
    }
}

impl Scorer for SubstanceScorer {
    fn name(&self) -> &'static str {
        "substance"
    }

    fn description(&self) -> &'static str {
        "Information density: concrete specifics vs vague filler"
    }

    fn default_weight(&self) -> f64 {
        1.5
    }

    fn score(&self, text: &str, _metadata: Option<&Metadata>) -> ScoreResult {
        let wc = word_count(text);
        if wc < MIN_WORDS {
            return ScoreResult::insufficient(self.name(), wc, "substance");
        }

        let sentences = sentences_longer_than(text, 10);
        let filler_count = filler().count(text);
        let hedge_count = hedges().count(text);
        let specific_count = specificity().count(text);
        let generic_count = sentences
            .iter()
            .filter(|s| generic_starters().any_match(s))
            .count();

        let filler_rate = per_100(filler_count, wc);
        let hedge_rate = per_100(hedge_count, wc);
        let specific_rate = per_100(specific_count, wc);
        let vocab = vocabulary_richness(text);
        let info_density = sentence_info_density(&sentences);

        let mut score = 0.3;
        score += (specific_rate * 0.15).min(0.35);
        score -= (filler_rate * 0.10).min(0.30);
        score -= (hedge_rate * 0.04).min(0.10);

        if vocab > 0.6 {
            score += 0.08;
        } else if vocab > 0.4 {
            score += 0.04;
        } else if vocab < 0.2 {
            score -= 0.05;
        }

        score = score * 0.8 + info_density * 0.2;

        if !sentences.is_empty() && generic_count as f64 / sentences.len() as f64 > 0.4 {
            score -= 0.1;
        }

        // Rates dilute in long texts; reward sustained absolute specificity
        if wc > 1000 {
            let per_1000 = specific_count as f64 / (wc as f64 / 1000.0);
            if per_1000 >= 10.0 && filler_rate < 0.5 {
                score += 0.10;
            } else if per_1000 >= 5.0 {
                score += 0.05;
            }
        }
        let score = score.clamp(0.0, 1.0);

        let mut highlights = filler().highlights(text);
        highlights.extend(hedges().highlights(text));
        highlights.extend(specificity().highlights(text));

        let signal_types = [filler_count, hedge_count, specific_count]
            .iter()
            .filter(|c| **c > 0)
            .count();
        let (lower, upper) = confidence_interval(
            score,
            wc,
            filler_count + hedge_count + specific_count,
            signal_types,
        );

        ScoreResult::new(
            self.name(),
            score,
            Self::explain(score, filler_count, specific_count, hedge_count),
        )
        .with_detail("filler_count", filler_count)
        .with_detail("hedge_count", hedge_count)
        .with_detail("specific_count", specific_count)
        .with_detail("generic_start_count", generic_count)
        .with_detail("filler_rate_per_100w", round_to(filler_rate, 2))
        .with_detail("specific_rate_per_100w", round_to(specific_rate, 2))
        .with_detail("vocab_richness", round_to(vocab, 3))
        .with_detail("info_density", round_to(info_density, 3))
        .with_detail("sentence_count", sentences.len())
        .with_detail("word_count", wc)
        .with_highlights(highlights)
        .with_interval(lower, upper)
    }
}

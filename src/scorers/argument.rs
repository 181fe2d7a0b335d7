//! Argument structure scorer
//!
//! Measures whether a text makes claims backed by evidence and engages with
//! counterarguments, or just states opinions. Complements the epistemic
//! scorer: that one measures nuance, this one measures rigor.

use super::base::Scorer;
use super::patterns::{per_100, round_to, PatternSet};
use crate::confidence::confidence_interval;
use crate::models::{MatchHighlight, Metadata, ScoreResult};
use crate::text::{char_offset, word_count};
use regex::Regex;
use std::sync::OnceLock;

const MIN_WORDS: usize = 30;

/// Characters inspected around a prescriptive for a justification
const REASONING_BEFORE: usize = 40;
const REASONING_AFTER: usize = 80;

static CLAIMS: OnceLock<PatternSet> = OnceLock::new();
static EVIDENCE: OnceLock<PatternSet> = OnceLock::new();
static COUNTERARGUMENTS: OnceLock<PatternSet> = OnceLock::new();
static UNSUPPORTED: OnceLock<PatternSet> = OnceLock::new();
static VAGUE_APPEAL: OnceLock<Regex> = OnceLock::new();
static APPEAL_SPECIFICS: OnceLock<Regex> = OnceLock::new();
static PRESCRIPTIVE: OnceLock<Regex> = OnceLock::new();
static NEARBY_REASONING: OnceLock<Regex> = OnceLock::new();

fn claims() -> &'static PatternSet {
    CLAIMS.get_or_init(|| {
        PatternSet::new(
            "claim",
            &[
                r"\bwe found that\b",
                r"\bthe result was\b",
                r"\bthis shows that\b",
                r"\bthe problem is\b",
                r"\bthe solution is\b",
                r"\bthe key insight\b",
                r"\b\w+ causes \w+",
                r"\b\w+ leads to \w+",
                r"\b\w+ results in \w+",
                r"\bis better than\b",
                r"\bis worse than\b",
                r"\bunlike \w+,",
                r"\bwe conclude\b",
                r"\bthe evidence suggests\b",
                r"\bour analysis shows\b",
                r"\bthe main (?:finding|takeaway|point) is\b",
            ],
        )
    })
}

fn evidence() -> &'static PatternSet {
    EVIDENCE.get_or_init(|| {
        PatternSet::new(
            "evidence",
            &[
                r"\bfor example\b",
                r"\bfor instance\b",
                r"\bsuch as\b",
                r"\be\.g\.",
                r"\bconsider the case\b",
                r"\baccording to\b",
                r"\bresearch shows\b",
                r"\[\d+\]",
                r"\(\w+ \d{4}\)",
                r"\bwhen we tested\b",
                r"\bin our deployment\b",
                r"\bwe measured\b",
                r"\bwe observed\b",
                r"\bwe ran\b",
                r"\bbecause\b",
                r"\btherefore\b",
                r"\bsince\b",
                r"\bgiven that\b",
                r"\bit follows\b",
                r"\bthe data shows?\b",
                r"\bthe numbers suggest\b",
                r"\bin practice\b",
                r"\bspecifically\b",
            ],
        )
    })
}

fn counterarguments() -> &'static PatternSet {
    COUNTERARGUMENTS.get_or_init(|| {
        PatternSet::new(
            "counterargument",
            &[
                r"\bon the other hand\b",
                r"\balternatively\b",
                r"\bcritics argue\b",
                r"\badmittedly\b",
                r"\bgranted\b",
                r"\bto be fair\b",
                r"\bit'?s true that\b",
                r"\bhowever\b",
                r"\bnevertheless\b",
                r"\bdespite this\b",
                r"\bbut this ignores\b",
                r"\bthis doesn'?t apply to\b",
                r"\bthe exception is\b",
                r"\bthis breaks down when\b",
                r"\bone could argue\b",
                r"\bthe counterargument\b",
                r"\bwhile this (?:is|may be) true\b",
            ],
        )
    })
}

/// Assertions that lean on rhetoric instead of support
fn unsupported() -> &'static PatternSet {
    UNSUPPORTED.get_or_init(|| {
        PatternSet::new(
            "unsupported",
            &[
                r"\bobviously\b",
                r"\bclearly\b",
                r"\beveryone knows\b",
                r"\bundeniably\b",
                r"\bwithout (?:a )?doubt\b",
                r"\bneedless to say\b",
                r"\bit goes without saying\b",
            ],
        )
    })
}

fn vague_appeal() -> &'static Regex {
    VAGUE_APPEAL
        .get_or_init(|| Regex::new(r"(?i)\b(?:experts say|studies show)\b").expect("valid regex"))
}

/// At least four words following an appeal count as specifics
fn appeal_specifics() -> &'static Regex {
    APPEAL_SPECIFICS.get_or_init(|| {
        Regex::new(r"(?i)^\s+(?:that\s+)?\w+\s+\w+\s+\w+\s+\w+").expect("valid regex")
    })
}

fn prescriptive() -> &'static Regex {
    PRESCRIPTIVE
        .get_or_init(|| Regex::new(r"(?i)\byou (?:should|must|need to)\b").expect("valid regex"))
}

fn nearby_reasoning() -> &'static Regex {
    NEARBY_REASONING.get_or_init(|| {
        Regex::new(r"(?i)\b(?:because|since|given|as|due to|in order to|so that)\b")
            .expect("valid regex")
    })
}

/// "experts say" / "studies show" with nothing specific after them
fn vague_appeals(text: &str) -> Vec<MatchHighlight> {
    vague_appeal()
        .find_iter(text)
        .filter(|m| !appeal_specifics().is_match(&text[m.end()..]))
        .map(|m| MatchHighlight::new(m.as_str(), "unsupported", char_offset(text, m.start())))
        .collect()
}

/// Slice from `before` characters ahead of `start` to `after` characters past `end`
fn context_window(text: &str, start: usize, end: usize, before: usize, after: usize) -> &str {
    let lo = text[..start]
        .char_indices()
        .rev()
        .nth(before.saturating_sub(1))
        .map_or(0, |(i, _)| i);
    let hi = text[end..]
        .char_indices()
        .nth(after)
        .map_or(text.len(), |(i, _)| end + i);
    &text[lo..hi]
}

/// "you should/must/need to" with no justification nearby
fn bare_prescriptives(text: &str) -> usize {
    prescriptive()
        .find_iter(text)
        .filter(|m| {
            let context =
                context_window(text, m.start(), m.end(), REASONING_BEFORE, REASONING_AFTER);
            !nearby_reasoning().is_match(context)
        })
        .count()
}

fn support_adjustment(claims: usize, evidence: usize) -> f64 {
    if claims > 0 && evidence > 0 {
        let ratio = evidence as f64 / claims as f64;
        if ratio >= 1.5 {
            0.15
        } else if ratio >= 0.8 {
            0.08
        } else {
            0.0
        }
    } else if claims > 3 && evidence == 0 {
        -0.10
    } else {
        0.0
    }
}

/// Argument structure: claims, evidence, and counterarguments
#[derive(Debug, Default)]
pub struct ArgumentScorer;

impl ArgumentScorer {
    pub fn new() -> Self {
        Self
    }

    fn explain(
        score: f64,
        claims: usize,
        evidence: usize,
        counters: usize,
        unsupported: usize,
    ) -> String {
        let quality = if score >= 0.7 {
            "Strong argument structure: claims well-supported with evidence"
        } else if score >= 0.5 {
            "Moderate argument structure"
        } else {
            "Weak argument structure: claims lack evidence or support"
        };
        let mut parts = vec![quality.to_string()];
        if claims > 2 {
            parts.push(format!("{claims} claims detected"));
        }
        if evidence > 3 {
            parts.push(format!("{evidence} evidence markers"));
        }
        if counters > 1 {
            parts.push(format!("{counters} counterarguments"));
        }
        if unsupported > 2 {
            parts.push(format!("{unsupported} unsupported assertions"));
        }
        format!("{}.", parts.join(". "))
    }
}

impl Scorer for ArgumentScorer {
    fn name(&self) -> &'static str {
        "argument"
    }

    fn description(&self) -> &'static str {
        "Argument structure: claims, evidence, and counterarguments"
    }

    fn default_weight(&self) -> f64 {
        0.75
    }

    fn score(&self, text: &str, _metadata: Option<&Metadata>) -> ScoreResult {
        let wc = word_count(text);
        if wc < MIN_WORDS {
            return ScoreResult::insufficient(self.name(), wc, "argument structure");
        }

        let claim_count = claims().count(text);
        let evidence_count = evidence().count(text);
        let counter_count = counterarguments().count(text);
        let appeals = vague_appeals(text);
        let unsupported_count = unsupported().count(text) + appeals.len();
        let bare_count = bare_prescriptives(text);
        let total_unsupported = unsupported_count + bare_count;

        let evidence_rate = per_100(evidence_count, wc);
        let counter_rate = per_100(counter_count, wc);
        let unsupported_rate = per_100(total_unsupported, wc);

        let mut score = 0.30;
        score += (evidence_rate * 0.10).min(0.25);
        score += (counter_rate * 0.12).min(0.15);
        score += support_adjustment(claim_count, evidence_count);
        score -= (unsupported_rate * 0.08).min(0.20);

        if evidence_rate > 0.5 && counter_rate > 0.3 {
            score += 0.08;
        }

        if wc > 1000 {
            if evidence_count >= 8 && counter_count >= 3 {
                score += 0.12;
            } else if evidence_count >= 6 {
                score += 0.05;
            }
        }
        let score = score.clamp(0.0, 1.0);

        let mut highlights = claims().highlights(text);
        highlights.extend(evidence().highlights(text));
        highlights.extend(counterarguments().highlights(text));
        highlights.extend(unsupported().highlights(text));
        highlights.extend(appeals);

        let families = [claim_count, evidence_count, counter_count, total_unsupported];
        let (lower, upper) = confidence_interval(
            score,
            wc,
            families.iter().sum(),
            families.iter().filter(|c| **c > 0).count(),
        );

        ScoreResult::new(
            self.name(),
            score,
            Self::explain(score, claim_count, evidence_count, counter_count, total_unsupported),
        )
        .with_detail("claim_count", claim_count)
        .with_detail("evidence_count", evidence_count)
        .with_detail("counterargument_count", counter_count)
        .with_detail("unsupported_count", total_unsupported)
        .with_detail("bare_prescriptive_count", bare_count)
        .with_detail("evidence_rate_per_100w", round_to(evidence_rate, 2))
        .with_detail("counter_rate_per_100w", round_to(counter_rate, 2))
        .with_detail("unsupported_rate_per_100w", round_to(unsupported_rate, 2))
        .with_detail("word_count", wc)
        .with_highlights(highlights)
        .with_interval(lower, upper)
    }
}

//! Readability and structure scorer
//!
//! Substantive writing sits at a moderate reading level with varied sentence
//! structure: not so simple that it reads as shallow, not so dense that it
//! reads as obfuscated.

use super::base::Scorer;
use super::patterns::round_to;
use crate::confidence::confidence_interval;
use crate::models::{Metadata, ScoreResult};
use crate::text::{sentences_longer_than, split_paragraphs, syllable_count};
use regex::Regex;
use std::sync::OnceLock;

const MIN_WORDS: usize = 20;
const IDEAL_GRADE_MIN: f64 = 8.0;
const IDEAL_GRADE_MAX: f64 = 14.0;

/// Distinct signal families feeding the interval (grade, variety, paragraphs,
/// structure, sentence length)
const SIGNAL_TYPES: usize = 5;

static ALPHA_WORD: OnceLock<Regex> = OnceLock::new();
static HEADING: OnceLock<Regex> = OnceLock::new();
static BULLET: OnceLock<Regex> = OnceLock::new();
static NUMBERED: OnceLock<Regex> = OnceLock::new();

fn alpha_word() -> &'static Regex {
    ALPHA_WORD.get_or_init(|| Regex::new(r"\b[a-zA-Z]+\b").expect("valid regex"))
}

fn heading() -> &'static Regex {
    HEADING.get_or_init(|| Regex::new(r"(?m)^#{1,6}\s+\S").expect("valid regex"))
}

fn bullet() -> &'static Regex {
    BULLET.get_or_init(|| Regex::new(r"(?m)^[ \t]*[-*+]\s+\S").expect("valid regex"))
}

fn numbered() -> &'static Regex {
    NUMBERED.get_or_init(|| Regex::new(r"(?m)^[ \t]*\d+[.)]\s+\S").expect("valid regex"))
}

/// Flesch-Kincaid grade level
fn flesch_kincaid_grade(sentence_count: usize, words: &[&str]) -> f64 {
    if sentence_count == 0 || words.is_empty() {
        return 0.0;
    }
    let syllables: usize = words.iter().map(|w| syllable_count(w)).sum();
    let avg_sentence_len = words.len() as f64 / sentence_count as f64;
    let avg_syllables = syllables as f64 / words.len() as f64;
    0.39 * avg_sentence_len + 11.8 * avg_syllables - 15.59
}

/// Population standard deviation of sentence lengths in words
fn sentence_length_std_dev(sentences: &[&str]) -> f64 {
    if sentences.len() < 2 {
        return 0.0;
    }
    let lengths: Vec<f64> = sentences
        .iter()
        .map(|s| s.split_whitespace().count() as f64)
        .collect();
    let n = lengths.len() as f64;
    let mean = lengths.iter().sum::<f64>() / n;
    let variance = lengths.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Headings, bullet items and numbered items
fn structural_elements(text: &str) -> usize {
    heading().find_iter(text).count()
        + bullet().find_iter(text).count()
        + numbered().find_iter(text).count()
}

fn grade_adjustment(grade: f64) -> f64 {
    if (IDEAL_GRADE_MIN..=IDEAL_GRADE_MAX).contains(&grade) {
        0.15
    } else if grade < IDEAL_GRADE_MIN {
        -((IDEAL_GRADE_MIN - grade) * 0.025).min(0.15)
    } else {
        -((grade - IDEAL_GRADE_MAX) * 0.02).min(0.15)
    }
}

/// Structural quality: reading level, variety, and organization
#[derive(Debug, Default)]
pub struct ReadabilityScorer;

impl ReadabilityScorer {
    pub fn new() -> Self {
        Self
    }

    fn explain(score: f64, grade: f64, std_dev: f64) -> String {
        let quality = if score >= 0.7 {
            "Well-structured and readable"
        } else if score >= 0.5 {
            "Adequate structure"
        } else {
            "Structural issues: too simple, too complex, or monotonous"
        };
        let mut parts = vec![format!("Reading level: grade {grade:.0}")];
        if std_dev > 8.0 {
            parts.push("Good sentence variety".to_string());
        } else if std_dev < 2.0 {
            parts.push("Monotonous sentence structure".to_string());
        }
        format!("{quality}. {}.", parts.join(". "))
    }
}

impl Scorer for ReadabilityScorer {
    fn name(&self) -> &'static str {
        "readability"
    }

    fn description(&self) -> &'static str {
        "Structural quality: reading level, variety, and organization"
    }

    fn default_weight(&self) -> f64 {
        0.75
    }

    fn score(&self, text: &str, _metadata: Option<&Metadata>) -> ScoreResult {
        let words: Vec<&str> = alpha_word().find_iter(text).map(|m| m.as_str()).collect();
        let wc = words.len();
        if wc < MIN_WORDS {
            return ScoreResult::insufficient(self.name(), wc, "readability");
        }
        let sentences = sentences_longer_than(text, 5);

        let grade = flesch_kincaid_grade(sentences.len(), &words);
        let std_dev = sentence_length_std_dev(&sentences);
        let paragraphs = split_paragraphs(text).len();
        let structure = structural_elements(text);

        let mut score = 0.5 + grade_adjustment(grade);

        if std_dev > 8.0 {
            score += 0.1;
        } else if std_dev > 4.0 {
            score += 0.05;
        } else if std_dev < 2.0 && sentences.len() > 5 {
            score -= 0.1;
        }

        if paragraphs > 1 {
            score += 0.05;
        }

        if structure >= 3 {
            score += 0.05;
        } else if structure >= 1 {
            score += 0.02;
        }

        let avg_sentence_len = wc as f64 / sentences.len().max(1) as f64;
        if !sentences.is_empty() {
            if (12.0..=25.0).contains(&avg_sentence_len) {
                score += 0.05;
            } else if avg_sentence_len > 40.0 {
                score -= 0.1;
            } else if avg_sentence_len < 8.0 {
                score -= 0.05;
            }
        }
        let score = score.clamp(0.0, 1.0);

        let (lower, upper) = confidence_interval(
            score,
            wc,
            sentences.len() + structure + paragraphs,
            SIGNAL_TYPES,
        );

        ScoreResult::new(self.name(), score, Self::explain(score, grade, std_dev))
            .with_detail("flesch_kincaid_grade", round_to(grade, 1))
            .with_detail("sentence_count", sentences.len())
            .with_detail("sentence_length_variance", round_to(std_dev, 1))
            .with_detail("paragraph_count", paragraphs)
            .with_detail("structural_elements", structure)
            .with_detail("avg_sentence_length", round_to(avg_sentence_len, 1))
            .with_detail("word_count", wc)
            .with_interval(lower, upper)
    }
}

//! Property tests for the numeric invariants of scoring
//!
//! Texts are generated from a vocabulary that mixes filler, hedges, claims,
//! numbers and jargon so every scorer sees real signal, plus raw Unicode to
//! make sure nothing panics on odd input.

use distill::confidence::confidence_interval;
use distill::models::Grade;
use distill::pipeline::{BatchMetadata, Candidate, Pipeline, PipelineOptions, Winner};
use distill::{ProfileRegistry, ScorerRegistry};
use proptest::prelude::*;

const VOCAB: &[&str] = &[
    "the", "a", "we", "our", "team", "measured", "latency", "dropped", "from", "340ms",
    "to", "95ms", "in", "2024", "because", "however", "therefore", "although", "studies",
    "show", "experts", "say", "you", "should", "always", "never", "obviously", "perhaps",
    "it", "depends", "on", "workload", "in", "today's", "world", "game-changer", "simply",
    "put", "API", "Kubernetes", "latency", "throughput", "38%", "for", "example", "I",
    "think", "argue", "evidence", "suggests", "according", "Smith", "(2021)", "seamless",
    "unlock", "potential", "connection", "pool", "leak", "retry", "logic", "tradeoff",
];

const SEPARATORS: &[&str] = &[" ", " ", " ", " ", ", ", ". ", "? ", "! ", "\n", "\n\n"];

/// Word soup with sentence and paragraph breaks
fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (prop::sample::select(VOCAB), prop::sample::select(SEPARATORS)),
        0..160,
    )
    .prop_map(|pieces| {
        let mut text = String::new();
        for (word, sep) in pieces {
            text.push_str(word);
            text.push_str(sep);
        }
        text
    })
}

fn default_pipeline() -> Pipeline {
    Pipeline::with_defaults().expect("built-in pipeline")
}

fn pipeline(options: PipelineOptions) -> Pipeline {
    Pipeline::new(
        &ScorerRegistry::with_builtin(),
        &ProfileRegistry::with_builtin(),
        options,
    )
    .expect("valid pipeline")
}

fn in_unit(x: f64) -> bool {
    (0.0..=1.0).contains(&x)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn scores_stay_in_unit_interval(text in arb_text()) {
        let report = default_pipeline().score(&text, None);
        prop_assert!(in_unit(report.overall_score));
        for result in &report.scores {
            prop_assert!(in_unit(result.score), "{} = {}", result.name, result.score);
        }
    }

    #[test]
    fn arbitrary_unicode_never_panics(text in "\\PC{0,300}") {
        let report = default_pipeline().score(&text, None);
        prop_assert!(in_unit(report.overall_score));
        if text.trim().is_empty() {
            prop_assert_eq!(report.overall_score, 0.0);
            prop_assert_eq!(report.word_count, 0);
        }
    }

    #[test]
    fn reported_intervals_bracket_score(text in arb_text()) {
        let report = default_pipeline().score(&text, None);
        for result in &report.scores {
            if let (Some(lo), Some(hi)) = (result.ci_lower, result.ci_upper) {
                prop_assert!(0.0 <= lo && lo <= result.score);
                prop_assert!(result.score <= hi && hi <= 1.0);
            }
        }
    }

    #[test]
    fn highlights_are_position_ordered(text in arb_text()) {
        let report = default_pipeline().score(&text, None);
        for result in &report.scores {
            prop_assert!(result
                .highlights
                .windows(2)
                .all(|w| w[0].position <= w[1].position));
        }
    }

    #[test]
    fn comparing_text_with_itself_ties(text in arb_text()) {
        let p = default_pipeline();
        let result = p.compare(Candidate::new("a", &text), Candidate::new("b", &text));
        prop_assert_eq!(result.winner, Winner::Tie);
        prop_assert!(result.overall_delta.abs() <= 0.01);
    }

    #[test]
    fn single_scorer_overall_is_its_score(text in arb_text()) {
        let p = pipeline(PipelineOptions::new().scorers(["epistemic"]));
        let report = p.score(&text, None);
        if let Some(result) = report.scores.first() {
            prop_assert!((report.overall_score - result.score).abs() < 1e-12);
        }
    }

    #[test]
    fn paragraph_mode_keeps_overall(text in arb_text()) {
        let plain = default_pipeline().score(&text, None);
        let decomposed = pipeline(PipelineOptions::new().paragraphs(true)).score(&text, None);
        prop_assert_eq!(plain.overall_score, decomposed.overall_score);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn batch_matches_single(texts in prop::collection::vec(arb_text(), 0..6)) {
        let p = pipeline(PipelineOptions::new().workers(4));
        let items: Vec<(String, String)> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| (format!("doc-{i}"), t.clone()))
            .collect();

        let results = p.score_batch(&items, BatchMetadata::None).unwrap();
        prop_assert_eq!(results.len(), items.len());
        for (result, (label, text)) in results.iter().zip(&items) {
            prop_assert_eq!(&result.label, label);
            prop_assert_eq!(&result.report, &p.score(text, None));
        }
    }
}

proptest! {
    #[test]
    fn grade_is_total_and_matches_thresholds(score in 0.0f64..=1.0) {
        let expected = if score >= 0.80 {
            Grade::A
        } else if score >= 0.65 {
            Grade::B
        } else if score >= 0.50 {
            Grade::C
        } else if score >= 0.35 {
            Grade::D
        } else {
            Grade::F
        };
        prop_assert_eq!(Grade::from_score(score), expected);
    }

    #[test]
    fn interval_is_ordered(
        score in 0.0f64..=1.0,
        words in 0usize..5000,
        signals in 0usize..500,
        types in 0usize..10,
    ) {
        let (lo, hi) = confidence_interval(score, words, signals, types);
        prop_assert!(0.0 <= lo && lo <= score);
        prop_assert!(score <= hi && hi <= 1.0);
    }

    #[test]
    fn doubling_at_constant_density_never_widens(
        score in 0.0f64..=1.0,
        words in 1usize..3000,
        signals in 0usize..300,
        types in 0usize..10,
    ) {
        let (lo1, hi1) = confidence_interval(score, words, signals, types);
        let (lo2, hi2) = confidence_interval(score, words * 2, signals * 2, types);
        prop_assert!(hi2 - lo2 <= hi1 - lo1 + 1e-12);
    }
}

//! Pairwise comparison of two documents under one pipeline

use super::Pipeline;
use crate::models::{Metadata, QualityReport, ReportView};
use crate::text::round3;
use serde::Serialize;
use std::fmt;

/// Absolute delta below which two scores are a tie
pub const TIE_THRESHOLD: f64 = 0.01;

/// Which side scored higher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "tie")]
    Tie,
}

impl Winner {
    /// Decide from `score_a - score_b`
    pub fn from_delta(delta: f64) -> Self {
        if delta.abs() < TIE_THRESHOLD {
            Winner::Tie
        } else if delta > 0.0 {
            Winner::A
        } else {
            Winner::B
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Winner::A => "A",
            Winner::B => "B",
            Winner::Tie => "tie",
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of a comparison
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub label: &'a str,
    pub text: &'a str,
    pub metadata: Option<&'a Metadata>,
}

impl<'a> Candidate<'a> {
    pub fn new(label: &'a str, text: &'a str) -> Self {
        Self {
            label,
            text,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: &'a Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Score difference on one dimension
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionDelta {
    pub name: String,
    pub score_a: f64,
    pub score_b: f64,
    pub delta: f64,
    pub winner: Winner,
}

/// Outcome of comparing two documents
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub label_a: String,
    pub label_b: String,
    pub winner: Winner,
    /// `report_a.overall_score - report_b.overall_score`
    pub overall_delta: f64,
    pub report_a: QualityReport,
    pub report_b: QualityReport,
    /// One entry per dimension of report A
    pub dimension_deltas: Vec<DimensionDelta>,
}

/// Serializable comparison, values rounded to 3 decimals
#[derive(Debug, Serialize)]
pub struct ComparisonView<'a> {
    pub label_a: &'a str,
    pub label_b: &'a str,
    pub winner: Winner,
    pub overall_delta: f64,
    pub report_a: ReportView<'a>,
    pub report_b: ReportView<'a>,
    pub dimensions: Vec<DimensionDelta>,
}

impl ComparisonResult {
    pub fn view(&self, include_highlights: bool) -> ComparisonView<'_> {
        ComparisonView {
            label_a: &self.label_a,
            label_b: &self.label_b,
            winner: self.winner,
            overall_delta: round3(self.overall_delta),
            report_a: self.report_a.view(include_highlights),
            report_b: self.report_b.view(include_highlights),
            dimensions: self
                .dimension_deltas
                .iter()
                .map(|d| DimensionDelta {
                    name: d.name.clone(),
                    score_a: round3(d.score_a),
                    score_b: round3(d.score_b),
                    delta: round3(d.delta),
                    winner: d.winner,
                })
                .collect(),
        }
    }

    /// Label of the winning side, `None` on a tie
    pub fn winner_label(&self) -> Option<&str> {
        match self.winner {
            Winner::A => Some(self.label_a.as_str()),
            Winner::B => Some(self.label_b.as_str()),
            Winner::Tie => None,
        }
    }
}

/// Per-dimension deltas over the dimensions of `a`. A dimension missing
/// from `b` counts as 0.0.
fn dimension_deltas(a: &QualityReport, b: &QualityReport) -> Vec<DimensionDelta> {
    a.scores
        .iter()
        .map(|result| {
            let score_b = b.dimension(&result.name).map_or(0.0, |r| r.score);
            let delta = result.score - score_b;
            DimensionDelta {
                name: result.name.clone(),
                score_a: result.score,
                score_b,
                delta,
                winner: Winner::from_delta(delta),
            }
        })
        .collect()
}

/// Score both candidates with `pipeline` and compare them
pub fn compare(pipeline: &Pipeline, a: Candidate<'_>, b: Candidate<'_>) -> ComparisonResult {
    let report_a = pipeline.score(a.text, a.metadata);
    let report_b = pipeline.score(b.text, b.metadata);

    let overall_delta = report_a.overall_score - report_b.overall_score;
    let dimension_deltas = dimension_deltas(&report_a, &report_b);

    ComparisonResult {
        label_a: a.label.to_string(),
        label_b: b.label.to_string(),
        winner: Winner::from_delta(overall_delta),
        overall_delta,
        report_a,
        report_b,
        dimension_deltas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScoreResult;

    fn report(scores: &[(&str, f64)], overall: f64) -> QualityReport {
        QualityReport {
            overall_score: overall,
            scores: scores
                .iter()
                .map(|(name, score)| ScoreResult::new(*name, *score, ""))
                .collect(),
            word_count: 10,
            text_length: 50,
            ..QualityReport::empty()
        }
    }

    #[test]
    fn test_winner_from_delta() {
        assert_eq!(Winner::from_delta(0.0), Winner::Tie);
        assert_eq!(Winner::from_delta(0.0099), Winner::Tie);
        assert_eq!(Winner::from_delta(-0.0099), Winner::Tie);
        assert_eq!(Winner::from_delta(0.02), Winner::A);
        assert_eq!(Winner::from_delta(-0.02), Winner::B);
    }

    #[test]
    fn test_missing_dimension_counts_as_zero() {
        let a = report(&[("substance", 0.6), ("authority", 0.4)], 0.5);
        let b = report(&[("substance", 0.605)], 0.5);
        let deltas = dimension_deltas(&a, &b);

        assert_eq!(deltas.len(), 2);
        assert_eq!(deltas[0].winner, Winner::Tie);
        assert_eq!(deltas[1].name, "authority");
        assert_eq!(deltas[1].score_b, 0.0);
        assert_eq!(deltas[1].winner, Winner::A);
    }

    #[test]
    fn test_dimensions_follow_report_a() {
        let a = report(&[], 0.0);
        let b = report(&[("substance", 0.9)], 0.9);
        assert!(dimension_deltas(&a, &b).is_empty());
    }

    #[test]
    fn test_view_serializes_winner() {
        let result = ComparisonResult {
            label_a: "left".into(),
            label_b: "right".into(),
            winner: Winner::Tie,
            overall_delta: 0.00123,
            report_a: report(&[("substance", 0.5)], 0.5),
            report_b: report(&[("substance", 0.5)], 0.5),
            dimension_deltas: vec![],
        };
        let json = serde_json::to_value(result.view(false)).unwrap();
        assert_eq!(json["winner"], "tie");
        assert_eq!(json["overall_delta"], 0.001);
        assert_eq!(json["label_a"], "left");
        assert!(json["report_a"]["dimensions"]["substance"].is_object());
        assert!(result.winner_label().is_none());
    }
}

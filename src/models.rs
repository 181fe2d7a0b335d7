//! Data models for quality scoring
//!
//! `ScoreResult` is what a single dimension produces; `QualityReport` is the
//! weighted composite the pipeline returns. Reports are plain values with no
//! back-references, so they can be cloned into caches or sent across threads.

use crate::content_type::ContentType;
use crate::text::round3;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Neutral score returned when a scorer cannot judge the input
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Clamp into [0, 1]; NaN collapses to 0
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Optional context supplied alongside the text.
///
/// Only `url` is interpreted by the engine; everything else is carried through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Metadata {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Source URL, if present and non-blank
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

/// A phrase matched while scoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchHighlight {
    /// The matched text
    pub text: String,
    /// Signal family, e.g. "filler", "qualification", "citation"
    pub category: String,
    /// Character offset into the scored text
    pub position: usize,
}

impl MatchHighlight {
    pub fn new(text: impl Into<String>, category: impl Into<String>, position: usize) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            position,
        }
    }
}

/// Result from a single scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Name of the scorer that produced this result
    pub name: String,
    /// 0.0 (low quality) to 1.0 (high quality)
    pub score: f64,
    pub explanation: String,
    /// Diagnostic values (counts, rates, modes)
    #[serde(default)]
    pub details: BTreeMap<String, Value>,
    /// Matched phrases, ordered by position
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<MatchHighlight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ci_lower: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ci_upper: Option<f64>,
}

impl ScoreResult {
    /// Create a result; the score is clamped into [0, 1]
    pub fn new(name: impl Into<String>, score: f64, explanation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: clamp_unit(score),
            explanation: explanation.into(),
            details: BTreeMap::new(),
            highlights: Vec::new(),
            ci_lower: None,
            ci_upper: None,
        }
    }

    /// Neutral result for text below a scorer's minimum length
    pub fn insufficient(name: impl Into<String>, word_count: usize, aspect: &str) -> Self {
        Self::new(
            name,
            NEUTRAL_SCORE,
            format!("Too short to assess {aspect}."),
        )
        .with_detail("word_count", word_count)
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Attach highlights, ordered by position (stable for equal offsets)
    pub fn with_highlights(mut self, mut highlights: Vec<MatchHighlight>) -> Self {
        highlights.sort_by_key(|h| h.position);
        self.highlights = highlights;
        self
    }

    /// Attach a confidence interval.
    ///
    /// Bounds are clamped into [0, 1] and widened if needed so that
    /// `ci_lower <= score <= ci_upper` always holds.
    pub fn with_interval(mut self, lower: f64, upper: f64) -> Self {
        self.ci_lower = Some(clamp_unit(lower).min(self.score));
        self.ci_upper = Some(clamp_unit(upper).max(self.score));
        self
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }
}

/// Letter grade derived from the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Fixed thresholds: A >= 0.80, B >= 0.65, C >= 0.50, D >= 0.35, else F
    pub fn from_score(score: f64) -> Grade {
        if score >= 0.80 {
            Grade::A
        } else if score >= 0.65 {
            Grade::B
        } else if score >= 0.50 {
            Grade::C
        } else if score >= 0.35 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::A => "High substance",
            Grade::B => "Solid content",
            Grade::C => "Average",
            Grade::D => "Thin content",
            Grade::F => "Low substance",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score for one paragraph of a decomposed document
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphScore {
    /// 0-based position among the scored paragraphs
    pub index: usize,
    pub preview: String,
    pub overall_score: f64,
    pub scores: Vec<ScoreResult>,
    pub word_count: usize,
}

/// Composite quality assessment of a piece of content
#[derive(Debug, Clone, PartialEq)]
pub struct QualityReport {
    /// Weighted mean of all dimension scores
    pub overall_score: f64,
    /// Per-dimension results, in scorer order
    pub scores: Vec<ScoreResult>,
    pub word_count: usize,
    /// Length in characters
    pub text_length: usize,
    /// Present only when paragraph decomposition was requested
    pub paragraphs: Option<Vec<ParagraphScore>>,
    /// Present only when auto-detection ran
    pub content_type: Option<ContentType>,
    /// Profile whose weights were applied, if any
    pub profile: Option<String>,
}

impl QualityReport {
    /// Zero-score report for empty or whitespace-only input
    pub fn empty() -> Self {
        Self {
            overall_score: 0.0,
            scores: Vec::new(),
            word_count: 0,
            text_length: 0,
            paragraphs: None,
            content_type: None,
            profile: None,
        }
    }

    pub fn grade(&self) -> Grade {
        Grade::from_score(self.overall_score)
    }

    pub fn label(&self) -> &'static str {
        self.grade().label()
    }

    /// Look up a dimension result by scorer name
    pub fn dimension(&self, name: &str) -> Option<&ScoreResult> {
        self.scores.iter().find(|r| r.name == name)
    }

    /// Serializable view in the external output shape
    pub fn view(&self, include_highlights: bool) -> ReportView<'_> {
        ReportView {
            overall_score: round3(self.overall_score),
            grade: self.grade(),
            label: self.label(),
            word_count: self.word_count,
            text_length: self.text_length,
            profile: self.profile.as_deref(),
            content_type: self.content_type.as_ref(),
            dimensions: self
                .scores
                .iter()
                .map(|r| (r.name.as_str(), DimensionView::new(r, include_highlights)))
                .collect(),
            paragraphs: self
                .paragraphs
                .as_ref()
                .map(|ps| ps.iter().map(ParagraphView::new).collect()),
        }
    }
}

/// One dimension in the output shape
#[derive(Debug, Serialize)]
pub struct DimensionView<'a> {
    pub score: f64,
    pub explanation: &'a str,
    pub details: &'a BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ci_lower: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ci_upper: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<&'a [MatchHighlight]>,
}

impl<'a> DimensionView<'a> {
    fn new(result: &'a ScoreResult, include_highlights: bool) -> Self {
        Self {
            score: round3(result.score),
            explanation: &result.explanation,
            details: &result.details,
            ci_lower: result.ci_lower.map(round3),
            ci_upper: result.ci_upper.map(round3),
            highlights: (include_highlights && !result.highlights.is_empty())
                .then_some(result.highlights.as_slice()),
        }
    }
}

/// One paragraph in the output shape
#[derive(Debug, Serialize)]
pub struct ParagraphView<'a> {
    pub index: usize,
    pub preview: &'a str,
    pub overall_score: f64,
    pub word_count: usize,
    pub dimensions: BTreeMap<&'a str, f64>,
}

impl<'a> ParagraphView<'a> {
    fn new(paragraph: &'a ParagraphScore) -> Self {
        Self {
            index: paragraph.index,
            preview: &paragraph.preview,
            overall_score: round3(paragraph.overall_score),
            word_count: paragraph.word_count,
            dimensions: paragraph
                .scores
                .iter()
                .map(|r| (r.name.as_str(), round3(r.score)))
                .collect(),
        }
    }
}

/// Serializable report in the external output shape
#[derive(Debug, Serialize)]
pub struct ReportView<'a> {
    pub overall_score: f64,
    pub grade: Grade,
    pub label: &'static str,
    pub word_count: usize,
    pub text_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<&'a ContentType>,
    pub dimensions: BTreeMap<&'a str, DimensionView<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraphs: Option<Vec<ParagraphView<'a>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_result_clamps() {
        assert_eq!(ScoreResult::new("x", 1.7, "").score, 1.0);
        assert_eq!(ScoreResult::new("x", -0.3, "").score, 0.0);
        assert_eq!(ScoreResult::new("x", f64::NAN, "").score, 0.0);
    }

    #[test]
    fn test_interval_brackets_score() {
        let r = ScoreResult::new("x", 0.6, "").with_interval(0.7, 1.4);
        assert_eq!(r.ci_lower, Some(0.6));
        assert_eq!(r.ci_upper, Some(1.0));

        let r = ScoreResult::new("x", 0.2, "").with_interval(-0.5, 0.3);
        assert_eq!(r.ci_lower, Some(0.0));
        assert_eq!(r.ci_upper, Some(0.3));
    }

    #[test]
    fn test_insufficient_is_neutral() {
        let r = ScoreResult::insufficient("epistemic", 4, "epistemic quality");
        assert_eq!(r.score, NEUTRAL_SCORE);
        assert_eq!(r.explanation, "Too short to assess epistemic quality.");
        assert_eq!(r.detail("word_count"), Some(&Value::from(4)));
    }

    #[test]
    fn test_highlights_sorted() {
        let r = ScoreResult::new("x", 0.5, "").with_highlights(vec![
            MatchHighlight::new("b", "c", 9),
            MatchHighlight::new("a", "c", 2),
        ]);
        assert_eq!(r.highlights[0].position, 2);
        assert_eq!(r.highlights[1].position, 9);
    }

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(Grade::from_score(1.0), Grade::A);
        assert_eq!(Grade::from_score(0.80), Grade::A);
        assert_eq!(Grade::from_score(0.79999), Grade::B);
        assert_eq!(Grade::from_score(0.65), Grade::B);
        assert_eq!(Grade::from_score(0.64999), Grade::C);
        assert_eq!(Grade::from_score(0.50), Grade::C);
        assert_eq!(Grade::from_score(0.35), Grade::D);
        assert_eq!(Grade::from_score(0.34999), Grade::F);
        assert_eq!(Grade::from_score(0.0), Grade::F);
        assert_eq!(Grade::D.label(), "Thin content");
    }

    #[test]
    fn test_empty_report() {
        let report = QualityReport::empty();
        assert_eq!(report.overall_score, 0.0);
        assert_eq!(report.word_count, 0);
        assert_eq!(report.grade(), Grade::F);
        assert_eq!(report.label(), "Low substance");
    }

    #[test]
    fn test_view_shape() {
        let report = QualityReport {
            overall_score: 0.71234,
            scores: vec![ScoreResult::new("substance", 0.71234, "ok")
                .with_detail("filler_count", 2)
                .with_highlights(vec![MatchHighlight::new("because", "specificity", 3)])],
            word_count: 120,
            text_length: 700,
            paragraphs: None,
            content_type: None,
            profile: None,
        };

        let json = serde_json::to_value(report.view(false)).unwrap();
        assert_eq!(json["grade"], "B");
        assert_eq!(json["label"], "Solid content");
        assert_eq!(json["overall_score"], 0.712);
        assert_eq!(json["dimensions"]["substance"]["details"]["filler_count"], 2);
        assert!(json["dimensions"]["substance"].get("highlights").is_none());
        assert!(json.get("paragraphs").is_none());

        let json = serde_json::to_value(report.view(true)).unwrap();
        assert_eq!(
            json["dimensions"]["substance"]["highlights"][0]["text"],
            "because"
        );
    }

    #[test]
    fn test_metadata_roundtrip_keeps_extra_fields() {
        let meta: Metadata =
            serde_json::from_str(r#"{"url":"https://a.org/x","author":"Ann"}"#).unwrap();
        assert_eq!(meta.url(), Some("https://a.org/x"));
        assert_eq!(meta.extra["author"], "Ann");
        assert_eq!(Metadata::with_url("  ").url(), None);
    }
}

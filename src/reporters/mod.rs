//! Output reporters for distill results
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors and score bars
//! - `json` - Pretty-printed JSON in the external report shape
//! - `jsonl` - One compact JSON object per report, for batch pipelines
//! - `csv` - One flat row per report with a column per dimension

mod csv;
mod json;
mod text;

use crate::models::QualityReport;
use crate::pipeline::{BatchResult, ComparisonResult};
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Jsonl,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, jsonl, csv",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Jsonl => write!(f, "jsonl"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Rendering switches shared by every format
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions<'a> {
    /// Include matched-phrase highlights (JSON) or the top few (text)
    pub highlights: bool,
    /// Where the text came from, shown in headers and JSONL `source`
    pub source: Option<&'a str>,
}

/// Render one report
pub fn render_report(
    report: &QualityReport,
    format: OutputFormat,
    options: RenderOptions<'_>,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_report(report, options)),
        OutputFormat::Json => json::render_report(report, options),
        OutputFormat::Jsonl => json::render_line(report, options),
        OutputFormat::Csv => Ok(csv::render_rows([(
            options.source.unwrap_or_default(),
            report,
        )])),
    }
}

/// Render a comparison
pub fn render_comparison(
    result: &ComparisonResult,
    format: OutputFormat,
    highlights: bool,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_comparison(result)),
        OutputFormat::Json => json::render_comparison(result, highlights),
        OutputFormat::Jsonl => json::render_comparison_line(result, highlights),
        OutputFormat::Csv => Ok(csv::render_rows([
            (result.label_a.as_str(), &result.report_a),
            (result.label_b.as_str(), &result.report_b),
        ])),
    }
}

/// Render batch results, in batch order
pub fn render_batch(
    results: &[BatchResult],
    format: OutputFormat,
    highlights: bool,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_batch(results)),
        OutputFormat::Json => json::render_batch(results, highlights),
        OutputFormat::Jsonl => {
            let lines = results
                .iter()
                .map(|r| {
                    let options = RenderOptions {
                        highlights,
                        source: Some(&r.label),
                    };
                    json::render_line(&r.report, options)
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(lines.join("\n"))
        }
        OutputFormat::Csv => Ok(csv::render_rows(
            results.iter().map(|r| (r.label.as_str(), &r.report)),
        )),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{MatchHighlight, ScoreResult};

    /// Create a small two-dimension report for testing
    pub(crate) fn test_report() -> QualityReport {
        QualityReport {
            overall_score: 0.7123,
            scores: vec![
                ScoreResult::new("substance", 0.81234, "Dense and specific.")
                    .with_detail("word_count", 120)
                    .with_highlights(vec![MatchHighlight::new("p99 latency", "specificity", 14)])
                    .with_interval(0.7, 0.9),
                ScoreResult::new("readability", 0.55, "Adequate structure."),
            ],
            word_count: 120,
            text_length: 700,
            ..QualityReport::empty()
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("jsonl").unwrap(), OutputFormat::Jsonl);
        assert_eq!(OutputFormat::from_str("ndjson").unwrap(), OutputFormat::Jsonl);
        assert_eq!(OutputFormat::from_str("CSV").unwrap(), OutputFormat::Csv);
        assert!(OutputFormat::from_str("sarif").is_err());
        assert_eq!(OutputFormat::Jsonl.to_string(), "jsonl");
    }

    #[test]
    fn test_batch_jsonl_one_line_per_item() {
        let results = vec![
            BatchResult {
                label: "a.txt".into(),
                report: test_report(),
            },
            BatchResult {
                label: "b.txt".into(),
                report: QualityReport::empty(),
            },
        ];
        let out = render_batch(&results, OutputFormat::Jsonl, false).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(r#"{"source":"a.txt""#));
        assert!(lines[1].starts_with(r#"{"source":"b.txt""#));
    }

    #[test]
    fn test_batch_csv_keeps_order() {
        let results = vec![
            BatchResult {
                label: "b.txt".into(),
                report: test_report(),
            },
            BatchResult {
                label: "a.txt".into(),
                report: QualityReport::empty(),
            },
        ];
        let out = render_batch(&results, OutputFormat::Csv, false).unwrap();
        let sources: Vec<&str> = out
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap())
            .collect();
        assert_eq!(sources, vec!["b.txt", "a.txt"]);
    }
}

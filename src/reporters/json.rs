//! JSON reporter
//!
//! Outputs reports in the external shape: rounded scores, grade, label and a
//! `dimensions` map keyed by scorer name. Pretty output is for humans and
//! `jq`; the line form is one object per report for JSONL streams.

use super::RenderOptions;
use crate::models::{QualityReport, ReportView};
use crate::pipeline::{BatchResult, ComparisonResult};
use anyhow::Result;
use serde::Serialize;

/// A report tagged with where it came from
#[derive(Serialize)]
struct Sourced<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    #[serde(flatten)]
    report: ReportView<'a>,
}

impl<'a> Sourced<'a> {
    fn new(report: &'a QualityReport, options: RenderOptions<'a>) -> Self {
        Self {
            source: options.source,
            report: report.view(options.highlights),
        }
    }
}

/// Render report as pretty-printed JSON
pub fn render_report(report: &QualityReport, options: RenderOptions<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&Sourced::new(report, options))?)
}

/// Render report as compact JSON (single line)
pub fn render_line(report: &QualityReport, options: RenderOptions<'_>) -> Result<String> {
    Ok(serde_json::to_string(&Sourced::new(report, options))?)
}

pub fn render_comparison(result: &ComparisonResult, highlights: bool) -> Result<String> {
    Ok(serde_json::to_string_pretty(&result.view(highlights))?)
}

pub fn render_comparison_line(result: &ComparisonResult, highlights: bool) -> Result<String> {
    Ok(serde_json::to_string(&result.view(highlights))?)
}

/// Render a batch as a pretty JSON array, in batch order
pub fn render_batch(results: &[BatchResult], highlights: bool) -> Result<String> {
    let items: Vec<Sourced<'_>> = results
        .iter()
        .map(|r| {
            Sourced::new(
                &r.report,
                RenderOptions {
                    highlights,
                    source: Some(&r.label),
                },
            )
        })
        .collect();
    Ok(serde_json::to_string_pretty(&items)?)
}

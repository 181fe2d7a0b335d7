//! CSV reporter
//!
//! One row per report: `source,overall_score,grade,label,word_count` followed
//! by a `{scorer}_score` column for every dimension seen across the rows,
//! sorted by name. A report without a given dimension leaves that cell empty.

use crate::models::QualityReport;
use std::collections::BTreeSet;

const FIXED_COLUMNS: &str = "source,overall_score,grade,label,word_count";

/// Quote a field when it holds a delimiter, quote or line break
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render `(source, report)` rows under a header line
pub fn render_rows<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a QualityReport)>,
{
    let rows: Vec<_> = rows.into_iter().collect();
    let dimensions: BTreeSet<&str> = rows
        .iter()
        .flat_map(|&(_, report)| report.scores.iter().map(|r| r.name.as_str()))
        .collect();

    let mut header = String::from(FIXED_COLUMNS);
    for name in &dimensions {
        header.push_str(&format!(",{}_score", escape(name)));
    }

    let mut lines = vec![header];
    for (source, report) in rows {
        let mut line = format!(
            "{},{:.3},{},{},{}",
            escape(source),
            report.overall_score,
            report.grade(),
            report.label(),
            report.word_count
        );
        for name in &dimensions {
            line.push(',');
            if let Some(result) = report.dimension(name) {
                line.push_str(&format!("{:.3}", result.score));
            }
        }
        lines.push(line);
    }
    lines.join("\n")
}

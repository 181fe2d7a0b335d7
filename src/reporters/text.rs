//! Text (terminal) reporter with colors and score bars

use super::RenderOptions;
use crate::models::{Grade, QualityReport};
use crate::pipeline::{BatchResult, ComparisonResult, Winner};
use crate::text::preview;

/// Grade colors (ANSI escape codes)
fn grade_color(grade: Grade) -> &'static str {
    match grade {
        Grade::A => "\x1b[32m", // Green
        Grade::B => "\x1b[92m", // Light green
        Grade::C => "\x1b[33m", // Yellow
        Grade::D => "\x1b[91m", // Light red
        Grade::F => "\x1b[31m", // Red
    }
}

/// Bar color by score band
fn score_color(score: f64) -> &'static str {
    if score >= 0.7 {
        "\x1b[32m"
    } else if score >= 0.5 {
        "\x1b[33m"
    } else {
        "\x1b[31m"
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const BAR_WIDTH: usize = 20;
const SOURCE_CHARS: usize = 60;
const EXPLANATION_CHARS: usize = 80;
const TOP_HIGHLIGHTS: usize = 3;

/// `#########........... 0.45`, colored by band
fn score_bar(score: f64) -> String {
    let filled = ((score.clamp(0.0, 1.0) * BAR_WIDTH as f64) as usize).min(BAR_WIDTH);
    format!(
        "{}{}{}{RESET} {:.2}",
        score_color(score),
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        score
    )
}

/// Render report as formatted terminal output
pub fn render_report(report: &QualityReport, options: RenderOptions<'_>) -> String {
    let mut out = String::new();

    let title = match options.source {
        Some(source) => format!("Quality Report - {}", preview(source, SOURCE_CHARS)),
        None => "Quality Report".to_string(),
    };
    out.push_str(&format!("\n{BOLD}{title}{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));

    let grade = report.grade();
    out.push_str(&format!(
        "Grade:   {}{BOLD}{}{RESET} ({})\n",
        grade_color(grade),
        grade,
        report.label()
    ));
    out.push_str(&format!("Overall: {}\n", score_bar(report.overall_score)));
    out.push_str(&format!("Words:   {}\n", report.word_count));
    if let Some(profile) = &report.profile {
        out.push_str(&format!("Profile: {profile}\n"));
    }
    if let Some(content_type) = &report.content_type {
        out.push_str(&format!(
            "Type:    {} {DIM}(confidence {:.2}){RESET}\n",
            content_type.name, content_type.confidence
        ));
    }

    if report.scores.is_empty() {
        out.push_str(&format!("\n{DIM}No content to score.{RESET}\n"));
        return out;
    }

    out.push_str(&format!("\n{BOLD}DIMENSIONS{RESET}\n"));
    for result in &report.scores {
        out.push_str(&format!(
            "  {:<12} {}  {DIM}{}{RESET}\n",
            result.name,
            score_bar(result.score),
            preview(&result.explanation, EXPLANATION_CHARS)
        ));
        if options.highlights {
            for h in result.highlights.iter().take(TOP_HIGHLIGHTS) {
                out.push_str(&format!(
                    "  {:<12} {DIM}[{}] \"{}\" @{}{RESET}\n",
                    "", h.category, h.text, h.position
                ));
            }
        }
    }

    if let Some(paragraphs) = &report.paragraphs {
        out.push_str(&format!(
            "\n{BOLD}PARAGRAPHS{RESET} ({} scored)\n",
            paragraphs.len()
        ));
        for p in paragraphs {
            out.push_str(&format!(
                "  {:>3}  {}  {DIM}{}{RESET}\n",
                p.index + 1,
                score_bar(p.overall_score),
                p.preview
            ));
        }
    }

    out
}

/// Side-by-side comparison with per-dimension winners
pub fn render_comparison(result: &ComparisonResult) -> String {
    let mut out = String::new();
    let a = preview(&result.label_a, 30);
    let b = preview(&result.label_b, 30);

    out.push_str(&format!("\n{BOLD}Comparison{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "  A: {a}  {}\n",
        score_bar(result.report_a.overall_score)
    ));
    out.push_str(&format!(
        "  B: {b}  {}\n\n",
        score_bar(result.report_b.overall_score)
    ));

    if !result.dimension_deltas.is_empty() {
        out.push_str(&format!(
            "{DIM}  DIMENSION        A      B      DELTA   WINNER{RESET}\n"
        ));
        for d in &result.dimension_deltas {
            out.push_str(&format!(
                "  {:<14} {:>5.2}  {:>5.2}  {:>+6.2}   {}\n",
                d.name, d.score_a, d.score_b, d.delta, d.winner
            ));
        }
        out.push('\n');
    }

    match result.winner {
        Winner::Tie => out.push_str(&format!(
            "{BOLD}TIE{RESET} (delta {:+.3})\n",
            result.overall_delta
        )),
        winner => {
            let label = if winner == Winner::A { &a } else { &b };
            out.push_str(&format!(
                "{BOLD}WINNER: {winner}{RESET} ({label}) by {:.3}\n",
                result.overall_delta.abs()
            ));
        }
    }

    out
}

/// One line per item, in batch order, followed by a grade summary
pub fn render_batch(results: &[BatchResult]) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{BOLD}Batch Results{RESET} ({} items)\n", results.len()));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));

    let mut counts = [0usize; 5];
    for r in results {
        let grade = r.report.grade();
        counts[grade as usize] += 1;
        out.push_str(&format!(
            "  {}{BOLD}{}{RESET}  {}  {}\n",
            grade_color(grade),
            grade,
            score_bar(r.report.overall_score),
            preview(&r.label, SOURCE_CHARS)
        ));
    }

    if !results.is_empty() {
        let mean =
            results.iter().map(|r| r.report.overall_score).sum::<f64>() / results.len() as f64;
        out.push_str(&format!("\nMean:    {}\n", score_bar(mean)));
        let summary: Vec<String> = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F]
            .iter()
            .zip(counts)
            .filter(|(_, n)| *n > 0)
            .map(|(g, n)| format!("{}{n} {g}{RESET}", grade_color(*g)))
            .collect();
        out.push_str(&format!("Grades:  {}\n", summary.join(" | ")));
    }

    out
}

//! Score command - grade one document

use super::{build_pipeline, metadata, output_format, read_source, source_label};
use super::{OutputArgs, PipelineArgs};
use anyhow::Result;
use distill::config::ProjectConfig;
use distill::reporters::{render_report, RenderOptions};
use tracing::info;

/// Run the score command
pub fn run(
    config: &ProjectConfig,
    source: &str,
    args: &PipelineArgs,
    output: &OutputArgs,
) -> Result<()> {
    let format = output_format(output)?;
    let pipeline = build_pipeline(config, args, None)?;
    let text = read_source(source)?;
    let metadata = metadata(args);

    let report = pipeline.score(&text, metadata.as_ref());
    info!(
        "Scored {} ({} words): {:.3}",
        source_label(source),
        report.word_count,
        report.overall_score
    );

    let options = RenderOptions {
        highlights: output.highlights,
        source: Some(source_label(source)),
    };
    println!("{}", render_report(&report, format, options)?);
    Ok(())
}

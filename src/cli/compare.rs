//! Compare command - which of two documents scores higher

use super::{build_pipeline, metadata, output_format, read_source, source_label};
use super::{OutputArgs, PipelineArgs};
use anyhow::{bail, Result};
use distill::config::ProjectConfig;
use distill::pipeline::Candidate;
use distill::reporters::render_comparison;

/// Run the compare command
pub fn run(
    config: &ProjectConfig,
    a: &str,
    b: &str,
    args: &PipelineArgs,
    output: &OutputArgs,
) -> Result<()> {
    if a == "-" && b == "-" {
        bail!("Only one side of a comparison can be read from stdin");
    }

    let format = output_format(output)?;
    let pipeline = build_pipeline(config, args, None)?;
    let text_a = read_source(a)?;
    let text_b = read_source(b)?;
    let metadata = metadata(args);

    let mut candidate_a = Candidate::new(source_label(a), &text_a);
    let mut candidate_b = Candidate::new(source_label(b), &text_b);
    if let Some(metadata) = &metadata {
        candidate_a = candidate_a.with_metadata(metadata);
        candidate_b = candidate_b.with_metadata(metadata);
    }

    let result = pipeline.compare(candidate_a, candidate_b);
    println!("{}", render_comparison(&result, format, output.highlights)?);
    Ok(())
}

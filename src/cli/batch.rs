//! Batch command - score many documents on the worker pool

use super::{build_pipeline, metadata, output_format, read_source, source_label};
use super::{OutputArgs, PipelineArgs};
use anyhow::{bail, Result};
use distill::config::ProjectConfig;
use distill::pipeline::BatchMetadata;
use distill::reporters::render_batch;

/// Run the batch command
pub fn run(
    config: &ProjectConfig,
    sources: &[String],
    args: &PipelineArgs,
    output: &OutputArgs,
    workers: Option<usize>,
) -> Result<()> {
    if sources.iter().filter(|s| s.as_str() == "-").count() > 1 {
        bail!("stdin (-) can appear at most once in a batch");
    }

    let format = output_format(output)?;
    let pipeline = build_pipeline(config, args, workers)?;

    let items = sources
        .iter()
        .map(|source| Ok((source_label(source).to_string(), read_source(source)?)))
        .collect::<Result<Vec<_>>>()?;

    let metadata = metadata(args);
    let batch_metadata = match &metadata {
        Some(metadata) => BatchMetadata::Shared(metadata),
        None => BatchMetadata::None,
    };

    let results = pipeline.score_batch(&items, batch_metadata)?;
    println!("{}", render_batch(&results, format, output.highlights)?);
    Ok(())
}

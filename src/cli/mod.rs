//! CLI command definitions and handlers

mod batch;
mod compare;
mod list;
mod score;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use distill::config::{load_config_file, load_project_config, ProjectConfig};
use distill::models::Metadata;
use distill::pipeline::{Pipeline, PipelineOptions, MAX_WORKERS};
use distill::profiles::ProfileRegistry;
use distill::reporters::OutputFormat;
use distill::scorers::ScorerRegistry;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Parse and validate workers count (1-8)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > MAX_WORKERS {
        Err(format!("workers cannot exceed {MAX_WORKERS}"))
    } else {
        Ok(n)
    }
}

/// Parse a `name=value` weight override
fn parse_weight(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("'{}' is not in name=value form", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("weight name cannot be empty".to_string());
    }
    let weight: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", value.trim()))?;
    if !weight.is_finite() || weight < 0.0 {
        return Err(format!("weight for '{}' must be finite and non-negative", name));
    }
    Ok((name.to_string(), weight))
}

/// Distill - explainable content quality scoring
#[derive(Parser, Debug)]
#[command(name = "distill")]
#[command(
    version,
    about = "Score text quality on independent, explainable dimensions",
    after_help = "\
Examples:
  distill score post.md                        Score a file
  cat post.md | distill score -                Score stdin
  distill score post.md --auto-profile         Detect content type, apply its profile
  distill score post.md --format json --highlights
  distill compare draft.md final.md            Which version is better?
  distill batch docs/*.md --format jsonl       One JSON line per file
  distill batch docs/*.md --format csv         One spreadsheet row per file
  distill list                                 Available scorers
  distill profiles                             Available weight profiles"
)]
pub struct Cli {
    /// Config file (default: distill.toml or .distillrc.json in the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Pipeline flags shared by the scoring commands; each overrides the config file
#[derive(Args, Debug, Default)]
pub struct PipelineArgs {
    /// Only run these scorers (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub scorers: Option<Vec<String>>,

    /// Apply a named weight profile
    #[arg(long, conflicts_with = "auto_profile")]
    pub profile: Option<String>,

    /// Detect the content type and apply its profile
    #[arg(long)]
    pub auto_profile: bool,

    /// Explicit weight override, e.g. --weight substance=2.0 (repeatable)
    #[arg(long = "weight", value_parser = parse_weight)]
    pub weights: Vec<(String, f64)>,

    /// Also score each paragraph of 30+ words
    #[arg(long)]
    pub paragraphs: bool,

    /// Source URL, used by authority scoring and content-type detection
    #[arg(long)]
    pub url: Option<String>,
}

/// Output flags shared by the scoring commands
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Output format: text, json, jsonl, csv
    #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json", "jsonl", "csv"])]
    pub format: String,

    /// Include matched phrases in the output
    #[arg(long)]
    pub highlights: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score one document
    #[command(after_help = "\
Examples:
  distill score post.md
  distill score post.md --profile technical
  distill score post.md --scorers substance,epistemic --weight substance=2
  distill score post.md --url https://example.com/blog/post --paragraphs")]
    Score {
        /// File to score, or - for stdin
        source: String,

        #[command(flatten)]
        pipeline: PipelineArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Compare two documents under the same configuration
    Compare {
        /// First document (A), or - for stdin
        a: String,

        /// Second document (B)
        b: String,

        #[command(flatten)]
        pipeline: PipelineArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Score many documents in parallel, results in input order
    Batch {
        /// Files to score
        #[arg(required = true)]
        sources: Vec<String>,

        #[command(flatten)]
        pipeline: PipelineArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Number of parallel workers (1-8)
        #[arg(long, value_parser = parse_workers)]
        workers: Option<usize>,
    },

    /// List available scorers
    List {
        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// List available weight profiles
    Profiles {
        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

/// Run CLI command
pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Score {
            source,
            pipeline,
            output,
        } => score::run(&config, &source, &pipeline, &output),

        Commands::Compare {
            a,
            b,
            pipeline,
            output,
        } => compare::run(&config, &a, &b, &pipeline, &output),

        Commands::Batch {
            sources,
            pipeline,
            output,
            workers,
        } => batch::run(&config, &sources, &pipeline, &output, workers),

        Commands::List { format } => list::scorers(&format),

        Commands::Profiles { format } => list::profiles(&config, &format),
    }
}

/// Explicit `--config` must load; otherwise discover in the working directory
fn load_config(explicit: Option<&Path>) -> Result<ProjectConfig> {
    match explicit {
        Some(path) => load_config_file(path),
        None => {
            let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
            Ok(load_project_config(&cwd))
        }
    }
}

/// Built-in profiles plus those declared in the config file
fn profile_registry(config: &ProjectConfig) -> Result<ProfileRegistry> {
    let mut profiles = ProfileRegistry::with_builtin();
    config
        .register_profiles(&mut profiles)
        .context("Invalid profile in config file")?;
    Ok(profiles)
}

/// Layer CLI flags over the config file
fn pipeline_options(
    config: &ProjectConfig,
    args: &PipelineArgs,
    workers: Option<usize>,
) -> PipelineOptions {
    let mut options = config.pipeline_options();
    if let Some(scorers) = &args.scorers {
        options.scorers = Some(scorers.clone());
    }
    options.weights.extend(args.weights.iter().cloned());
    if let Some(profile) = &args.profile {
        options.profile = Some(profile.clone());
        options.auto_profile = false;
    }
    if args.auto_profile {
        options.auto_profile = true;
        options.profile = None;
    }
    options.paragraphs |= args.paragraphs;
    if let Some(workers) = workers {
        options.workers = workers;
    }
    options
}

/// Build the pipeline for a scoring command
fn build_pipeline(
    config: &ProjectConfig,
    args: &PipelineArgs,
    workers: Option<usize>,
) -> Result<Pipeline> {
    let scorers = ScorerRegistry::with_builtin();
    let profiles = profile_registry(config)?;
    let options = pipeline_options(config, args, workers);
    debug!("Pipeline options: {:?}", options);
    Ok(Pipeline::new(&scorers, &profiles, options)?)
}

fn metadata(args: &PipelineArgs) -> Option<Metadata> {
    args.url.as_deref().map(Metadata::with_url)
}

fn output_format(output: &OutputArgs) -> Result<OutputFormat> {
    output.format.parse()
}

/// Read a file, or stdin for `-`
fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(source).with_context(|| format!("Failed to read {}", source))
}

/// Display label for a source
fn source_label(source: &str) -> &str {
    if source == "-" {
        "<stdin>"
    } else {
        source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight("substance=2").unwrap(), ("substance".to_string(), 2.0));
        assert_eq!(parse_weight(" argument = 0.5 ").unwrap(), ("argument".to_string(), 0.5));
        assert!(parse_weight("substance").is_err());
        assert!(parse_weight("=1").is_err());
        assert!(parse_weight("substance=high").is_err());
        assert!(parse_weight("substance=-1").is_err());
    }

    #[test]
    fn test_parse_workers() {
        assert_eq!(parse_workers("4").unwrap(), 4);
        assert!(parse_workers("0").is_err());
        assert!(parse_workers("9").is_err());
        assert!(parse_workers("many").is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let config: ProjectConfig = toml::from_str(
            "[pipeline]\nprofile = \"news\"\nworkers = 2\n[weights]\nsubstance = 3.0\n",
        )
        .unwrap();

        let args = PipelineArgs {
            auto_profile: true,
            weights: vec![("substance".into(), 1.0), ("argument".into(), 0.2)],
            ..Default::default()
        };
        let options = pipeline_options(&config, &args, Some(6));
        assert!(options.auto_profile);
        assert_eq!(options.profile, None);
        assert_eq!(options.weights.get("substance"), Some(&1.0));
        assert_eq!(options.weights.get("argument"), Some(&0.2));
        assert_eq!(options.workers, 6);

        let options = pipeline_options(&config, &PipelineArgs::default(), None);
        assert_eq!(options.profile.as_deref(), Some("news"));
        assert_eq!(options.workers, 2);
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_profile_conflicts_with_auto_profile() {
        let parsed = Cli::try_parse_from([
            "distill",
            "score",
            "a.txt",
            "--profile",
            "news",
            "--auto-profile",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_scorers_are_comma_separated() {
        let cli = Cli::try_parse_from(["distill", "score", "-", "--scorers", "substance,epistemic"])
            .unwrap();
        match cli.command {
            Commands::Score { pipeline, .. } => assert_eq!(
                pipeline.scorers,
                Some(vec!["substance".to_string(), "epistemic".to_string()])
            ),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

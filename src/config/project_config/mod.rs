//! Project-level configuration support
//!
//! Loads configuration from `distill.toml` or `.distillrc.json` in the
//! working directory, or from an explicit `--config` path.
//!
//! # Configuration Format
//!
//! ```toml
//! # distill.toml
//!
//! [pipeline]
//! scorers = ["substance", "epistemic"]
//! profile = "technical"
//! auto_profile = false
//! paragraphs = false
//! workers = 8
//!
//! [weights]
//! substance = 2.0
//!
//! [profiles.legal]
//! description = "Contracts and policy text"
//! weights = { argument = 2.0, epistemic = 1.5 }
//! ```

use crate::error::DistillResult;
use crate::pipeline::{PipelineOptions, MAX_WORKERS};
use crate::profiles::{Profile, ProfileRegistry};
use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Discovered in this order; the first readable file wins
pub const CONFIG_FILE_NAMES: &[&str] = &["distill.toml", ".distillrc.json"];

/// Project configuration loaded from disk
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectConfig {
    /// Pipeline defaults
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Explicit weight overrides
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,

    /// Extra profiles registered at startup
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileConfig>,

    /// File this configuration was read from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// `[pipeline]` section
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub scorers: Option<Vec<String>>,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub auto_profile: bool,
    #[serde(default)]
    pub paragraphs: bool,
    #[serde(default)]
    pub workers: Option<usize>,
}

/// `[profiles.<name>]` section
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
}

impl ProjectConfig {
    /// Pipeline options from this file; CLI flags are layered on top by the caller
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            scorers: self.pipeline.scorers.clone(),
            weights: self.weights.clone(),
            profile: self.pipeline.profile.clone(),
            auto_profile: self.pipeline.auto_profile,
            paragraphs: self.pipeline.paragraphs,
            workers: self
                .pipeline
                .workers
                .unwrap_or(MAX_WORKERS)
                .clamp(1, MAX_WORKERS),
        }
    }

    /// Register the configured profiles, rejecting clashes and bad weights
    pub fn register_profiles(&self, registry: &mut ProfileRegistry) -> DistillResult<()> {
        for (name, config) in &self.profiles {
            registry.register(Profile {
                name: name.clone(),
                description: config.description.clone(),
                weights: config.weights.clone(),
            })?;
        }
        Ok(())
    }
}

/// Load project configuration from `dir`, or defaults when none is found.
///
/// A discovered file that fails to parse is logged and skipped.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    for name in CONFIG_FILE_NAMES {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load one configuration file; `.json` is parsed as JSON, anything else as TOML
pub fn load_config_file(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let mut config: ProjectConfig = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?
    } else {
        toml::from_str(&content).with_context(|| format!("Invalid TOML in {}", path.display()))?
    };
    config.source = Some(path.to_path_buf());
    Ok(config)
}

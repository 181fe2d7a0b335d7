//! Configuration module for distill
//!
//! This module handles:
//! - Project-level configuration (distill.toml / .distillrc.json)
//! - Extra weight profiles
//! - Pipeline defaults for the CLI

mod project_config;

pub use project_config::{
    load_config_file, load_project_config, PipelineConfig, ProfileConfig, ProjectConfig,
};

//! Base scorer trait
//!
//! This module defines the core abstraction for quality dimensions:
//! - `Scorer` trait that every dimension implements
//! - `ScorerFactory` used by the registry to construct instances

use crate::models::{Metadata, ScoreResult};
use std::sync::Arc;

/// Trait for all quality dimensions
///
/// A scorer maps `(text, metadata)` to a normalized [`ScoreResult`]. It must
/// be deterministic for a given input and safe to call concurrently from
/// several batch workers.
///
/// Each scorer owns a minimum-length policy: below its threshold it returns
/// [`ScoreResult::insufficient`] (score 0.5) rather than guessing.
///
/// # Example Implementation
///
/// ```ignore
/// pub struct ShoutingScorer;
///
/// impl Scorer for ShoutingScorer {
///     fn name(&self) -> &'static str {
///         "shouting"
///     }
///
///     fn description(&self) -> &'static str {
///         "Penalizes ALL-CAPS text"
///     }
///
///     fn score(&self, text: &str, _metadata: Option<&Metadata>) -> ScoreResult {
///         let caps = text.chars().filter(|c| c.is_uppercase()).count();
///         let letters = text.chars().filter(|c| c.is_alphabetic()).count().max(1);
///         ScoreResult::new(self.name(), 1.0 - caps as f64 / letters as f64, "")
///     }
/// }
/// ```
pub trait Scorer: Send + Sync {
    /// Unique identifier, used as the dimension name in reports
    fn name(&self) -> &'static str;

    /// Human-readable description of what this dimension measures
    fn description(&self) -> &'static str;

    /// Weight used when neither a profile nor an explicit override applies
    fn default_weight(&self) -> f64 {
        1.0
    }

    /// Score `text` on this dimension
    fn score(&self, text: &str, metadata: Option<&Metadata>) -> ScoreResult;
}

/// Constructs a fresh scorer instance
pub type ScorerFactory = Arc<dyn Fn() -> Arc<dyn Scorer> + Send + Sync>;

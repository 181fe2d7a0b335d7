//! Distill - explainable content quality scoring
//!
//! Scores a piece of text on independent heuristic dimensions (substance,
//! epistemic honesty, readability, argument structure, complexity,
//! originality, source authority) and folds them into one weighted report
//! with a letter grade, per-dimension explanations and matched-phrase
//! highlights.
//!
//! ```ignore
//! use distill::{Pipeline, PipelineOptions, ProfileRegistry, ScorerRegistry};
//!
//! let scorers = ScorerRegistry::with_builtin();
//! let profiles = ProfileRegistry::with_builtin();
//! let pipeline = Pipeline::new(&scorers, &profiles, PipelineOptions::new().auto_profile(true))?;
//!
//! let report = pipeline.score(text, None);
//! println!("{} ({:.2})", report.grade(), report.overall_score);
//! ```

pub mod cache;
pub mod confidence;
pub mod config;
pub mod content_type;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod profiles;
pub mod reporters;
pub mod scorers;
pub mod text;

pub use error::{DistillError, DistillResult};
pub use models::{Grade, MatchHighlight, Metadata, ParagraphScore, QualityReport, ScoreResult};
pub use pipeline::{
    BatchMetadata, BatchResult, Candidate, ComparisonResult, Pipeline, PipelineOptions, Winner,
};
pub use profiles::{Profile, ProfileRegistry};
pub use scorers::{Scorer, ScorerRegistry};

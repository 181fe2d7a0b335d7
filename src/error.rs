//! Error types for the scoring engine
//!
//! Only configuration problems are errors. Degenerate input, short text and
//! missing optional enrichment are reflected in report content instead.

use thiserror::Error;

/// Errors surfaced by registries and pipeline construction
#[derive(Error, Debug)]
pub enum DistillError {
    #[error("Unknown scorer: '{name}'. Available: {}", .available.join(", "))]
    UnknownScorer { name: String, available: Vec<String> },

    #[error("Unknown profile: '{name}'. Available: {}", .available.join(", "))]
    UnknownProfile { name: String, available: Vec<String> },

    #[error("Scorer '{0}' is already registered")]
    DuplicateScorer(String),

    #[error("Profile '{0}' is already registered")]
    DuplicateProfile(String),

    #[error("Invalid weight for '{name}': {weight} (weights must be finite and non-negative)")]
    InvalidWeight { name: String, weight: f64 },

    #[error("Batch has {items} items but {metadata} metadata entries")]
    BatchMetadataMismatch { items: usize, metadata: usize },

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

pub type DistillResult<T> = Result<T, DistillError>;

/// Reject negative, NaN and infinite weights
pub(crate) fn validate_weight(name: &str, weight: f64) -> DistillResult<f64> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(weight)
    } else {
        Err(DistillError::InvalidWeight {
            name: name.to_string(),
            weight,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_scorer_lists_available() {
        let err = DistillError::UnknownScorer {
            name: "nope".into(),
            available: vec!["argument".into(), "substance".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'nope'"));
        assert!(msg.ends_with("argument, substance"));
    }

    #[test]
    fn test_validate_weight() {
        assert_eq!(validate_weight("a", 0.0).unwrap(), 0.0);
        assert_eq!(validate_weight("a", 2.5).unwrap(), 2.5);
        assert!(validate_weight("a", -0.1).is_err());
        assert!(validate_weight("a", f64::NAN).is_err());
        assert!(validate_weight("a", f64::INFINITY).is_err());
    }
}

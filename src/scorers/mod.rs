//! Quality dimensions
//!
//! Every dimension implements the [`Scorer`] trait and is looked up by name
//! through a [`ScorerRegistry`] owned by the caller.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     ScorerRegistry                          │
//! │  - Maps names to factories                                  │
//! │  - Rejects duplicate names                                  │
//! │  - Lists (name, description) in lexicographic order         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Scorer Trait                          │
//! │  - name(): Unique identifier                                │
//! │  - description(): Human-readable description                │
//! │  - default_weight(): Weight when nothing overrides it       │
//! │  - score(text, metadata): Normalized ScoreResult            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!              ┌───────────────┼───────────────┐
//!              ▼               ▼               ▼
//! ┌──────────────────┐ ┌──────────────┐ ┌──────────────────┐
//! │ Content          │ │ Structure    │ │ Context          │
//! │ (substance,      │ │ (readability,│ │ (authority,      │
//! │  epistemic,      │ │  complexity) │ │  originality)    │
//! │  argument)       │ │              │ │                  │
//! └──────────────────┘ └──────────────┘ └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use distill::scorers::{ScorerRegistry, OriginalityScorer};
//! use std::sync::Arc;
//!
//! let mut registry = ScorerRegistry::with_builtin();
//! registry.replace(Arc::new(|| Arc::new(OriginalityScorer::with_embeddings(load_model))));
//!
//! let scorer = registry.create("substance")?;
//! let result = scorer.score(text, None);
//! ```

mod argument;
mod authority;
mod base;
mod complexity;
mod epistemic;
mod originality;
mod patterns;
mod readability;
mod substance;

pub use argument::ArgumentScorer;
pub use authority::{domain_reputation, AuthorityScorer, DomainMatch};
pub use base::{Scorer, ScorerFactory};
pub use complexity::{complexity_level, reading_time_minutes, ComplexityScorer};
pub use epistemic::EpistemicScorer;
pub use originality::{Embedder, EmbeddingProvider, OriginalityScorer};
pub use readability::ReadabilityScorer;
pub use substance::SubstanceScorer;

use crate::error::{DistillError, DistillResult};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Factories for every built-in dimension
pub fn builtin_scorers() -> Vec<ScorerFactory> {
    vec![
        // Content
        Arc::new(|| Arc::new(SubstanceScorer::new()) as Arc<dyn Scorer>),
        Arc::new(|| Arc::new(EpistemicScorer::new()) as Arc<dyn Scorer>),
        Arc::new(|| Arc::new(ArgumentScorer::new()) as Arc<dyn Scorer>),
        // Structure
        Arc::new(|| Arc::new(ReadabilityScorer::new()) as Arc<dyn Scorer>),
        Arc::new(|| Arc::new(ComplexityScorer::new()) as Arc<dyn Scorer>),
        // Context
        Arc::new(|| Arc::new(OriginalityScorer::new()) as Arc<dyn Scorer>),
        Arc::new(|| Arc::new(AuthorityScorer::new()) as Arc<dyn Scorer>),
    ]
}

struct Entry {
    description: &'static str,
    factory: ScorerFactory,
}

/// Name to factory lookup for scorers
///
/// Constructed explicitly and handed to the pipeline; there is no
/// process-wide registry.
#[derive(Default)]
pub struct ScorerRegistry {
    entries: BTreeMap<String, Entry>,
}

impl fmt::Debug for ScorerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScorerRegistry")
            .field("scorers", &self.names())
            .finish()
    }
}

impl ScorerRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the seven built-in dimensions
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for factory in builtin_scorers() {
            let scorer = factory();
            registry.insert(scorer.name(), scorer.description(), factory);
        }
        registry
    }

    fn insert(&mut self, name: &'static str, description: &'static str, factory: ScorerFactory) {
        self.entries
            .insert(name.to_string(), Entry { description, factory });
    }

    /// Register a new scorer. The factory is invoked once to read its name.
    pub fn register(&mut self, factory: ScorerFactory) -> DistillResult<()> {
        let instance = factory();
        let name = instance.name();
        if self.entries.contains_key(name) {
            return Err(DistillError::DuplicateScorer(name.to_string()));
        }
        debug!("Registered scorer '{}'", name);
        self.insert(name, instance.description(), factory);
        Ok(())
    }

    /// Register or overwrite a scorer, returning whether one was replaced
    pub fn replace(&mut self, factory: ScorerFactory) -> bool {
        let instance = factory();
        let name = instance.name();
        let replaced = self.entries.contains_key(name);
        if replaced {
            info!("Replacing scorer '{}'", name);
        }
        self.insert(name, instance.description(), factory);
        replaced
    }

    /// Fresh instance of the named scorer
    pub fn create(&self, name: &str) -> DistillResult<Arc<dyn Scorer>> {
        self.entries
            .get(name)
            .map(|entry| (entry.factory)())
            .ok_or_else(|| DistillError::UnknownScorer {
                name: name.to_string(),
                available: self.names().into_iter().map(String::from).collect(),
            })
    }

    /// Fresh instances of every registered scorer, in name order
    pub fn create_all(&self) -> Vec<Arc<dyn Scorer>> {
        self.entries.values().map(|entry| (entry.factory)()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in lexicographic order
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// `(name, description)` pairs in lexicographic order
    pub fn list(&self) -> Vec<(&str, &'static str)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.description))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Metadata, ScoreResult};

    struct FixedScorer;

    impl Scorer for FixedScorer {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn description(&self) -> &'static str {
            "Always 0.9"
        }

        fn score(&self, _text: &str, _metadata: Option<&Metadata>) -> ScoreResult {
            ScoreResult::new(self.name(), 0.9, "fixed")
        }
    }

    fn fixed_factory() -> ScorerFactory {
        Arc::new(|| Arc::new(FixedScorer) as Arc<dyn Scorer>)
    }

    #[test]
    fn test_builtin_registry() {
        let registry = ScorerRegistry::with_builtin();
        assert_eq!(
            registry.names(),
            vec![
                "argument",
                "authority",
                "complexity",
                "epistemic",
                "originality",
                "readability",
                "substance"
            ]
        );
        assert_eq!(registry.create_all().len(), 7);
        assert_eq!(registry.create("substance").unwrap().default_weight(), 1.5);
    }

    #[test]
    fn test_unknown_scorer_lists_names() {
        let registry = ScorerRegistry::with_builtin();
        let err = registry.create("vibes").err().unwrap();
        match err {
            DistillError::UnknownScorer { name, available } => {
                assert_eq!(name, "vibes");
                assert_eq!(available.len(), 7);
                assert_eq!(available[0], "argument");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = ScorerRegistry::new();
        assert!(registry.is_empty());
        registry.register(fixed_factory()).unwrap();
        assert!(matches!(
            registry.register(fixed_factory()),
            Err(DistillError::DuplicateScorer(name)) if name == "fixed"
        ));
        assert_eq!(registry.list(), vec![("fixed", "Always 0.9")]);
    }

    #[test]
    fn test_replace_overwrites() {
        let mut registry = ScorerRegistry::new();
        assert!(!registry.replace(fixed_factory()));
        assert!(registry.replace(fixed_factory()));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.create("fixed").unwrap().score("x", None).score, 0.9);
    }

    #[test]
    fn test_default_weight_is_one() {
        assert_eq!(FixedScorer.default_weight(), 1.0);
    }
}

//! Scoring pipeline
//!
//! The pipeline runs a configured set of scorers over a text and folds their
//! results into one weighted [`QualityReport`]:
//! - Resolves weights: explicit overrides > profile > scorer defaults
//! - Optionally detects the content type per call and applies its profile
//! - Optionally scores each paragraph independently
//! - Scores batches on a bounded rayon pool, preserving input order
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                       Pipeline                          │
//! ├─────────────────────────────────────────────────────────┤
//! │  1. Empty text -> zero report                           │
//! │  2. Detect content type (auto profile only)             │
//! │  3. Resolve weights for this call                       │
//! │  4. Run every scorer, weighted mean                     │
//! │  5. Paragraph decomposition (optional)                  │
//! └─────────────────────────────────────────────────────────┘
//! ```

mod compare;

pub use compare::{
    compare, Candidate, ComparisonResult, ComparisonView, DimensionDelta, Winner, TIE_THRESHOLD,
};

use crate::content_type::{detect_content_type, ContentType};
use crate::error::{validate_weight, DistillError, DistillResult};
use crate::models::{Metadata, ParagraphScore, QualityReport, ScoreResult};
use crate::profiles::{Profile, ProfileRegistry};
use crate::scorers::{Scorer, ScorerRegistry};
use crate::text::{char_count, preview, split_paragraphs, word_count};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Upper bound on batch worker threads
pub const MAX_WORKERS: usize = 8;

/// Paragraphs shorter than this are skipped in decomposition
pub const MIN_PARAGRAPH_WORDS: usize = 30;

const PREVIEW_CHARS: usize = 80;

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    /// Scorers to run, in order. `None` runs every registered scorer.
    pub scorers: Option<Vec<String>>,
    /// Explicit weight overrides; these always win
    pub weights: BTreeMap<String, f64>,
    /// Named profile; disables auto-detection when set
    pub profile: Option<String>,
    /// Pick a profile from the detected content type on every call
    pub auto_profile: bool,
    /// Also score each paragraph of at least [`MIN_PARAGRAPH_WORDS`] words
    pub paragraphs: bool,
    /// Batch worker threads, capped at [`MAX_WORKERS`]
    pub workers: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            scorers: None,
            weights: BTreeMap::new(),
            profile: None,
            auto_profile: false,
            paragraphs: false,
            workers: MAX_WORKERS,
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scorers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scorers = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn weight(mut self, scorer: impl Into<String>, weight: f64) -> Self {
        self.weights.insert(scorer.into(), weight);
        self
    }

    pub fn profile(mut self, name: impl Into<String>) -> Self {
        self.profile = Some(name.into());
        self
    }

    pub fn auto_profile(mut self, enabled: bool) -> Self {
        self.auto_profile = enabled;
        self
    }

    pub fn paragraphs(mut self, enabled: bool) -> Self {
        self.paragraphs = enabled;
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}

/// Metadata supplied to a batch
#[derive(Debug, Clone, Copy, Default)]
pub enum BatchMetadata<'a> {
    #[default]
    None,
    /// The same metadata for every item
    Shared(&'a Metadata),
    /// One entry per item, in item order
    PerItem(&'a [Option<Metadata>]),
}

impl<'a> BatchMetadata<'a> {
    fn get(self, index: usize) -> Option<&'a Metadata> {
        match self {
            BatchMetadata::None => None,
            BatchMetadata::Shared(metadata) => Some(metadata),
            BatchMetadata::PerItem(items) => items.get(index).and_then(Option::as_ref),
        }
    }
}

/// One scored batch item
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult {
    pub label: String,
    pub report: QualityReport,
}

/// Weights in effect for one call
struct Resolved<'p> {
    weights: &'p BTreeMap<String, f64>,
    profile: Option<String>,
    content_type: Option<ContentType>,
}

/// Configured scoring pipeline
///
/// Holds its scorer instances and a snapshot of the profiles it may need, so
/// it is independent of the registries it was built from. Safe to share
/// across threads.
pub struct Pipeline {
    scorers: Vec<Arc<dyn Scorer>>,
    /// Explicit overrides, validated
    explicit: BTreeMap<String, f64>,
    /// Defaults < profile < explicit, fixed at construction
    weights: BTreeMap<String, f64>,
    profile: Option<Arc<Profile>>,
    /// Profile weight maps for auto-detection, pre-resolved per profile
    auto_weights: Option<BTreeMap<String, BTreeMap<String, f64>>>,
    paragraphs: bool,
    workers: usize,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("scorers", &self.scorer_names())
            .field("weights", &self.weights)
            .field("profile", &self.profile.as_ref().map(|p| p.name.as_str()))
            .field("auto_profile", &self.auto_weights.is_some())
            .field("paragraphs", &self.paragraphs)
            .field("workers", &self.workers)
            .finish()
    }
}

impl Pipeline {
    /// Build a pipeline, failing fast on unknown names or invalid weights
    pub fn new(
        scorers: &ScorerRegistry,
        profiles: &ProfileRegistry,
        options: PipelineOptions,
    ) -> DistillResult<Self> {
        let instances: Vec<Arc<dyn Scorer>> = match &options.scorers {
            Some(names) => {
                let mut seen = Vec::with_capacity(names.len());
                let mut instances = Vec::with_capacity(names.len());
                for name in names {
                    if seen.contains(&name.as_str()) {
                        warn!("Scorer '{}' listed more than once; ignoring repeat", name);
                        continue;
                    }
                    seen.push(name.as_str());
                    instances.push(scorers.create(name)?);
                }
                instances
            }
            None => scorers.create_all(),
        };

        let mut explicit = BTreeMap::new();
        for (name, weight) in &options.weights {
            let weight = validate_weight(name, *weight)?;
            if instances.iter().any(|s| s.name() == name) {
                explicit.insert(name.clone(), weight);
            } else {
                warn!("Ignoring weight for '{}': scorer is not configured", name);
            }
        }

        let profile = options
            .profile
            .as_deref()
            .map(|name| profiles.get(name))
            .transpose()?;

        let weights = resolve_weights(&instances, profile.as_deref(), &explicit);
        debug!("Resolved weights: {:?}", weights);

        let auto_weights = if options.auto_profile && profile.is_none() {
            let maps = profiles
                .names()
                .into_iter()
                .filter_map(|name| profiles.get(&name).ok())
                .map(|p| {
                    let resolved = resolve_weights(&instances, Some(p.as_ref()), &explicit);
                    (p.name.clone(), resolved)
                })
                .collect();
            Some(maps)
        } else {
            if options.auto_profile {
                debug!("Explicit profile set; content-type auto-detection disabled");
            }
            None
        };

        Ok(Self {
            scorers: instances,
            explicit,
            weights,
            profile,
            auto_weights,
            paragraphs: options.paragraphs,
            workers: options.workers.clamp(1, MAX_WORKERS),
        })
    }

    /// Pipeline over every built-in scorer with default weights
    pub fn with_defaults() -> DistillResult<Self> {
        Self::new(
            &ScorerRegistry::with_builtin(),
            &ProfileRegistry::with_builtin(),
            PipelineOptions::default(),
        )
    }

    /// Configured scorer names, in run order
    pub fn scorer_names(&self) -> Vec<&'static str> {
        self.scorers.iter().map(|s| s.name()).collect()
    }

    /// Weights used when no content type is detected
    pub fn weights(&self) -> &BTreeMap<String, f64> {
        &self.weights
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_deref()
    }

    pub fn auto_profile(&self) -> bool {
        self.auto_weights.is_some()
    }

    /// Identity of the weighting policy, for cache keys
    pub fn profile_key(&self) -> String {
        let mut key = match (&self.profile, &self.auto_weights) {
            (Some(profile), _) => profile.name.clone(),
            (None, Some(_)) => "auto".to_string(),
            (None, None) => "none".to_string(),
        };
        for (name, weight) in &self.explicit {
            key.push_str(&format!("+{name}={weight}"));
        }
        key
    }

    /// Score one document
    pub fn score(&self, text: &str, metadata: Option<&Metadata>) -> QualityReport {
        if text.trim().is_empty() {
            return QualityReport::empty();
        }

        let resolved = self.resolve(text, metadata);
        let (overall_score, scores) = self.aggregate(text, metadata, resolved.weights);

        let paragraphs = self
            .paragraphs
            .then(|| self.score_paragraphs(text, metadata, resolved.weights));

        QualityReport {
            overall_score,
            scores,
            word_count: word_count(text),
            text_length: char_count(text),
            paragraphs,
            content_type: resolved.content_type,
            profile: resolved.profile,
        }
    }

    /// Score many documents on a bounded worker pool, results in input order
    pub fn score_batch(
        &self,
        items: &[(String, String)],
        metadata: BatchMetadata<'_>,
    ) -> DistillResult<Vec<BatchResult>> {
        if let BatchMetadata::PerItem(entries) = metadata {
            if entries.len() != items.len() {
                return Err(DistillError::BatchMetadataMismatch {
                    items: items.len(),
                    metadata: entries.len(),
                });
            }
        }
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let workers = items.len().min(self.workers);
        info!("Scoring {} documents with {} workers", items.len(), workers);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()?;

        let results = pool.install(|| {
            items
                .par_iter()
                .enumerate()
                .map(|(i, (label, text))| BatchResult {
                    label: label.clone(),
                    report: self.score(text, metadata.get(i)),
                })
                .collect()
        });
        Ok(results)
    }

    /// Compare two candidates under this configuration
    pub fn compare(&self, a: Candidate<'_>, b: Candidate<'_>) -> ComparisonResult {
        compare(self, a, b)
    }

    fn resolve(&self, text: &str, metadata: Option<&Metadata>) -> Resolved<'_> {
        let Some(auto_weights) = &self.auto_weights else {
            return Resolved {
                weights: &self.weights,
                profile: self.profile.as_ref().map(|p| p.name.clone()),
                content_type: None,
            };
        };

        let detected = detect_content_type(text, metadata);
        let profile_weights = (!detected.is_default())
            .then(|| auto_weights.get(&detected.name))
            .flatten();

        match profile_weights {
            Some(weights) => {
                debug!(
                    "Auto-detected content type '{}' (confidence {:.2})",
                    detected.name, detected.confidence
                );
                Resolved {
                    weights,
                    profile: Some(detected.name.clone()),
                    content_type: Some(detected),
                }
            }
            None => {
                if !detected.is_default() {
                    warn!("No profile registered for content type '{}'", detected.name);
                }
                Resolved {
                    weights: &self.weights,
                    profile: None,
                    content_type: Some(detected),
                }
            }
        }
    }

    /// Run every scorer and take the weighted mean
    fn aggregate(
        &self,
        text: &str,
        metadata: Option<&Metadata>,
        weights: &BTreeMap<String, f64>,
    ) -> (f64, Vec<ScoreResult>) {
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        let mut results = Vec::with_capacity(self.scorers.len());

        for scorer in &self.scorers {
            let result = scorer.score(text, metadata);
            let weight = weights
                .get(scorer.name())
                .copied()
                .unwrap_or_else(|| scorer.default_weight());
            weighted_sum += result.score * weight;
            total_weight += weight;
            results.push(result);
        }

        let overall = if total_weight > 0.0 {
            (weighted_sum / total_weight).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (overall, results)
    }

    fn score_paragraphs(
        &self,
        text: &str,
        metadata: Option<&Metadata>,
        weights: &BTreeMap<String, f64>,
    ) -> Vec<ParagraphScore> {
        split_paragraphs(text)
            .into_iter()
            .map(|paragraph| (paragraph, word_count(paragraph)))
            .filter(|(_, wc)| *wc >= MIN_PARAGRAPH_WORDS)
            .enumerate()
            .map(|(index, (paragraph, wc))| {
                let (overall_score, scores) = self.aggregate(paragraph, metadata, weights);
                ParagraphScore {
                    index,
                    preview: preview(paragraph, PREVIEW_CHARS),
                    overall_score,
                    scores,
                    word_count: wc,
                }
            })
            .collect()
    }
}

/// Scorer defaults, then profile weights, then explicit overrides
fn resolve_weights(
    scorers: &[Arc<dyn Scorer>],
    profile: Option<&Profile>,
    explicit: &BTreeMap<String, f64>,
) -> BTreeMap<String, f64> {
    scorers
        .iter()
        .map(|scorer| {
            let name = scorer.name();
            let weight = explicit
                .get(name)
                .copied()
                .or_else(|| profile.and_then(|p| p.weight(name)))
                .unwrap_or_else(|| scorer.default_weight());
            (name.to_string(), weight)
        })
        .collect()
}

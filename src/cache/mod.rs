//! Report caching
//!
//! A collaborator around the pipeline, never called by it. Reports are keyed
//! by a content hash plus the pipeline's weighting identity, so the same text
//! scored under a different profile or scorer set is a different entry.

use crate::models::{Metadata, QualityReport};
use crate::pipeline::Pipeline;
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::debug;

/// Identity of one scoring call
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// SHA-256 hex of the text (and source URL, when given)
    pub text_hash: String,
    pub profile: String,
    /// Comma-joined sorted scorer names
    pub scorer_set: String,
}

impl CacheKey {
    pub fn new(text: &str, metadata: Option<&Metadata>, profile: &str, scorers: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        // The URL feeds authority and content-type detection
        if let Some(url) = metadata.and_then(Metadata::url) {
            hasher.update([0u8]);
            hasher.update(url.as_bytes());
        }

        let mut names = scorers.to_vec();
        names.sort_unstable();

        Self {
            text_hash: format!("{:x}", hasher.finalize()),
            profile: profile.to_string(),
            scorer_set: names.join(","),
        }
    }

    /// Key for scoring `text` with `pipeline`
    pub fn for_pipeline(pipeline: &Pipeline, text: &str, metadata: Option<&Metadata>) -> Self {
        Self::new(text, metadata, &pipeline.profile_key(), &pipeline.scorer_names())
    }

    /// Leading 12 hex digits of the hash, for log lines
    pub fn short_hash(&self) -> &str {
        self.text_hash.get(..12).unwrap_or(&self.text_hash)
    }
}

/// Storage for scored reports
pub trait ReportCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<QualityReport>;

    fn put(&self, key: CacheKey, report: QualityReport);
}

/// In-process cache backed by a concurrent map
#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Arc<DashMap<CacheKey, Arc<QualityReport>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl ReportCache for MemoryCache {
    fn get(&self, key: &CacheKey) -> Option<QualityReport> {
        self.entries.get(key).map(|entry| QualityReport::clone(&entry))
    }

    fn put(&self, key: CacheKey, report: QualityReport) {
        self.entries.insert(key, Arc::new(report));
    }
}

/// Score through `cache`, storing the report on a miss
pub fn score_cached(
    pipeline: &Pipeline,
    cache: &dyn ReportCache,
    text: &str,
    metadata: Option<&Metadata>,
) -> QualityReport {
    let key = CacheKey::for_pipeline(pipeline, text, metadata);
    if let Some(report) = cache.get(&key) {
        debug!("Cache hit for {}", key.short_hash());
        return report;
    }

    let report = pipeline.score(text, metadata);
    cache.put(key, report.clone());
    report
}

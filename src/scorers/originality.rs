//! Originality scorer
//!
//! Measures whether a text contributes its own ideas or rephrases common
//! knowledge. Always uses two heuristic signals (claim density and
//! attribution balance). When an [`Embedder`] is supplied it adds a third:
//! semantic diversity across paragraphs.

use super::base::Scorer;
use super::patterns::{per_100, round_to, PatternSet};
use crate::models::{MatchHighlight, Metadata, ScoreResult};
use crate::text::{char_offset, sentences_longer_than, split_paragraphs, word_count};
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

const MIN_WORDS: usize = 50;
const MIN_PARAGRAPH_WORDS: usize = 15;
const MIN_PARAGRAPHS_FOR_DIVERSITY: usize = 3;
const REPEATED_IDEA_SIMILARITY: f64 = 0.8;

/// Produces one embedding vector per paragraph
pub trait Embedder: Send + Sync {
    /// Embed `paragraphs`; `None` when the backend fails
    fn embed(&self, paragraphs: &[&str]) -> Option<Vec<Vec<f32>>>;
}

/// Lazily constructs the embedder; `None` means the capability is unavailable
pub type EmbeddingProvider = Arc<dyn Fn() -> Option<Arc<dyn Embedder>> + Send + Sync>;

static EXPERIENCE: OnceLock<PatternSet> = OnceLock::new();
static NOVEL: OnceLock<PatternSet> = OnceLock::new();
static COMMON_KNOWLEDGE: OnceLock<PatternSet> = OnceLock::new();
static ATTRIBUTION: OnceLock<PatternSet> = OnceLock::new();

/// First-person experience claims
fn experience() -> &'static PatternSet {
    EXPERIENCE.get_or_init(|| {
        PatternSet::new(
            "novel_claim",
            &[
                r"\b(?:we|I) found (?:that)?\b",
                r"\bin (?:our|my) (?:testing|experience|benchmarks?|experiments?|analysis)\b",
                r"\bwhen (?:we|I) (?:deployed|tested|measured|ran|built|migrated|implemented)\b",
                r"\b(?:we|I) (?:noticed|discovered|observed|realized|learned|saw|traced|hit)\b",
                r"\b(?:we|I) (?:built|created|designed|developed|wrote|needed|used|went)\b",
                r"\b(?:our|my) (?:team|approach|implementation|solution|results?|data|setup|cluster|system|service|queries|pipeline)\b",
                r"\bafter (?:we|I) (?:switched|moved|upgraded|changed|tried)\b",
                r"\bI'?d (?:honestly )?recommend\b",
                r"\bforced us to\b",
                r"\b(?:we|I) (?:had|have) (?:to|a)\b",
            ],
        )
    })
}

fn novel() -> &'static PatternSet {
    NOVEL.get_or_init(|| {
        PatternSet::new(
            "novel_claim",
            &[
                r"\bsurprisingly\b",
                r"\bcontrary to (?:popular belief|what|common|expectations?)\b",
                r"\bit turns out\b",
                r"\bunexpectedly\b",
                r"\bcounterintuitive(?:ly)?\b",
                r"\bthe (?:surprises?|unexpected part|catch)\b",
                r"\bwhat (?:we|I|most people) (?:didn'?t|don'?t) (?:expect|realize|know)\b",
                r"\bin (?:practice|reality|hindsight)\b",
                r"\bthe (?:real|actual|underlying) (?:issue|problem|cause|reason)\b",
            ],
        )
    })
}

fn common_knowledge() -> &'static PatternSet {
    COMMON_KNOWLEDGE.get_or_init(|| {
        PatternSet::new(
            "common_knowledge",
            &[
                r"\bas (?:we all|everyone) knows?\b",
                r"\bit'?s (?:well[- ]known|widely known|common knowledge|no secret)\b",
                r"\bneedless to say\b",
                r"\bit goes without saying\b",
                r"\bof course\b",
                r"\bobviously\b",
                r"\beveryone (?:knows|agrees|understands)\b",
                r"\bit'?s (?:clear|obvious|evident) that\b",
                r"\bwidely (?:accepted|recognized|acknowledged)\b",
            ],
        )
    })
}

fn attribution() -> &'static PatternSet {
    ATTRIBUTION.get_or_init(|| {
        PatternSet::new(
            "attribution",
            &[
                r"\baccording to\b",
                r"\b(?:research|studies|data|evidence) (?:shows?|suggests?|indicates?|demonstrates?)\b",
                r"\b(?:a |the )?(?:\d{4} )?(?:study|survey|report|paper|analysis) (?:by|from|published)\b",
                r"\bhttps?://\S+",
                r"\[\d+\]",
                r"\bas (?:noted|described|outlined|discussed|reported) (?:by|in)\b",
                r"\b(?:cited|referenced|mentioned) (?:in|by)\b",
                r"\b(?:source|ref|reference)s?:",
            ],
        )
    })
}

/// Map mean-dissimilarity to a quality score: near 0 means every paragraph
/// says the same thing, 0.3 and above means genuinely varied ideas
fn diversity_to_score(diversity: f64) -> f64 {
    if diversity <= 0.05 {
        0.2
    } else if diversity <= 0.15 {
        0.4 + (diversity - 0.05) * 3.0
    } else if diversity <= 0.35 {
        0.7 + (diversity - 0.15) * 1.5
    } else {
        (0.7 + diversity * 0.6).min(1.0)
    }
}

/// Attribution per sentence; 20-60% is the sweet spot, peaking at 40%
fn attribution_score(ratio: f64) -> f64 {
    let score = if (0.2..=0.6).contains(&ratio) {
        0.7 + 0.3 * (1.0 - (ratio - 0.4).abs() / 0.2)
    } else if ratio > 0.6 {
        (0.7 - (ratio - 0.6) * 2.0).max(0.3)
    } else {
        (0.3 + ratio * 2.0).max(0.3)
    };
    score.clamp(0.0, 1.0)
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Semantic diversity across paragraphs
struct Diversity {
    /// 1 - mean pairwise cosine similarity
    value: f64,
    /// Index pairs above the repetition threshold, with their similarity
    repeated: Vec<(usize, usize, f64)>,
}

fn semantic_diversity(embeddings: &[Vec<f32>]) -> Diversity {
    let mut similarities = Vec::new();
    let mut repeated = Vec::new();
    for i in 0..embeddings.len() {
        for j in (i + 1)..embeddings.len() {
            let sim = cosine_similarity(&embeddings[i], &embeddings[j]);
            similarities.push(sim);
            if sim > REPEATED_IDEA_SIMILARITY {
                repeated.push((i, j, sim));
            }
        }
    }
    let mean = if similarities.is_empty() {
        0.0
    } else {
        similarities.iter().sum::<f64>() / similarities.len() as f64
    };
    Diversity {
        value: 1.0 - mean,
        repeated,
    }
}

/// Originality: novel claims and diverse ideas vs common knowledge
#[derive(Default)]
pub struct OriginalityScorer {
    provider: Option<EmbeddingProvider>,
    embedder: OnceLock<Option<Arc<dyn Embedder>>>,
}

impl fmt::Debug for OriginalityScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OriginalityScorer")
            .field("provider", &self.provider.is_some())
            .field("embedder", &self.embedder.get().map(Option::is_some))
            .finish()
    }
}

impl OriginalityScorer {
    /// Heuristic-only scorer
    pub fn new() -> Self {
        Self::default()
    }

    /// Scorer that adds semantic diversity when `provider` yields an embedder
    pub fn with_embeddings<F>(provider: F) -> Self
    where
        F: Fn() -> Option<Arc<dyn Embedder>> + Send + Sync + 'static,
    {
        Self {
            provider: Some(Arc::new(provider)),
            embedder: OnceLock::new(),
        }
    }

    /// The embedder, constructed on first use. Concurrent callers wait for the
    /// single initialization.
    fn embedder(&self) -> Option<&Arc<dyn Embedder>> {
        let provider = self.provider.as_ref()?;
        self.embedder
            .get_or_init(|| {
                let embedder = provider();
                if embedder.is_none() {
                    warn!("Embedding provider unavailable; originality runs heuristic-only");
                }
                embedder
            })
            .as_ref()
    }

    /// Whether semantic diversity can contribute. Resolves the provider on
    /// first call so the answer never changes between calls.
    pub fn ml_available(&self) -> bool {
        self.embedder().is_some()
    }

    fn diversity(&self, paragraphs: &[&str]) -> Option<Diversity> {
        if paragraphs.len() < MIN_PARAGRAPHS_FOR_DIVERSITY {
            return None;
        }
        let embeddings = self.embedder()?.embed(paragraphs)?;
        if embeddings.len() != paragraphs.len() {
            debug!(
                "Embedder returned {} vectors for {} paragraphs; skipping diversity",
                embeddings.len(),
                paragraphs.len()
            );
            return None;
        }
        Some(semantic_diversity(&embeddings))
    }

    fn explain(
        score: f64,
        experience: usize,
        novel: usize,
        common: usize,
        diversity: Option<f64>,
        ml_available: bool,
    ) -> String {
        let quality = if score >= 0.7 {
            "High originality: contributes novel ideas and insights"
        } else if score >= 0.5 {
            "Moderate originality"
        } else {
            "Low originality: mostly rephrased common knowledge"
        };
        let mut parts = vec![quality.to_string()];
        if experience > 0 {
            parts.push(format!("{experience} first-person experience claims"));
        }
        if novel > 0 {
            parts.push(format!("{novel} novel assertions"));
        }
        if common > 0 {
            parts.push(format!("{common} common knowledge phrases"));
        }
        match diversity {
            Some(d) => parts.push(format!("semantic diversity {d:.2}")),
            None if !ml_available => parts.push("ML unavailable, heuristic-only mode".to_string()),
            None => {}
        }
        format!("{}.", parts.join(". "))
    }
}

impl Scorer for OriginalityScorer {
    fn name(&self) -> &'static str {
        "originality"
    }

    fn description(&self) -> &'static str {
        "Originality: novel claims and diverse ideas vs common knowledge"
    }

    fn default_weight(&self) -> f64 {
        0.75
    }

    fn score(&self, text: &str, _metadata: Option<&Metadata>) -> ScoreResult {
        let wc = word_count(text);
        if wc < MIN_WORDS {
            return ScoreResult::insufficient(self.name(), wc, "originality");
        }

        let experience_count = experience().count(text);
        let novel_count = novel().count(text);
        let common_count = common_knowledge().count(text);
        let attribution_count = attribution().count(text);

        let mut claim_score = 0.35;
        claim_score += (per_100(experience_count, wc) * 0.12).min(0.30);
        claim_score += (per_100(novel_count, wc) * 0.15).min(0.20);
        claim_score -= (per_100(common_count, wc) * 0.10).min(0.25);
        let claim_score = claim_score.clamp(0.0, 1.0);

        let sentence_count = sentences_longer_than(text, 10).len().max(1);
        let attribution_ratio = attribution_count as f64 / sentence_count as f64;
        let attribution_component = attribution_score(attribution_ratio);

        let paragraphs: Vec<&str> = split_paragraphs(text)
            .into_iter()
            .filter(|p| word_count(p) >= MIN_PARAGRAPH_WORDS)
            .collect();
        let diversity = self.diversity(&paragraphs);
        let diversity_score = diversity.as_ref().map(|d| diversity_to_score(d.value));

        let score = match diversity_score {
            Some(ds) => ds * 0.40 + claim_score * 0.35 + attribution_component * 0.25,
            None => claim_score * 0.60 + attribution_component * 0.40,
        };

        let mut highlights = experience().highlights(text);
        highlights.extend(novel().highlights(text));
        highlights.extend(common_knowledge().highlights(text));
        highlights.extend(attribution().highlights(text));
        if let Some(d) = &diversity {
            for &(i, j, sim) in &d.repeated {
                let para = paragraphs[i];
                let prefix_end = para.char_indices().nth(50).map_or(para.len(), |(idx, _)| idx);
                if let Some(pos) = text.find(&para[..prefix_end]) {
                    highlights.push(MatchHighlight::new(
                        format!("Paragraph {} similar to paragraph {} ({sim:.2})", i + 1, j + 1),
                        "repeated_idea",
                        char_offset(text, pos),
                    ));
                }
            }
        }

        let ml_available = self.ml_available();
        let mut result = ScoreResult::new(
            self.name(),
            score,
            Self::explain(
                score,
                experience_count,
                novel_count,
                common_count,
                diversity.as_ref().map(|d| d.value),
                ml_available,
            ),
        )
        .with_detail("experience_claims", experience_count)
        .with_detail("novel_assertions", novel_count)
        .with_detail("common_knowledge", common_count)
        .with_detail("attribution_count", attribution_count)
        .with_detail("claim_score", round_to(claim_score, 3))
        .with_detail("attribution_score", round_to(attribution_component, 3))
        .with_detail("attribution_ratio", round_to(attribution_ratio, 3))
        .with_detail("word_count", wc)
        .with_detail("ml_available", ml_available);

        if let (Some(d), Some(ds)) = (&diversity, diversity_score) {
            result = result
                .with_detail("semantic_diversity", round_to(d.value, 3))
                .with_detail("diversity_score", round_to(ds, 3));
        }
        result.with_highlights(highlights)
    }
}

//! Epistemic honesty scorer
//!
//! Rewards text that engages with uncertainty, tradeoffs and limitations, and
//! penalizes absolutism when it is not balanced by qualification or reasoning.
//! Expert writing tends to be less absolutely confident than low-quality
//! writing, so caveats count in its favour.

use super::base::Scorer;
use super::patterns::{per_100, round_to, PatternSet};
use crate::confidence::confidence_interval;
use crate::models::{Metadata, ScoreResult};
use crate::text::word_count;
use std::sync::OnceLock;

const MIN_WORDS: usize = 30;

static QUALIFICATIONS: OnceLock<PatternSet> = OnceLock::new();
static OVERCONFIDENCE: OnceLock<PatternSet> = OnceLock::new();
static REASONING: OnceLock<PatternSet> = OnceLock::new();

/// Concrete limitations, caveats and tradeoffs
fn qualifications() -> &'static PatternSet {
    QUALIFICATIONS.get_or_init(|| {
        PatternSet::new(
            "qualification",
            &[
                r"\bexcept (?:when|for|in)\b",
                r"\bthis (?:breaks down|doesn't apply|fails|won't work) (?:when|if|for)\b",
                r"\bthe (?:tradeoff|downside|limitation|caveat|catch|risk) (?:is|here)\b",
                r"\bassuming (?:you|that|your)\b",
                r"\bif (?:your|the) .{3,30} (?:is|are|exceeds?|has)\b",
                r"\bdepends on (?:your|the|whether)\b",
                r"\bin (?:my|our) experience\b",
                r"\bwe found (?:that)?\b",
                r"\bcontrary to (?:popular belief|what|common)\b",
                r"\bthis (?:may seem|sounds) .{3,20} but\b",
                r"\bthe (?:data|evidence|research|numbers) (?:shows?|suggests?|indicates?)\b",
                r"\baccording to\b",
                r"\b(?:one|a) (?:common )?(?:misconception|mistake|pitfall|trap|error)\b",
                r"\bnot (?:always|necessarily|quite)\b",
                r"\bthat said\b",
                r"\bon the other hand\b",
                r"\bhowever,",
                r"\bworth noting\b",
                r"\bi'?d (?:honestly )?recommend\b",
                r"\bfor teams (?:smaller|larger|with|without)\b",
                r"\bbefore (?:committing|deciding|choosing|starting)\b",
                r"\bthe (?:surprise|unexpected|counterintuitive)\b",
                r"\bthe (?:tradeoff|trade-off|downside|upside) (?:is|was|here)\b",
                r"\bon balance\b",
                r"\b(?:pro|con)s? (?:and|vs|:)",
                r"\b(?:advantage|disadvantage|benefit|drawback)s? (?:of|include|are)\b",
                r"\bif .{3,40} (?:then|you should|consider)\b",
                r"\bunless (?:you|your|the)\b",
                r"\b(?:we|I) (?:learned|realized|discovered) (?:that)?\b",
                r"\bin (?:practice|reality|hindsight)\b",
                r"\b(?:alternatively|instead|another (?:option|approach))\b",
                r"\b(?:roughly|approximately|about|around) \d+",
                r"\b(?:it|this) (?:varies|differs) (?:by|depending|based)\b",
                r"\byou (?:could|might|may) (?:also|instead|alternatively)\b",
                r"\b(?:at the cost of|at the expense of)\b",
                r"\bwhile (?:this|it|that) (?:works|is|may)\b",
                r"\b(?:the reality|in reality|in truth) is\b",
                r"\bkeep in mind\b",
            ],
        )
    })
}

/// Absolutist claims
fn overconfidence() -> &'static PatternSet {
    OVERCONFIDENCE.get_or_init(|| {
        PatternSet::new(
            "overconfidence",
            &[
                r"\b(?:always|never|every|all|none|no one|everyone|nobody) (?:should|must|will|does|is)\b",
                r"\bthe (?:best|only|right|correct|proper|definitive) (?:way|approach|method|answer|solution)\b",
                r"\bwithout (?:a )?doubt\b",
                r"\bundeniably\b",
                r"\bobviously\b",
                r"\bclearly (?:the|this|it)\b",
                r"\bthere'?s no (?:question|doubt|debate|denying)\b",
                r"\bguaranteed?\b",
                r"\bproven (?:to|method|way|approach)\b",
                r"\bthe (?:secret|key|trick) (?:is|to)\b",
                r"\bultimate (?:guide|solution|answer)\b",
                r"\beverything you need to know\b",
                r"\bonce and for all\b",
            ],
        )
    })
}

/// Connectives that carry an argument forward
fn reasoning() -> &'static PatternSet {
    REASONING.get_or_init(|| {
        PatternSet::new(
            "reasoning",
            &[
                r"\bbecause\b",
                r"\btherefore\b",
                r"\bwhich (?:means|implies|suggests|leads to)\b",
                r"\bthe reason (?:is|for|being)\b",
                r"\bthis (?:matters|is important) because\b",
                r"\bfor (?:instance|example)\b",
                r"\be\.g\.",
                r"\bi\.e\.",
                r"\bcompared to\b",
                r"\bwhereas\b",
                r"\brelative to\b",
                r"\bin contrast\b",
                r"\bsimilarly\b",
                r"\banalogous(?:ly)? to\b",
            ],
        )
    })
}

/// Overconfidence penalty scaled by how well it is balanced.
///
/// No penalty when qualifications plus reasoning outnumber absolutes 3:1,
/// a mild one when they at least match, the full one otherwise.
fn overconfidence_penalty(overconfident: usize, positive: usize, over_rate: f64) -> f64 {
    if overconfident == 0 || positive >= overconfident * 3 {
        0.0
    } else if positive >= overconfident {
        (over_rate * 0.03).min(0.10)
    } else {
        (over_rate * 0.08).min(0.25)
    }
}

/// Intellectual honesty: nuance and reasoning vs overconfident claims
#[derive(Debug, Default)]
pub struct EpistemicScorer;

impl EpistemicScorer {
    pub fn new() -> Self {
        Self
    }

    fn explain(score: f64, quals: usize, overconfident: usize, reasons: usize) -> String {
        let quality = if score >= 0.7 {
            "Strong epistemic honesty: nuanced and well-reasoned"
        } else if score >= 0.5 {
            "Moderate epistemic quality"
        } else {
            "Low epistemic quality: overconfident or lacking nuance"
        };
        let mut parts = vec![quality.to_string()];
        if quals > 2 {
            parts.push(format!("{quals} specific qualifications/caveats"));
        }
        if overconfident > 2 {
            parts.push(format!("{overconfident} overconfident claims"));
        }
        if reasons > 3 {
            parts.push(format!("{reasons} reasoning connectives"));
        }
        format!("{}.", parts.join(". "))
    }
}

impl Scorer for EpistemicScorer {
    fn name(&self) -> &'static str {
        "epistemic"
    }

    fn description(&self) -> &'static str {
        "Intellectual honesty: nuance and reasoning vs overconfident claims"
    }

    fn score(&self, text: &str, _metadata: Option<&Metadata>) -> ScoreResult {
        let wc = word_count(text);
        if wc < MIN_WORDS {
            return ScoreResult::insufficient(self.name(), wc, "epistemic quality");
        }

        let qual_count = qualifications().count(text);
        let over_count = overconfidence().count(text);
        let reason_count = reasoning().count(text);

        let qual_rate = per_100(qual_count, wc);
        let over_rate = per_100(over_count, wc);
        let reason_rate = per_100(reason_count, wc);

        let mut score = 0.35;
        score += (qual_rate * 0.08).min(0.25);
        score += (reason_rate * 0.05).min(0.20);
        score -= overconfidence_penalty(over_count, qual_count + reason_count, over_rate);

        if qual_rate > 1.0 && reason_rate > 1.0 {
            score += 0.10;
        } else if qual_rate > 0.5 && reason_rate > 0.5 {
            score += 0.05;
        }

        if qual_count > 0 && over_count == 0 {
            score += 0.05;
        }

        if wc > 1000 {
            if qual_count >= 8 && reason_count >= 6 {
                score += 0.20;
            } else if qual_count >= 12 || reason_count >= 10 {
                score += 0.08;
            }
        }
        let score = score.clamp(0.0, 1.0);

        let mut highlights = qualifications().highlights(text);
        highlights.extend(overconfidence().highlights(text));
        highlights.extend(reasoning().highlights(text));

        let signal_types = [qual_count, over_count, reason_count]
            .iter()
            .filter(|c| **c > 0)
            .count();
        let (lower, upper) = confidence_interval(
            score,
            wc,
            qual_count + over_count + reason_count,
            signal_types,
        );

        ScoreResult::new(
            self.name(),
            score,
            Self::explain(score, qual_count, over_count, reason_count),
        )
        .with_detail("qualification_count", qual_count)
        .with_detail("overconfidence_count", over_count)
        .with_detail("reasoning_count", reason_count)
        .with_detail("qual_rate_per_100w", round_to(qual_rate, 2))
        .with_detail("overconfidence_rate_per_100w", round_to(over_rate, 2))
        .with_detail("reasoning_rate_per_100w", round_to(reason_rate, 2))
        .with_detail("word_count", wc)
        .with_highlights(highlights)
        .with_interval(lower, upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NUANCED: &str = "In our experience, connection pooling helps, but not always. \
        The tradeoff is memory: each idle connection holds a buffer, which means a large \
        pool can starve the cache. It depends on your workload. For example, if your \
        traffic is bursty, a smaller pool with a queue works better because requests wait \
        briefly instead of failing. That said, keep in mind that the defaults assume \
        steady load.";

    const ABSOLUTIST: &str = "This is the ultimate guide and the only way to do it. \
        Everyone should use this framework, obviously. It is guaranteed to work and there's \
        no doubt it is the best approach. Nobody should ever consider anything else, and \
        all teams must adopt it once and for all without a doubt.";

    #[test]
    fn test_short_text_is_neutral() {
        let result = EpistemicScorer::new().score("Always use tabs.", None);
        assert_eq!(result.score, 0.5);
        assert_eq!(result.explanation, "Too short to assess epistemic quality.");
    }

    #[test]
    fn test_nuance_beats_absolutism() {
        let scorer = EpistemicScorer::new();
        let nuanced = scorer.score(NUANCED, None);
        let absolutist = scorer.score(ABSOLUTIST, None);
        assert!(nuanced.score > absolutist.score);
        assert!(nuanced.score >= 0.7, "got {}", nuanced.score);
        assert!(absolutist.score < 0.35, "got {}", absolutist.score);
        assert!(absolutist
            .highlights
            .iter()
            .any(|h| h.category == "overconfidence"));
    }

    #[test]
    fn test_balanced_overconfidence_is_not_penalized() {
        assert_eq!(overconfidence_penalty(1, 3, 2.0), 0.0);
        assert!((overconfidence_penalty(2, 3, 2.0) - 0.06).abs() < 1e-9);
        assert!((overconfidence_penalty(3, 1, 5.0) - 0.25).abs() < 1e-9);
        assert_eq!(overconfidence_penalty(0, 0, 0.0), 0.0);
    }
}

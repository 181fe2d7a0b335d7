//! Confidence intervals for scorer results
//!
//! Shorter texts and sparser signals give wider intervals.

const SHORT_TEXT_WORDS: f64 = 50.0;
const LONG_TEXT_WORDS: f64 = 2000.0;
const WIDEST_HALF_WIDTH: f64 = 0.15;
const NARROWEST_HALF_WIDTH: f64 = 0.03;

/// Signals per 100 words at which density stops widening the interval
const DENSE_SIGNALS_PER_100: f64 = 5.0;

/// Half-width from text length alone: 0.15 at <= 50 words, 0.03 at >= 2000,
/// log-interpolated between
fn base_half_width(word_count: usize) -> f64 {
    let wc = word_count as f64;
    if wc <= SHORT_TEXT_WORDS {
        WIDEST_HALF_WIDTH
    } else if wc >= LONG_TEXT_WORDS {
        NARROWEST_HALF_WIDTH
    } else {
        let t = (wc.ln() - SHORT_TEXT_WORDS.ln()) / (LONG_TEXT_WORDS.ln() - SHORT_TEXT_WORDS.ln());
        WIDEST_HALF_WIDTH - t * (WIDEST_HALF_WIDTH - NARROWEST_HALF_WIDTH)
    }
}

/// Interval `(lower, upper)` around `score`, clamped to [0, 1].
///
/// `signal_count` is the total number of pattern matches, `signal_types`
/// the number of distinct signal families that contributed.
pub fn confidence_interval(
    score: f64,
    word_count: usize,
    signal_count: usize,
    signal_types: usize,
) -> (f64, f64) {
    let per_100 = if word_count > 0 {
        signal_count as f64 * 100.0 / word_count as f64
    } else {
        0.0
    };
    let density_factor = if per_100 >= DENSE_SIGNALS_PER_100 {
        1.0
    } else {
        2.0 - per_100 / DENSE_SIGNALS_PER_100
    };
    let type_factor = (1.0 - signal_types.saturating_sub(1) as f64 * 0.03).max(0.85);

    let half_width = base_half_width(word_count) * density_factor * type_factor;
    (
        (score - half_width).clamp(0.0, 1.0),
        (score + half_width).clamp(0.0, 1.0),
    )
}

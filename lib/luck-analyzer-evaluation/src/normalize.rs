use crate::config::NormalizationConfig;
use crate::metric::RawPerformanceScore;
use crate::round_half_up;
use tracing::debug;

/// Comparable 0..=100 score of a participant within one match.
pub type NormalizedPerformance = u8;

/// Score given to everyone when a match carries no discriminating signal.
pub const DEGENERATE_SCORE: NormalizedPerformance = 50;

/// Rescale the raw scores of one match so the best participant gets 100 and
/// the worst gets 0. Output order matches input order.
///
/// With normalization disabled the raw scores pass through, clamped into
/// range.
pub fn normalize(
    raw: &[RawPerformanceScore],
    config: &NormalizationConfig,
) -> Vec<NormalizedPerformance> {
    if !config.enabled {
        return raw.iter().map(|score| clamp_score(score.0 as f64)).collect();
    }

    let (Some(lo), Some(hi)) = (raw.iter().min(), raw.iter().max()) else {
        return Vec::new();
    };
    if hi == lo || hi.0 <= 0 {
        debug!("Degenerate match scores ({lo:?}..={hi:?}), every participant gets {DEGENERATE_SCORE}");
        return vec![DEGENERATE_SCORE; raw.len()];
    }

    let span = (hi.0 - lo.0) as f64;
    raw.iter()
        .map(|score| clamp_score((score.0 - lo.0) as f64 / span * 100.0))
        .collect()
}

fn clamp_score(value: f64) -> NormalizedPerformance {
    round_half_up(value).clamp(0, 100) as NormalizedPerformance
}

//! Luck scoring: how far match outcomes strayed from the performance that
//! produced them, measured against the player's own teammates.
//!
//! Negative scores mean a player lost games they played well in; positive
//! scores mean they won games they did not earn.

use crate::config::LuckConfig;
use crate::label::LuckLabel;
use crate::normalize::NormalizedPerformance;
use crate::round_half_up;
use serde::{Deserialize, Serialize};

pub const MAX_LUCK: i32 = 100;

/// One match as seen by the luck classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuckSample {
    pub performance: NormalizedPerformance,
    pub won: bool,
    pub teammates: Vec<NormalizedPerformance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LuckStats {
    /// Number of games the raw total was divided by; never zero.
    pub total_games: u32,
    pub carried_wins: u32,
    pub carried_losses: u32,
    pub times_carried_by_team: u32,
    pub bad_performance_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuckResult {
    pub luck_score: i32,
    pub stats: LuckStats,
}

/// Luck contribution of a single match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchLuck {
    pub delta: f64,
    pub labels: Vec<LuckLabel>,
    pub bad_performance: bool,
}

impl LuckSample {
    /// Mean teammate performance, or the configured neutral value if no
    /// teammates were recorded.
    pub fn team_average(&self, config: &LuckConfig) -> f64 {
        if self.teammates.is_empty() {
            return config.team_strength.neutral;
        }
        let sum: f64 = self.teammates.iter().map(|p| *p as f64).sum();
        sum / self.teammates.len() as f64
    }
}

/// Label a single match and compute its raw luck delta.
pub fn assess(sample: &LuckSample, config: &LuckConfig) -> MatchLuck {
    let thresholds = &config.thresholds;
    let scenarios = &config.scenarios;

    let performance = sample.performance as f64;
    let team_average = sample.team_average(config);
    let difference = performance - team_average;

    let good = performance >= thresholds.good_performance;
    let bad = performance < thresholds.bad_performance;
    let carrying = difference > thresholds.carrying;
    let being_carried = difference < thresholds.being_carried;

    let mut delta = 0.0;
    let mut labels = Vec::new();

    if good && !sample.won {
        delta += scenarios.good_perf_loss;
        labels.push(LuckLabel::GoodPerformanceLoss);
        if carrying {
            delta += scenarios.carrying_loss;
            labels.push(LuckLabel::CarryingLoss);
        }
    }

    if bad && sample.won {
        delta += scenarios.bad_perf_win;
        labels.push(LuckLabel::BadPerformanceWin);
        if being_carried {
            delta += scenarios.being_carried_win;
            labels.push(LuckLabel::CarriedByTeam);
        }
    }

    if good && sample.won && carrying {
        labels.push(LuckLabel::CarriedWin);
    }

    if !good && !bad {
        if sample.won && team_average < config.team_strength.weak_below {
            delta += scenarios.win_with_weak_team;
            labels.push(LuckLabel::WinWithWeakTeam);
        } else if !sample.won && team_average > config.team_strength.strong_above {
            delta += scenarios.lose_with_strong_team;
            labels.push(LuckLabel::LoseWithStrongTeam);
        }
    }

    MatchLuck {
        delta,
        labels,
        bad_performance: bad,
    }
}

/// Score a player's luck over an ordered match window.
///
/// An empty window counts as a single neutral game.
pub fn classify(samples: &[LuckSample], config: &LuckConfig) -> LuckResult {
    let mut raw_total = 0.0;
    let mut stats = LuckStats {
        total_games: u32::try_from(samples.len()).unwrap_or(u32::MAX).max(1),
        ..Default::default()
    };

    for sample in samples {
        let assessment = assess(sample, config);
        raw_total += assessment.delta;
        if assessment.bad_performance {
            stats.bad_performance_count += 1;
        }
        for label in &assessment.labels {
            match label {
                LuckLabel::CarryingLoss => stats.carried_losses += 1,
                LuckLabel::CarriedByTeam => stats.times_carried_by_team += 1,
                LuckLabel::CarriedWin => stats.carried_wins += 1,
                _ => {}
            }
        }
    }

    let scaled = raw_total / stats.total_games as f64 * config.normalization_factor;
    LuckResult {
        luck_score: round_half_up(scaled).clamp(-MAX_LUCK, MAX_LUCK),
        stats,
    }
}

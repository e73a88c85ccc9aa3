use crate::config::{Metric, ScoringConfig};
use crate::model::ParticipantStats;
use crate::role::RoleCategory;
use crate::round_half_up;
use serde::Serialize;

/// Integer score of one participant before intra-match normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Default)]
pub struct RawPerformanceScore(pub i32);

/// Points a single metric added to a participant's score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contribution {
    pub metric: Metric,
    pub observed: f64,
    pub effective_weight: f64,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub role: RoleCategory,
    pub contributions: Vec<Contribution>,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.contributions.iter().map(|c| c.points).sum()
    }

    /// Upper bound of [`Self::total`] for this role.
    pub fn max_total(&self) -> f64 {
        self.contributions.iter().map(|c| c.effective_weight).sum()
    }

    pub fn get(&self, metric: Metric) -> Option<&Contribution> {
        self.contributions.iter().find(|c| c.metric == metric)
    }

    pub fn raw_score(&self) -> RawPerformanceScore {
        RawPerformanceScore(round_half_up(self.total()))
    }
}

/// Score a stat line, returning only the rounded total.
pub fn score(stats: &ParticipantStats, role: RoleCategory, config: &ScoringConfig) -> RawPerformanceScore {
    breakdown(stats, role, config).raw_score()
}

/// Score a stat line metric by metric.
pub fn breakdown(stats: &ParticipantStats, role: RoleCategory, config: &ScoringConfig) -> ScoreBreakdown {
    let contributions = Metric::ALL
        .iter()
        .map(|metric| contribution(*metric, stats, role, config))
        .collect();
    ScoreBreakdown {
        role,
        contributions,
    }
}

fn contribution(
    metric: Metric,
    stats: &ParticipantStats,
    role: RoleCategory,
    config: &ScoringConfig,
) -> Contribution {
    let performance = &config.performance;
    let role_multiplier = config.role_adjustments.multiplier(role, metric);
    let effective_weight = performance.weight(metric) * role_multiplier;

    let (observed, points) = match metric {
        Metric::Kda => {
            let observed = kda(stats, role, config);
            (observed, capped(observed, performance.kda.perfect, effective_weight))
        }
        Metric::DamageShare => {
            let observed = stats.damage_to_champions as f64 / stats.team_damage.max(1) as f64;
            let perfect = match (role, performance.damage_share.support_perfect) {
                (RoleCategory::Support, Some(perfect)) => perfect,
                _ => performance.damage_share.perfect,
            };
            (observed, capped(observed, perfect, effective_weight))
        }
        Metric::KillParticipation => {
            let observed = stats.kill_participation.unwrap_or(0.0).clamp(0.0, 1.0);
            (observed, observed * effective_weight)
        }
        Metric::VisionScore => {
            let observed = stats.per_minute(stats.vision_score as f64);
            (observed, capped(observed, performance.vision_score.perfect, effective_weight))
        }
        Metric::CsPerMin => {
            let observed = stats.per_minute(stats.total_cs() as f64);
            (observed, capped(observed, performance.cs_per_min.perfect, effective_weight))
        }
        Metric::GoldPerMin => {
            let observed = stats.per_minute(stats.gold_earned as f64);
            (observed, capped(observed, performance.gold_per_min.perfect, effective_weight))
        }
        Metric::GoldDiff15 => {
            let observed = stats.gold_diff_15.unwrap_or(0) as f64;
            (observed, signed(observed, performance.gold_diff_15.perfect, effective_weight))
        }
        Metric::XpDiff15 => {
            let observed = stats.xp_diff_15.unwrap_or(0) as f64;
            (observed, signed(observed, performance.xp_diff_15.perfect, effective_weight))
        }
        Metric::Objectives => {
            let objectives = &performance.objectives;
            let observed = stats.turret_kills as f64 * objectives.turret_value
                + stats.inhibitor_kills as f64 * objectives.inhibitor_value
                + stats.baron_kills as f64 * objectives.baron_value
                + stats.dragon_kills as f64 * objectives.dragon_value;
            let points = (observed * objectives.multiplier * role_multiplier)
                .clamp(0.0, effective_weight);
            (observed, points)
        }
    };

    Contribution {
        metric,
        observed,
        effective_weight,
        points,
    }
}

/// Supports have their assists discounted against kills before dividing by
/// deaths. Zero deaths count as one.
fn kda(stats: &ParticipantStats, role: RoleCategory, config: &ScoringConfig) -> f64 {
    let assists = match role {
        RoleCategory::Support => stats.assists as f64 * config.performance.kda.support_assist_weight,
        RoleCategory::Jungle | RoleCategory::Laner => stats.assists as f64,
    };
    (stats.kills as f64 + assists) / stats.deaths.max(1) as f64
}

fn capped(observed: f64, perfect: f64, weight: f64) -> f64 {
    if perfect <= 0.0 || !perfect.is_finite() {
        return 0.0;
    }
    (observed / perfect * weight).min(weight)
}

/// Like [`capped`], but a negative observation subtracts up to the full weight.
fn signed(observed: f64, perfect: f64, weight: f64) -> f64 {
    if perfect <= 0.0 || !perfect.is_finite() {
        return 0.0;
    }
    (observed / perfect * weight).clamp(-weight, weight)
}

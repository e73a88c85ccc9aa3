//! Scoring configuration, deserialized once at startup and passed by
//! reference into every scoring call.
//!
//! Defaults reproduce the stock tuning: seven weighted metrics summing to
//! 100 points, lane differentials present but weightless, and role
//! adjustments enabled.

use crate::error::ConfigError;
use crate::role::RoleCategory;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Kda,
    DamageShare,
    KillParticipation,
    VisionScore,
    CsPerMin,
    GoldPerMin,
    #[serde(rename = "gold_diff_15")]
    GoldDiff15,
    #[serde(rename = "xp_diff_15")]
    XpDiff15,
    Objectives,
}

impl Metric {
    pub const ALL: [Metric; 9] = [
        Metric::Kda,
        Metric::DamageShare,
        Metric::KillParticipation,
        Metric::VisionScore,
        Metric::CsPerMin,
        Metric::GoldPerMin,
        Metric::GoldDiff15,
        Metric::XpDiff15,
        Metric::Objectives,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub version: u32,
    pub normalization: NormalizationConfig,
    pub performance: PerformanceConfig,
    pub luck: LuckConfig,
    /// An omitted table disables role detection entirely.
    #[serde(default = "RoleAdjustments::disabled")]
    pub role_adjustments: RoleAdjustments,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            normalization: NormalizationConfig::default(),
            performance: PerformanceConfig::default(),
            luck: LuckConfig::default(),
            role_adjustments: RoleAdjustments::default(),
        }
    }
}

impl ScoringConfig {
    /// Reject configurations that would produce meaningless scores.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for metric in Metric::ALL {
            let weight = self.performance.weight(metric);
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidWeight(metric));
            }
            if let Some(perfect) = self.performance.perfect(metric) {
                if weight > 0.0 && !(perfect.is_finite() && perfect > 0.0) {
                    return Err(ConfigError::InvalidPerfect(metric));
                }
            }
        }

        for (role, table) in &self.role_adjustments.multipliers {
            for (metric, multiplier) in table {
                if !multiplier.is_finite() || *multiplier < 0.0 {
                    return Err(ConfigError::InvalidMultiplier {
                        role: *role,
                        metric: *metric,
                    });
                }
            }
        }

        let thresholds = &self.luck.thresholds;
        if thresholds.bad_performance > thresholds.good_performance {
            return Err(ConfigError::InvertedPerformanceThresholds {
                bad: thresholds.bad_performance,
                good: thresholds.good_performance,
            });
        }
        if !self.luck.normalization_factor.is_finite() {
            return Err(ConfigError::InvalidLuckFactor);
        }

        if self.normalization.enabled && self.normalization.mode == NormalizationMode::Percentile {
            warn!("Percentile normalization is not implemented, min-max rescaling will be used");
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationMode {
    /// Accepted for compatibility; behaves as [`NormalizationMode::Minmax`].
    Percentile,
    #[default]
    #[serde(alias = "min_max")]
    Minmax,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationConfig {
    pub enabled: bool,
    pub mode: NormalizationMode,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: NormalizationMode::Minmax,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricWeight {
    pub weight: f64,
    pub perfect: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KdaWeight {
    pub weight: f64,
    pub perfect: f64,
    /// Fraction of a kill an assist is worth in a support's KDA.
    #[serde(default = "default_support_assist_weight")]
    pub support_assist_weight: f64,
}

fn default_support_assist_weight() -> f64 {
    0.8
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageShareWeight {
    pub weight: f64,
    pub perfect: f64,
    #[serde(default)]
    pub support_perfect: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveWeights {
    pub weight: f64,
    pub turret_value: f64,
    pub inhibitor_value: f64,
    pub baron_value: f64,
    pub dragon_value: f64,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    pub kda: KdaWeight,
    pub damage_share: DamageShareWeight,
    pub kill_participation: MetricWeight,
    /// Perfect value is vision score per minute.
    pub vision_score: MetricWeight,
    pub cs_per_min: MetricWeight,
    pub gold_per_min: MetricWeight,
    pub gold_diff_15: MetricWeight,
    pub xp_diff_15: MetricWeight,
    pub objectives: ObjectiveWeights,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            kda: KdaWeight {
                weight: 20.0,
                perfect: 10.0,
                support_assist_weight: default_support_assist_weight(),
            },
            damage_share: DamageShareWeight {
                weight: 20.0,
                perfect: 0.30,
                support_perfect: Some(0.15),
            },
            kill_participation: MetricWeight {
                weight: 15.0,
                perfect: 1.0,
            },
            vision_score: MetricWeight {
                weight: 10.0,
                perfect: 3.0,
            },
            cs_per_min: MetricWeight {
                weight: 15.0,
                perfect: 8.0,
            },
            gold_per_min: MetricWeight {
                weight: 10.0,
                perfect: 400.0,
            },
            gold_diff_15: MetricWeight {
                weight: 0.0,
                perfect: 1500.0,
            },
            xp_diff_15: MetricWeight {
                weight: 0.0,
                perfect: 1000.0,
            },
            objectives: ObjectiveWeights {
                weight: 10.0,
                turret_value: 1.0,
                inhibitor_value: 2.0,
                baron_value: 3.0,
                dragon_value: 2.0,
                multiplier: 0.5,
            },
        }
    }
}

impl PerformanceConfig {
    pub fn weight(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Kda => self.kda.weight,
            Metric::DamageShare => self.damage_share.weight,
            Metric::KillParticipation => self.kill_participation.weight,
            Metric::VisionScore => self.vision_score.weight,
            Metric::CsPerMin => self.cs_per_min.weight,
            Metric::GoldPerMin => self.gold_per_min.weight,
            Metric::GoldDiff15 => self.gold_diff_15.weight,
            Metric::XpDiff15 => self.xp_diff_15.weight,
            Metric::Objectives => self.objectives.weight,
        }
    }

    /// Reference value for full marks. Kill participation is scored as a raw
    /// ratio and objectives by point values, so neither has one.
    pub fn perfect(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Kda => Some(self.kda.perfect),
            Metric::DamageShare => Some(self.damage_share.perfect),
            Metric::VisionScore => Some(self.vision_score.perfect),
            Metric::CsPerMin => Some(self.cs_per_min.perfect),
            Metric::GoldPerMin => Some(self.gold_per_min.perfect),
            Metric::GoldDiff15 => Some(self.gold_diff_15.perfect),
            Metric::XpDiff15 => Some(self.xp_diff_15.perfect),
            Metric::KillParticipation | Metric::Objectives => None,
        }
    }

    pub fn total_weight(&self) -> f64 {
        Metric::ALL.iter().map(|m| self.weight(*m)).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LuckThresholds {
    pub good_performance: f64,
    pub bad_performance: f64,
    pub carrying: f64,
    pub being_carried: f64,
}

impl Default for LuckThresholds {
    fn default() -> Self {
        Self {
            good_performance: 70.0,
            bad_performance: 40.0,
            carrying: 15.0,
            being_carried: -15.0,
        }
    }
}

/// Average teammate performance bounds used for mid-band adjustments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamStrength {
    pub weak_below: f64,
    pub strong_above: f64,
    /// Assumed team average when no teammates were recorded.
    pub neutral: f64,
}

impl Default for TeamStrength {
    fn default() -> Self {
        Self {
            weak_below: 50.0,
            strong_above: 60.0,
            neutral: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LuckScenarios {
    pub good_perf_loss: f64,
    pub carrying_loss: f64,
    pub bad_perf_win: f64,
    pub being_carried_win: f64,
    pub win_with_weak_team: f64,
    pub lose_with_strong_team: f64,
}

impl Default for LuckScenarios {
    fn default() -> Self {
        Self {
            good_perf_loss: -3.0,
            carrying_loss: -5.0,
            bad_perf_win: 3.0,
            being_carried_win: 5.0,
            win_with_weak_team: -1.0,
            lose_with_strong_team: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LuckConfig {
    pub thresholds: LuckThresholds,
    pub team_strength: TeamStrength,
    pub scenarios: LuckScenarios,
    pub normalization_factor: f64,
}

impl Default for LuckConfig {
    fn default() -> Self {
        Self {
            thresholds: LuckThresholds::default(),
            team_strength: TeamStrength::default(),
            scenarios: LuckScenarios::default(),
            normalization_factor: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleDetection {
    /// CS per minute below which a participant may be a support.
    pub support_max_cs: f64,
    /// Vision per minute above which a participant may be a support.
    pub support_min_vision: f64,
    /// Share of total CS from neutral monsters above which a participant is a jungler.
    pub jungle_neutral_percent: f64,
}

impl Default for RoleDetection {
    fn default() -> Self {
        Self {
            support_max_cs: 2.5,
            support_min_vision: 2.0,
            jungle_neutral_percent: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleAdjustments {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub detection: RoleDetection,
    #[serde(default)]
    pub multipliers: HashMap<RoleCategory, HashMap<Metric, f64>>,
}

impl Default for RoleAdjustments {
    fn default() -> Self {
        let multipliers = HashMap::from([
            (
                RoleCategory::Support,
                HashMap::from([
                    (Metric::CsPerMin, 0.2),
                    (Metric::GoldPerMin, 0.6),
                    (Metric::DamageShare, 0.7),
                    (Metric::VisionScore, 1.8),
                    (Metric::KillParticipation, 1.3),
                    (Metric::Objectives, 1.2),
                ]),
            ),
            (
                RoleCategory::Jungle,
                HashMap::from([
                    (Metric::CsPerMin, 0.6),
                    (Metric::VisionScore, 1.4),
                    (Metric::Objectives, 1.6),
                    (Metric::KillParticipation, 1.2),
                ]),
            ),
        ]);
        Self {
            enabled: true,
            detection: RoleDetection::default(),
            multipliers,
        }
    }
}

impl RoleAdjustments {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            detection: RoleDetection::default(),
            multipliers: HashMap::new(),
        }
    }

    /// Multiplier applied to a metric's weight for a role; 1.0 whenever
    /// adjustments are off or no entry exists.
    pub fn multiplier(&self, role: RoleCategory, metric: Metric) -> f64 {
        if !self.enabled {
            return 1.0;
        }
        self.multipliers
            .get(&role)
            .and_then(|table| table.get(&metric))
            .copied()
            .unwrap_or(1.0)
    }
}

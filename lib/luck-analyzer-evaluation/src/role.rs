use crate::config::RoleAdjustments;
use crate::model::ParticipantStats;
use serde::{Deserialize, Serialize};

/// Play-style inferred from a single stat line. A player can land in a
/// different category from one match to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    Support,
    Jungle,
    #[default]
    Laner,
}

/// Detect the [`RoleCategory`] of a participant from farm and vision rates.
///
/// Always yields [`RoleCategory::Laner`] when role adjustments are disabled.
pub fn classify(stats: &ParticipantStats, config: &RoleAdjustments) -> RoleCategory {
    if !config.enabled {
        return RoleCategory::Laner;
    }
    let detection = &config.detection;

    let total_cs = stats.total_cs();
    let cs_per_min = stats.per_minute(total_cs as f64);
    let vision_per_min = stats.per_minute(stats.vision_score as f64);
    if cs_per_min < detection.support_max_cs && vision_per_min > detection.support_min_vision {
        return RoleCategory::Support;
    }

    let neutral_share = if total_cs == 0 {
        0.0
    } else {
        stats.neutral_minions_killed as f64 / total_cs as f64
    };
    if neutral_share > detection.jungle_neutral_percent {
        return RoleCategory::Jungle;
    }

    RoleCategory::Laner
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(minions: u32, neutral: u32, vision: u32) -> ParticipantStats {
        ParticipantStats {
            minions_killed: minions,
            neutral_minions_killed: neutral,
            vision_score: vision,
            duration_secs: 1800,
            ..Default::default()
        }
    }

    #[test]
    fn low_farm_high_vision_is_support() {
        // 1 cs/min, 3 vision/min
        let role = classify(&stats(30, 0, 90), &RoleAdjustments::default());
        assert_eq!(role, RoleCategory::Support);
    }

    #[test]
    fn low_farm_without_vision_is_not_support() {
        let role = classify(&stats(30, 0, 30), &RoleAdjustments::default());
        assert_eq!(role, RoleCategory::Laner);
    }

    #[test]
    fn mostly_neutral_farm_is_jungle() {
        let role = classify(&stats(40, 140, 40), &RoleAdjustments::default());
        assert_eq!(role, RoleCategory::Jungle);
    }

    #[test]
    fn exact_jungle_threshold_stays_laner() {
        // 40% neutral is not strictly above the threshold
        let role = classify(&stats(120, 80, 20), &RoleAdjustments::default());
        assert_eq!(role, RoleCategory::Laner);
    }

    #[test]
    fn zero_cs_and_zero_duration_do_not_panic() {
        let mut empty = stats(0, 0, 0);
        empty.duration_secs = 0;
        assert_eq!(classify(&empty, &RoleAdjustments::default()), RoleCategory::Laner);
    }

    #[test]
    fn disabled_adjustments_always_laner() {
        let config = RoleAdjustments {
            enabled: false,
            ..Default::default()
        };
        assert_eq!(classify(&stats(30, 0, 90), &config), RoleCategory::Laner);
        assert_eq!(classify(&stats(40, 140, 40), &config), RoleCategory::Laner);
    }
}

use crate::label::LuckLabel;
use crate::luck::LuckResult;
use crate::role::RoleCategory;
use serde::{Deserialize, Serialize};

/// Used in place of a missing or zero match duration.
pub const DEFAULT_DURATION_SECS: i64 = 1800;

/// One participant of a [`MatchRecord`], as handed over by the match-data
/// provider. Every counter defaults to zero when absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipantRecord {
    pub puuid: String,
    pub name: String,
    pub champion: String,
    pub team_id: u16,
    pub team_position: String,
    pub participant_id: i32,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub damage_to_champions: u64,
    pub vision_score: u32,
    pub minions_killed: u32,
    pub neutral_minions_killed: u32,
    pub gold_earned: u32,
    pub turret_kills: u32,
    pub inhibitor_kills: u32,
    pub baron_kills: u32,
    pub dragon_kills: u32,
    /// Ratio in `0..=1`, only present when the provider computed it.
    pub kill_participation: Option<f64>,
    pub gold_diff_15: Option<i32>,
    pub xp_diff_15: Option<i32>,
    pub win: bool,
}

impl ParticipantRecord {
    pub fn kda(&self) -> String {
        format!("{}/{}/{}", self.kills, self.deaths, self.assists)
    }
}

/// A fully fetched match. The engine only ever sees complete records.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRecord {
    pub match_id: String,
    pub game_mode: String,
    pub duration_secs: i64,
    pub participants: Vec<ParticipantRecord>,
}

impl MatchRecord {
    /// Total champion damage dealt by the given team.
    pub fn team_damage(&self, team_id: u16) -> u64 {
        self.participants
            .iter()
            .filter(|p| p.team_id == team_id)
            .map(|p| p.damage_to_champions)
            .sum()
    }

    /// Build the scoring view of every participant, in record order.
    pub fn participant_stats(&self) -> Vec<ParticipantStats> {
        self.participants
            .iter()
            .map(|p| ParticipantStats::from_record(p, self.team_damage(p.team_id), self.duration_secs))
            .collect()
    }
}

/// The stat line a single participant is scored on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParticipantStats {
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub damage_to_champions: u64,
    pub team_damage: u64,
    pub vision_score: u32,
    pub minions_killed: u32,
    pub neutral_minions_killed: u32,
    pub gold_earned: u32,
    pub turret_kills: u32,
    pub inhibitor_kills: u32,
    pub baron_kills: u32,
    pub dragon_kills: u32,
    pub kill_participation: Option<f64>,
    pub gold_diff_15: Option<i32>,
    pub xp_diff_15: Option<i32>,
    pub duration_secs: i64,
    pub team_id: u16,
    pub win: bool,
}

impl ParticipantStats {
    pub fn from_record(record: &ParticipantRecord, team_damage: u64, duration_secs: i64) -> Self {
        Self {
            kills: record.kills,
            deaths: record.deaths,
            assists: record.assists,
            damage_to_champions: record.damage_to_champions,
            team_damage,
            vision_score: record.vision_score,
            minions_killed: record.minions_killed,
            neutral_minions_killed: record.neutral_minions_killed,
            gold_earned: record.gold_earned,
            turret_kills: record.turret_kills,
            inhibitor_kills: record.inhibitor_kills,
            baron_kills: record.baron_kills,
            dragon_kills: record.dragon_kills,
            kill_participation: record.kill_participation,
            gold_diff_15: record.gold_diff_15,
            xp_diff_15: record.xp_diff_15,
            duration_secs,
            team_id: record.team_id,
            win: record.win,
        }
    }

    /// Match length in minutes, substituting [`DEFAULT_DURATION_SECS`] for
    /// a missing duration.
    pub fn minutes(&self) -> f64 {
        let secs = if self.duration_secs > 0 {
            self.duration_secs
        } else {
            DEFAULT_DURATION_SECS
        };
        secs as f64 / 60.0
    }

    pub fn total_cs(&self) -> u32 {
        self.minions_killed + self.neutral_minions_killed
    }

    pub fn per_minute(&self, total: f64) -> f64 {
        total / self.minutes()
    }
}

/// A participant's normalized score within one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeammatePerformance {
    pub name: String,
    pub performance: u8,
}

/// One row of the ten-participant breakdown of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSummary {
    pub name: String,
    pub champion: String,
    pub team_id: u16,
    pub role: RoleCategory,
    pub performance: u8,
    pub kda: String,
    pub win: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: String,
    pub champion: String,
    pub kda: String,
    pub performance: u8,
    pub won: bool,
    pub teammates: Vec<TeammatePerformance>,
    pub participants: Vec<ParticipantSummary>,
    pub duration_secs: i64,
    pub game_mode: String,
    /// Luck scenarios this match triggered for the player.
    pub labels: Vec<LuckLabel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAnalysis {
    pub player_name: String,
    pub avg_performance: u8,
    pub total_games: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: u8,
    pub luck: LuckResult,
    pub match_history: Vec<MatchSummary>,
}

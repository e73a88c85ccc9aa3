//! Match performance and luck scoring.
//!
//! Every participant of a match gets a raw score from weighted metrics,
//! adjusted for their detected role, and is then normalized against the
//! other nine. A player's luck is how often outcomes disagreed with those
//! normalized performances.

pub mod champion;
pub mod config;
pub mod differential;
pub mod error;
pub mod label;
pub mod leaderboard;
pub mod luck;
pub mod metric;
pub mod model;
pub mod normalize;
pub mod role;
pub mod season;

pub use champion::{champion_stats, ChampionAggregate};
pub use config::ScoringConfig;
pub use error::ConfigError;
pub use label::LuckLabel;
pub use leaderboard::{generate_leaderboard, Leaderboard, LeaderboardEntry};
pub use luck::{LuckResult, LuckStats};
pub use model::{MatchRecord, MatchSummary, ParticipantRecord, PlayerAnalysis};
pub use role::RoleCategory;
pub use season::{aggregate, score_match};

/// Round to the nearest integer, halves towards positive infinity.
pub(crate) fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

use crate::config::ScoringConfig;
use crate::luck::{self, LuckSample};
use crate::metric::{self, RawPerformanceScore};
use crate::model::{
    MatchRecord, MatchSummary, ParticipantSummary, PlayerAnalysis, TeammatePerformance,
};
use crate::normalize::{normalize, NormalizedPerformance};
use crate::role::{self, RoleCategory};
use crate::round_half_up;
use tracing::debug;

/// Every participant of a match, scored and normalized, in record order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMatch<'a> {
    pub record: &'a MatchRecord,
    pub roles: Vec<RoleCategory>,
    pub raw: Vec<RawPerformanceScore>,
    pub normalized: Vec<NormalizedPerformance>,
}

/// Run role detection, metric scoring and normalization for all participants.
pub fn score_match<'a>(record: &'a MatchRecord, config: &ScoringConfig) -> ScoredMatch<'a> {
    let stats = record.participant_stats();
    let roles: Vec<RoleCategory> = stats
        .iter()
        .map(|s| role::classify(s, &config.role_adjustments))
        .collect();
    let raw: Vec<RawPerformanceScore> = stats
        .iter()
        .zip(&roles)
        .map(|(s, role)| metric::score(s, *role, config))
        .collect();
    let normalized = normalize(&raw, &config.normalization);
    ScoredMatch {
        record,
        roles,
        raw,
        normalized,
    }
}

impl ScoredMatch<'_> {
    /// Summarize the match from the point of view of one participant.
    pub fn summarize(&self, puuid: &str) -> Option<MatchSummary> {
        let index = self
            .record
            .participants
            .iter()
            .position(|p| p.puuid == puuid)?;
        let player = &self.record.participants[index];

        let teammates = self
            .record
            .participants
            .iter()
            .zip(&self.normalized)
            .enumerate()
            .filter(|(i, (p, _))| *i != index && p.team_id == player.team_id)
            .map(|(_, (p, performance))| TeammatePerformance {
                name: p.name.clone(),
                performance: *performance,
            })
            .collect();

        let participants = self
            .record
            .participants
            .iter()
            .zip(&self.roles)
            .zip(&self.normalized)
            .map(|((p, role), performance)| ParticipantSummary {
                name: p.name.clone(),
                champion: p.champion.clone(),
                team_id: p.team_id,
                role: *role,
                performance: *performance,
                kda: p.kda(),
                win: p.win,
            })
            .collect();

        Some(MatchSummary {
            match_id: self.record.match_id.clone(),
            champion: player.champion.clone(),
            kda: player.kda(),
            performance: self.normalized[index],
            won: player.win,
            teammates,
            participants,
            duration_secs: self.record.duration_secs,
            game_mode: self.record.game_mode.clone(),
            labels: Vec::new(),
        })
    }
}

impl MatchSummary {
    pub fn luck_sample(&self) -> LuckSample {
        LuckSample {
            performance: self.performance,
            won: self.won,
            teammates: self.teammates.iter().map(|t| t.performance).collect(),
        }
    }
}

/// Fold a player's matches into a season summary. Matches the player is not
/// part of are skipped.
pub fn aggregate(
    player_name: &str,
    puuid: &str,
    matches: &[MatchRecord],
    config: &ScoringConfig,
) -> PlayerAnalysis {
    let mut match_history = Vec::with_capacity(matches.len());
    let mut performance_sum = 0u32;
    let mut wins = 0u32;
    let mut losses = 0u32;

    for record in matches {
        let Some(mut summary) = score_match(record, config).summarize(puuid) else {
            debug!("{player_name} is not part of {}, skipping", record.match_id);
            continue;
        };
        summary.labels = luck::assess(&summary.luck_sample(), &config.luck).labels;

        if summary.won {
            wins += 1;
        } else {
            losses += 1;
        }
        performance_sum += summary.performance as u32;
        match_history.push(summary);
    }

    let samples: Vec<LuckSample> = match_history.iter().map(MatchSummary::luck_sample).collect();
    let luck = luck::classify(&samples, &config.luck);

    let total_games = wins + losses;
    PlayerAnalysis {
        player_name: player_name.to_string(),
        avg_performance: ratio(performance_sum, total_games, 1.0),
        total_games,
        wins,
        losses,
        win_rate: ratio(wins, total_games, 100.0),
        luck,
        match_history,
    }
}

/// `numerator / denominator * scale`, rounded; zero when there is nothing to divide by.
fn ratio(numerator: u32, denominator: u32, scale: f64) -> u8 {
    if denominator == 0 {
        return 0;
    }
    round_half_up(numerator as f64 / denominator as f64 * scale).clamp(0, 100) as u8
}

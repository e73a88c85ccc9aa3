use crate::model::MatchSummary;
use crate::normalize::NormalizedPerformance;
use crate::round_half_up;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChampionAggregate {
    pub champion: String,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: u8,
    pub avg_performance: u8,
    pub best_performance: NormalizedPerformance,
    pub worst_performance: NormalizedPerformance,
}

#[derive(Debug)]
struct ChampionTally {
    champion: String,
    games: u32,
    wins: u32,
    performance_sum: u32,
    best: NormalizedPerformance,
    worst: NormalizedPerformance,
}

impl ChampionTally {
    fn new(champion: &str) -> Self {
        Self {
            champion: champion.to_string(),
            games: 0,
            wins: 0,
            performance_sum: 0,
            best: NormalizedPerformance::MIN,
            worst: NormalizedPerformance::MAX,
        }
    }

    fn add(&mut self, summary: &MatchSummary) {
        self.games += 1;
        if summary.won {
            self.wins += 1;
        }
        self.performance_sum += summary.performance as u32;
        self.best = self.best.max(summary.performance);
        self.worst = self.worst.min(summary.performance);
    }

    fn finish(self) -> ChampionAggregate {
        let games = self.games.max(1) as f64;
        ChampionAggregate {
            champion: self.champion,
            games: self.games,
            wins: self.wins,
            losses: self.games - self.wins,
            win_rate: round_half_up(self.wins as f64 / games * 100.0) as u8,
            avg_performance: round_half_up(self.performance_sum as f64 / games) as u8,
            best_performance: self.best,
            worst_performance: self.worst,
        }
    }
}

/// Roll a match history up per champion, most played first. Champions with
/// the same number of games stay in the order they were first played.
pub fn champion_stats(history: &[MatchSummary]) -> Vec<ChampionAggregate> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut tallies: Vec<ChampionTally> = Vec::new();

    for summary in history {
        let slot = *index.entry(summary.champion.as_str()).or_insert_with(|| {
            tallies.push(ChampionTally::new(&summary.champion));
            tallies.len() - 1
        });
        tallies[slot].add(summary);
    }

    tallies.sort_by(|a, b| b.games.cmp(&a.games));
    tallies.into_iter().map(ChampionTally::finish).collect()
}

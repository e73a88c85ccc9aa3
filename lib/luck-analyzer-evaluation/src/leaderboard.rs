use crate::model::PlayerAnalysis;
use serde::{Deserialize, Serialize};

/// Number of players shown at each end of the leaderboard.
pub const PODIUM_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub luck_score: i32,
    pub avg_performance: u8,
    pub total_games: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: u8,
}

impl From<&PlayerAnalysis> for LeaderboardEntry {
    fn from(analysis: &PlayerAnalysis) -> Self {
        Self {
            player_name: analysis.player_name.clone(),
            luck_score: analysis.luck.luck_score,
            avg_performance: analysis.avg_performance,
            total_games: analysis.total_games,
            wins: analysis.wins,
            losses: analysis.losses,
            win_rate: analysis.win_rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    /// Every player, unluckiest first.
    pub all: Vec<LeaderboardEntry>,
    pub luckiest: Vec<LeaderboardEntry>,
    pub unluckiest: Vec<LeaderboardEntry>,
}

/// Rank players by luck score. Equal scores keep their input order.
pub fn generate_leaderboard(players: &[PlayerAnalysis]) -> Leaderboard {
    let mut all: Vec<LeaderboardEntry> = players.iter().map(LeaderboardEntry::from).collect();
    all.sort_by_key(|entry| entry.luck_score);

    let unluckiest = all.iter().take(PODIUM_SIZE).cloned().collect();
    let luckiest = all.iter().rev().take(PODIUM_SIZE).cloned().collect();
    Leaderboard {
        all,
        luckiest,
        unluckiest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::luck::{LuckResult, LuckStats};

    fn player(name: &str, luck_score: i32) -> PlayerAnalysis {
        PlayerAnalysis {
            player_name: name.to_string(),
            avg_performance: 50,
            total_games: 10,
            wins: 5,
            losses: 5,
            win_rate: 50,
            luck: LuckResult {
                luck_score,
                stats: LuckStats::default(),
            },
            match_history: Vec::new(),
        }
    }

    fn names(entries: &[LeaderboardEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.player_name.as_str()).collect()
    }

    #[test]
    fn sorts_by_luck_ascending() {
        let players = [
            player("a", 10),
            player("b", -40),
            player("c", 75),
            player("d", 0),
            player("e", -5),
        ];
        let board = generate_leaderboard(&players);

        assert_eq!(names(&board.all), vec!["b", "e", "d", "a", "c"]);
        assert!(board.all.windows(2).all(|w| w[0].luck_score <= w[1].luck_score));
        assert_eq!(names(&board.unluckiest), vec!["b", "e", "d"]);
        assert_eq!(names(&board.luckiest), vec!["c", "a", "d"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let players = [player("first", 5), player("second", 5), player("third", -5)];
        let board = generate_leaderboard(&players);
        assert_eq!(names(&board.all), vec!["third", "first", "second"]);
        assert_eq!(names(&board.luckiest), vec!["second", "first", "third"]);
    }

    #[test]
    fn short_leaderboards_overlap() {
        let board = generate_leaderboard(&[player("solo", 12)]);
        assert_eq!(names(&board.luckiest), vec!["solo"]);
        assert_eq!(names(&board.unluckiest), vec!["solo"]);

        let board = generate_leaderboard(&[]);
        assert!(board.all.is_empty());
        assert!(board.luckiest.is_empty());
    }
}

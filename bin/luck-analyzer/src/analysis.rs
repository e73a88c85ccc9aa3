use crate::riot_api::{MatchProvider, SummonerProfile};
use anyhow::Context;
use luck_analyzer_evaluation::{generate_leaderboard, Leaderboard, PlayerAnalysis, ScoringConfig};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Which of a player's matches to analyze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchWindow {
    pub count: u32,
    /// Unix timestamp in seconds.
    pub since: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiotId {
    pub game_name: String,
    pub tag_line: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ComparisonResult {
    Analyzed {
        summoner: SummonerProfile,
        analysis: PlayerAnalysis,
    },
    Failed {
        player: RiotId,
        #[serde(skip_serializing_if = "Option::is_none")]
        summoner: Option<SummonerProfile>,
        error: String,
    },
}

#[derive(Debug, Serialize)]
pub struct Comparison {
    pub results: Vec<ComparisonResult>,
    pub leaderboard: Leaderboard,
}

/// Fetch and score a player's matches. Returns [`None`] when the window holds
/// no matches. Matches are fetched one after another so the pacer sees a
/// steady stream of requests.
#[tracing::instrument(skip(provider, scoring), fields(player = %summoner.riot_id()))]
pub async fn analyze_player(
    provider: &dyn MatchProvider,
    summoner: &SummonerProfile,
    window: MatchWindow,
    scoring: &ScoringConfig,
) -> anyhow::Result<Option<PlayerAnalysis>> {
    let match_ids = provider
        .fetch_match_ids(&summoner.puuid, window.count, window.since)
        .await?;
    if match_ids.is_empty() {
        return Ok(None);
    }

    info!("Fetching {} matches", match_ids.len());
    let mut matches = Vec::with_capacity(match_ids.len());
    for match_id in &match_ids {
        let record = provider
            .fetch_match(match_id)
            .await
            .with_context(|| format!("Failed to fetch match {match_id}"))?;
        matches.push(record);
    }

    Ok(Some(luck_analyzer_evaluation::aggregate(
        &summoner.riot_id(),
        &summoner.puuid,
        &matches,
        scoring,
    )))
}

/// Analyze several players in turn and rank the ones that succeeded. A
/// failing player is reported in the results and left off the leaderboard.
#[tracing::instrument(skip_all, fields(players = players.len()))]
pub async fn compare_players(
    provider: &dyn MatchProvider,
    players: &[RiotId],
    window: MatchWindow,
    scoring: &ScoringConfig,
) -> Comparison {
    let mut results = Vec::with_capacity(players.len());
    for player in players {
        let result = compare_one(provider, player, window, scoring).await;
        if let ComparisonResult::Failed { error, .. } = &result {
            error!("Failed to analyze {}#{}: {error}", player.game_name, player.tag_line);
        }
        results.push(result);
    }

    let analyses: Vec<PlayerAnalysis> = results
        .iter()
        .filter_map(|result| match result {
            ComparisonResult::Analyzed { analysis, .. } => Some(analysis.clone()),
            ComparisonResult::Failed { .. } => None,
        })
        .collect();
    Comparison {
        leaderboard: generate_leaderboard(&analyses),
        results,
    }
}

async fn compare_one(
    provider: &dyn MatchProvider,
    player: &RiotId,
    window: MatchWindow,
    scoring: &ScoringConfig,
) -> ComparisonResult {
    let failed = |summoner: Option<SummonerProfile>, error: String| ComparisonResult::Failed {
        player: player.clone(),
        summoner,
        error,
    };

    let summoner = match provider
        .fetch_summoner(&player.game_name, &player.tag_line)
        .await
    {
        Ok(Some(summoner)) => summoner,
        Ok(None) => return failed(None, "Summoner not found".to_string()),
        Err(e) => return failed(None, format!("{e:#}")),
    };

    match analyze_player(provider, &summoner, window, scoring).await {
        Ok(Some(analysis)) => ComparisonResult::Analyzed { summoner, analysis },
        Ok(None) => failed(Some(summoner), "No matches found".to_string()),
        Err(e) => failed(Some(summoner), format!("{e:#}")),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use luck_analyzer_evaluation::{MatchRecord, ParticipantRecord};
    use std::collections::HashMap;

    /// In-memory provider; players are keyed by game name.
    #[derive(Debug, Default)]
    pub(crate) struct FakeProvider {
        pub summoners: HashMap<String, SummonerProfile>,
        pub match_ids: HashMap<String, Vec<String>>,
        pub matches: HashMap<String, MatchRecord>,
    }

    #[async_trait]
    impl MatchProvider for FakeProvider {
        async fn fetch_summoner(
            &self,
            game_name: &str,
            _tag_line: &str,
        ) -> anyhow::Result<Option<SummonerProfile>> {
            Ok(self.summoners.get(game_name).cloned())
        }

        async fn fetch_match_ids(
            &self,
            puuid: &str,
            count: u32,
            _since: Option<i64>,
        ) -> anyhow::Result<Vec<String>> {
            let ids = self.match_ids.get(puuid).cloned().unwrap_or_default();
            Ok(ids.into_iter().take(count as usize).collect())
        }

        async fn fetch_match(&self, match_id: &str) -> anyhow::Result<MatchRecord> {
            self.matches
                .get(match_id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("upstream returned 503"))
        }
    }

    pub(crate) fn profile(name: &str) -> SummonerProfile {
        SummonerProfile {
            puuid: format!("puuid-{name}"),
            game_name: name.to_string(),
            tag_line: "EUW".to_string(),
            summoner_level: 300,
            profile_icon_id: 4568,
        }
    }

    /// Five players on blue against five fillers on red; `kills` indexes the
    /// blue side from worst to best.
    pub(crate) fn record(match_id: &str, blue: &[&str; 5], blue_wins: bool) -> MatchRecord {
        let mut participants = Vec::new();
        for (i, name) in blue.iter().enumerate() {
            participants.push(ParticipantRecord {
                puuid: format!("puuid-{name}"),
                name: format!("{name}#EUW"),
                champion: "Ahri".to_string(),
                team_id: 100,
                kills: 2 * i as u32,
                deaths: 3,
                assists: 5,
                damage_to_champions: 4_000 + 3_000 * i as u64,
                minions_killed: 170,
                gold_earned: 10_000,
                win: blue_wins,
                ..Default::default()
            });
        }
        for i in 0..5u32 {
            participants.push(ParticipantRecord {
                puuid: format!("puuid-red{i}"),
                name: format!("red{i}#EUW"),
                champion: "Garen".to_string(),
                team_id: 200,
                kills: 2 * i + 1,
                deaths: 3,
                assists: 5,
                damage_to_champions: 5_000 + 3_000 * i as u64,
                minions_killed: 170,
                gold_earned: 10_000,
                win: !blue_wins,
                ..Default::default()
            });
        }
        MatchRecord {
            match_id: match_id.to_string(),
            game_mode: "CLASSIC".to_string(),
            duration_secs: 1_800,
            participants,
        }
    }

    pub(crate) fn provider() -> FakeProvider {
        let blue = ["feeder", "alice", "bob", "carol", "carry"];
        let mut provider = FakeProvider::default();
        for name in blue.iter().chain(&["lonely"]) {
            provider.summoners.insert(name.to_string(), profile(name));
        }
        let ids = vec!["EUW1_1".to_string(), "EUW1_2".to_string(), "EUW1_3".to_string()];
        for name in &blue {
            provider.match_ids.insert(format!("puuid-{name}"), ids.clone());
        }
        provider.matches.insert("EUW1_1".into(), record("EUW1_1", &blue, true));
        provider.matches.insert("EUW1_2".into(), record("EUW1_2", &blue, false));
        provider.matches.insert("EUW1_3".into(), record("EUW1_3", &blue, false));
        provider
    }

    fn window(count: u32) -> MatchWindow {
        MatchWindow { count, since: None }
    }

    fn riot_id(name: &str) -> RiotId {
        RiotId {
            game_name: name.to_string(),
            tag_line: "EUW".to_string(),
        }
    }

    #[tokio::test]
    async fn analyzes_requested_window() {
        let provider = provider();
        let analysis = analyze_player(&provider, &profile("carry"), window(2), &ScoringConfig::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(analysis.player_name, "carry#EUW");
        assert_eq!(analysis.total_games, 2);
        assert_eq!(analysis.wins, 1);
        assert_eq!(analysis.match_history[0].match_id, "EUW1_1");
    }

    #[tokio::test]
    async fn no_matches_is_none() {
        let provider = provider();
        let analysis = analyze_player(&provider, &profile("lonely"), window(20), &ScoringConfig::default())
            .await
            .unwrap();
        assert!(analysis.is_none());
    }

    #[tokio::test]
    async fn failed_match_fetch_aborts_analysis() {
        let mut provider = provider();
        provider.matches.remove("EUW1_2");
        let result = analyze_player(&provider, &profile("carry"), window(3), &ScoringConfig::default()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn comparison_ranks_successes_only() {
        let provider = provider();
        let players = [riot_id("carry"), riot_id("ghost"), riot_id("feeder"), riot_id("lonely")];
        let comparison = compare_players(&provider, &players, window(3), &ScoringConfig::default()).await;

        assert_eq!(comparison.results.len(), 4);
        assert!(matches!(comparison.results[0], ComparisonResult::Analyzed { .. }));
        assert!(matches!(
            &comparison.results[1],
            ComparisonResult::Failed { summoner: None, error, .. } if error == "Summoner not found"
        ));
        assert!(matches!(
            &comparison.results[3],
            ComparisonResult::Failed { summoner: Some(_), .. }
        ));

        let names: Vec<&str> = comparison
            .leaderboard
            .all
            .iter()
            .map(|e| e.player_name.as_str())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"carry#EUW"));
        assert!(names.contains(&"feeder#EUW"));
    }
}

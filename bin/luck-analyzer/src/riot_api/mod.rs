use crate::config::Config;
use anyhow::Context;
use async_trait::async_trait;
use luck_analyzer_cache::CacheHandler;
use luck_analyzer_evaluation::MatchRecord;
use pacer::Pacer;
use riven::consts::{PlatformRoute, Queue, RegionalRoute};
use riven::RiotApi;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod account;
pub mod convert;
pub mod match_data;
pub mod match_ids;
pub mod pacer;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummonerProfile {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
    pub summoner_level: i64,
    pub profile_icon_id: i32,
}

impl SummonerProfile {
    /// Riot ID in its `name#tag` display form.
    pub fn riot_id(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line)
    }
}

/// Source of summoners and match records for the analysis.
#[async_trait]
pub trait MatchProvider: Send + Sync {
    /// Look a summoner up by Riot ID, returning [`None`] if no such account exists.
    async fn fetch_summoner(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> anyhow::Result<Option<SummonerProfile>>;

    /// Most recent match IDs of a player, newest first. `since` is a Unix
    /// timestamp in seconds.
    async fn fetch_match_ids(
        &self,
        puuid: &str,
        count: u32,
        since: Option<i64>,
    ) -> anyhow::Result<Vec<String>>;

    async fn fetch_match(&self, match_id: &str) -> anyhow::Result<MatchRecord>;
}

/// [`MatchProvider`] backed by the Riot API. Every call is paced and cached.
pub struct RiotMatchProvider {
    riot_api: Arc<RiotApi>,
    cache: Arc<CacheHandler>,
    pacer: Pacer,
    platform: PlatformRoute,
    regional: RegionalRoute,
    queue: Queue,
    fetch_timelines: bool,
}

impl std::fmt::Debug for RiotMatchProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiotMatchProvider")
            .field("platform", &self.platform)
            .field("regional", &self.regional)
            .field("queue", &self.queue)
            .field("fetch_timelines", &self.fetch_timelines)
            .finish()
    }
}

impl RiotMatchProvider {
    pub fn new(riot_api: Arc<RiotApi>, cache: Arc<CacheHandler>, config: &Config) -> anyhow::Result<Self> {
        let platform = parse_platform(&config.region)?;
        Ok(Self {
            riot_api,
            cache,
            pacer: Pacer::new(config.requests_per_second),
            platform,
            regional: platform.to_regional(),
            queue: Queue::from(config.queue_id),
            fetch_timelines: config.fetch_timelines,
        })
    }
}

/// Parse a platform such as `euw1` into its route.
pub fn parse_platform(region: &str) -> anyhow::Result<PlatformRoute> {
    region
        .to_uppercase()
        .parse::<PlatformRoute>()
        .with_context(|| format!("Unknown region: {region}"))
}

#[async_trait]
impl MatchProvider for RiotMatchProvider {
    async fn fetch_summoner(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> anyhow::Result<Option<SummonerProfile>> {
        self.get_summoner(game_name, tag_line).await
    }

    async fn fetch_match_ids(
        &self,
        puuid: &str,
        count: u32,
        since: Option<i64>,
    ) -> anyhow::Result<Vec<String>> {
        self.get_match_ids(puuid, count, since).await
    }

    async fn fetch_match(&self, match_id: &str) -> anyhow::Result<MatchRecord> {
        self.get_match(match_id).await
    }
}

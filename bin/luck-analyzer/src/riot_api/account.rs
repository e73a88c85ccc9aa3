use super::{RiotMatchProvider, SummonerProfile};
use anyhow::Context;
use tracing::debug;

impl RiotMatchProvider {
    /// Resolve a Riot ID to a [`SummonerProfile`]. Only found summoners are
    /// cached.
    #[tracing::instrument(skip(self))]
    pub(super) async fn get_summoner(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> anyhow::Result<Option<SummonerProfile>> {
        let key = format!("summoner_{game_name}_{tag_line}");
        if let Some(profile) = self.cache.get(&key).await? {
            return Ok(Some(profile));
        }

        self.pacer.wait().await;
        let Some(account) = self
            .riot_api
            .account_v1()
            .get_by_riot_id(self.regional, game_name, tag_line)
            .await
            .context("Failed to fetch account")?
        else {
            debug!("No account for {game_name}#{tag_line}");
            return Ok(None);
        };

        self.pacer.wait().await;
        let summoner = self
            .riot_api
            .summoner_v4()
            .get_by_puuid(self.platform, &account.puuid)
            .await
            .context("Failed to fetch summoner")?;

        let profile = SummonerProfile {
            game_name: account.game_name.unwrap_or_else(|| game_name.to_string()),
            tag_line: account.tag_line.unwrap_or_else(|| tag_line.to_string()),
            puuid: account.puuid,
            summoner_level: summoner.summoner_level,
            profile_icon_id: summoner.profile_icon_id,
        };
        self.cache.set(&key, &profile).await?;
        Ok(Some(profile))
    }
}

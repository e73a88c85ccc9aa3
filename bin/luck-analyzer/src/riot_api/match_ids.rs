use super::RiotMatchProvider;
use anyhow::Context;
use tracing::debug;

// Max value that Riot API accepts for getting match IDs
const MAX_MATCHES: u32 = 100;

impl RiotMatchProvider {
    /// Get the newest match IDs of a player in the configured queue.
    #[tracing::instrument(skip(self))]
    pub(super) async fn get_match_ids(
        &self,
        puuid: &str,
        count: u32,
        since: Option<i64>,
    ) -> anyhow::Result<Vec<String>> {
        let count = count.clamp(1, MAX_MATCHES);
        let key = format!("matches_{puuid}_{count}_{}", since.unwrap_or(0));

        self.cache
            .get_or_fetch(&key, || async {
                self.pacer.wait().await;
                let match_ids = self
                    .riot_api
                    .match_v5()
                    .get_match_ids_by_puuid(
                        self.regional,
                        puuid,
                        Some(count as i32),
                        None,
                        Some(self.queue),
                        since,
                        None,
                        None,
                    )
                    .await
                    .context("Failed to fetch match IDs")?;
                debug!("Got {} match IDs", match_ids.len());
                Ok::<_, anyhow::Error>(match_ids)
            })
            .await
    }
}

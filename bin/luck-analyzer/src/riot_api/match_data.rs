use super::{convert, RiotMatchProvider};
use anyhow::Context;
use luck_analyzer_evaluation::MatchRecord;
use tracing::{debug, warn};

impl RiotMatchProvider {
    /// Fetch a match and, when enabled, its timeline for the fifteen minute
    /// lane differentials. The finished record is what gets cached.
    #[tracing::instrument(skip(self))]
    pub(super) async fn get_match(&self, match_id: &str) -> anyhow::Result<MatchRecord> {
        let key = format!("match_{match_id}");
        self.cache
            .get_or_fetch(&key, || async {
                self.pacer.wait().await;
                let data = self
                    .riot_api
                    .match_v5()
                    .get_match(self.regional, match_id)
                    .await
                    .context("Failed to fetch match")?
                    .with_context(|| format!("Match {match_id} does not exist"))?;
                let mut record = convert::match_record(&data);

                if self.fetch_timelines {
                    self.apply_timeline(&mut record).await?;
                }
                debug!("Fetched match data: {match_id}");
                Ok::<_, anyhow::Error>(record)
            })
            .await
    }

    /// A match without a timeline keeps its differentials absent.
    async fn apply_timeline(&self, record: &mut MatchRecord) -> anyhow::Result<()> {
        self.pacer.wait().await;
        let timeline = self
            .riot_api
            .match_v5()
            .get_timeline(self.regional, &record.match_id)
            .await
            .context("Failed to fetch match timeline")?;
        match timeline {
            Some(timeline) => record.apply_timeline(&convert::timeline_frames(&timeline)),
            None => warn!("No timeline for {}", record.match_id),
        }
        Ok(())
    }
}

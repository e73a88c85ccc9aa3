use anyhow::Context;
use chrono::{NaiveDate, NaiveTime};
use luck_analyzer_evaluation::ScoringConfig;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tokio::fs::read_to_string;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rgapi_key: String,
    /// Platform the summoners play on, e.g. `euw1`.
    pub region: String,
    pub listen_addr: String,
    pub database_url: String,
    /// Matches played before this date are not fetched.
    pub season_start: NaiveDate,
    pub default_match_count: u32,
    pub queue_id: u16,
    pub requests_per_second: u32,
    pub memory_ttl_secs: u64,
    pub disk_ttl_days: u64,
    pub fetch_timelines: bool,
    pub ddragon_version: Option<String>,
    pub scoring: ScoringConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rgapi_key: String::new(),
            region: "euw1".to_string(),
            listen_addr: "0.0.0.0:3000".to_string(),
            database_url: "sqlite://cache.db?mode=rwc".to_string(),
            season_start: NaiveDate::from_ymd_opt(2026, 1, 8).unwrap_or_default(),
            default_match_count: 20,
            queue_id: 420,
            requests_per_second: 18,
            memory_ttl_secs: 600,
            disk_ttl_days: 7,
            fetch_timelines: true,
            ddragon_version: None,
            scoring: ScoringConfig::default(),
        }
    }
}

impl Config {
    pub async fn load(path: Option<impl AsRef<Path>>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_file(path).await?,
            None => Default::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config
            .scoring
            .validate()
            .context("Invalid scoring configuration")?;
        Ok(config)
    }

    async fn load_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(toml::from_str(&contents)?)
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        self.rgapi_key = var("RGAPI_KEY").unwrap_or(std::mem::take(&mut self.rgapi_key));
        self.region = var("REGION").unwrap_or(std::mem::take(&mut self.region));
        self.database_url = var("DATABASE_URL").unwrap_or(std::mem::take(&mut self.database_url));
        self.listen_addr = var("LISTEN_ADDR").unwrap_or(std::mem::take(&mut self.listen_addr));
        if let Some(rps) = var("REQUESTS_PER_SECOND") {
            self.requests_per_second = rps
                .parse()
                .context("REQUESTS_PER_SECOND should be numeric")?;
        }
        Ok(())
    }

    /// Season start as a Unix timestamp in seconds.
    pub fn season_start_timestamp(&self) -> i64 {
        self.season_start.and_time(NaiveTime::MIN).and_utc().timestamp()
    }

    pub fn memory_ttl(&self) -> Duration {
        Duration::from_secs(self.memory_ttl_secs)
    }

    pub fn disk_ttl(&self) -> Duration {
        Duration::from_secs(self.disk_ttl_days * 24 * 60 * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luck_analyzer_evaluation::config::NormalizationMode;
    use std::collections::HashMap;

    #[test]
    fn parses_partial_file() {
        let config: Config = toml::from_str(
            r#"
            region = "na1"
            season_start = "2025-01-09"
            fetch_timelines = false

            [scoring.normalization]
            mode = "percentile"

            [scoring.performance.kda]
            weight = 20
            perfect = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.region, "na1");
        assert!(!config.fetch_timelines);
        assert_eq!(config.default_match_count, 20);
        assert_eq!(config.queue_id, 420);
        assert_eq!(config.scoring.normalization.mode, NormalizationMode::Percentile);
        assert_eq!(config.scoring.performance.kda.perfect, 5.0);
        assert!(!config.scoring.role_adjustments.enabled);
        assert_eq!(config.season_start_timestamp(), 1_736_380_800);
    }

    #[test]
    fn example_file_matches_defaults() {
        let config: Config = toml::from_str(include_str!("../config.example.toml")).unwrap();
        assert_eq!(config.scoring, ScoringConfig::default());
        assert_eq!(config.season_start, Config::default().season_start);
        assert!(config.scoring.validate().is_ok());
    }

    #[test]
    fn default_season_start() {
        let config = Config::default();
        assert_eq!(config.season_start_timestamp(), 1_767_830_400);
        assert_eq!(config.disk_ttl(), Duration::from_secs(604_800));
        assert!(config.scoring.role_adjustments.enabled);
    }

    #[test]
    fn environment_overrides_file() {
        let env: HashMap<&str, &str> = [
            ("RGAPI_KEY", "RGAPI-test"),
            ("REGION", "kr"),
            ("REQUESTS_PER_SECOND", "5"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.rgapi_key, "RGAPI-test");
        assert_eq!(config.region, "kr");
        assert_eq!(config.requests_per_second, 5);
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
    }

    #[test]
    fn non_numeric_override_is_an_error() {
        let mut config = Config::default();
        let result = config.apply_overrides(|key| {
            (key == "REQUESTS_PER_SECOND").then(|| "fast".to_string())
        });
        assert!(result.is_err());
    }
}

use std::fmt::Display;
use tracing::{debug, warn};

const VERSIONS_URL: &str = "https://ddragon.leagueoflegends.com/api/versions.json";
const CDN_URL: &str = "https://ddragon.leagueoflegends.com/cdn";
const FALLBACK_VERSION: &str = "14.1.1";

#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub struct DataDragonVersion(String);

impl Display for DataDragonVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Icon URLs on the Data Dragon CDN for a single patch.
#[derive(Debug, Clone)]
pub struct DataDragon {
    version: DataDragonVersion,
}

impl DataDragon {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: DataDragonVersion(version.into()),
        }
    }

    /// Use the configured version if there is one, otherwise the latest
    /// published patch. Falls back to a fixed patch when the CDN is unreachable.
    pub async fn resolve(configured: Option<&str>) -> Self {
        if let Some(version) = configured {
            return Self::new(version);
        }
        match fetch_latest_version().await {
            Ok(version) => {
                debug!("Using Data Dragon version {version}");
                Self::new(version)
            }
            Err(e) => {
                warn!("Failed to fetch Data Dragon versions, using {FALLBACK_VERSION}: {e:?}");
                Self::new(FALLBACK_VERSION)
            }
        }
    }

    pub fn version(&self) -> &DataDragonVersion {
        &self.version
    }

    pub fn champion_icon_url(&self, champion: &str) -> Option<String> {
        if champion.is_empty() {
            return None;
        }
        Some(format!(
            "{CDN_URL}/{}/img/champion/{}.png",
            self.version,
            champion_asset_name(champion)
        ))
    }

    pub fn profile_icon_url(&self, profile_icon_id: i32) -> Option<String> {
        if profile_icon_id <= 0 {
            return None;
        }
        Some(format!(
            "{CDN_URL}/{}/img/profileicon/{profile_icon_id}.png",
            self.version
        ))
    }
}

/// Match data and Data Dragon disagree on a few champion names.
fn champion_asset_name(champion: &str) -> &str {
    match champion {
        "FiddleSticks" => "Fiddlesticks",
        "Nunu&Willump" => "Nunu",
        "RenataGlasc" => "Renata",
        other => other,
    }
}

async fn fetch_latest_version() -> anyhow::Result<String> {
    let versions: Vec<String> = reqwest::get(VERSIONS_URL).await?.json().await?;
    versions
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("Data Dragon returned no versions"))
}

use anyhow::Context;
use config::Config;
use ddragon::DataDragon;
use handler::AppState;
use luck_analyzer_cache::{CacheHandler, SqlitePoolOptions};
use riot_api::RiotMatchProvider;
use riven::RiotApi;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

mod analysis;
mod config;
mod ddragon;
mod handler;
mod riot_api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_tracing_subscriber();

    info!("Loading configuration");
    let config = Config::load(std::env::args().nth(1)).await?;
    if config.rgapi_key.is_empty() {
        anyhow::bail!("RGAPI_KEY is not set");
    }

    // Setup cache
    info!("Setting up cache");
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .with_context(|| format!("Failed to open {}", config.database_url))?;
    let cache = CacheHandler::new(pool).with_ttl(config.memory_ttl(), config.disk_ttl());
    cache.migrate().await?;
    let cache = Arc::new(cache);

    // Setup Riot API
    info!("Setting up Riot API client for {}", config.region);
    let riot_api = Arc::new(RiotApi::new(config.rgapi_key.clone()));
    let provider = RiotMatchProvider::new(riot_api, cache.clone(), &config)?;

    let ddragon = DataDragon::resolve(config.ddragon_version.as_deref()).await;
    info!("Using Data Dragon version {}", ddragon.version());

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    let state = AppState {
        provider: Arc::new(provider),
        cache,
        config: Arc::new(config),
        ddragon: Arc::new(ddragon),
    };

    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, handler::router(state)).await?;
    Ok(())
}

fn setup_tracing_subscriber() {
    let layer = fmt::layer()
        .pretty()
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_names(true)
        .with_thread_ids(false)
        .with_target(false);
    tracing_subscriber::registry()
        .with(layer)
        .with(EnvFilter::from_default_env())
        .init();
}

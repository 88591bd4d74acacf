use std::sync::Arc;

use poise::serenity_prelude::{ChannelId, Http};
use riftwatch_db::SharedDatabase;
use riftwatch_notify::DiscordSink;
use riftwatch_ranking::RankingApiClient;
use riftwatch_riot_api::api::LolApiClient;
use riftwatch_tracker::{Tracker, TrackerConfig};
use tracing::{error, info};

use config::Config;

mod config;
mod logging;

#[tokio::main]
async fn main() {
    logging::init();

    info!("🔭 Starting...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let db = SharedDatabase::new_from_env().expect("database creation should succeed");
    db.init().await;

    let api = Arc::new(LolApiClient::new(config.riot_api_key.clone()));
    api.start_metrics_logging();

    let ranking = Arc::new(RankingApiClient::with_base_url(
        config.ranking_base_url.clone(),
    ));

    let http = Arc::new(Http::new(&config.discord_token));
    let sink = Arc::new(DiscordSink::new(
        http,
        ChannelId::new(config.alert_channel_id),
    ));

    let mut tracker = Tracker::new(
        api,
        ranking,
        sink,
        db,
        TrackerConfig {
            credential: config.riot_api_key,
            region: config.region,
            poll_interval: config.poll_interval,
            ranking_alerts_enabled: config.ranking_alerts_enabled,
        },
    );

    if let Err(e) = tracker.init().await {
        error!("initialization failed: {}", e);
        std::process::exit(1);
    }

    tracker
        .start()
        .await
        .expect("tracker task should not panic");
}

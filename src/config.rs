use std::env;
use std::time::Duration;

use riftwatch_shared::Region;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub riot_api_key: String,
    pub discord_token: String,
    pub alert_channel_id: u64,
    pub region: Region,
    pub poll_interval: Duration,
    pub ranking_alerts_enabled: bool,
    pub ranking_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        const DEFAULT_POLL_INTERVAL_SECS: u64 = 120;

        let riot_api_key = env::var("RIOT_API_KEY")
            .map_err(|_| ConfigError::Invalid("RIOT_API_KEY must be set".into()))?;

        let discord_token = env::var("DISCORD_BOT_TOKEN")
            .map_err(|_| ConfigError::Invalid("DISCORD_BOT_TOKEN must be set".into()))?;

        let alert_channel_id = env::var("ALERT_CHANNEL_ID")
            .map_err(|_| ConfigError::Invalid("ALERT_CHANNEL_ID must be set".into()))?
            .parse()
            .map_err(|_| ConfigError::Invalid("ALERT_CHANNEL_ID must be a channel id".into()))?;

        let region = env::var("REGION")
            .map(Region::try_from)
            .unwrap_or(Ok(Region::Euw))
            .map_err(ConfigError::Invalid)?;

        let poll_interval_secs = env::var("POLL_INTERVAL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);

        let ranking_alerts_enabled = env::var("RANKING_ALERTS_ENABLED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(true);

        let ranking_base_url = env::var("RANKING_BASE_URL")
            .unwrap_or_else(|_| riftwatch_ranking::DEFAULT_BASE_URL.to_string());

        Ok(Self {
            riot_api_key,
            discord_token,
            alert_channel_id,
            region,
            poll_interval: Duration::from_secs(poll_interval_secs),
            ranking_alerts_enabled,
            ranking_base_url,
        })
    }
}

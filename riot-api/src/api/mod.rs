mod summoner_v4;

pub mod client;
pub mod match_v4;
pub mod metrics;
pub mod spectator_v4;

pub mod dto {
    pub use super::match_v4::{MatchDto, ParticipantDto, ParticipantIdentityDto};
    pub use super::spectator_v4::{CurrentGameDto, CurrentGameParticipantDto};
    pub use super::summoner_v4::SummonerDto;
}

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use client::ApiClientBase;
use reqwest::StatusCode;
use riftwatch_shared::{
    Region,
    live_match::{LiveMatch, MatchResult},
    traits::api::{ApiError, MatchResultApi, MatchSourceFull, SpectatorApi, Summoner, SummonerApi},
};

use crate::types::{RiotApiError, RiotApiResponse};

/// High level client implementing every match-source API used by the
/// tracker.
#[derive(Debug)]
pub struct LolApiClient(Arc<ApiClientBase>);

impl LolApiClient {
    /// Create a new API client using the provided key.
    pub fn new(api_key: String) -> Self {
        Self(Arc::new(ApiClientBase::new(api_key)))
    }

    /// Spawn a task logging periodic metrics about requests.
    pub fn start_metrics_logging(&self) {
        let metrics = self.0.metrics.clone();
        tokio::spawn(async move { metrics.log_loop().await });
    }

    /// Override the endpoint host, used by tests to point at a mock server.
    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self(Arc::new(ApiClientBase::with_base_url(api_key, base_url)))
    }

    fn base_for(&self, region: Region) -> String {
        self.0
            .base_url
            .clone()
            .unwrap_or_else(|| format!("https://{}", region.to_endpoint()))
    }
}

#[async_trait]
impl SummonerApi for LolApiClient {
    async fn get_summoner_by_name(
        &self,
        name: String,
        region: Region,
    ) -> Result<Summoner, ApiError> {
        let dto = summoner_v4::get_summoner_by_name(&self.0, self.base_for(region), &name).await?;
        Ok(Summoner {
            id: dto.id,
            name: dto.name,
        })
    }
}

#[async_trait]
impl SpectatorApi for LolApiClient {
    async fn get_live_match(
        &self,
        summoner_id: String,
        region: Region,
    ) -> Result<Option<LiveMatch>, ApiError> {
        let res = spectator_v4::get_active_game(&self.0, self.base_for(region), &summoner_id).await;
        match res {
            Ok(dto) => Ok(Some(dto.into())),
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl MatchResultApi for LolApiClient {
    async fn get_match_result(
        &self,
        game_id: i64,
        region: Region,
    ) -> Result<Option<MatchResult>, ApiError> {
        let res = match_v4::get_match(&self.0, self.base_for(region), game_id).await;
        match res {
            Ok(dto) => Ok(Some(dto.into())),
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl MatchSourceFull for LolApiClient {}

/// A 404 from the spectator or match endpoint is a normal "no data yet"
/// answer, never a failure.
fn is_not_found(e: &RiotApiError) -> bool {
    matches!(e, RiotApiError::Status(StatusCode::NOT_FOUND))
}

pub(crate) fn decode<T: serde::de::DeserializeOwned>(bytes: Bytes) -> RiotApiResponse<T> {
    serde_json::from_slice(&bytes).map_err(RiotApiError::Serde)
}

//! Client for the external bootcamp ranking provider.
//!
//! The provider exposes one endpoint returning the whole ranking table at
//! once; the tracker refreshes it wholesale on every tick and diffs the
//! positions against what it last announced.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use riftwatch_shared::{
    ranking::{RankingEntry, RankingSnapshot},
    traits::{RankingSource, api::ApiError},
};

pub const DEFAULT_BASE_URL: &str = "https://www.trackingthepros.com";

#[derive(Debug, Error)]
pub enum RankingApiError {
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("HTTP status error: {0}")]
    Status(reqwest::StatusCode),
}

/// HTTP client fetching the full bootcamp ranking table.
#[derive(Debug)]
pub struct RankingApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl RankingApiClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    async fn fetch_rows(&self) -> Result<Vec<RankingRowDto>, RankingApiError> {
        tracing::trace!("[RANKING::CLIENT] get bootcamp list");

        let res = self
            .client
            .get(format!("{}/d/list_bootcamp", self.base_url))
            .query(&[("existing", "no")])
            .send()
            .await?;

        match res.status() {
            reqwest::StatusCode::OK => {
                let body: RankingResponseDto = res.json().await?;
                Ok(body.data)
            }
            status => Err(RankingApiError::Status(status)),
        }
    }
}

impl Default for RankingApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RankingSource for RankingApiClient {
    async fn get_ranking_snapshot(&self) -> Result<RankingSnapshot, ApiError> {
        let rows = self.fetch_rows().await?;
        Ok(RankingSnapshot::from_entries(
            rows.into_iter().map(Into::into).collect(),
        ))
    }
}

/// Envelope of the ranking table response.
#[derive(Deserialize, Debug)]
struct RankingResponseDto {
    data: Vec<RankingRowDto>,
}

/// One row of the ranking table response. The provider sends many more
/// fields; only the position and the player label matter here.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RankingRowDto {
    pub player: String,
    pub rank_num: u32,
}

impl From<RankingRowDto> for RankingEntry {
    fn from(value: RankingRowDto) -> Self {
        Self {
            position: value.rank_num,
            display_name: value.player,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn snapshot_is_ordered_by_position() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/d/list_bootcamp")
                .query_param("existing", "no");
            then.status(200).json_body(serde_json::json!({
                "data": [
                    { "player": "Bob", "rankNum": 2, "team": "T1" },
                    { "player": "Alice", "rankNum": 1, "team": "T2" }
                ]
            }));
        });

        let client = RankingApiClient::with_base_url(server.base_url());
        let snapshot = client.get_ranking_snapshot().await.unwrap();

        assert_eq!(snapshot.entries().len(), 2);
        assert_eq!(snapshot.entries()[0].display_name, "Alice");
        assert_eq!(snapshot.entry_for("Bob").unwrap().position, 2);
    }

    #[tokio::test]
    async fn server_errors_are_propagated() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/d/list_bootcamp");
            then.status(500);
        });

        let client = RankingApiClient::with_base_url(server.base_url());
        assert!(client.get_ranking_snapshot().await.is_err());
    }
}

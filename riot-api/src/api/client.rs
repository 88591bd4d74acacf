use std::sync::Arc;

use bytes::Bytes;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use nonzero_ext::nonzero;
use reqwest::StatusCode;

use crate::types::{RiotApiError, RiotApiResponse};

use super::metrics::RequestMetrics;

/// Raw HTTP client shared by every endpoint wrapper: holds the reqwest
/// client, the rate limiter and the credential header.
#[derive(Debug)]
pub struct ApiClientBase {
    pub client: reqwest::Client,
    pub limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    /// Riot API Key
    key: String,
    pub metrics: Arc<RequestMetrics>,
    /// When set, endpoint wrappers target this host instead of the regional
    /// one. Test hook only.
    pub base_url: Option<String>,
}

impl ApiClientBase {
    pub fn new(api_key: String) -> Self {
        let q = Quota::per_minute(nonzero!(100_u32)).allow_burst(nonzero!(20_u32));

        Self {
            client: reqwest::Client::new(),
            limiter: RateLimiter::direct(q),
            key: api_key,
            metrics: RequestMetrics::new("riot"),
            base_url: None,
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            base_url: Some(base_url),
            ..Self::new(api_key)
        }
    }

    pub async fn request(&self, path: String) -> RiotApiResponse<Bytes> {
        // Wait out the Riot API rate limits before doing any request.
        self.limiter.until_ready().await;
        self.metrics.inc();

        let res = self
            .client
            .get(path)
            .header("X-Riot-Token", &self.key)
            .send()
            .await
            .inspect_err(|_| self.metrics.inc_failure())
            .map_err(RiotApiError::Reqwest)?;
        match res.status() {
            StatusCode::OK => res.bytes().await.map_err(RiotApiError::Reqwest),
            // A 404 is a normal "no data" answer for the spectator and
            // match endpoints, it does not count as a failure.
            StatusCode::NOT_FOUND => Err(RiotApiError::Status(StatusCode::NOT_FOUND)),
            status => {
                self.metrics.inc_failure();
                Err(RiotApiError::Status(status))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApiClientBase;

    #[tokio::test]
    async fn request_propagates_reqwest_error() {
        let client = ApiClientBase::new("TEST_KEY".to_string());

        let bad_url = "ht!tp://invalid-url".to_string(); // incorrect schema

        let res = client.request(bad_url).await;

        assert!(matches!(res, Err(crate::types::RiotApiError::Reqwest(_))));
    }
}

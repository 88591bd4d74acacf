use serde::Deserialize;
use urlencoding::encode;

use crate::types::RiotApiResponse;

use super::{client::ApiClientBase, decode};

pub async fn get_summoner_by_name(
    client: &ApiClientBase,
    base: String,
    name: &str,
) -> RiotApiResponse<SummonerDto> {
    tracing::trace!("[RIOT::CLIENT] get_summoner_by_name {}", name);

    let path = format!("{}/lol/summoner/v4/summoners/by-name/{}", base, encode(name));

    client.request(path).await.and_then(decode)
}

/// Representation of the summoner data response.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    /// Encrypted summoner id, only valid under the API key that fetched it.
    pub id: String,
    pub name: String,
}

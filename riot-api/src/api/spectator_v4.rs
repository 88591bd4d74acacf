use riftwatch_shared::live_match::{LiveMatch, LiveParticipant};
use serde::Deserialize;
use urlencoding::encode;

use crate::types::RiotApiResponse;

use super::{client::ApiClientBase, decode};

pub async fn get_active_game(
    client: &ApiClientBase,
    base: String,
    summoner_id: &str,
) -> RiotApiResponse<CurrentGameDto> {
    tracing::trace!("[RIOT::CLIENT] get_active_game {}", summoner_id);

    let path = format!(
        "{}/lol/spectator/v4/active-games/by-summoner/{}",
        base,
        encode(summoner_id)
    );

    client.request(path).await.and_then(decode)
}

/// Representation of the live game data response.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CurrentGameDto {
    pub game_id: i64,
    pub participants: Vec<CurrentGameParticipantDto>,
}

/// Representation of a live game participant.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CurrentGameParticipantDto {
    pub summoner_id: String,
    pub summoner_name: String,
}

impl From<CurrentGameDto> for LiveMatch {
    fn from(value: CurrentGameDto) -> Self {
        Self {
            game_id: value.game_id,
            participants: value
                .participants
                .into_iter()
                .map(|p| LiveParticipant {
                    summoner_id: p.summoner_id,
                    summoner_name: p.summoner_name,
                })
                .collect(),
        }
    }
}

use riftwatch_shared::live_match::{MatchResult, ResultParticipant};
use serde::Deserialize;

use crate::types::RiotApiResponse;

use super::{client::ApiClientBase, decode};

pub async fn get_match(
    client: &ApiClientBase,
    base: String,
    game_id: i64,
) -> RiotApiResponse<MatchDto> {
    tracing::trace!("[RIOT::CLIENT] get_match {}", game_id);

    let path = format!("{}/lol/match/v4/matches/{}", base, game_id);

    client.request(path).await.and_then(decode)
}

/// Representation of the match data response.
///
/// The endpoint splits identities from stats; the two lists are joined on
/// `participant_id` when converting to a [`MatchResult`].
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    pub game_id: i64,
    pub participant_identities: Vec<ParticipantIdentityDto>,
    pub participants: Vec<ParticipantDto>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantIdentityDto {
    pub participant_id: u8,
    pub player: ParticipantPlayerDto,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantPlayerDto {
    pub summoner_id: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub participant_id: u8,
    pub stats: ParticipantStatsDto,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantStatsDto {
    pub win: bool,
    pub kills: u16,
    pub deaths: u16,
    pub assists: u16,
}

impl From<MatchDto> for MatchResult {
    fn from(value: MatchDto) -> Self {
        let participants = value
            .participant_identities
            .into_iter()
            .filter_map(|identity| {
                value
                    .participants
                    .iter()
                    .find(|p| p.participant_id == identity.participant_id)
                    .map(|p| ResultParticipant {
                        summoner_id: identity.player.summoner_id,
                        win: p.stats.win,
                        kills: p.stats.kills,
                        deaths: p.stats.deaths,
                        assists: p.stats.assists,
                    })
            })
            .collect();

        Self {
            game_id: value.game_id,
            participants,
        }
    }
}

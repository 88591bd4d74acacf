//! In-memory views of a live and of a finished match as reported by the
//! remote match source.

use crate::Player;

/// A match currently in progress for at least one participant.
#[derive(Debug, Clone)]
pub struct LiveMatch {
    pub game_id: i64,
    pub participants: Vec<LiveParticipant>,
}

#[derive(Debug, Clone)]
pub struct LiveParticipant {
    pub summoner_id: String,
    pub summoner_name: String,
}

impl LiveMatch {
    /// Tracked players taking part in this match, in roster order.
    ///
    /// A player without a resolved summoner id can never match.
    pub fn tracked_players<'a>(&self, roster: &'a [Player]) -> Vec<&'a Player> {
        roster
            .iter()
            .filter(|player| {
                player.summoner_id.as_deref().is_some_and(|id| {
                    self.participants.iter().any(|p| p.summoner_id == id)
                })
            })
            .collect()
    }
}

/// The detailed result of a completed match.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub game_id: i64,
    pub participants: Vec<ResultParticipant>,
}

#[derive(Debug, Clone)]
pub struct ResultParticipant {
    pub summoner_id: String,
    pub win: bool,
    pub kills: u16,
    pub deaths: u16,
    pub assists: u16,
}

impl MatchResult {
    /// Pair each tracked player with its participant entry, in roster order.
    pub fn tracked_participants<'a>(
        &'a self,
        roster: &'a [Player],
    ) -> Vec<(&'a Player, &'a ResultParticipant)> {
        roster
            .iter()
            .filter_map(|player| {
                let id = player.summoner_id.as_deref()?;
                self.participants
                    .iter()
                    .find(|p| p.summoner_id == id)
                    .map(|p| (player, p))
            })
            .collect()
    }
}

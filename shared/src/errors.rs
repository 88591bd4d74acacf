use thiserror::Error;

use crate::traits::{api::ApiError, CachedSourceError, SinkError};

/// Failures the reconciliation core can hit while processing one entity.
///
/// None of these are fatal: the tick logs them and moves on, the entity is
/// retried on a later tick.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("remote match source error: {0}")]
    Api(ApiError),
    #[error("repository error: {0}")]
    Cache(CachedSourceError),
    #[error("notification sink error: {0}")]
    Sink(SinkError),
    #[error("tracked participants of game {game_id} are not on the same team")]
    MixedTeams { game_id: i64 },
    #[error("game {game_id} finished without any tracked participant")]
    NoTrackedParticipant { game_id: i64 },
    #[error("player {display_name} is missing from the ranking snapshot")]
    MissingFromRanking { display_name: String },
}

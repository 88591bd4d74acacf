//! Traits implemented by the external collaborators of the reconciliation
//! core: the repository, the remote sources and the notification sink.

use async_trait::async_trait;
use std::error::Error as ErrorT;

use crate::{
    live_match::{LiveMatch, MatchResult},
    ranking::RankingSnapshot,
    Game, Player, PostId,
};

pub type CachedSourceError = Box<dyn ErrorT + Send + Sync>;

/// Repository access to the tracked player roster.
#[async_trait]
pub trait CachedPlayerSource: Send + Sync {
    async fn get_all_players(&self) -> Result<Vec<Player>, CachedSourceError>;

    async fn set_summoner_id(
        &self,
        player_id: i64,
        summoner_id: String,
    ) -> Result<(), CachedSourceError>;

    /// Invalidate every resolved summoner id at once. Used when the
    /// credential that produced them rotates.
    async fn clear_all_summoner_ids(&self) -> Result<(), CachedSourceError>;

    async fn get_last_rank_position(
        &self,
        player_id: i64,
    ) -> Result<Option<u32>, CachedSourceError>;

    async fn set_last_rank_position(
        &self,
        player_id: i64,
        position: u32,
    ) -> Result<(), CachedSourceError>;
}

/// Repository access to announced games.
#[async_trait]
pub trait CachedGameSource: Send + Sync {
    /// Record a newly announced game together with the post that announced
    /// it. The game id is the primary key: inserting an already recorded
    /// game is an error.
    async fn insert_game(&self, game_id: i64, post_id: PostId) -> Result<(), CachedSourceError>;

    async fn set_game_finished(&self, game_id: i64) -> Result<(), CachedSourceError>;

    async fn get_unfinished_games(&self) -> Result<Vec<Game>, CachedSourceError>;

    async fn is_game_recorded(&self, game_id: i64) -> Result<bool, CachedSourceError>;
}

/// Repository access to the opaque settings map.
#[async_trait]
pub trait CachedSettingSource: Send + Sync {
    async fn get_setting(&self, key: &str) -> Result<Option<String>, CachedSourceError>;

    async fn set_setting(&self, key: &str, value: &str) -> Result<(), CachedSourceError>;
}

/// Super-trait covering the full repository surface the core needs.
pub trait CacheFull: CachedPlayerSource + CachedGameSource + CachedSettingSource {}

/// Full snapshot provider for the external ranking table.
#[async_trait]
pub trait RankingSource: Send + Sync {
    async fn get_ranking_snapshot(&self) -> Result<RankingSnapshot, api::ApiError>;
}

pub type SinkError = Box<dyn ErrorT + Send + Sync>;

/// Outbound social posting, optionally threaded below a previous post.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn post(&self, text: &str, reply_to: Option<&PostId>) -> Result<PostId, SinkError>;
}

pub mod api {
    use super::*;
    use crate::Region;

    pub type ApiError = Box<dyn ErrorT + Send + Sync + 'static>;

    /// A summoner as resolved by name.
    #[derive(Debug, Clone)]
    pub struct Summoner {
        pub id: String,
        pub name: String,
    }

    /// Summoner-V4 lookup used by the identity resolver.
    #[async_trait]
    pub trait SummonerApi: Send + Sync {
        async fn get_summoner_by_name(
            &self,
            name: String,
            region: Region,
        ) -> Result<Summoner, ApiError>;
    }

    /// Spectator-V4 live-game lookup. `None` means the summoner is not
    /// currently in a match, a normal try-again-next-tick signal.
    #[async_trait]
    pub trait SpectatorApi: Send + Sync {
        async fn get_live_match(
            &self,
            summoner_id: String,
            region: Region,
        ) -> Result<Option<LiveMatch>, ApiError>;
    }

    /// Match result lookup. `None` means the match is still in progress.
    #[async_trait]
    pub trait MatchResultApi: Send + Sync {
        async fn get_match_result(
            &self,
            game_id: i64,
            region: Region,
        ) -> Result<Option<MatchResult>, ApiError>;
    }

    /// All match-source APIs required by the core.
    pub trait MatchSourceFull: SummonerApi + SpectatorApi + MatchResultApi {}
}

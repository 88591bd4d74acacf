//! The reconciliation core: polls the remote sources on a fixed interval,
//! diffs what it sees against what was already announced, and posts the
//! missing notifications.
//!
//! One [`Tracker`] owns an in-memory roster cache and the last ranking
//! snapshot, both replaced wholesale, never mutated in place. Each tick
//! runs three sub-procedures in fixed order; a failure inside one is
//! logged and scoped to the entity being processed, so a single bad
//! lookup never aborts the rest of the tick.

use std::{sync::Arc, time::Duration};

use futures::{stream, StreamExt};
use tracing::{debug, error, info, warn};

use riftwatch_shared::{
    errors::TrackerError,
    live_match::LiveMatch,
    ranking::RankingSnapshot,
    traits::{
        api::MatchSourceFull, CacheFull, NotificationSink, RankingSource,
    },
    Game, Player, Region,
};

pub mod identity;
pub mod text;

/// How many unfinished games are checked concurrently within one tick.
const RESULT_CONCURRENCY: usize = 5;

/// Runtime settings of the reconciliation loop.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Remote-source credential, fingerprinted to invalidate stale
    /// summoner ids.
    pub credential: String,
    pub region: Region,
    pub poll_interval: Duration,
    pub ranking_alerts_enabled: bool,
}

/// The reconciliation engine.
pub struct Tracker<Api, Rank, Sink, Cache> {
    api: Arc<Api>,
    ranking: Arc<Rank>,
    sink: Arc<Sink>,
    cache: Cache,
    config: TrackerConfig,
    roster: Vec<Player>,
    last_snapshot: Option<RankingSnapshot>,
}

impl<Api, Rank, Sink, Cache> Tracker<Api, Rank, Sink, Cache>
where
    Api: MatchSourceFull + Send + Sync + 'static,
    Rank: RankingSource + Send + Sync + 'static,
    Sink: NotificationSink + Send + Sync + 'static,
    Cache: CacheFull + Send + Sync + 'static,
{
    pub fn new(
        api: Arc<Api>,
        ranking: Arc<Rank>,
        sink: Arc<Sink>,
        cache: Cache,
        config: TrackerConfig,
    ) -> Self {
        Self {
            api,
            ranking,
            sink,
            cache,
            config,
            roster: Vec::new(),
            last_snapshot: None,
        }
    }

    /// One-time startup work: credential validation, identity resolution
    /// and the initial roster load. Must run before the first tick.
    pub async fn init(&mut self) -> Result<(), TrackerError> {
        identity::validate_credential_fingerprint(&self.cache, &self.config.credential).await?;

        self.refresh_roster().await?;

        let changed = identity::resolve_missing_summoner_ids(
            &self.cache,
            self.api.as_ref(),
            &self.roster,
            self.config.region,
        )
        .await?;

        if changed {
            self.refresh_roster().await?;
        }

        info!("tracking {} players", self.roster.len());
        Ok(())
    }

    /// Replace the in-memory roster with a fresh repository read.
    async fn refresh_roster(&mut self) -> Result<(), TrackerError> {
        self.roster = self
            .cache
            .get_all_players()
            .await
            .map_err(TrackerError::Cache)?;
        Ok(())
    }

    /// Spawn the interval loop. The first tick fires immediately; ticks
    /// are serialized by construction, a long one delays the next instead
    /// of overlapping it.
    pub fn start(mut self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            info!("tracker started, ticking every {:?}", self.config.poll_interval);

            let mut interval = tokio::time::interval(self.config.poll_interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                self.run_tick().await
            }
        })
    }

    /// One reconciliation pass: finish detection, live detection, ranking
    /// refresh, in that fixed order. Each part shields the others from its
    /// failures.
    pub async fn run_tick(&mut self) {
        info!("🔄 starting check cycle");

        self.check_finished_games().await;
        self.check_live_games().await;
        self.check_ranking().await;
    }

    // --- (a) finish detection -------------------------------------------

    async fn check_finished_games(&self) {
        let games = match self.cache.get_unfinished_games().await {
            Ok(games) => games,
            Err(e) => {
                error!("repository error while fetching unfinished games: {}", e);
                return;
            }
        };

        stream::iter(games)
            .for_each_concurrent(RESULT_CONCURRENCY, |game| async move {
                if let Err(e) = self.process_unfinished_game(&game).await {
                    error!("processing game {} exited with error: {}", game.id, e);
                }
            })
            .await;
    }

    async fn process_unfinished_game(&self, game: &Game) -> Result<(), TrackerError> {
        let result = self
            .api
            .get_match_result(game.id, self.config.region)
            .await
            .map_err(TrackerError::Api)?;

        let Some(result) = result else {
            debug!("game {} still in progress", game.id);
            return Ok(());
        };

        let tracked = result.tracked_participants(&self.roster);
        if tracked.is_empty() {
            return Err(TrackerError::NoTrackedParticipant { game_id: game.id });
        }
        // Tracked players in one announced game share a team; the win flag
        // of the first participant would silently lie if they did not.
        if tracked.iter().any(|(_, p)| p.win != tracked[0].1.win) {
            return Err(TrackerError::MixedTeams { game_id: game.id });
        }

        let body = text::match_result(&tracked, game.id, self.config.region);

        // Post first, mark finished only on success: a transient sink
        // failure is retried on the next tick instead of being dropped.
        self.sink
            .post(&body, Some(&game.post_id))
            .await
            .map_err(TrackerError::Sink)?;
        self.cache
            .set_game_finished(game.id)
            .await
            .map_err(TrackerError::Cache)?;

        info!("📣 posted result for game {}", game.id);
        Ok(())
    }

    // --- (b) live detection ---------------------------------------------

    async fn check_live_games(&self) {
        let mut live_matches: Vec<LiveMatch> = Vec::new();

        for player in &self.roster {
            let Some(summoner_id) = player.summoner_id.clone() else {
                debug!("{} has no summoner id yet, skipping", player.display_name);
                continue;
            };

            match self.api.get_live_match(summoner_id, self.config.region).await {
                // Several tracked players may share one match, keep it once.
                Ok(Some(m)) if !live_matches.iter().any(|g| g.game_id == m.game_id) => {
                    live_matches.push(m)
                }
                Ok(_) => {}
                Err(e) => warn!(
                    "live lookup failed for {}: {}",
                    player.display_name, e
                ),
            }
        }

        for live in live_matches {
            if let Err(e) = self.announce_live_match(&live).await {
                error!("announcing game {} exited with error: {}", live.game_id, e);
            }
        }
    }

    async fn announce_live_match(&self, live: &LiveMatch) -> Result<(), TrackerError> {
        let recorded = self
            .cache
            .is_game_recorded(live.game_id)
            .await
            .map_err(TrackerError::Cache)?;
        if recorded {
            debug!("game {} already announced, skipping", live.game_id);
            return Ok(());
        }

        let tracked = live.tracked_players(&self.roster);
        if tracked.is_empty() {
            // Can only happen when the roster changed under us mid-tick.
            return Err(TrackerError::NoTrackedParticipant { game_id: live.game_id });
        }

        info!(
            "📣 announcing game {} with {:?}",
            live.game_id,
            tracked.iter().map(|p| &p.display_name).collect::<Vec<_>>()
        );

        let body = text::live_match(&tracked, live.game_id);
        let post_id = self.sink.post(&body, None).await.map_err(TrackerError::Sink)?;
        self.cache
            .insert_game(live.game_id, post_id)
            .await
            .map_err(TrackerError::Cache)?;

        Ok(())
    }

    // --- (c) ranking refresh --------------------------------------------

    async fn check_ranking(&mut self) {
        if !self.config.ranking_alerts_enabled {
            return;
        }

        let snapshot = match self.ranking.get_ranking_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("ranking refresh failed, keeping last snapshot: {}", e);
                return;
            }
        };
        self.last_snapshot = Some(snapshot);
        let Some(snapshot) = self.last_snapshot.as_ref() else {
            return;
        };

        for player in &self.roster {
            match self.process_rank_change(player, snapshot).await {
                Ok(()) => {}
                Err(e @ TrackerError::MissingFromRanking { .. }) => warn!("{}", e),
                Err(e) => error!(
                    "rank check for {} exited with error: {}",
                    player.display_name, e
                ),
            }
        }
    }

    async fn process_rank_change(
        &self,
        player: &Player,
        snapshot: &RankingSnapshot,
    ) -> Result<(), TrackerError> {
        let entry = snapshot.entry_for(&player.display_name).ok_or_else(|| {
            TrackerError::MissingFromRanking {
                display_name: player.display_name.clone(),
            }
        })?;

        // Diff against the persisted value, not the roster cache: the
        // roster is only reloaded at startup.
        let last = self
            .cache
            .get_last_rank_position(player.id)
            .await
            .map_err(TrackerError::Cache)?;

        if last == Some(entry.position) {
            return Ok(());
        }

        let body = text::rank_change(player, entry.position, last, snapshot);
        self.sink.post(&body, None).await.map_err(TrackerError::Sink)?;
        self.cache
            .set_last_rank_position(player.id, entry.position)
            .await
            .map_err(TrackerError::Cache)?;

        info!(
            "📣 posted rank change for {} ({:?} -> {})",
            player.display_name, last, entry.position
        );
        Ok(())
    }
}

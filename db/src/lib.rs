//! SQLite based repository used by the tracker.
//!
//! This crate defines the [`SharedDatabase`] type implementing the
//! repository traits from `riftwatch-shared` on top of a single SQLite
//! connection shared across async tasks.

use std::{env, error::Error, path::Path, sync::Arc};

use async_trait::async_trait;
use migrations::DbMigration;
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info};

use riftwatch_shared::{
    traits::{
        CacheFull, CachedGameSource, CachedPlayerSource, CachedSettingSource, CachedSourceError,
    },
    Game, Player, PostId,
};

mod migrations;

/// Thread-safe wrapper around a SQLite database connection used across
/// async tasks.
#[derive(Debug, Clone)]
pub struct SharedDatabase {
    conn: Arc<Mutex<Connection>>,
    init_once: Arc<OnceCell<()>>,
}

#[async_trait]
impl CachedPlayerSource for SharedDatabase {
    async fn get_all_players(&self) -> Result<Vec<Player>, CachedSourceError> {
        let db = self.conn.lock().await;

        let mut stmt = db.prepare(
            "SELECT id, display_name, game_name, summoner_id, profile_slug, last_rank_position
            FROM players",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Player {
                id: row.get(0)?,
                display_name: row.get(1)?,
                game_name: row.get(2)?,
                summoner_id: row.get(3)?,
                profile_slug: row.get(4)?,
                last_rank_position: row.get(5)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| Box::new(e) as Box<dyn Error + Send + Sync>)
    }

    async fn set_summoner_id(
        &self,
        player_id: i64,
        summoner_id: String,
    ) -> Result<(), CachedSourceError> {
        let db = self.conn.lock().await;

        db.execute(
            "UPDATE players SET summoner_id = ?1 WHERE id = ?2",
            params![summoner_id, player_id],
        )?;
        Ok(())
    }

    async fn clear_all_summoner_ids(&self) -> Result<(), CachedSourceError> {
        let db = self.conn.lock().await;

        db.execute("UPDATE players SET summoner_id = NULL", [])?;
        Ok(())
    }

    async fn get_last_rank_position(
        &self,
        player_id: i64,
    ) -> Result<Option<u32>, CachedSourceError> {
        let db = self.conn.lock().await;

        let position: Option<Option<u32>> = db
            .query_row(
                "SELECT last_rank_position FROM players WHERE id = ?1",
                [player_id],
                |row| row.get(0),
            )
            .optional()?;

        Ok(position.flatten())
    }

    async fn set_last_rank_position(
        &self,
        player_id: i64,
        position: u32,
    ) -> Result<(), CachedSourceError> {
        let db = self.conn.lock().await;

        db.execute(
            "UPDATE players SET last_rank_position = ?1 WHERE id = ?2",
            params![position, player_id],
        )?;
        Ok(())
    }
}

#[async_trait]
impl CachedGameSource for SharedDatabase {
    async fn insert_game(&self, game_id: i64, post_id: PostId) -> Result<(), CachedSourceError> {
        let db = self.conn.lock().await;

        // Plain INSERT: the id is the primary key, announcing the same game
        // twice must fail loudly instead of silently overwriting.
        db.execute(
            "INSERT INTO games (id, finished, post_id) VALUES (?1, 0, ?2)",
            params![game_id, post_id],
        )?;
        Ok(())
    }

    async fn set_game_finished(&self, game_id: i64) -> Result<(), CachedSourceError> {
        let db = self.conn.lock().await;

        db.execute("UPDATE games SET finished = 1 WHERE id = ?1", [game_id])?;
        Ok(())
    }

    async fn get_unfinished_games(&self) -> Result<Vec<Game>, CachedSourceError> {
        let db = self.conn.lock().await;

        let mut stmt = db.prepare("SELECT id, finished, post_id FROM games WHERE finished = 0")?;

        let rows = stmt.query_map([], |row| {
            Ok(Game {
                id: row.get(0)?,
                finished: row.get::<_, i64>(1)? != 0,
                post_id: row.get(2)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| Box::new(e) as Box<dyn Error + Send + Sync>)
    }

    async fn is_game_recorded(&self, game_id: i64) -> Result<bool, CachedSourceError> {
        let db = self.conn.lock().await;

        let found: Option<i64> = db
            .query_row("SELECT id FROM games WHERE id = ?1", [game_id], |row| {
                row.get(0)
            })
            .optional()?;

        Ok(found.is_some())
    }
}

#[async_trait]
impl CachedSettingSource for SharedDatabase {
    async fn get_setting(&self, key: &str) -> Result<Option<String>, CachedSourceError> {
        let db = self.conn.lock().await;

        let value: Option<String> = db
            .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;

        Ok(value)
    }

    async fn set_setting(&self, key: &str, value: &str) -> Result<(), CachedSourceError> {
        let db = self.conn.lock().await;

        db.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

impl CacheFull for SharedDatabase {}

impl SharedDatabase {
    /// Create a new database at the given path.
    pub fn new(path: impl AsRef<Path>) -> rusqlite::Result<Self> {
        let conn = Connection::open(path)?;
        Ok(SharedDatabase::from_connection(conn))
    }

    /// Create a new database from the given connection.
    pub fn from_connection(conn: Connection) -> Self {
        info!("opening SQLite connection");
        Self {
            conn: Arc::new(Mutex::new(conn)),
            init_once: Arc::new(OnceCell::new()),
        }
    }

    /// Create a new database using the `DB_PATH` environment variable.
    pub fn new_from_env() -> rusqlite::Result<Self> {
        let db_dir = env::var("DB_PATH").unwrap_or_else(|_| "./".to_string());

        // Expand '~' to the user's home directory
        let db_dir = if db_dir == "~" || db_dir.starts_with("~/") {
            if let Ok(home) = env::var("HOME") {
                format!("{}{}", home, &db_dir[1..])
            } else {
                db_dir
            }
        } else {
            db_dir
        };

        let mut db_path = std::path::PathBuf::from(db_dir);
        db_path.push("riftwatch.db3");
        Self::new(db_path)
    }

    /// Initialize the schemas of the database.
    pub async fn init(&self) {
        let _ = self
            .init_once
            .get_or_init(|| async {
                info!("initializing schema");

                let db = self.conn.lock().await;

                db.execute(
                    "CREATE TABLE IF NOT EXISTS players (
                        id INTEGER PRIMARY KEY,
                        display_name TEXT NOT NULL,
                        game_name TEXT NOT NULL,
                        summoner_id TEXT
                    )",
                    [],
                )
                .unwrap();

                db.execute(
                    "CREATE TABLE IF NOT EXISTS games (
                        id INTEGER PRIMARY KEY,
                        finished INTEGER NOT NULL DEFAULT 0,
                        post_id TEXT NOT NULL
                    )",
                    [],
                )
                .unwrap();

                db.execute(
                    "CREATE TABLE IF NOT EXISTS settings (
                        key TEXT PRIMARY KEY,
                        value TEXT NOT NULL
                    )",
                    [],
                )
                .unwrap();

                debug!("running migrations");
                migrations::V2::do_migration(&db);
                migrations::V3::do_migration(&db);

                info!("database ready");
            })
            .await;
    }

    /// Register a tracked player. Roster management belongs to the
    /// operator, not to the tick loop; this is the hook it (and the tests)
    /// use.
    pub async fn insert_player(
        &self,
        display_name: &str,
        game_name: &str,
        profile_slug: &str,
    ) -> Result<i64, CachedSourceError> {
        let db = self.conn.lock().await;

        db.execute(
            "INSERT INTO players (display_name, game_name, profile_slug) VALUES (?1, ?2, ?3)",
            params![display_name, game_name, profile_slug],
        )?;
        Ok(db.last_insert_rowid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> SharedDatabase {
        let db = SharedDatabase::from_connection(Connection::open_in_memory().unwrap());
        db.init().await;
        db
    }

    #[tokio::test]
    async fn player_roundtrip_and_summoner_id_updates() {
        let db = test_db().await;
        let id = db.insert_player("Alice", "alice in game", "alice-slug").await.unwrap();

        let players = db.get_all_players().await.unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].id, id);
        assert_eq!(players[0].display_name, "Alice");
        assert_eq!(players[0].profile_slug, "alice-slug");
        assert!(players[0].summoner_id.is_none());

        db.set_summoner_id(id, "X123".to_string()).await.unwrap();
        let players = db.get_all_players().await.unwrap();
        assert_eq!(players[0].summoner_id.as_deref(), Some("X123"));

        db.clear_all_summoner_ids().await.unwrap();
        let players = db.get_all_players().await.unwrap();
        assert!(players[0].summoner_id.is_none());
    }

    #[tokio::test]
    async fn rank_position_roundtrip() {
        let db = test_db().await;
        let id = db.insert_player("Alice", "alice", "a").await.unwrap();

        assert_eq!(db.get_last_rank_position(id).await.unwrap(), None);
        db.set_last_rank_position(id, 7).await.unwrap();
        assert_eq!(db.get_last_rank_position(id).await.unwrap(), Some(7));
    }

    #[tokio::test]
    async fn game_lifecycle() {
        let db = test_db().await;

        assert!(!db.is_game_recorded(555).await.unwrap());
        db.insert_game(555, "post-1".to_string()).await.unwrap();
        assert!(db.is_game_recorded(555).await.unwrap());

        let unfinished = db.get_unfinished_games().await.unwrap();
        assert_eq!(unfinished.len(), 1);
        assert_eq!(unfinished[0].post_id, "post-1");

        db.set_game_finished(555).await.unwrap();
        assert!(db.get_unfinished_games().await.unwrap().is_empty());
        // Still recorded: a finished game must never be re-announced.
        assert!(db.is_game_recorded(555).await.unwrap());
    }

    #[tokio::test]
    async fn inserting_a_recorded_game_fails() {
        let db = test_db().await;

        db.insert_game(555, "post-1".to_string()).await.unwrap();
        assert!(db.insert_game(555, "post-2".to_string()).await.is_err());
    }

    #[tokio::test]
    async fn settings_roundtrip() {
        let db = test_db().await;

        assert_eq!(db.get_setting("k").await.unwrap(), None);
        db.set_setting("k", "v1").await.unwrap();
        assert_eq!(db.get_setting("k").await.unwrap(), Some("v1".to_string()));
        db.set_setting("k", "v2").await.unwrap();
        assert_eq!(db.get_setting("k").await.unwrap(), Some("v2".to_string()));
    }
}

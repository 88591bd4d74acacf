use rusqlite::Connection;
use tracing::info;

use super::{column_exists, DbMigration};

/// Adds a last_rank_position column so rank changes can be diffed against
/// what was last announced.
pub struct V2;

impl DbMigration for V2 {
    fn do_migration(conn: &Connection) {
        if !column_exists(conn, "players", "last_rank_position") {
            info!("adding column 'last_rank_position' to 'players'");
            conn.execute(
                "ALTER TABLE players ADD COLUMN last_rank_position INTEGER",
                [],
            )
            .unwrap();
        }
    }
}

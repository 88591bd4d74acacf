use rusqlite::Connection;
use tracing::info;

use super::{column_exists, DbMigration};

/// Adds the external profile slug used to build live-match viewer links.
pub struct V3;

impl DbMigration for V3 {
    fn do_migration(conn: &Connection) {
        if !column_exists(conn, "players", "profile_slug") {
            info!("adding column 'profile_slug' to 'players'");
            conn.execute(
                "ALTER TABLE players ADD COLUMN profile_slug TEXT NOT NULL DEFAULT ''",
                [],
            )
            .unwrap();
        }
    }
}

//! Database schema migrations.

use rusqlite::Connection;

mod v2;
pub use v2::V2;
mod v3;
pub use v3::V3;

pub trait DbMigration {
    fn do_migration(conn: &Connection);
}

/// Check whether a column already exists on a table.
pub(crate) fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({})", table))
        .unwrap();

    let exists = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .any(|col| col.unwrap() == column);
    exists
}

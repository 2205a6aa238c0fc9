use rusqlite::Connection;

use crate::error::Result;

/// Initialise the `scheduler` table and its date index.
///
/// Safe to call on every startup — uses `IF NOT EXISTS` throughout.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS scheduler (
            id      INTEGER PRIMARY KEY AUTOINCREMENT,
            date    TEXT NOT NULL,              -- YYYYMMDD, sorts chronologically
            title   TEXT NOT NULL,
            comment TEXT NOT NULL DEFAULT '',
            repeat  TEXT NOT NULL DEFAULT '' CHECK (length(repeat) <= 128)
        );
        CREATE INDEX IF NOT EXISTS idx_scheduler_date ON scheduler (date);",
    )?;
    Ok(())
}

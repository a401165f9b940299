use rusqlite::Connection;

use crate::error::Result;

pub const SCHEMA_VERSION: i64 = 2;

pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA journal_mode = WAL;")?;
    conn.pragma_update(None, "busy_timeout", 5000)?;

    // Create tables; for fresh databases this includes stage3_mastered.
    // For existing v1 databases, CREATE TABLE IF NOT EXISTS is a no-op,
    // so we ALTER TABLE below to add the missing column.
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS metadata (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS cards (
            id              TEXT PRIMARY KEY,
            front           TEXT NOT NULL,
            back            TEXT NOT NULL,
            stage           INTEGER NOT NULL DEFAULT 1,
            stage3_mastered INTEGER NOT NULL DEFAULT 0,
            last_seen_at    INTEGER,
            created_at      INTEGER NOT NULL DEFAULT 0
        );
        ",
    )?;

    // Add stage3_mastered to v1 databases that lack it.
    // v1 also carried a next_review_at column from the scheduler era;
    // it is left in place and never read.
    if conn
        .prepare("SELECT stage3_mastered FROM cards LIMIT 0")
        .is_err()
    {
        conn.execute_batch(
            "ALTER TABLE cards ADD COLUMN stage3_mastered INTEGER NOT NULL DEFAULT 0;",
        )?;
    }

    // Repair rows written by older versions or edited by hand.
    normalize_stages(conn)?;

    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?1)",
        [SCHEMA_VERSION.to_string()],
    )?;

    Ok(())
}

/// Collapse stage values outside 1..=3 back to stage 1, and clear the
/// mastered flag on any card not at stage 3. Skips the write entirely
/// when every row is already well formed.
fn normalize_stages(conn: &Connection) -> Result<()> {
    let bad: i64 = conn.query_row(
        "SELECT COUNT(*) FROM cards
         WHERE stage NOT IN (1, 2, 3) OR (stage3_mastered <> 0 AND stage <> 3)",
        [],
        |row| row.get(0),
    )?;

    if bad == 0 {
        return Ok(());
    }

    let tx = conn.unchecked_transaction()?;
    // Stage first: a coerced card lands on stage 1 and must also lose mastery.
    tx.execute("UPDATE cards SET stage = 1 WHERE stage NOT IN (1, 2, 3)", [])?;
    tx.execute("UPDATE cards SET stage3_mastered = 0 WHERE stage <> 3", [])?;
    tx.commit()?;

    tracing::info!("normalized stage data on {bad} cards");
    Ok(())
}

pub fn get_schema_version(conn: &Connection) -> Result<Option<i64>> {
    let mut stmt = conn.prepare("SELECT value FROM metadata WHERE key = 'schema_version'")?;
    let version = stmt
        .query_row([], |row| {
            let v: String = row.get(0)?;
            Ok(v.parse::<i64>().unwrap_or(0))
        })
        .ok();
    Ok(version)
}

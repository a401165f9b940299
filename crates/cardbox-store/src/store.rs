use std::fs;
use std::path::Path;

use rusqlite::{Connection, params};
use uuid::Uuid;

use cardbox_core::{Card, Deck, Stage, StageUpdate};

use crate::error::{Result, StoreError};
use crate::schema;

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // --- Metadata ---

    pub fn get_metadata(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM metadata WHERE key = ?1")?;
        let result = stmt.query_row([key], |row| row.get(0)).ok();
        Ok(result)
    }

    pub fn set_metadata(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Which screen the app should resume on. Defaults to "create" so a
    /// fresh database lands the user on card entry, not an empty session.
    pub fn screen(&self) -> Result<String> {
        Ok(self
            .get_metadata("screen")?
            .unwrap_or_else(|| "create".to_string()))
    }

    pub fn set_screen(&self, screen: &str) -> Result<()> {
        self.set_metadata("screen", screen)
    }

    // --- Save ---

    /// Replace the stored deck wholesale. Cards are inserted in deck order
    /// so `load_deck` (which reads by rowid) returns them unchanged.
    pub fn save_deck(&self, deck: &Deck) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;

        // Clear existing data
        tx.execute_batch("DELETE FROM cards;")?;

        for card in &deck.cards {
            self.save_card_on(&tx, card)?;
        }

        tx.commit()?;
        Ok(())
    }

    fn save_card_on(&self, conn: &Connection, card: &Card) -> Result<()> {
        conn.execute(
            "INSERT INTO cards (id, front, back, stage, stage3_mastered, last_seen_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                card.id.to_string(),
                card.front,
                card.back,
                card.stage.as_i64(),
                card.stage3_mastered as i32,
                card.last_seen_at,
                card.created_at,
            ],
        )?;
        Ok(())
    }

    // --- Load ---

    pub fn load_deck(&self) -> Result<Deck> {
        let mut stmt = self.conn.prepare(
            "SELECT id, front, back, stage, stage3_mastered, last_seen_at, created_at
             FROM cards ORDER BY rowid",
        )?;

        let rows: Vec<(String, String, String, i64, bool, Option<u64>, u64)> = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, i64>(3)?,
                    row.get::<_, i32>(4)? != 0,
                    row.get::<_, Option<u64>>(5)?,
                    row.get::<_, u64>(6)?,
                ))
            })?
            .collect::<std::result::Result<_, _>>()?;

        let mut deck = Deck::new();
        for (id_str, front, back, stage_raw, mastered, last_seen_at, created_at) in rows {
            let stage = Stage::from_i64_lossy(stage_raw);
            deck.add(Card {
                id: parse_uuid(&id_str)?,
                front,
                back,
                stage,
                // The mastered flag only means something on stage 3.
                stage3_mastered: mastered && stage == Stage::Memorized,
                last_seen_at,
                created_at,
            });
        }

        Ok(deck)
    }

    // --- Targeted updates (no full rewrite) ---

    pub fn update_card_state(&self, card_id: Uuid, update: StageUpdate) -> Result<()> {
        let rows = self.conn.execute(
            "UPDATE cards SET stage = ?1, stage3_mastered = ?2 WHERE id = ?3",
            params![
                update.stage.as_i64(),
                update.stage3_mastered as i32,
                card_id.to_string()
            ],
        )?;
        if rows == 0 {
            return Err(StoreError::CardNotFound(card_id));
        }
        Ok(())
    }

    pub fn mark_seen(&self, card_id: Uuid, now: u64) -> Result<()> {
        let rows = self.conn.execute(
            "UPDATE cards SET last_seen_at = ?1 WHERE id = ?2",
            params![now, card_id.to_string()],
        )?;
        if rows == 0 {
            return Err(StoreError::CardNotFound(card_id));
        }
        Ok(())
    }

    // --- Maintenance ---

    /// Wipe all cards and send the app back to the create screen.
    pub fn reset(&self) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute_batch("DELETE FROM cards;")?;
        tx.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES ('screen', 'create')",
            [],
        )?;
        tx.commit()?;
        Ok(())
    }

    pub fn card_count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))?;
        Ok(count)
    }

    /// On-disk size of the database file. In-memory databases report 0.
    pub fn db_size(&self) -> u64 {
        match self.conn.path() {
            Some(path) if !path.is_empty() => fs::metadata(path).map(|m| m.len()).unwrap_or(0),
            _ => 0,
        }
    }
}

fn parse_uuid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| StoreError::InvalidData(format!("invalid UUID '{s}': {e}")))
}

use std::fs;
use std::path::Path;

use cardbox_core::{export_json, import_json};

use crate::error::{Result, StoreError};
use crate::store::Store;

impl Store {
    /// Import a version-1 JSON export file into this store.
    /// The stored deck is replaced, not merged.
    pub fn import_json_file(&self, path: &Path) -> Result<()> {
        let json = fs::read_to_string(path).map_err(|e| {
            StoreError::InvalidData(format!("failed to read {}: {e}", path.display()))
        })?;
        let deck = import_json(&json)
            .map_err(|e| StoreError::InvalidData(format!("invalid JSON: {e}")))?;
        self.save_deck(&deck)
    }

    /// Import a version-1 JSON string into this store.
    pub fn import_json_str(&self, json: &str) -> Result<()> {
        let deck =
            import_json(json).map_err(|e| StoreError::InvalidData(format!("invalid JSON: {e}")))?;
        self.save_deck(&deck)
    }

    /// Export the store contents to a version-1 JSON file.
    pub fn export_json_file(&self, path: &Path) -> Result<()> {
        let json = self.export_json_string()?;
        fs::write(path, json).map_err(|e| {
            StoreError::InvalidData(format!("failed to write {}: {e}", path.display()))
        })
    }

    /// Export the store contents as a version-1 JSON string.
    pub fn export_json_string(&self) -> Result<String> {
        let deck = self.load_deck()?;
        export_json(&deck).map_err(|e| StoreError::InvalidData(format!("JSON export failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardbox_core::{Card, Deck, Stage};

    fn make_deck() -> Deck {
        let mut deck = Deck::new();

        let mut learned = Card::new("What is the capital of France?", "Paris", 1_000);
        learned.stage = Stage::Memorized;
        learned.stage3_mastered = true;
        learned.last_seen_at = Some(5_000);
        deck.add(learned);

        deck.add(Card::new("What is the capital of Japan?", "Tokyo", 2_000));
        deck
    }

    #[test]
    fn test_import_export_roundtrip() {
        let store = Store::open_in_memory().unwrap();
        let original = make_deck();

        // Export from cardbox-core to JSON, import into store
        let json = export_json(&original).unwrap();
        store.import_json_str(&json).unwrap();

        // Export back from store to JSON
        let exported = store.export_json_string().unwrap();

        let reimported = import_json(&exported).unwrap();
        assert_eq!(reimported.len(), original.len());
        assert_eq!(reimported.cards[0].id, original.cards[0].id);
        assert_eq!(reimported.cards[0].front, original.cards[0].front);
    }

    #[test]
    fn test_import_preserves_stage_state() {
        let store = Store::open_in_memory().unwrap();
        let original = make_deck();
        let json = export_json(&original).unwrap();

        store.import_json_str(&json).unwrap();
        let loaded = store.load_deck().unwrap();

        assert_eq!(loaded.cards[0].stage, Stage::Memorized);
        assert!(loaded.cards[0].stage3_mastered);
        assert_eq!(loaded.cards[0].last_seen_at, Some(5_000));
        assert_eq!(loaded.cards[1].stage, Stage::Learn);
        assert_eq!(loaded.cards[1].last_seen_at, None);
    }

    #[test]
    fn test_export_matches_wire_format() {
        let store = Store::open_in_memory().unwrap();
        store.save_deck(&make_deck()).unwrap();

        let exported = store.export_json_string().unwrap();

        // Parse as wire format to verify structure
        let wire: serde_json::Value = serde_json::from_str(&exported).unwrap();
        assert_eq!(wire["version"], "1");
        assert!(wire["exportedAt"].is_string());
        assert!(wire["cards"].is_array());
        assert!(wire["cards"][0]["id"].is_string());
        assert!(wire["cards"][0]["front"].is_string());
        assert!(wire["cards"][0]["stage"].is_number());
        assert!(wire["cards"][0]["stage3Mastered"].is_boolean());
    }

    #[test]
    fn test_import_replaces_existing_deck() {
        let store = Store::open_in_memory().unwrap();
        store.save_deck(&make_deck()).unwrap();

        let mut other = Deck::new();
        other.add(Card::new("What is the capital of Italy?", "Rome", 9_000));
        let json = export_json(&other).unwrap();

        store.import_json_str(&json).unwrap();

        let loaded = store.load_deck().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.cards[0].back, "Rome");
    }

    #[test]
    fn test_import_legacy_scheduler_fields() {
        // Exports from the scheduler era carried review timing per card.
        // Those fields are ignored, the rest of the card loads fine.
        let json = r#"{
            "version": "1",
            "exportedAt": "2026-01-01T00:00:00Z",
            "cards": [{
                "id": "00000000-0000-0000-0000-000000000001",
                "front": "What is the capital of Chile?",
                "back": "Santiago",
                "stage": 2,
                "nextReviewAt": 1234567890,
                "intervalDays": 3,
                "createdAt": 100
            }]
        }"#;

        let store = Store::open_in_memory().unwrap();
        store.import_json_str(json).unwrap();

        let loaded = store.load_deck().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.cards[0].back, "Santiago");
        assert_eq!(loaded.cards[0].stage, Stage::Recall);
    }

    #[test]
    fn test_import_export_file_roundtrip() {
        let dir = std::env::temp_dir().join("cardbox-store-test-json");
        let _ = fs::create_dir_all(&dir);
        let json_path = dir.join("test_export.json");

        let store = Store::open_in_memory().unwrap();
        let original = make_deck();
        store.save_deck(&original).unwrap();

        // Export to file
        store.export_json_file(&json_path).unwrap();
        assert!(json_path.exists());

        // Import from file into a fresh store
        let store2 = Store::open_in_memory().unwrap();
        store2.import_json_file(&json_path).unwrap();

        let loaded = store2.load_deck().unwrap();
        assert_eq!(loaded.len(), original.len());
        assert_eq!(loaded.cards[0].id, original.cards[0].id);

        // Cleanup
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_import_invalid_json() {
        let store = Store::open_in_memory().unwrap();
        let result = store.import_json_str("not valid json");
        assert!(result.is_err());
    }

    #[test]
    fn test_sqlite_to_json_to_sqlite_roundtrip() {
        // Full round-trip: deck → SQLite → JSON → SQLite → verify
        let store1 = Store::open_in_memory().unwrap();
        let original = make_deck();
        store1.save_deck(&original).unwrap();

        let json = store1.export_json_string().unwrap();

        let store2 = Store::open_in_memory().unwrap();
        store2.import_json_str(&json).unwrap();

        let loaded = store2.load_deck().unwrap();
        assert_eq!(loaded.len(), original.len());
        assert_eq!(loaded.cards[0].stage, original.cards[0].stage);
        assert_eq!(
            loaded.cards[0].stage3_mastered,
            original.cards[0].stage3_mastered
        );
    }
}

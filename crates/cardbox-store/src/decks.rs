use std::path::{Path, PathBuf};
use std::{env, fs};

use cardbox_core::Deck;

use crate::error::{Result, StoreError};
use crate::store::Store;

/// Default base directory for all cardbox storage.
fn default_base_dir() -> PathBuf {
    dirs_home().join(".cardbox")
}

fn dirs_home() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Sanitize a deck name for use as a filename.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Resolve a deck name to a database filename stem.
/// An absent or empty name falls back to the shared "default" deck.
fn resolve_deck_id(deck_name: Option<&str>) -> String {
    if let Some(name) = deck_name {
        let sanitized = sanitize_name(name);
        if !sanitized.is_empty() {
            return sanitized;
        }
    }
    "default".to_string()
}

/// One SQLite database per deck.
///
/// Layout:
/// ```text
/// ~/.cardbox/
/// └── decks/
///     ├── default.db
///     ├── spanish-vocab.db
///     └── ...
/// ```
pub struct DeckStore {
    store: Store,
    deck_id: String,
}

impl DeckStore {
    /// Open the store for a named deck, creating directories as needed.
    /// `deck_name`: explicit deck name (None means the default deck).
    /// `base_dir`: override the base directory (for testing).
    pub fn open(deck_name: Option<&str>, base_dir: Option<&Path>) -> Result<Self> {
        let base = base_dir.map(PathBuf::from).unwrap_or_else(default_base_dir);
        let decks_dir = base.join("decks");

        fs::create_dir_all(&decks_dir).map_err(|e| {
            StoreError::InvalidData(format!("failed to create {}: {e}", decks_dir.display()))
        })?;

        let deck_id = resolve_deck_id(deck_name);
        let path = decks_dir.join(format!("{deck_id}.db"));
        let store = Store::open(&path)?;

        Ok(Self { store, deck_id })
    }

    /// Open with an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            store: Store::open_in_memory()?,
            deck_id: "test".to_string(),
        })
    }

    pub fn deck_id(&self) -> &str {
        &self.deck_id
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn load(&self) -> Result<Deck> {
        self.store.load_deck()
    }

    pub fn save(&self, deck: &Deck) -> Result<()> {
        self.store.save_deck(deck)
    }

    /// Import a version-1 JSON export into this deck, replacing its cards.
    pub fn import_json_file(&self, path: &Path) -> Result<()> {
        self.store.import_json_file(path)
    }

    /// Export this deck to a version-1 JSON file.
    pub fn export_json_file(&self, path: &Path) -> Result<()> {
        self.store.export_json_file(path)
    }
}

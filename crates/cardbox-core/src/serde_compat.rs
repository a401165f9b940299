//! JSON serde for the v1 snapshot format.
//!
//! The wire format uses camelCase field names and numeric stages, matching
//! the shape the original browser app persisted. Loading is deliberately
//! lossy rather than strict: unknown fields are ignored (older snapshots
//! carry a `nextReviewAt` from a superseded scheduling model), out-of-range
//! stages collapse to 1, a missing mastered flag reads as false, and an
//! unparsable card id is replaced instead of failing the import.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::card::{Card, Stage};
use crate::deck::Deck;
use crate::time;

pub const CURRENT_VERSION: &str = "1";

// --- Wire format types ---

#[derive(Serialize, Deserialize, Debug)]
pub struct WireDeck {
    pub version: String,
    #[serde(rename = "exportedAt", default)]
    pub exported_at: String,
    #[serde(default)]
    pub cards: Vec<WireCard>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WireCard {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub front: String,
    #[serde(default)]
    pub back: String,
    #[serde(default)]
    pub stage: i64,
    #[serde(rename = "stage3Mastered", default)]
    pub stage3_mastered: bool,
    #[serde(rename = "lastSeenAt", default)]
    pub last_seen_at: Option<u64>,
    #[serde(rename = "createdAt", default)]
    pub created_at: u64,
}

// --- Conversion: Wire → Domain ---

impl WireDeck {
    pub fn into_deck(self) -> Deck {
        let mut deck = Deck::new();
        for wire in self.cards {
            deck.add(wire_card_to_domain(wire));
        }
        deck
    }

    pub fn from_deck(deck: &Deck) -> Self {
        WireDeck {
            version: CURRENT_VERSION.to_string(),
            exported_at: time::now_iso8601(),
            cards: deck.cards.iter().map(domain_card_to_wire).collect(),
        }
    }
}

fn wire_card_to_domain(wire: WireCard) -> Card {
    let stage = Stage::from_i64_lossy(wire.stage);
    Card {
        id: Uuid::parse_str(&wire.id).unwrap_or_else(|_| Uuid::new_v4()),
        front: wire.front,
        back: wire.back,
        stage,
        // A snapshot claiming mastery off stage 3 is invalid state; drop it.
        stage3_mastered: wire.stage3_mastered && stage == Stage::Memorized,
        last_seen_at: wire.last_seen_at,
        created_at: wire.created_at,
    }
}

fn domain_card_to_wire(card: &Card) -> WireCard {
    WireCard {
        id: card.id.to_string(),
        front: card.front.clone(),
        back: card.back.clone(),
        stage: card.stage.as_i64(),
        stage3_mastered: card.stage3_mastered,
        last_seen_at: card.last_seen_at,
        created_at: card.created_at,
    }
}

/// Deserialize a v1 JSON snapshot into a Deck, applying the load coercions.
pub fn import_json(json: &str) -> Result<Deck, serde_json::Error> {
    let wire: WireDeck = serde_json::from_str(json)?;
    Ok(wire.into_deck())
}

/// Serialize a Deck to the v1 JSON wire format.
pub fn export_json(deck: &Deck) -> Result<String, serde_json::Error> {
    let wire = WireDeck::from_deck(deck);
    serde_json::to_string_pretty(&wire)
}

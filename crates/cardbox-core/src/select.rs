//! Next-card selection: priority partition with probabilistic interleaving.
//!
//! Learn-stage cards are served before Recall-stage cards; Memorized cards
//! are injected with probability [`STAGE3_INJECTION_CHANCE`] per pick so
//! re-checks spread through a session instead of front-loading. Within a
//! partition the least-recently-seen card is served. Selection is pure: the
//! caller marks the returned card seen before presenting it.

use rand::Rng;

use crate::card::{Card, Stage};
use crate::constants::STAGE3_INJECTION_CHANCE;

/// Least-recently-seen member of `cards`, or `None` if empty.
///
/// A never-seen card (`last_seen_at` = `None`, treated as 0) sorts before
/// any seen card; among seen cards the smaller timestamp wins; the first
/// element in deck order wins exact ties.
pub fn least_recently_seen<'a>(cards: &[&'a Card]) -> Option<&'a Card> {
    cards.iter().copied().reduce(|best, card| {
        if card.last_seen_at.unwrap_or(0) < best.last_seen_at.unwrap_or(0) {
            card
        } else {
            best
        }
    })
}

/// Choose the next card to present from the study-eligible set, or `None`
/// if the set is empty.
///
/// When only Memorized cards remain (or the set is empty apart from them),
/// they are surfaced forever so review never stops.
pub fn pick_next_card<'a>(cards: &[&'a Card], rng: &mut impl Rng) -> Option<&'a Card> {
    let mut learn = Vec::new();
    let mut recall = Vec::new();
    let mut memorized = Vec::new();
    for card in cards.iter().copied() {
        match card.stage {
            Stage::Learn => learn.push(card),
            Stage::Recall => recall.push(card),
            Stage::Memorized => memorized.push(card),
        }
    }

    if learn.is_empty() && recall.is_empty() {
        return least_recently_seen(&memorized);
    }

    if !memorized.is_empty() && rng.random::<f64>() < STAGE3_INJECTION_CHANCE {
        return least_recently_seen(&memorized);
    }

    least_recently_seen(&learn)
        .or_else(|| least_recently_seen(&recall))
        // Reachable only if learn and recall both emptied between the checks
        // above, which a single caller cannot arrange.
        .or_else(|| least_recently_seen(&memorized))
}

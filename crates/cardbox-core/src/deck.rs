//! The owned card collection handed to the pure engine functions.
//!
//! A `Deck` is plain data: the session controller owns one, passes
//! `study_cards()` slices into selection/evaluation/aggregation, and applies
//! the returned instructions back through the by-id helpers here. Deck order
//! is creation order; it doubles as the tie-break order for selection.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::card::{Card, StageUpdate};
use crate::evaluate::{self, RecallOutcome};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Remove a card by id, returning it if present.
    pub fn remove(&mut self, id: Uuid) -> Option<Card> {
        let index = self.cards.iter().position(|c| c.id == id)?;
        Some(self.cards.remove(index))
    }

    /// The study-eligible subset in deck order.
    pub fn study_cards(&self) -> Vec<&Card> {
        self.cards.iter().filter(|c| c.is_study_ready()).collect()
    }

    /// Record a presentation. Returns false if the card is gone.
    pub fn mark_seen(&mut self, id: Uuid, now: u64) -> bool {
        match self.get_mut(id) {
            Some(card) => {
                card.mark_seen(now);
                true
            }
            None => false,
        }
    }

    /// Evaluate and apply a multiple-choice answer by card id. A card
    /// deleted mid-session makes this a no-op (`None`).
    pub fn apply_multiple_choice(&mut self, id: Uuid, chose_correct: bool) -> Option<StageUpdate> {
        let card = self.get_mut(id)?;
        let update = evaluate::evaluate_multiple_choice(card, chose_correct);
        card.apply(update);
        Some(update)
    }

    /// Evaluate and apply a typed recall answer by card id. A card deleted
    /// mid-session makes this a no-op (`None`).
    pub fn apply_recall(&mut self, id: Uuid, user_answer: &str) -> Option<RecallOutcome> {
        let card = self.get_mut(id)?;
        let outcome = evaluate::evaluate_recall(card, user_answer);
        card.apply(outcome.update);
        Some(outcome)
    }
}

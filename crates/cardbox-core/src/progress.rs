//! Progress aggregation: per-stage counts and the chunk breakdown behind
//! the progress bar.
//!
//! Each card can earn up to three chunks: yellow (passed Learn), blue
//! (passed Recall), green (mastered at Memorized). A card contributes to
//! exactly one of {none, yellow, yellow+blue, yellow+blue+green} based on
//! its current state, never its history, so the earned counts always obey
//! green ≤ blue ≤ yellow ≤ card count.

use serde::Serialize;

use crate::card::{Card, Stage};
use crate::constants::CHUNKS_PER_CARD;

/// Display-ready reduction of a card collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub stage1_count: usize,
    pub stage2_count: usize,
    pub stage3_count: usize,
    /// Cards at stage 2 or higher (passed Learn).
    pub earned_yellow: usize,
    /// Cards at stage 3 (passed Recall).
    pub earned_blue: usize,
    /// Cards at stage 3 with the mastered flag set.
    pub earned_green: usize,
    /// Three chunks per card.
    pub total_chunks: usize,
}

impl ProgressSummary {
    pub fn total_cards(&self) -> usize {
        self.stage1_count + self.stage2_count + self.stage3_count
    }

    pub fn earned_chunks(&self) -> usize {
        self.earned_yellow + self.earned_blue + self.earned_green
    }

    /// Unfilled chunks, floored at zero.
    pub fn remaining_chunks(&self) -> usize {
        self.total_chunks.saturating_sub(self.earned_chunks())
    }
}

/// Summarize the collection's stages into counts and earned chunks.
pub fn summarize_progress(cards: &[&Card]) -> ProgressSummary {
    let mut summary = ProgressSummary::default();
    for card in cards.iter().copied() {
        match card.stage {
            Stage::Learn => summary.stage1_count += 1,
            Stage::Recall => summary.stage2_count += 1,
            Stage::Memorized => summary.stage3_count += 1,
        }
        if card.stage >= Stage::Recall {
            summary.earned_yellow += 1;
        }
        if card.stage == Stage::Memorized {
            summary.earned_blue += 1;
            if card.stage3_mastered {
                summary.earned_green += 1;
            }
        }
    }
    summary.total_chunks = cards.len() * CHUNKS_PER_CARD;
    summary
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A card's mastery level. Persisted and interchanged as the integers 1–3;
/// anything else collapses to `Learn` at the boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Stage {
    /// Stage 1: multiple-choice recognition.
    #[default]
    Learn,
    /// Stage 2: typed exact-match recall.
    Recall,
    /// Stage 3: memorized, surfaced periodically for re-checks.
    Memorized,
}

impl Stage {
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Learn => 1,
            Self::Recall => 2,
            Self::Memorized => 3,
        }
    }

    /// Coerce a raw stage number, mapping anything outside {1,2,3} to `Learn`.
    pub fn from_i64_lossy(n: i64) -> Self {
        match n {
            2 => Self::Recall,
            3 => Self::Memorized,
            _ => Self::Learn,
        }
    }

    /// Lowercase display name, as shown in listings and study prompts.
    pub fn label(self) -> &'static str {
        match self {
            Self::Learn => "learn",
            Self::Recall => "recall",
            Self::Memorized => "memorized",
        }
    }
}

impl From<i64> for Stage {
    fn from(n: i64) -> Self {
        Self::from_i64_lossy(n)
    }
}

impl From<Stage> for i64 {
    fn from(stage: Stage) -> Self {
        stage.as_i64()
    }
}

/// A mutation instruction produced by answer evaluation. The caller applies
/// it to the card it evaluated; the evaluators themselves mutate nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageUpdate {
    pub stage: Stage,
    pub stage3_mastered: bool,
}

impl StageUpdate {
    /// `stage3_mastered` can only hold at `Memorized`; the constructor clamps
    /// it so an invalid instruction cannot be built.
    pub fn new(stage: Stage, stage3_mastered: bool) -> Self {
        Self {
            stage,
            stage3_mastered: stage3_mastered && stage == Stage::Memorized,
        }
    }

    /// An update that leaves the card where it is.
    pub fn keep(card: &Card) -> Self {
        Self::new(card.stage, card.stage3_mastered)
    }
}

/// One flashcard: a front prompt, a back answer, and study-state metadata.
///
/// The study engine never creates or deletes cards; it only mutates `stage`,
/// `stage3_mastered`, and `last_seen_at` through [`Card::apply`] and
/// [`Card::mark_seen`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    pub front: String,
    pub back: String,
    pub stage: Stage,
    /// True once a `Memorized` card has been recalled correctly at least once
    /// since last regressing out of stage 3. Display-only ("green" chunk);
    /// never gates transitions.
    pub stage3_mastered: bool,
    /// Unix-millisecond timestamp of the last presentation; `None` if the
    /// card has never been shown. Recency ordering only, never scheduling.
    #[serde(default)]
    pub last_seen_at: Option<u64>,
    pub created_at: u64,
}

impl Card {
    pub fn new(front: impl Into<String>, back: impl Into<String>, now: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            front: front.into(),
            back: back.into(),
            stage: Stage::Learn,
            stage3_mastered: false,
            last_seen_at: None,
            created_at: now,
        }
    }

    /// An empty draft card, as seeded when a deck has nothing left to edit.
    pub fn blank(now: u64) -> Self {
        Self::new("", "", now)
    }

    /// A card enters the study rotation once both sides are non-empty after
    /// trimming.
    pub fn is_study_ready(&self) -> bool {
        !self.front.trim().is_empty() && !self.back.trim().is_empty()
    }

    pub fn mark_seen(&mut self, now: u64) {
        self.last_seen_at = Some(now);
    }

    pub fn apply(&mut self, update: StageUpdate) {
        self.stage = update.stage;
        self.stage3_mastered = update.stage3_mastered;
    }
}

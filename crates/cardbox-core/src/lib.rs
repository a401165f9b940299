//! Three-stage flashcard study engine.
//!
//! Cards progress Learn (multiple-choice recognition) → Recall (typed exact
//! match) → Memorized (periodic re-checks), regressing on wrong answers;
//! the transition graph has no absorbing state, so every card stays in
//! rotation forever. The four engine components (selection, option
//! building, answer evaluation, progress aggregation) are pure functions
//! over the card collection; randomness enters only through an injected
//! `rand::Rng`.
//!
//! Zero I/O: no opinions about rendering or persistence.

pub mod card;
pub mod constants;
pub mod deck;
pub mod evaluate;
pub mod options;
pub mod progress;
pub mod select;
pub mod serde_compat;
pub mod time;

pub use card::{Card, Stage, StageUpdate};
pub use constants::{
    CHUNKS_PER_CARD, FILLER_OPTION_TEXT, OPTION_COUNT, STAGE3_INJECTION_CHANCE,
    WRONG_OPTION_COUNT,
};
pub use deck::Deck;
pub use evaluate::{
    RecallOutcome, evaluate_multiple_choice, evaluate_recall, is_correct_recall, normalize_answer,
};
pub use options::{McOption, build_options};
pub use progress::{ProgressSummary, summarize_progress};
pub use select::{least_recently_seen, pick_next_card};
pub use serde_compat::{CURRENT_VERSION, export_json, import_json};

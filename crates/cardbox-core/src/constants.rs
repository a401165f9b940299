/// Probability that a memorized (stage 3) card is injected into the study
/// queue ahead of lower-stage cards, per selection.
pub const STAGE3_INJECTION_CHANCE: f64 = 0.20;

/// Number of options in a multiple-choice presentation.
pub const OPTION_COUNT: usize = 4;

/// Wrong options per multiple-choice presentation (OPTION_COUNT - 1 correct).
pub const WRONG_OPTION_COUNT: usize = 3;

/// Placeholder text for filler options when the deck is too small to supply
/// three real distractors.
pub const FILLER_OPTION_TEXT: &str = "(Add more cards for better choices)";

/// Chunks a single card can earn on the progress bar: yellow (passed Learn),
/// blue (passed Recall), green (mastered at Memorized).
pub const CHUNKS_PER_CARD: usize = 3;

//! Answer evaluation: judge a response and compute the stage transition.
//!
//! Two entry points, by presentation kind. Multiple choice is the stage-1
//! recognition check; typed recall covers stages 2 and 3. Both return a
//! [`StageUpdate`] instruction instead of mutating the card, so the session
//! controller decides when (and whether) to apply and persist it.
//!
//! Transition table, (stage, correct) → (next stage, mastered):
//!
//! | stage | correct | next | mastered |
//! |-------|---------|------|----------|
//! | 1     | yes     | 2    | unchanged |
//! | 1     | no      | 1    | unchanged |
//! | 2     | yes     | 3    | false    |
//! | 2     | no      | 1    | false    |
//! | 3     | yes     | 3    | true     |
//! | 3     | no      | 2    | false    |
//!
//! There is no absorbing state: a mastered card still regresses to stage 2
//! on a wrong answer, which keeps every card in rotation forever.

use crate::card::{Card, Stage, StageUpdate};

/// Outcome of a recall evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecallOutcome {
    /// Whether the typed answer matched the card's back.
    pub is_correct: bool,
    /// The resulting transition, for the caller to apply.
    pub update: StageUpdate,
}

/// Canonical form for recall comparison: trimmed and lowercased, nothing
/// else. Internal whitespace and punctuation stay significant.
pub fn normalize_answer(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Case-insensitive, trim-exact match of a typed answer against the stored
/// back. No partial credit.
pub fn is_correct_recall(user_answer: &str, correct_answer: &str) -> bool {
    normalize_answer(user_answer) == normalize_answer(correct_answer)
}

/// Evaluate a multiple-choice selection for a stage-1 card.
///
/// `chose_correct` is the `is_correct` flag of the option the learner picked.
/// Correct promotes the card to Recall; incorrect leaves it at Learn. On a
/// card that is not at stage 1 (stale presentation) the card is left
/// unchanged.
pub fn evaluate_multiple_choice(card: &Card, chose_correct: bool) -> StageUpdate {
    if chose_correct && card.stage == Stage::Learn {
        StageUpdate::new(Stage::Recall, false)
    } else {
        StageUpdate::keep(card)
    }
}

/// Evaluate a typed recall answer for a stage-2 or stage-3 card.
///
/// Empty or whitespace-only answers are a caller-side validation concern
/// (the session re-prompts before ever calling this); passed through anyway,
/// they simply fail to match a non-empty back. A stage-1 card is left
/// unchanged; recall presentations are never built for it.
pub fn evaluate_recall(card: &Card, user_answer: &str) -> RecallOutcome {
    let is_correct = is_correct_recall(user_answer, &card.back);
    let update = match (card.stage, is_correct) {
        (Stage::Recall, true) => StageUpdate::new(Stage::Memorized, false),
        (Stage::Recall, false) => StageUpdate::new(Stage::Learn, false),
        (Stage::Memorized, true) => StageUpdate::new(Stage::Memorized, true),
        (Stage::Memorized, false) => StageUpdate::new(Stage::Recall, false),
        (Stage::Learn, _) => StageUpdate::keep(card),
    };
    RecallOutcome { is_correct, update }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_at(stage: Stage, mastered: bool) -> Card {
        let mut card = Card::new("capital of France?", "Paris", 0);
        card.stage = stage;
        card.stage3_mastered = mastered && stage == Stage::Memorized;
        card
    }

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize_answer("  Paris "), "paris");
        assert_eq!(normalize_answer("PARIS"), "paris");
        assert_eq!(normalize_answer("a  b"), "a  b", "internal runs kept");
    }

    #[test]
    fn test_recall_match_is_whitespace_exact_after_trim() {
        assert!(is_correct_recall(" Paris ", "paris"));
        assert!(is_correct_recall("PARIS", "Paris"));
        assert!(!is_correct_recall("par is", "paris"));
        assert!(!is_correct_recall("a b", "a  b"));
        assert!(!is_correct_recall("", "paris"));
    }

    #[test]
    fn test_mc_correct_promotes_to_recall() {
        let card = card_at(Stage::Learn, false);
        let update = evaluate_multiple_choice(&card, true);
        assert_eq!(update.stage, Stage::Recall);
        assert!(!update.stage3_mastered);
    }

    #[test]
    fn test_mc_incorrect_stays_at_learn() {
        let card = card_at(Stage::Learn, false);
        let update = evaluate_multiple_choice(&card, false);
        assert_eq!(update.stage, Stage::Learn);
    }

    #[test]
    fn test_mc_on_later_stage_is_noop() {
        let card = card_at(Stage::Memorized, true);
        let update = evaluate_multiple_choice(&card, true);
        assert_eq!(update.stage, Stage::Memorized);
        assert!(update.stage3_mastered);
    }

    #[test]
    fn test_recall_stage2_correct_advances() {
        let card = card_at(Stage::Recall, false);
        let outcome = evaluate_recall(&card, "paris");
        assert!(outcome.is_correct);
        assert_eq!(outcome.update.stage, Stage::Memorized);
        assert!(!outcome.update.stage3_mastered, "not yet mastered");
    }

    #[test]
    fn test_recall_stage2_wrong_drops_to_learn() {
        let card = card_at(Stage::Recall, false);
        let outcome = evaluate_recall(&card, "london");
        assert!(!outcome.is_correct);
        assert_eq!(outcome.update.stage, Stage::Learn, "drops to 1, not 2");
        assert!(!outcome.update.stage3_mastered);
    }

    #[test]
    fn test_recall_stage3_correct_masters() {
        let card = card_at(Stage::Memorized, false);
        let outcome = evaluate_recall(&card, " PARIS ");
        assert!(outcome.is_correct);
        assert_eq!(outcome.update.stage, Stage::Memorized);
        assert!(outcome.update.stage3_mastered);
    }

    #[test]
    fn test_recall_stage3_wrong_regresses_and_unmasters() {
        let card = card_at(Stage::Memorized, true);
        let outcome = evaluate_recall(&card, "lyon");
        assert!(!outcome.is_correct);
        assert_eq!(outcome.update.stage, Stage::Recall);
        assert!(!outcome.update.stage3_mastered);
    }

    #[test]
    fn test_pass_then_fail_lands_on_learn() {
        // Stage 2 pass reaches 3; the wrong answer after that lands on 2,
        // but a wrong answer *at* stage 2 lands on 1.
        let mut card = card_at(Stage::Recall, false);
        card.apply(evaluate_recall(&card, "paris").update);
        assert_eq!(card.stage, Stage::Memorized);
        card.apply(evaluate_recall(&card, "wrong").update);
        assert_eq!(card.stage, Stage::Recall);
        card.apply(evaluate_recall(&card, "wrong").update);
        assert_eq!(card.stage, Stage::Learn);
    }

    #[test]
    fn test_mastered_false_after_any_regression() {
        for (stage, answer) in [(Stage::Recall, "nope"), (Stage::Memorized, "nope")] {
            let card = card_at(stage, true);
            let outcome = evaluate_recall(&card, answer);
            assert!(
                !outcome.update.stage3_mastered,
                "regression from {stage:?} must clear mastered"
            );
        }
    }
}

//! Multiple-choice option building for stage-1 presentations.
//!
//! Distractors are drawn from the backs of the other cards in the deck,
//! padded with filler options when the deck is too small. Options are
//! rebuilt on every presentation; a cached set would leak the answer
//! position across repeats of the same card.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::Card;
use crate::constants::{FILLER_OPTION_TEXT, OPTION_COUNT, WRONG_OPTION_COUNT};

/// One answer option in a multiple-choice presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct McOption {
    pub text: String,
    pub is_correct: bool,
}

/// Build exactly [`OPTION_COUNT`] options for a presentation of `card`,
/// exactly one of them correct.
///
/// Wrong options are sampled without replacement from the backs of every
/// *other* card in `cards` (excluded by id, so a duplicate back text is
/// still a legitimate distractor), then padded with fillers up to
/// [`WRONG_OPTION_COUNT`], then the whole set is shuffled.
pub fn build_options(card: &Card, cards: &[&Card], rng: &mut impl Rng) -> Vec<McOption> {
    let mut options: Vec<McOption> = cards
        .iter()
        .filter(|c| c.id != card.id)
        .map(|c| McOption {
            text: c.back.clone(),
            is_correct: false,
        })
        .collect();

    // Sample by permutation: shuffle, keep the first three.
    options.shuffle(rng);
    options.truncate(WRONG_OPTION_COUNT);
    while options.len() < WRONG_OPTION_COUNT {
        options.push(McOption {
            text: FILLER_OPTION_TEXT.to_string(),
            is_correct: false,
        });
    }

    options.push(McOption {
        text: card.back.clone(),
        is_correct: true,
    });
    options.shuffle(rng);

    debug_assert_eq!(options.len(), OPTION_COUNT);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn deck(backs: &[&str]) -> Vec<Card> {
        backs
            .iter()
            .enumerate()
            .map(|(i, back)| Card::new(format!("q{i}"), *back, 0))
            .collect()
    }

    fn correct_count(options: &[McOption]) -> usize {
        options.iter().filter(|o| o.is_correct).count()
    }

    #[test]
    fn test_exactly_four_one_correct_any_deck_size() {
        let mut rng = rng();
        for size in 1..=6 {
            let backs: Vec<String> = (0..size).map(|i| format!("back{i}")).collect();
            let back_refs: Vec<&str> = backs.iter().map(String::as_str).collect();
            let cards = deck(&back_refs);
            let refs: Vec<&Card> = cards.iter().collect();

            let options = build_options(&cards[0], &refs, &mut rng);
            assert_eq!(options.len(), OPTION_COUNT, "deck of {size}");
            assert_eq!(correct_count(&options), 1, "deck of {size}");
        }
    }

    #[test]
    fn test_correct_option_carries_back_text() {
        let mut rng = rng();
        let cards = deck(&["Paris", "London", "Rome", "Madrid"]);
        let refs: Vec<&Card> = cards.iter().collect();

        let options = build_options(&cards[2], &refs, &mut rng);
        let correct = options.iter().find(|o| o.is_correct).unwrap();
        assert_eq!(correct.text, "Rome");
    }

    #[test]
    fn test_distractors_come_from_other_backs() {
        let mut rng = rng();
        let cards = deck(&["Paris", "London", "Rome", "Madrid", "Berlin"]);
        let refs: Vec<&Card> = cards.iter().collect();

        let options = build_options(&cards[0], &refs, &mut rng);
        for option in options.iter().filter(|o| !o.is_correct) {
            assert!(
                ["London", "Rome", "Madrid", "Berlin"].contains(&option.text.as_str()),
                "unexpected distractor: {}",
                option.text
            );
        }
    }

    #[test]
    fn test_small_deck_pads_with_fillers() {
        let mut rng = rng();
        let cards = deck(&["Paris", "London"]);
        let refs: Vec<&Card> = cards.iter().collect();

        let options = build_options(&cards[0], &refs, &mut rng);
        let fillers = options
            .iter()
            .filter(|o| o.text == FILLER_OPTION_TEXT)
            .count();
        assert_eq!(fillers, 2, "one real distractor plus two fillers");
        assert!(options.iter().all(|o| o.text != FILLER_OPTION_TEXT || !o.is_correct));
    }

    #[test]
    fn test_single_card_deck_is_all_fillers() {
        let mut rng = rng();
        let cards = deck(&["Paris"]);
        let refs: Vec<&Card> = cards.iter().collect();

        let options = build_options(&cards[0], &refs, &mut rng);
        assert_eq!(options.len(), OPTION_COUNT);
        assert_eq!(correct_count(&options), 1);
        let fillers = options
            .iter()
            .filter(|o| o.text == FILLER_OPTION_TEXT)
            .count();
        assert_eq!(fillers, 3);
    }

    #[test]
    fn test_duplicate_back_still_single_correct() {
        // Two cards share a back; the twin's text may appear as a distractor
        // but only the presented card's option is marked correct.
        let mut rng = rng();
        let cards = deck(&["Paris", "Paris", "Rome", "Madrid", "Berlin"]);
        let refs: Vec<&Card> = cards.iter().collect();

        for _ in 0..20 {
            let options = build_options(&cards[0], &refs, &mut rng);
            assert_eq!(correct_count(&options), 1);
        }
    }

    #[test]
    fn test_invariant_holds_across_repeated_builds() {
        let mut rng = rng();
        let cards = deck(&["a", "b", "c", "d", "e", "f"]);
        let refs: Vec<&Card> = cards.iter().collect();

        for _ in 0..100 {
            let options = build_options(&cards[3], &refs, &mut rng);
            assert_eq!(options.len(), OPTION_COUNT);
            assert_eq!(correct_count(&options), 1);
        }
    }
}

//! The interactive study loop. One answered card per turn; every answer is
//! persisted before the next card is drawn, so a killed session loses at
//! most the card on screen.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use cardbox_core::{
    Stage, build_options, evaluate_multiple_choice, evaluate_recall, pick_next_card,
    summarize_progress, time,
};
use cardbox_store::DeckStore;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::render;

enum Reply {
    Answer(String),
    Quit,
}

/// Prompt until the user types something non-empty. `q` or closed stdin
/// ends the session.
fn read_reply(input: &mut impl BufRead, prompt: &str) -> Result<Reply> {
    loop {
        print!("{prompt}");
        io::stdout().flush().context("failed to flush stdout")?;

        let mut line = String::new();
        let n = input.read_line(&mut line).context("failed to read stdin")?;
        if n == 0 {
            return Ok(Reply::Quit); // EOF
        }

        let line = line.trim();
        if line == "q" {
            return Ok(Reply::Quit);
        }
        if line.is_empty() {
            println!("type an answer, or q to quit");
            continue;
        }
        return Ok(Reply::Answer(line.to_string()));
    }
}

pub fn run(store: &DeckStore, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();

    store
        .store()
        .set_screen("study")
        .context("failed to persist screen")?;

    println!("studying deck '{}' (q quits at any prompt)", store.deck_id());

    'session: loop {
        let deck = store.load().context("failed to load deck")?;
        let ready = deck.study_cards();
        if ready.is_empty() {
            println!("no cards are ready to study. add some with `cardbox add`.");
            break;
        }

        let summary = summarize_progress(&ready);
        println!();
        println!("{}", render::progress_bar(&summary));

        // ready is non-empty, so the picker always returns a card
        let Some(card) = pick_next_card(&ready, &mut rng) else {
            break;
        };

        store
            .store()
            .mark_seen(card.id, time::now_unix_millis())
            .context("failed to mark card seen")?;

        println!("[{}] {}", card.stage.label(), card.front);

        match card.stage {
            Stage::Learn => {
                let options = build_options(card, &ready, &mut rng);
                for (i, option) in options.iter().enumerate() {
                    println!("  {}. {}", i + 1, option.text);
                }

                let chose_correct = loop {
                    let prompt = format!("pick an option [1-{}, q quits]: ", options.len());
                    match read_reply(&mut input, &prompt)? {
                        Reply::Quit => break 'session,
                        Reply::Answer(text) => match text.parse::<usize>() {
                            Ok(n) if (1..=options.len()).contains(&n) => {
                                break options[n - 1].is_correct;
                            }
                            _ => println!("enter a number between 1 and {}", options.len()),
                        },
                    }
                };

                if chose_correct {
                    println!("correct → {}", card.back);
                } else {
                    println!("not quite. the answer is: {}", card.back);
                }

                let update = evaluate_multiple_choice(card, chose_correct);
                store
                    .store()
                    .update_card_state(card.id, update)
                    .context("failed to save answer")?;
            }
            Stage::Recall | Stage::Memorized => {
                let answer = match read_reply(&mut input, "your answer (q quits): ")? {
                    Reply::Quit => break 'session,
                    Reply::Answer(text) => text,
                };

                let outcome = evaluate_recall(card, &answer);
                if outcome.is_correct {
                    println!("correct!");
                } else {
                    println!("the answer was: {}", card.back);
                }

                store
                    .store()
                    .update_card_state(card.id, outcome.update)
                    .context("failed to save answer")?;
            }
        }
    }

    store
        .store()
        .set_screen("create")
        .context("failed to persist screen")?;

    let deck = store.load().context("failed to load deck")?;
    let ready = deck.study_cards();
    if !ready.is_empty() {
        let summary = summarize_progress(&ready);
        println!();
        println!("session over. {}", render::progress_bar(&summary));
        println!("{}", render::stage_line(&summary));
    }

    Ok(())
}

mod render;
mod study;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use cardbox_core::{Card, Deck, summarize_progress, time};
use cardbox_store::DeckStore;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cardbox", about = "Three-stage flashcard study CLI")]
struct Cli {
    /// Use a named deck instead of the default
    #[arg(long, global = true)]
    deck: Option<String>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a card to the deck
    Add {
        /// Question side
        front: String,
        /// Answer side
        back: String,
    },

    /// List cards with stage and recency
    List,

    /// Edit a card's text by list position
    Edit {
        /// 1-based position from `list`
        index: usize,
        /// New question side
        #[arg(long)]
        front: Option<String>,
        /// New answer side
        #[arg(long)]
        back: Option<String>,
    },

    /// Remove a card by list position
    Remove {
        /// 1-based position from `list`
        index: usize,
    },

    /// Run an interactive study session
    Study {
        /// Seed the card picker for a reproducible session
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show chunk progress for the deck
    Progress {
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Show deck statistics
    Stats,

    /// Export the deck to a JSON file
    Export {
        /// Output file path
        path: PathBuf,
    },

    /// Import a deck from a JSON file (replaces current cards)
    Import {
        /// Input file path
        path: PathBuf,
    },

    /// Delete every card in the deck
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn open_store(cli: &Cli) -> Result<DeckStore> {
    let base_dir = std::env::var("CARDBOX_DATA_DIR")
        .ok()
        .map(std::path::PathBuf::from);
    DeckStore::open(cli.deck.as_deref(), base_dir.as_deref()).context("failed to open deck store")
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Add { front, back } => cmd_add(&cli, front, back),
        Commands::List => cmd_list(&cli),
        Commands::Edit { index, front, back } => {
            cmd_edit(&cli, *index, front.as_deref(), back.as_deref())
        }
        Commands::Remove { index } => cmd_remove(&cli, *index),
        Commands::Study { seed } => cmd_study(&cli, *seed),
        Commands::Progress { json } => cmd_progress(&cli, *json),
        Commands::Stats => cmd_stats(&cli),
        Commands::Export { path } => cmd_export(&cli, path),
        Commands::Import { path } => cmd_import(&cli, path),
        Commands::Reset { yes } => cmd_reset(&cli, *yes),
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_add(cli: &Cli, front: &str, back: &str) -> Result<()> {
    let front = front.trim();
    let back = back.trim();
    if front.is_empty() {
        bail!("the front side cannot be empty");
    }
    if back.is_empty() {
        bail!("the back side cannot be empty");
    }

    let store = open_store(cli)?;
    let mut deck = store.load().context("failed to load deck")?;

    // remove and reset leave a blank placeholder behind; fill it instead
    // of appending a second row
    let placeholder = deck
        .cards
        .iter_mut()
        .find(|c| c.front.trim().is_empty() && c.back.trim().is_empty());
    match placeholder {
        Some(card) => {
            card.front = front.to_string();
            card.back = back.to_string();
        }
        None => deck.add(Card::new(front, back, time::now_unix_millis())),
    }

    store.save(&deck).context("failed to save deck")?;
    println!("added to deck '{}' ({} cards)", store.deck_id(), deck.len());
    Ok(())
}

fn cmd_list(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;
    let deck = store.load().context("failed to load deck")?;

    if deck.is_empty() {
        println!("(no cards)");
        return Ok(());
    }

    for (i, card) in deck.cards.iter().enumerate() {
        println!("{}", render::list_row(i + 1, card));
    }
    Ok(())
}

fn cmd_edit(cli: &Cli, index: usize, front: Option<&str>, back: Option<&str>) -> Result<()> {
    if front.is_none() && back.is_none() {
        bail!("nothing to change: pass --front and/or --back");
    }

    let store = open_store(cli)?;
    let mut deck = store.load().context("failed to load deck")?;

    let card = index
        .checked_sub(1)
        .and_then(|i| deck.cards.get_mut(i))
        .with_context(|| format!("no card at position {index}"))?;

    if let Some(front) = front {
        let front = front.trim();
        if front.is_empty() {
            bail!("the front side cannot be empty");
        }
        card.front = front.to_string();
    }
    if let Some(back) = back {
        let back = back.trim();
        if back.is_empty() {
            bail!("the back side cannot be empty");
        }
        card.back = back.to_string();
    }
    println!("updated card {index}: {} → {}", card.front, card.back);

    store.save(&deck).context("failed to save deck")?;
    Ok(())
}

fn cmd_remove(cli: &Cli, index: usize) -> Result<()> {
    let store = open_store(cli)?;
    let mut deck = store.load().context("failed to load deck")?;

    if index == 0 || index > deck.len() {
        bail!("no card at position {index}");
    }
    let removed = deck.cards.remove(index - 1);

    // Leave one editable row behind instead of an empty deck
    if deck.is_empty() {
        deck.add(Card::blank(time::now_unix_millis()));
    }

    store.save(&deck).context("failed to save deck")?;
    println!("removed card {index}: {}", removed.front);
    Ok(())
}

fn cmd_study(cli: &Cli, seed: Option<u64>) -> Result<()> {
    let store = open_store(cli)?;
    study::run(&store, seed)
}

fn cmd_progress(cli: &Cli, json: bool) -> Result<()> {
    let store = open_store(cli)?;
    let deck = store.load().context("failed to load deck")?;
    let ready = deck.study_cards();
    let summary = summarize_progress(&ready);

    if json {
        let out = serde_json::to_string_pretty(&summary).context("failed to serialize progress")?;
        println!("{out}");
    } else {
        println!("{}", render::progress_bar(&summary));
        println!("{}", render::stage_line(&summary));
    }
    Ok(())
}

fn cmd_stats(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;
    let deck = store.load().context("failed to load deck")?;
    let ready = deck.study_cards();
    let summary = summarize_progress(&ready);
    let screen = store.store().screen().context("failed to read screen")?;
    let db_size = store.store().db_size();

    println!("deck:     {}", store.deck_id());
    println!("cards:    {}", deck.len());
    println!("ready:    {}", ready.len());
    println!("stage 1:  {}", summary.stage1_count);
    println!("stage 2:  {}", summary.stage2_count);
    println!(
        "stage 3:  {} ({} mastered)",
        summary.stage3_count, summary.earned_green
    );
    println!(
        "chunks:   {}/{}",
        summary.earned_chunks(),
        summary.total_chunks
    );
    println!("screen:   {screen}");
    println!("db_size:  {:.1}KB", db_size as f64 / 1024.0);
    Ok(())
}

fn cmd_export(cli: &Cli, path: &std::path::Path) -> Result<()> {
    let store = open_store(cli)?;
    store
        .export_json_file(path)
        .context("failed to export JSON")?;

    println!("exported to {}", path.display());
    Ok(())
}

fn cmd_import(cli: &Cli, path: &std::path::Path) -> Result<()> {
    let store = open_store(cli)?;
    store
        .import_json_file(path)
        .context("failed to import JSON")?;

    let deck = store.load().context("failed to load deck after import")?;
    println!("imported from {}. cards={}", path.display(), deck.len());
    Ok(())
}

fn cmd_reset(cli: &Cli, yes: bool) -> Result<()> {
    let store = open_store(cli)?;
    let count = store.store().card_count().context("failed to count cards")?;

    if !yes {
        print!(
            "delete all {count} cards in deck '{}'? [y/N] ",
            store.deck_id()
        );
        io::stdout().flush().context("failed to flush stdout")?;

        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("failed to read stdin")?;
        if !matches!(line.trim(), "y" | "Y" | "yes") {
            println!("aborted");
            return Ok(());
        }
    }

    store.store().reset().context("failed to reset deck")?;

    // Same shape as after removing the last card: one editable row
    let mut deck = Deck::new();
    deck.add(Card::blank(time::now_unix_millis()));
    store.save(&deck).context("failed to save deck")?;

    println!("deck '{}' reset", store.deck_id());
    Ok(())
}

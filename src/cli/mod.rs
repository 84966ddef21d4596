pub mod render;

use crate::card::{Card, CardParseError};
use crate::game::{Chances, Command, CommandParseError, Deck, DeckError, Table, TableError};
use crate::rng::GameRng;
use clap::{Parser, Subcommand};
use log::info;
use render::{format_card, format_chances, format_odds, format_row};
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Deck error: {0}")]
    Deck(#[from] DeckError),
    #[error("Table error: {0}")]
    Table(#[from] TableError),
    #[error("Invalid card: {0}")]
    Card(#[from] CardParseError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "hilo")]
#[command(about = "Hi-lo card odds calculator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Deck size, a multiple of 4 up to 52 [default: 52, or 8 for the demo run without a subcommand]
    #[arg(short, long, global = true)]
    pub size: Option<usize>,

    /// Seed for the deal (for reproducibility)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deal one card per row and show the odds at both ends of each row
    Deal {
        /// Number of rows on the table
        #[arg(short, long, default_value = "4")]
        rows: usize,

        /// Moves to play after the deal, as ROW:MOVE[:CARD] (e.g. 0:right:c8, 1:remove-left)
        #[arg(short, long)]
        play: Vec<Play>,
    },

    /// Odds of the next card ranking above, below or level with CARD
    Calc {
        /// Card to compare against, e.g. a14
        card: Card,

        /// Cards already out of the deck
        #[arg(short, long)]
        remove: Vec<Card>,
    },

    /// List every card of the deck
    Cards {
        /// Cards already out of the deck
        #[arg(short, long)]
        remove: Vec<Card>,
    },
}

/// A move addressed to one row, `ROW:MOVE[:CARD]` on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub row: usize,
    pub command: Command,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayParseError {
    #[error("'{0}' is not a row number")]
    Row(String),
    #[error("Expected ROW:MOVE[:CARD], got '{0}'")]
    Format(String),
    #[error(transparent)]
    Command(#[from] CommandParseError),
}

impl FromStr for Play {
    type Err = PlayParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, command) = s
            .split_once(':')
            .ok_or_else(|| PlayParseError::Format(s.to_string()))?;
        let row = row
            .parse()
            .map_err(|_| PlayParseError::Row(row.to_string()))?;
        let command = Command::try_from(command)?;
        Ok(Play { row, command })
    }
}

#[derive(Serialize)]
struct CalcReport {
    card: Card,
    size: usize,
    chances: Chances,
}

/// Odds at both ends of a row, `None` once the deck has run out
#[derive(Serialize)]
struct RowReport {
    left: Option<Chances>,
    right: Option<Chances>,
}

#[derive(Serialize)]
struct DealReport<'a> {
    seed: u64,
    size: usize,
    table: &'a Table,
    odds: Vec<RowReport>,
}

#[derive(Serialize)]
struct CardReport {
    card: Card,
    present: bool,
}

const DEFAULT_SIZE: usize = 52;
const DEMO_SIZE: usize = 8;

pub fn run(cli: Cli) -> Result<(), CliError> {
    let size = cli.size.unwrap_or(DEFAULT_SIZE);
    match cli.command {
        Some(Commands::Deal { rows, play }) => deal(size, rows, &play, cli.seed, cli.json),
        Some(Commands::Calc { card, remove }) => calc(size, card, &remove, cli.json),
        Some(Commands::Cards { remove }) => cards(size, &remove, cli.json),
        None => {
            // Default: the ace of clubs drawn from a small deck
            let ace = Card::try_from("a14")?;
            calc(cli.size.unwrap_or(DEMO_SIZE), ace, &[ace], cli.json)
        }
    }
}

fn deck_without(size: usize, removed: &[Card]) -> Result<Deck, DeckError> {
    let mut deck = Deck::new(size)?;
    for &card in removed {
        deck.remove(card)?;
    }
    Ok(deck)
}

fn calc(size: usize, card: Card, removed: &[Card], json: bool) -> Result<(), CliError> {
    let deck = deck_without(size, removed)?;
    let chances = deck.calc(card)?;

    if json {
        let report = CalcReport {
            card,
            size: deck.size(),
            chances,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} ({} of {} cards left)  {}",
            format_card(card),
            deck.size(),
            deck.capacity(),
            format_chances(&chances)
        );
    }
    Ok(())
}

struct DealOutcome {
    seed: u64,
    deck: Deck,
    table: Table,
    odds: Vec<RowReport>,
}

fn odds_for(deck: &Deck, card: Card) -> Result<Option<Chances>, DeckError> {
    match deck.calc(card) {
        Ok(chances) => Ok(Some(chances)),
        Err(DeckError::EmptyDeck) => Ok(None),
        Err(e) => Err(e),
    }
}

fn play_deal(size: usize, rows: usize, plays: &[Play], seed: Option<u64>) -> Result<DealOutcome, CliError> {
    let mut rng = GameRng::new(seed);
    let mut deck = Deck::new(size)?;
    let seeds = deck.deal(rows, &mut rng)?;
    let mut table = Table::new(rows, &seeds)?;
    info!("dealt {} rows from a {} card deck, seed {}", rows, size, rng.seed());

    for play in plays {
        table.apply(play.row, play.command, &mut deck)?;
        info!("played {:?} on row {}", play.command, play.row);
    }

    let odds = table
        .rows()
        .iter()
        .map(|row| -> Result<RowReport, DeckError> {
            Ok(RowReport {
                left: odds_for(&deck, row.left())?,
                right: odds_for(&deck, row.right())?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DealOutcome {
        seed: rng.seed(),
        deck,
        table,
        odds,
    })
}

fn deal(size: usize, rows: usize, plays: &[Play], seed: Option<u64>, json: bool) -> Result<(), CliError> {
    let outcome = play_deal(size, rows, plays, seed)?;
    let deck = &outcome.deck;

    if json {
        let report = DealReport {
            seed: outcome.seed,
            size: deck.size(),
            table: &outcome.table,
            odds: outcome.odds,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\n=== Hi-Lo Table ===\n");
    println!("Deck: {} of {} cards left", deck.size(), deck.capacity());
    println!("Seed: {}", outcome.seed);
    println!();
    for (row, odds) in outcome.table.rows().iter().zip(&outcome.odds) {
        println!(
            "{}\t---\t{}\t---\t{}",
            format_odds(odds.left.as_ref()),
            format_row(row),
            format_odds(odds.right.as_ref())
        );
    }
    Ok(())
}

fn cards(size: usize, removed: &[Card], json: bool) -> Result<(), CliError> {
    let deck = deck_without(size, removed)?;

    if json {
        let report: Vec<_> = deck
            .cards()
            .map(|(card, present)| CardReport { card, present })
            .collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (card, present) in deck.cards() {
        let mark = if present { "✓" } else { "✗" };
        println!("{} {} {}", mark, card, format_card(card));
    }
    println!("\n{} of {} cards left", deck.size(), deck.capacity());
    Ok(())
}

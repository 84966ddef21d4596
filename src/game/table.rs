use crate::card::{Card, CardParseError};
use crate::game::deck::{Deck, DeckError};
use log::debug;
use serde::Serialize;
use std::collections::VecDeque;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Row {index} out of range, table has {rows} rows")]
    IndexOutOfRange { index: usize, rows: usize },
    #[error("Need at least {needed} seed cards, got {given}")]
    NotEnoughSeedCards { needed: usize, given: usize },
    #[error("A row cannot give up its last card")]
    EmptyRow,
    #[error("Deck error: {0}")]
    Deck(#[from] DeckError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("Unknown move '{0}', expected left, right, remove-left, remove-right or collapse")]
    UnknownMove(String),
    #[error("Move '{0}' needs a card")]
    MissingCard(String),
    #[error("Move '{0}' does not take a card")]
    UnexpectedCard(String),
    #[error("Invalid card: {0}")]
    Card(#[from] CardParseError),
}

/// A move on a single row of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Return the whole row to the deck and start it over with a new card
    Collapse(Card),
    AddLeft(Card),
    AddRight(Card),
    RemoveLeft,
    RemoveRight,
}

/// Parses `left:c8`, `right:c8`, `remove-left`, `remove-right` or `collapse:a9`
impl TryFrom<&str> for Command {
    type Error = CommandParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let (name, card) = match s.split_once(':') {
            Some((name, card)) => (name, Some(card)),
            None => (s, None),
        };
        let parse = |card: &str| Card::try_from(card).map_err(CommandParseError::from);
        match (name, card) {
            ("left" | "add-left", Some(card)) => Ok(Command::AddLeft(parse(card)?)),
            ("right" | "add-right", Some(card)) => Ok(Command::AddRight(parse(card)?)),
            ("collapse", Some(card)) => Ok(Command::Collapse(parse(card)?)),
            ("remove-left", None) => Ok(Command::RemoveLeft),
            ("remove-right", None) => Ok(Command::RemoveRight),
            ("left" | "add-left" | "right" | "add-right" | "collapse", None) => {
                Err(CommandParseError::MissingCard(name.to_string()))
            }
            ("remove-left" | "remove-right", Some(_)) => {
                Err(CommandParseError::UnexpectedCard(name.to_string()))
            }
            _ => Err(CommandParseError::UnknownMove(name.to_string())),
        }
    }
}

/// One pile on the table. A row is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Row {
    cards: VecDeque<Card>,
}

impl Row {
    pub fn new(card: Card) -> Self {
        Row {
            cards: VecDeque::from([card]),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn left(&self) -> Card {
        self.cards[0]
    }

    pub fn right(&self) -> Card {
        self.cards[self.cards.len() - 1]
    }

    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied()
    }

    pub fn add_left(&mut self, card: Card) {
        self.cards.push_front(card);
    }

    pub fn add_right(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Take the leftmost card off the row and put it back in the deck
    pub fn remove_left(&mut self, deck: &mut Deck) -> Result<Card, TableError> {
        if self.cards.len() == 1 {
            return Err(TableError::EmptyRow);
        }
        let card = self.left();
        deck.add(card)?;
        self.cards.pop_front();
        Ok(card)
    }

    /// Take the rightmost card off the row and put it back in the deck
    pub fn remove_right(&mut self, deck: &mut Deck) -> Result<Card, TableError> {
        if self.cards.len() == 1 {
            return Err(TableError::EmptyRow);
        }
        let card = self.right();
        deck.add(card)?;
        self.cards.pop_back();
        Ok(card)
    }

    /// Put every card of the row back in the deck and restart the row with `card`.
    /// On failure neither the row nor the deck changes.
    pub fn collapse(&mut self, card: Card, deck: &mut Deck) -> Result<(), TableError> {
        let mut staged = deck.clone();
        for &c in &self.cards {
            staged.add(c)?;
        }
        *deck = staged;
        self.cards.clear();
        self.cards.push_back(card);
        Ok(())
    }
}

/// The board: a fixed number of rows, each seeded with one card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Row `i` starts as `[seeds[i]]`. Seeds past `row_count` are ignored.
    pub fn new(row_count: usize, seeds: &[Card]) -> Result<Self, TableError> {
        if seeds.len() < row_count {
            return Err(TableError::NotEnoughSeedCards {
                needed: row_count,
                given: seeds.len(),
            });
        }
        let rows = seeds[..row_count].iter().map(|&card| Row::new(card)).collect();
        Ok(Table { rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_row(&self, index: usize) -> bool {
        index < self.rows.len()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Result<&Row, TableError> {
        let rows = self.rows.len();
        self.rows
            .get(index)
            .ok_or(TableError::IndexOutOfRange { index, rows })
    }

    fn row_mut(&mut self, index: usize) -> Result<&mut Row, TableError> {
        let rows = self.rows.len();
        self.rows
            .get_mut(index)
            .ok_or(TableError::IndexOutOfRange { index, rows })
    }

    pub fn add_left(&mut self, index: usize, card: Card) -> Result<(), TableError> {
        self.row_mut(index)?.add_left(card);
        Ok(())
    }

    pub fn add_right(&mut self, index: usize, card: Card) -> Result<(), TableError> {
        self.row_mut(index)?.add_right(card);
        Ok(())
    }

    /// Play a move on one row, keeping the deck in step with the table.
    ///
    /// Cards placed on the table are taken out of the deck and cards lifted
    /// off the table go back into it. Either the whole move happens or
    /// nothing changes.
    pub fn apply(&mut self, index: usize, command: Command, deck: &mut Deck) -> Result<(), TableError> {
        let row = self.row_mut(index)?;
        let mut staged_row = row.clone();
        let mut staged_deck = deck.clone();

        match command {
            Command::AddLeft(card) => {
                staged_deck.remove(card)?;
                staged_row.add_left(card);
            }
            Command::AddRight(card) => {
                staged_deck.remove(card)?;
                staged_row.add_right(card);
            }
            Command::RemoveLeft => {
                staged_row.remove_left(&mut staged_deck)?;
            }
            Command::RemoveRight => {
                staged_row.remove_right(&mut staged_deck)?;
            }
            Command::Collapse(card) => {
                staged_row.collapse(card, &mut staged_deck)?;
                staged_deck.remove(card)?;
            }
        }

        *row = staged_row;
        *deck = staged_deck;
        debug!("row {}: applied {:?}, deck has {} left", index, command, deck.size());
        Ok(())
    }
}

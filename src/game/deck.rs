use crate::card::{Card, Suit, FULL_DECK, MAX_RANK, N_SUITS};
use crate::rng::GameRng;
use log::debug;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("Deck size must be a positive multiple of 4 no larger than 52, got {0}")]
    InvalidDeckSize(usize),
    #[error("No cards left in the deck")]
    EmptyDeck,
    #[error("Card not in deck: {0}")]
    UnknownCard(Card),
    #[error("Card is already in the deck: {0}")]
    AlreadyPresent(Card),
    #[error("Card was already taken from the deck: {0}")]
    AlreadyAbsent(Card),
    #[error("Cannot deal {requested} cards, only {available} left")]
    NotEnoughCards { requested: usize, available: usize },
}

/// Chance that a card drawn from the deck ranks above, below or level with a query card
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Chances {
    pub higher: f32,
    pub lower: f32,
    pub equal: f32,
}

impl Chances {
    pub fn total(&self) -> f32 {
        self.higher + self.lower + self.equal
    }
}

/// The deck of a hi-lo game.
///
/// The universe of cards is fixed when the deck is built: `capacity / 4`
/// ranks per suit, counting down from the ace. Afterwards cards only move
/// between present and absent, and `size` always equals the number of
/// present cards.
#[derive(Debug, Clone)]
pub struct Deck {
    present: [bool; FULL_DECK],
    capacity: usize,
    size: usize,
}

impl Deck {
    pub fn new(size: usize) -> Result<Self, DeckError> {
        if size == 0 || size % N_SUITS != 0 || size > FULL_DECK {
            return Err(DeckError::InvalidDeckSize(size));
        }

        let mut deck = Deck {
            present: [false; FULL_DECK],
            capacity: size,
            size,
        };
        for card in deck.universe().collect::<Vec<_>>() {
            deck.present[card.index()] = true;
        }
        debug!("built deck of {} cards, ranks {}..={}", size, deck.min_rank(), MAX_RANK);
        Ok(deck)
    }

    /// Number of cards currently in the deck
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of cards the deck was built with
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lowest rank in this deck's universe
    pub fn min_rank(&self) -> u8 {
        MAX_RANK + 1 - (self.capacity / N_SUITS) as u8
    }

    /// Whether the card belongs to this deck at all, present or not
    pub fn is_card(&self, card: Card) -> bool {
        (self.min_rank()..=MAX_RANK).contains(&card.rank())
    }

    /// Whether the card is still in the deck
    pub fn has_card(&self, card: Card) -> bool {
        self.is_card(card) && self.present[card.index()]
    }

    /// Every card of the universe, suit by suit with ranks descending
    pub fn universe(&self) -> impl Iterator<Item = Card> {
        let min_rank = self.min_rank();
        Suit::ALL.into_iter().flat_map(move |suit| {
            (min_rank..=MAX_RANK)
                .rev()
                .filter_map(move |rank| Card::new(suit, rank))
        })
    }

    /// Every card of the universe paired with its presence flag
    pub fn cards(&self) -> impl Iterator<Item = (Card, bool)> + '_ {
        self.universe().map(move |card| (card, self.present[card.index()]))
    }

    pub fn present_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards().filter(|(_, present)| *present).map(|(card, _)| card)
    }

    /// Number of present cards of the given rank
    pub fn rank_count(&self, rank: u8) -> usize {
        self.present_cards().filter(|card| card.rank() == rank).count()
    }

    /// Put a card back into the deck
    pub fn add(&mut self, card: Card) -> Result<(), DeckError> {
        if !self.is_card(card) {
            return Err(DeckError::UnknownCard(card));
        }
        if self.present[card.index()] {
            return Err(DeckError::AlreadyPresent(card));
        }
        self.present[card.index()] = true;
        self.size += 1;
        debug!("added {} to deck, {} left", card, self.size);
        Ok(())
    }

    /// Take a card out of the deck
    pub fn remove(&mut self, card: Card) -> Result<(), DeckError> {
        if !self.is_card(card) {
            return Err(DeckError::UnknownCard(card));
        }
        if !self.present[card.index()] {
            return Err(DeckError::AlreadyAbsent(card));
        }
        self.present[card.index()] = false;
        self.size -= 1;
        debug!("removed {} from deck, {} left", card, self.size);
        Ok(())
    }

    /// Odds that a card drawn from what is left ranks higher, lower or equal
    /// to `card`. The query card counts toward `equal` if it is still present.
    pub fn calc(&self, card: Card) -> Result<Chances, DeckError> {
        if self.size == 0 {
            return Err(DeckError::EmptyDeck);
        }

        let mut higher = 0;
        let mut lower = 0;
        let mut equal = 0;
        for other in self.present_cards() {
            match other.rank().cmp(&card.rank()) {
                Ordering::Greater => higher += 1,
                Ordering::Less => lower += 1,
                Ordering::Equal => equal += 1,
            }
        }

        let chance = |n: usize| n as f32 / self.size as f32;
        Ok(Chances {
            higher: chance(higher),
            lower: chance(lower),
            equal: chance(equal),
        })
    }

    /// Take `count` random cards out of the deck
    pub fn deal(&mut self, count: usize, rng: &mut GameRng) -> Result<Vec<Card>, DeckError> {
        if count > self.size {
            return Err(DeckError::NotEnoughCards {
                requested: count,
                available: self.size,
            });
        }

        let pool: Vec<Card> = self.present_cards().collect();
        let dealt: Vec<Card> = pool.choose_multiple(rng, count).copied().collect();
        for &card in &dealt {
            self.remove(card)?;
        }
        Ok(dealt)
    }
}

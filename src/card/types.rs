use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Highest rank in any deck (the ace)
pub const MAX_RANK: u8 = 14;
/// Lowest rank a full deck goes down to
pub const MIN_RANK: u8 = 2;
pub const N_SUITS: usize = 4;
pub const N_RANKS: usize = (MAX_RANK - MIN_RANK + 1) as usize;
pub const FULL_DECK: usize = N_SUITS * N_RANKS;

/// Card suits, tagged `a` through `d` in the text format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    #[serde(rename = "a")]
    Clubs,
    #[serde(rename = "b")]
    Spades,
    #[serde(rename = "c")]
    Hearts,
    #[serde(rename = "d")]
    Diamonds,
}

impl Suit {
    pub const ALL: [Suit; N_SUITS] = [Suit::Clubs, Suit::Spades, Suit::Hearts, Suit::Diamonds];

    /// Convert to the single letter used in card identifiers
    pub fn tag(&self) -> char {
        match self {
            Suit::Clubs => 'a',
            Suit::Spades => 'b',
            Suit::Hearts => 'c',
            Suit::Diamonds => 'd',
        }
    }

    pub fn from_tag(tag: char) -> Option<Suit> {
        match tag {
            'a' => Some(Suit::Clubs),
            'b' => Some(Suit::Spades),
            'c' => Some(Suit::Hearts),
            'd' => Some(Suit::Diamonds),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
        }
    }

    pub fn is_red(&self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardParseError {
    #[error("'{0}' is not a card, expected a suit letter a-d followed by 1-2 digits")]
    Length(String),
    #[error("'{0}' is not a suit, expected one of a, b, c, d")]
    Suit(char),
    #[error("'{0}' is not a rank, expected 2 to 14")]
    Rank(String),
}

/// A card identifier: a suit plus a rank from 2 (deuce) to 14 (ace).
///
/// The text form is the suit tag followed by the rank, e.g. `a14` for the
/// ace of clubs or `c6` for the six of hearts. Suits only tell cards apart;
/// every comparison between cards is by rank alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    suit: Suit,
    rank: u8,
}

impl Card {
    /// `None` unless the rank is in 2..=14
    pub fn new(suit: Suit, rank: u8) -> Option<Self> {
        if (MIN_RANK..=MAX_RANK).contains(&rank) {
            Some(Card { suit, rank })
        } else {
            None
        }
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// Slot of this card in a full 52-card table, suit-major
    pub(crate) fn index(&self) -> usize {
        self.suit.index() * N_RANKS + (self.rank - MIN_RANK) as usize
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.suit.tag(), self.rank)
    }
}

/// Accepts exactly `[a-d][0-9]{1,2}` with the rank in 2..=14
impl TryFrom<&str> for Card {
    type Error = CardParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.chars();
        let tag = chars.next().ok_or_else(|| CardParseError::Length(s.to_string()))?;
        let digits = chars.as_str();
        if digits.is_empty() || digits.len() > 2 {
            return Err(CardParseError::Length(s.to_string()));
        }
        let suit = Suit::from_tag(tag).ok_or(CardParseError::Suit(tag))?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CardParseError::Rank(digits.to_string()));
        }
        let rank: u8 = digits
            .parse()
            .map_err(|_| CardParseError::Rank(digits.to_string()))?;
        Card::new(suit, rank).ok_or_else(|| CardParseError::Rank(digits.to_string()))
    }
}

impl TryFrom<String> for Card {
    type Error = CardParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Card::try_from(s.as_str())
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Card::try_from(s)
    }
}

impl From<Card> for String {
    fn from(card: Card) -> String {
        card.to_string()
    }
}

pub mod types;

pub use types::{Card, CardParseError, Suit, FULL_DECK, MAX_RANK, MIN_RANK, N_RANKS, N_SUITS};

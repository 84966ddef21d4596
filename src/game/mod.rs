pub mod deck;
pub mod table;

pub use deck::{Chances, Deck, DeckError};
pub use table::{Command, CommandParseError, Row, Table, TableError};

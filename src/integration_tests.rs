//! Integration tests for the hi-lo engine
//! Plays full deals with known seeds and checks deck and table stay consistent

use crate::card::Card;
use crate::game::{Command, Deck, DeckError, Table};
use crate::rng::GameRng;

fn card(s: &str) -> Card {
    s.parse().expect("valid card")
}

fn present_count(deck: &Deck) -> usize {
    deck.cards().filter(|(_, present)| *present).count()
}

fn table_cards(table: &Table) -> Vec<Card> {
    table.rows().iter().flat_map(|row| row.cards()).collect()
}

#[test]
fn test_demo_deal_from_eight_card_deck() {
    let mut deck = Deck::new(8).expect("Failed to build deck");
    deck.remove(card("a14")).expect("a14 is in the deck");

    let chances = deck.calc(card("a14")).expect("Deck is not empty");
    assert_eq!(chances.higher, 0.0);
    assert_eq!(chances.equal, 3.0 / 7.0);
    assert_eq!(chances.lower, 4.0 / 7.0);
}

#[test]
fn test_seeded_deal_builds_matching_table() {
    let mut deck = Deck::new(52).expect("Failed to build deck");
    let mut rng = GameRng::new(Some(12345));
    let seeds = deck.deal(4, &mut rng).expect("Failed to deal");
    let table = Table::new(4, &seeds).expect("Failed to build table");

    assert_eq!(table.row_count(), 4);
    assert_eq!(deck.size(), 48);
    for (row, seed) in table.rows().iter().zip(&seeds) {
        assert_eq!(row.len(), 1);
        assert_eq!(row.left(), *seed);
        assert!(!deck.has_card(*seed), "Dealt card {} still in deck", seed);
    }
}

#[test]
fn test_same_seed_produces_same_table() {
    let build = |seed| {
        let mut deck = Deck::new(32).expect("Failed to build deck");
        let seeds = deck.deal(5, &mut GameRng::new(Some(seed))).expect("Failed to deal");
        Table::new(5, &seeds).expect("Failed to build table")
    };

    assert_eq!(build(54321), build(54321));
}

#[test]
fn test_cards_are_never_on_table_and_in_deck() {
    let mut deck = Deck::new(16).expect("Failed to build deck");
    let mut rng = GameRng::new(Some(99));
    let seeds = deck.deal(2, &mut rng).expect("Failed to deal");
    let mut table = Table::new(2, &seeds).expect("Failed to build table");

    // Draw the rest of the deck onto alternating rows and ends
    let mut turn = 0;
    while !deck.is_empty() {
        let next = deck.deal(1, &mut rng).expect("Deck not empty")[0];
        deck.add(next).expect("Just dealt");
        let command = if turn % 2 == 0 {
            Command::AddLeft(next)
        } else {
            Command::AddRight(next)
        };
        table.apply(turn % 2, command, &mut deck).expect("Card is in the deck");
        turn += 1;

        for c in table_cards(&table) {
            assert!(!deck.has_card(c), "{} is both on the table and in the deck", c);
        }
        assert_eq!(deck.size() + table_cards(&table).len(), 16);
        assert_eq!(deck.size(), present_count(&deck));
    }

    assert_eq!(deck.calc(card("a14")), Err(DeckError::EmptyDeck));

    // Lifting cards off the table refills the deck
    table.apply(0, Command::RemoveRight, &mut deck).expect("Row has spare cards");
    table.apply(1, Command::RemoveLeft, &mut deck).expect("Row has spare cards");
    assert_eq!(deck.size(), 2);
    let chances = deck.calc(card("a14")).expect("Deck is not empty");
    assert!((chances.total() - 1.0).abs() < 1e-6);
}

#[test]
fn test_collapse_returns_whole_row() {
    let mut deck = Deck::new(52).expect("Failed to build deck");
    let mut rng = GameRng::new(Some(7));
    let seeds = deck.deal(3, &mut rng).expect("Failed to deal");
    let mut table = Table::new(3, &seeds).expect("Failed to build table");

    let extra = deck.deal(3, &mut rng).expect("Failed to deal");
    for &c in &extra {
        deck.add(c).expect("Just dealt");
        table.apply(1, Command::AddRight(c), &mut deck).expect("Card is in the deck");
    }
    assert_eq!(table.row(1).expect("Row 1 exists").len(), 4);
    assert_eq!(deck.size(), 46);

    let fresh = deck.deal(1, &mut rng).expect("Failed to deal")[0];
    deck.add(fresh).expect("Just dealt");
    table.apply(1, Command::Collapse(fresh), &mut deck).expect("Collapse succeeds");

    let row = table.row(1).expect("Row 1 exists");
    assert_eq!(row.cards().collect::<Vec<_>>(), vec![fresh]);
    assert_eq!(deck.size(), 49);
    assert!(deck.has_card(seeds[1]));
    for c in extra {
        assert!(deck.has_card(c));
    }
}

#[test]
fn test_odds_at_row_ends_follow_deck() {
    let mut deck = Deck::new(8).expect("Failed to build deck");
    for token in ["a14", "b13"] {
        deck.remove(card(token)).expect("Card is in the deck");
    }
    let mut table = Table::new(1, &[card("a14"), card("b13")]).expect("Failed to build table");
    table
        .apply(0, Command::AddRight(card("c13")), &mut deck)
        .expect("c13 is in the deck");

    let row = table.row(0).expect("Row 0 exists");
    let left = deck.calc(row.left()).expect("Deck is not empty");
    let right = deck.calc(row.right()).expect("Deck is not empty");

    // Three aces and two kings are left in the deck
    assert_eq!(deck.size(), 5);
    assert_eq!(left.higher, 0.0);
    assert_eq!(left.equal, 3.0 / 5.0);
    assert_eq!(left.lower, 2.0 / 5.0);
    assert_eq!(right.higher, 3.0 / 5.0);
    assert_eq!(right.equal, 2.0 / 5.0);
    assert_eq!(right.lower, 0.0);
}

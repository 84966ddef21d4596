use crate::card::Card;
use crate::game::{Chances, Row};
use colored::Colorize;

/// Render a card as `[♣  4]`, `[♠ 10]` or `[♥  Q]`, red suits in red
pub fn format_card(card: Card) -> String {
    let face = match card.rank() {
        14 => "A".to_string(),
        13 => "K".to_string(),
        12 => "Q".to_string(),
        11 => "J".to_string(),
        rank => rank.to_string(),
    };
    let text = format!("[{} {:>2}]", card.suit().symbol(), face);
    if card.suit().is_red() {
        text.red().to_string()
    } else {
        text
    }
}

pub fn format_row(row: &Row) -> String {
    row.cards().map(format_card).collect::<Vec<_>>().join(" ")
}

/// `▲ higher ◀▶ equal ▼ lower`, higher in green and lower in blue
pub fn format_chances(chances: &Chances) -> String {
    format!(
        "{} ◀▶ {:.2} {}",
        format!("▲ {:.2}", chances.higher).green(),
        chances.equal,
        format!("▼ {:.2}", chances.lower).blue()
    )
}

/// Like [`format_chances`], with dashes when there is nothing left to draw
pub fn format_odds(chances: Option<&Chances>) -> String {
    match chances {
        Some(chances) => format_chances(chances),
        None => format!("{} ◀▶ -- {}", "▲ --".green(), "▼ --".blue()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_formats_cards() {
        colored::control::set_override(false);
        assert_eq!(format_card(card("a4")), "[♣  4]");
        assert_eq!(format_card(card("b10")), "[♠ 10]");
        assert_eq!(format_card(card("c12")), "[♥  Q]");
        assert_eq!(format_card(card("d14")), "[♦  A]");
        assert_eq!(format_card(card("b11")), "[♠  J]");
    }

    #[test]
    fn test_formats_rows() {
        colored::control::set_override(false);
        let mut row = Row::new(card("b3"));
        row.add_left(card("a4"));
        row.add_right(card("c13"));
        assert_eq!(format_row(&row), "[♣  4] [♠  3] [♥  K]");
    }

    #[test]
    fn test_formats_chances() {
        colored::control::set_override(false);
        let chances = Chances {
            higher: 0.0,
            lower: 4.0 / 7.0,
            equal: 3.0 / 7.0,
        };
        assert_eq!(format_chances(&chances), "▲ 0.00 ◀▶ 0.43 ▼ 0.57");
    }

    #[test]
    fn test_formats_missing_odds() {
        colored::control::set_override(false);
        assert_eq!(format_odds(None), "▲ -- ◀▶ -- ▼ --");
        let chances = Chances {
            higher: 0.5,
            lower: 0.25,
            equal: 0.25,
        };
        assert_eq!(format_odds(Some(&chances)), "▲ 0.50 ◀▶ 0.25 ▼ 0.25");
    }
}

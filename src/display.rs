//! Plain-text rendering of a game.
//!
//! Face-down cards are shown as "XX", face-up cards with their two-letter
//! code. Columns are top-justified: the deepest card of every column sits
//! on the first row and the playable card is the lowest one printed.

use crate::card::Card;
use crate::game::GameState;
use crate::tableau::{NUM_COLS, Tableau};

const LEFT_PAD: &str = "      ";
const CELL_WIDTH: usize = 4;

/// `"XX"` for a face-down card, otherwise e.g. `"AH"`, `"TD"`.
pub fn format_card(card: Card) -> String {
    if card.is_face_up() {
        card.short_str()
    } else {
        "XX".to_string()
    }
}

fn format_slot(card: Option<Card>) -> String {
    match card {
        Some(card) => format!("[{}]", card.short_str()),
        None => "[  ]".to_string(),
    }
}

/// The four foundations in slot order, e.g. `Foundations: [AH] [  ] [5C] [  ]`.
pub fn render_foundations(tab: &Tableau) -> String {
    let slots: Vec<String> = (0..tab.foundations.len())
        .map(|slot| format_slot(tab.reserve_slot(slot)))
        .collect();
    format!("Foundations: {}", slots.join(" "))
}

/// Deck size, pile top and pile size on one line.
pub fn render_deck_and_pile(tab: &Tableau) -> String {
    let deck = if tab.deck.is_empty() {
        "Deck: [empty]".to_string()
    } else {
        format!("Deck: [{} cards]", tab.deck.len())
    };

    let pile = match tab.pile_top() {
        Some(top) => format!("Pile: [{}] ({} cards)", top.short_str(), tab.pile.len()),
        None => "Pile: [empty]".to_string(),
    };

    format!("{deck}    {pile}")
}

/// The seven columns, headed `C1`..`C7`.
pub fn render_columns(tab: &Tableau) -> String {
    let mut s = String::from("Columns:\n");
    s.push_str(LEFT_PAD);
    for col in 0..NUM_COLS {
        s.push_str(&format!(" C{} ", col + 1));
    }
    s.push('\n');

    let height = tab.columns.iter().map(Vec::len).max().unwrap_or(0);
    for row in 0..height {
        let mut line = String::from(LEFT_PAD);
        for column in &tab.columns {
            match column.get(row) {
                Some(&card) => line.push_str(&format!("{:>3} ", format_card(card))),
                None => line.push_str(&" ".repeat(CELL_WIDTH)),
            }
        }
        s.push_str(line.trim_end());
        s.push('\n');
    }
    s
}

pub fn render_tableau(tab: &Tableau) -> String {
    format!(
        "{}\n{}\n\n{}",
        render_foundations(tab),
        render_deck_and_pile(tab),
        render_columns(tab)
    )
}

/// The whole board plus the most recently drawn card.
pub fn render_game(game: &GameState) -> String {
    let mut s = render_tableau(game.tableau());
    if let Some(card) = game.current_card() {
        s.push_str(&format!("Current card: {}\n", card.short_str()));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};
    use crate::deck::Deck;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Split the body of `render_columns` back into cells.
    fn parse_grid(rendered: &str) -> Vec<Vec<String>> {
        rendered
            .lines()
            .skip(2)
            .map(|line| {
                (0..NUM_COLS)
                    .map(|col| {
                        let start = LEFT_PAD.len() + CELL_WIDTH * col;
                        let end = (start + CELL_WIDTH).min(line.len());
                        line.get(start..end).unwrap_or("").trim().to_string()
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn dealt_columns_render_cell_by_cell() {
        let mut rng = StdRng::seed_from_u64(123456789);
        let mut tab = Tableau::with_deck(Deck::shuffled(&mut rng));
        tab.deal();

        let grid = parse_grid(&render_columns(&tab));
        assert_eq!(grid.len(), NUM_COLS);
        for (col, cards) in tab.columns.iter().enumerate() {
            for (row, cells) in grid.iter().enumerate() {
                let expected = cards.get(row).map(|&c| format_card(c)).unwrap_or_default();
                assert_eq!(cells[col], expected, "row {row} column {col}");
            }
        }
        assert_eq!(grid[0][0], tab.columns[0][0].short_str());
        assert_eq!(grid[0][6], "XX");
    }

    #[test]
    fn empty_columns_render_only_the_header() {
        let rendered = render_columns(&Tableau::new_empty());
        assert_eq!(rendered.lines().count(), 2);
    }

    #[test]
    fn deck_and_pile_line() {
        let mut tab = Tableau::new_empty();
        assert_eq!(render_deck_and_pile(&tab), "Deck: [empty]    Pile: [empty]");

        tab.deck = Deck::standard();
        tab.pile.push(Card::face_up(Suit::Spades, Rank::Three));
        tab.pile.push(Card::face_up(Suit::Diamonds, Rank::Ten));
        assert_eq!(
            render_deck_and_pile(&tab),
            "Deck: [52 cards]    Pile: [TD] (2 cards)"
        );
    }

    #[test]
    fn foundations_show_the_top_card_per_suit() {
        let mut tab = Tableau::new_empty();
        tab.foundations = [0, 1, 5, 13];
        assert_eq!(
            render_foundations(&tab),
            "Foundations: [  ] [AD] [5C] [KS]"
        );
    }

    #[test]
    fn game_view_includes_the_current_card() {
        let mut game = GameState::with_seed(3);
        game.start();
        assert!(!render_game(&game).contains("Current card"));

        assert!(game.draw_card());
        let current = game.current_card().unwrap();
        let view = render_game(&game);
        assert!(view.contains(&format!("Current card: {}", current.short_str())));
        assert!(view.contains("Deck: [23 cards]"));
    }
}

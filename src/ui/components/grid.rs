//! Movie grid renderer.
//!
//! Each card is `CARD_WIDTH` columns wide and `CARD_HEIGHT` rows tall:
//!
//! ```text
//!  Blade Runner          
//!  1982 · 7.9/10         
//!  ▣ poster              
//!                          ← gap
//! ```

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardItem, GridInfo, CARD_HEIGHT, CARD_WIDTH};

/// Renders the visible card rows starting at `row`.
pub fn render_grid(row: usize, grid: &GridInfo, theme: &Theme, cols: usize) {
    for (i, cards) in grid.rows.iter().enumerate() {
        let top = row + i * CARD_HEIGHT;
        for (col, card) in cards.iter().enumerate() {
            render_card(top, col * CARD_WIDTH + 1, card, theme);
        }
    }

    let marker_col = cols.max(1);
    if grid.more_above {
        position_cursor(row, marker_col);
        print!("{}▲{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
    }
    if grid.more_below {
        position_cursor(row + grid.rows.len().saturating_sub(1) * CARD_HEIGHT + 2, marker_col);
        print!("{}▼{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
    }
}

fn render_card(top: usize, left: usize, card: &CardItem, theme: &Theme) {
    let inner = CARD_WIDTH - 1;
    let style = if card.is_cursor {
        format!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg))
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    position_cursor(top, left);
    print!("{style}{}", Theme::bold());
    print!("{}", fit(&format!(" {}", card.title), inner));
    print!("{}", Theme::reset());

    position_cursor(top + 1, left);
    if card.is_cursor {
        print!("{style}");
    } else {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", fit(&format!(" {}", card.subtitle), inner));
    print!("{}", Theme::reset());

    position_cursor(top + 2, left);
    if card.is_cursor {
        print!("{style}");
    } else if card.has_poster {
        print!("{}", Theme::fg(&theme.colors.accent));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    let marker = if card.has_poster { " ▣ poster" } else { " □ no poster" };
    print!("{}", fit(marker, inner));
    print!("{}", Theme::reset());
}

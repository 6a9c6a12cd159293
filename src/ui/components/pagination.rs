//! Pagination strip renderer.

use crate::ui::helpers::{position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{PageItem, PaginationInfo};

/// Renders `‹ 1 .. 4 5 [6] 7 8 .. 20 ›` centered, highlighting the current page.
pub fn render_pagination(row: usize, info: &PaginationInfo, theme: &Theme, cols: usize) {
    let labels: Vec<(String, bool)> = std::iter::once(("‹".to_string(), false))
        .chain(info.items.iter().map(|item| match item {
            PageItem::Page { number, current } => (format!(" {number} "), *current),
            PageItem::Gap => ("..".to_string(), false),
        }))
        .chain(std::iter::once(("›".to_string(), false)))
        .collect();

    let total: usize = labels.iter().map(|(label, _)| width(label) + 1).sum::<usize>().saturating_sub(1);
    let left = cols.saturating_sub(total) / 2;

    position_cursor(row, 1);
    print!("{}", " ".repeat(left));
    for (i, (label, current)) in labels.iter().enumerate() {
        if i > 0 {
            print!(" ");
        }
        if *current {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{label}");
        print!("{}", Theme::reset());
    }
    print!("{}", " ".repeat(cols.saturating_sub(left + total)));
}

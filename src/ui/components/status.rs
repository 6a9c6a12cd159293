//! Loader, error and welcome messages for the main area.

use crate::ui::helpers::{center, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a centered message with a dimmed subtitle below it.
pub fn render_message(row: usize, state: &EmptyState, color: &str, cols: usize) {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", center(&state.message, cols));
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", center(&state.subtitle, cols));
    print!("{}", Theme::reset());
}

/// Renders the loading indicator.
pub fn render_loader(row: usize, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.loader_fg));
    print!("{}", center("Loading movies...", cols));
    print!("{}", Theme::reset());
}

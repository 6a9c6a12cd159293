//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title, search summary, configuration warning
//! - [`search`]: Search input box
//! - [`grid`]: Movie cards
//! - [`status`]: Loader, error and welcome messages
//! - [`pagination`]: Page strip
//! - [`detail`]: Overlay for the selected movie
//! - [`toasts`]: Notifications in the top-right corner
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! row 1          [blank, toasts overlay on the right]
//! row 2          [Header]
//! row 3          [Border]
//! rows 4-6       [Search Bar]
//! rows 7..       [Grid | Loader | Error | Welcome | blank]
//! rows - 3       [Pagination]
//! rows - 2       [Border]
//! rows - 1       [Footer]
//! ```
//!
//! The detail overlay is drawn last over the main area, toasts after it.

mod detail;
mod footer;
mod grid;
mod header;
mod pagination;
mod search;
mod status;
mod toasts;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::toast::ToastQueue;
use crate::ui::viewmodel::{BodyView, UIViewModel};

use detail::render_detail;
use footer::render_footer;
use grid::render_grid;
use header::render_header;
use pagination::render_pagination;
use search::render_search_bar;
use status::{render_loader, render_message};
use toasts::render_toasts;

/// Renders a horizontal border line. Returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full screen for one view model.
pub fn render_layout(vm: &UIViewModel, toasts: &ToastQueue, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2; // Row 1 stays blank for toasts.

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    let body_top = render_search_bar(current_row, &vm.search_bar, theme, cols);

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let pagination_row = border_row.saturating_sub(1);
    let body_middle = body_top + pagination_row.saturating_sub(body_top) / 2;

    match &vm.body {
        BodyView::Welcome(message) => {
            render_message(body_middle.saturating_sub(1), message, &theme.colors.empty_state_fg, cols);
        }
        BodyView::Loading => render_loader(body_middle, theme, cols),
        BodyView::Failed(message) => {
            render_message(body_middle.saturating_sub(1), message, &theme.colors.error_fg, cols);
        }
        BodyView::NoResults => {}
        BodyView::Grid(grid) => render_grid(body_top, grid, theme, cols),
    }

    if let Some(pagination) = &vm.pagination {
        render_pagination(pagination_row, pagination, theme, cols);
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);

    if let Some(detail) = &vm.detail {
        render_detail(body_top, pagination_row, detail, theme, cols);
    }

    render_toasts(toasts, theme, cols);
}

//! Header component renderer.

use crate::ui::helpers::{fit, position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title, the search summary and any configuration warning on one
/// line. Returns the next row.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    let title = fit(&header.title, cols);
    print!("{title}");
    print!("{}", Theme::reset());
    let mut used = width(&title);

    if let Some(summary) = &header.summary {
        let text = fit(&format!(" {summary}"), cols.saturating_sub(used));
        print!("{}{text}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
        used += width(&text);
    }

    if let Some(warning) = &header.warning {
        let text = fit(&format!("  ! {warning}"), cols.saturating_sub(used));
        print!("{}{text}{}", Theme::fg(&theme.colors.warning_fg), Theme::reset());
        used += width(&text);
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    row + 1
}

//! Detail overlay for the selected movie.

use crate::ui::helpers::{fit, position_cursor, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

const MAX_WIDTH: usize = 72;

/// Draws a bordered box centered over the main area.
///
/// The overview is wrapped to the box width and cut to fit the available rows.
pub fn render_detail(top: usize, bottom: usize, detail: &DetailInfo, theme: &Theme, cols: usize) {
    let box_width = cols.saturating_sub(4).min(MAX_WIDTH).max(10);
    let inner = box_width - 4;
    let left = cols.saturating_sub(box_width) / 2 + 1;

    let mut lines: Vec<(String, Line)> = vec![(detail.title.clone(), Line::Title)];
    if let Some(original) = &detail.original_title {
        lines.push((format!("({original})"), Line::Dim));
    }
    if !detail.facts.is_empty() {
        lines.push((detail.facts.clone(), Line::Accent));
    }
    lines.push((String::new(), Line::Normal));
    lines.extend(wrap(&detail.overview, inner).into_iter().map(|l| (l, Line::Normal)));
    lines.push((String::new(), Line::Normal));
    for url in [&detail.poster_url, &detail.backdrop_url].into_iter().flatten() {
        lines.push((url.clone(), Line::Dim));
    }

    let room = bottom.saturating_sub(top + 1);
    lines.truncate(room);
    let height = lines.len() + 2;
    let top = top + room.saturating_sub(lines.len()) / 2;

    let border = Theme::fg(&theme.colors.overlay_border);
    let bg = Theme::bg(&theme.colors.overlay_bg);

    position_cursor(top, left);
    print!("{bg}{border}╭{}╮{}", "─".repeat(box_width - 2), Theme::reset());

    for (i, (text, kind)) in lines.iter().enumerate() {
        let color = match kind {
            Line::Title => format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg)),
            Line::Accent => Theme::fg(&theme.colors.accent),
            Line::Dim => Theme::fg(&theme.colors.text_dim),
            Line::Normal => Theme::fg(&theme.colors.text_normal),
        };
        position_cursor(top + 1 + i, left);
        print!("{bg}{border}│ {color}{}{}{bg}{border} │{}", fit(text, inner), Theme::reset(), Theme::reset());
    }

    position_cursor(top + height - 1, left);
    print!("{bg}{border}╰{}╯{}", "─".repeat(box_width - 2), Theme::reset());
}

enum Line {
    Title,
    Accent,
    Dim,
    Normal,
}

//! Toast renderer.

use crate::ui::helpers::{position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::toast::ToastQueue;

/// Stacks live toasts in the top-right corner, newest at the bottom.
pub fn render_toasts(toasts: &ToastQueue, theme: &Theme, cols: usize) {
    for (i, toast) in toasts.iter().enumerate() {
        let text = format!(" ✕ {} ", toast.message);
        let col = cols.saturating_sub(width(&text)).max(1);

        position_cursor(1 + i, col);
        print!("{}", Theme::fg(&theme.colors.toast_fg));
        print!("{}", Theme::bg(&theme.colors.toast_bg));
        print!("{text}");
        print!("{}", Theme::reset());
    }
}

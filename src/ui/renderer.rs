//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: `AppState` → `UIViewModel`
//! 2. **Component Rendering**: the layout prints ANSI output to stdout

use crate::app::AppState;
use crate::ui::components;
use crate::ui::toast::ToastQueue;

/// Renders the plugin UI to stdout.
///
/// Does not clear the screen; Zellij hands the plugin a fresh frame per render.
pub fn render(state: &AppState, toasts: &ToastQueue, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    tracing::trace!(rows = rows, cols = cols, "rendering");
    components::render_layout(&viewmodel, toasts, &state.theme, rows, cols);
}

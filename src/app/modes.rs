//! Input mode state machine.
//!
//! The mode decides how key presses are interpreted and which footer hints are
//! shown:
//!
//! ```text
//! Typing ──Enter/Esc──▶ Browsing ──Enter──▶ Detail
//!   ▲                      │  ▲               │
//!   └──────────/───────────┘  └────Esc/q──────┘
//! ```

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// The search bar has focus; characters edit the query text.
    #[default]
    Typing,

    /// The result grid has focus; keys move the cursor and page.
    Browsing,

    /// The detail overlay for the selected movie is open.
    Detail,
}

impl InputMode {
    /// Whether printable characters should go into the search bar.
    #[must_use]
    pub const fn captures_text(self) -> bool {
        matches!(self, Self::Typing)
    }
}

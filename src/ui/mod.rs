//! User interface rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready view model types
//! - [`renderer`]: Top-level rendering entry point
//! - [`components`]: Component renderers and screen layout
//! - [`helpers`]: Text fitting and wrapping
//! - [`theme`]: Color schemes and ANSI escapes
//! - [`toast`]: Notification queue

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod toast;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use toast::ToastQueue;
pub use viewmodel::{BodyView, UIViewModel};

//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin shim (`main.rs`) and the api/query/domain layers:
//!
//! ```text
//! Zellij event → Event → handle_event → state transitions → Vec<Action> → shim
//!                              ▲                                  │
//!                              └──── FetchCompleted / Tick ◀──────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects for the shim to execute
//! - [`handler`]: Event processing
//! - [`modes`]: Input mode state machine
//! - [`notifications`]: Toast messages and their edge detector
//! - [`session`]: Query, page and selection
//! - [`state`]: State container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod notifications;
pub mod session;
pub mod state;

pub use actions::{Action, FetchRequest};
pub use handler::{handle_event, Direction, Event};
pub use modes::InputMode;
pub use notifications::Notification;
pub use session::{SearchSession, SessionState};
pub use state::AppState;

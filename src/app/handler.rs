//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point through which the plugin shim
//! feeds key presses, web request results and timer ticks into the application.
//! Every event is applied atomically and yields a render flag plus the
//! [`Action`]s to execute.
//!
//! # Flow
//!
//! ```text
//! Key/Web/Timer ─▶ Event ─▶ handle_event ─┬─▶ SearchSession (query, page, selection)
//!                                         ├─▶ QueryCoordinator (observe / complete)
//!                                         └─▶ ResolutionWatcher (notification edges)
//!                                                     │
//!                                                     ▼
//!                                      Vec<Action> (Fetch, Notify, CloseFocus)
//! ```

use super::actions::{Action, FetchRequest};
use super::modes::InputMode;
use super::notifications::Notification;
use super::state::AppState;
use crate::domain::{FetchFailure, ReelsearchError, Result, SearchPage, ValidationError};
use crate::query::{FetchTicket, Trigger};
use chrono::{DateTime, Utc};

/// Cursor movement within the result grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Events triggered by user input, web request results or the timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Appends a character to the search bar (typing mode only).
    Char(char),
    /// Removes the last character from the search bar (typing mode only).
    Backspace,
    /// Submits the search bar contents as a new query.
    Submit,
    /// Moves focus to the search bar.
    FocusSearch,
    /// Moves focus to the result grid.
    FocusResults,
    /// Moves the grid cursor.
    Move(Direction),
    /// Opens the detail overlay for the movie under the cursor.
    OpenDetail,
    CloseDetail,
    NextPage,
    PrevPage,
    FirstPage,
    /// Jumps to the last known page of the query.
    LastPage,
    /// Drops the cached result of the active search and fetches it again.
    Refresh,
    /// Hides the plugin pane.
    CloseFocus,

    /// A search request came back with an HTTP status.
    FetchCompleted {
        ticket: FetchTicket,
        status: u16,
        body: Vec<u8>,
    },

    /// A search request could not be completed at all.
    FetchFailed { ticket: FetchTicket, reason: String },

    /// Periodic timer: request timeouts and cache eviction.
    Tick,
}

impl Event {
    /// Short name for spans, without payloads.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Char(_) => "Char",
            Self::Backspace => "Backspace",
            Self::Submit => "Submit",
            Self::FocusSearch => "FocusSearch",
            Self::FocusResults => "FocusResults",
            Self::Move(_) => "Move",
            Self::OpenDetail => "OpenDetail",
            Self::CloseDetail => "CloseDetail",
            Self::NextPage => "NextPage",
            Self::PrevPage => "PrevPage",
            Self::FirstPage => "FirstPage",
            Self::LastPage => "LastPage",
            Self::Refresh => "Refresh",
            Self::CloseFocus => "CloseFocus",
            Self::FetchCompleted { .. } => "FetchCompleted",
            Self::FetchFailed { .. } => "FetchFailed",
            Self::Tick => "Tick",
        }
    }

    const fn is_user_input(&self) -> bool {
        !matches!(
            self,
            Self::FetchCompleted { .. } | Self::FetchFailed { .. } | Self::Tick
        )
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// `now` is the wall-clock time of the event; it drives cache freshness and
/// request timeouts.
///
/// # Returns
///
/// `(should_render, actions)`.
///
/// # Errors
///
/// Returns [`ReelsearchError::Validation`](crate::ReelsearchError::Validation)
/// for input that can never become a search key other than a blank query, which
/// is reported to the user through [`Notification::EmptyQuery`] instead.
///
/// # Example
///
/// ```
/// use reelsearch::{handle_event, initialize, Action, Config, Event};
///
/// let mut state = initialize(&Config::default());
/// let (_, actions) = handle_event(&mut state, &Event::Submit, chrono::Utc::now())?;
/// assert!(matches!(actions.as_slice(), [Action::Notify(_)]));
/// # Ok::<(), reelsearch::ReelsearchError>(())
/// ```
pub fn handle_event(
    state: &mut AppState,
    event: &Event,
    now: DateTime<Utc>,
) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    let mut actions = Vec::new();

    let mut render = match event {
        Event::Char(c) => {
            if !state.input_mode.captures_text() {
                return Ok((false, actions));
            }
            state.input.push(*c);
            tracing::trace!(input = %state.input, "search input updated");
            true
        }
        Event::Backspace => {
            if !state.input_mode.captures_text() {
                return Ok((false, actions));
            }
            state.input.pop().is_some()
        }
        Event::Submit => submit(state, now, &mut actions)?,
        Event::FocusSearch => set_mode(state, InputMode::Typing),
        Event::FocusResults => set_mode(state, InputMode::Browsing),
        Event::Move(direction) => {
            if state.input_mode != InputMode::Browsing {
                return Ok((false, actions));
            }
            move_cursor(state, *direction)
        }
        Event::OpenDetail => open_detail(state),
        Event::CloseDetail => {
            state.session.close_detail();
            set_mode(state, InputMode::Browsing)
        }
        Event::NextPage => {
            let page = state.session.page().saturating_add(1);
            change_page(state, page, now, &mut actions)
        }
        Event::PrevPage => {
            let page = state.session.page().saturating_sub(1);
            change_page(state, page, now, &mut actions)
        }
        Event::FirstPage => change_page(state, 1, now, &mut actions),
        Event::LastPage => {
            let page = state.session.page_bound();
            change_page(state, page, now, &mut actions)
        }
        Event::Refresh => refresh(state, now, &mut actions),
        Event::CloseFocus => {
            actions.push(Action::CloseFocus);
            false
        }
        Event::FetchCompleted { ticket, status, body } => {
            let outcome = state.client.parse_search_response(*status, body);
            complete(state, ticket, outcome, now)
        }
        Event::FetchFailed { ticket, reason } => {
            complete(state, ticket, Err(FetchFailure::Transport(reason.clone())), now)
        }
        Event::Tick => tick(state, now),
    };

    if event.is_user_input() {
        sync(state, Trigger::Passive, now, &mut actions);
    }

    let observation = state.observation();
    if let Some(notification) = state.watcher.observe(state.session.active_key(), &observation) {
        actions.push(Action::Notify(notification));
        render = true;
    }

    Ok((render, actions))
}

fn set_mode(state: &mut AppState, mode: InputMode) -> bool {
    let changed = state.input_mode != mode;
    state.input_mode = mode;
    changed
}

fn submit(state: &mut AppState, now: DateTime<Utc>, actions: &mut Vec<Action>) -> Result<bool> {
    match state.session.submit(&state.input) {
        Ok(_) => {
            state.cursor = 0;
            state.input_mode = InputMode::Browsing;
            sync(state, Trigger::UserAction, now, actions);
            Ok(true)
        }
        Err(ValidationError::EmptyQuery) => {
            tracing::debug!("empty query rejected");
            actions.push(Action::Notify(Notification::EmptyQuery));
            Ok(true)
        }
        Err(e) => Err(e.into()),
    }
}

fn change_page(state: &mut AppState, page: u32, now: DateTime<Utc>, actions: &mut Vec<Action>) -> bool {
    if state.input_mode == InputMode::Typing {
        return false;
    }
    match state.session.change_page(page) {
        Ok(_) => {
            state.cursor = 0;
            sync(state, Trigger::UserAction, now, actions);
            true
        }
        Err(e) => {
            tracing::debug!(requested = page, error = %e, "page change rejected");
            false
        }
    }
}

fn refresh(state: &mut AppState, now: DateTime<Utc>, actions: &mut Vec<Action>) -> bool {
    let Some(key) = state.session.active_key().cloned() else {
        return false;
    };
    state.coordinator.invalidate(&key);
    sync(state, Trigger::UserAction, now, actions);
    true
}

fn open_detail(state: &mut AppState) -> bool {
    if state.input_mode != InputMode::Browsing {
        return false;
    }
    let Some(movie) = state.movie_at_cursor() else {
        tracing::debug!(cursor = state.cursor, "no movie under cursor");
        return false;
    };
    let page = state.displayed_page();
    let selected = state.session.select_movie(movie.id, page.as_deref()).map(|_| ());
    match selected {
        Ok(()) => set_mode(state, InputMode::Detail),
        Err(e) => {
            tracing::debug!(error = %e, "selection rejected");
            false
        }
    }
}

fn move_cursor(state: &mut AppState, direction: Direction) -> bool {
    let Some(len) = state
        .displayed_page()
        .map(|page| page.movies.len())
        .filter(|len| *len > 0)
    else {
        return false;
    };

    let columns = state.grid_columns();
    let cursor = state.cursor.min(len - 1);
    let next = match direction {
        Direction::Left => cursor.saturating_sub(1),
        Direction::Right => (cursor + 1).min(len - 1),
        Direction::Up => cursor.checked_sub(columns).unwrap_or(cursor),
        Direction::Down if cursor + columns < len => cursor + columns,
        Direction::Down => cursor,
    };

    let changed = next != state.cursor;
    state.cursor = next;
    changed
}

fn complete(
    state: &mut AppState,
    ticket: &FetchTicket,
    outcome: std::result::Result<SearchPage, FetchFailure>,
    now: DateTime<Utc>,
) -> bool {
    let total_pages = outcome.as_ref().ok().map(|page| page.total_pages);
    if !state.coordinator.complete(ticket, outcome, now) {
        return false;
    }

    if let Some(total_pages) = total_pages {
        if state.session.query() == Some(ticket.key.query()) {
            state.session.note_total_pages(total_pages);
        }
    }

    let active = state.session.active_key() == Some(&ticket.key);
    if active {
        if let Some(page) = state.displayed_page() {
            if !state.session.retain_selection(&page) && state.input_mode == InputMode::Detail {
                state.input_mode = InputMode::Browsing;
            }
        }
    }
    active
}

fn tick(state: &mut AppState, now: DateTime<Utc>) -> bool {
    let expired = state.coordinator.expire_overdue(now);
    for key in &expired {
        tracing::warn!(key = %key, "search request timed out");
    }

    let active = state.session.active_key().cloned();
    state.coordinator.evict(now, active.as_ref());

    active.is_some_and(|key| expired.contains(&key))
}

/// Observes the active key and turns a resulting ticket into a fetch action.
fn sync(state: &mut AppState, trigger: Trigger, now: DateTime<Utc>, actions: &mut Vec<Action>) {
    let key = state.session.active_key().cloned();
    let (observation, ticket) = state.coordinator.observe(key.as_ref(), trigger, now);
    if let Some(page) = &observation.data {
        state.session.note_total_pages(page.total_pages);
    }
    if let Some(ticket) = ticket {
        dispatch(state, ticket, now, actions);
    }
}

fn dispatch(state: &mut AppState, ticket: FetchTicket, now: DateTime<Utc>, actions: &mut Vec<Action>) {
    match state.client.search_request(&ticket.key) {
        Ok(request) => actions.push(Action::Fetch(FetchRequest { ticket, request })),
        Err(e) => {
            tracing::error!(key = %ticket.key, error = %e, "search request not sent");
            let failure = match e {
                ReelsearchError::Config(message) => FetchFailure::Config(message),
                other => FetchFailure::Transport(other.to_string()),
            };
            state.coordinator.complete(&ticket, Err(failure), now);
        }
    }
}

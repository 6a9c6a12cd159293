//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the reelsearch library
//! and the Zellij plugin system. The library never calls host functions; this
//! shim translates Zellij events into library events and library actions into
//! Zellij API calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for Key, `WebRequestResult`, `Timer` events
//! 3. **Timer**: A one-second tick drives request timeouts, cache eviction and
//!    toast expiry
//! 4. **Update**: Handle events, delegate to library layer
//! 5. **Render**: Call library render function
//!
//! # Requests
//!
//! Search requests go out through `web_request`. The fetch ticket rides along in
//! the request context and is rebuilt from the `WebRequestResult`, so responses
//! are matched to the request that produced them rather than to whatever is on
//! screen when they arrive.
//!
//! # Keybindings
//!
//! Typing (search bar focused):
//! - Printable keys: Edit the query
//! - `Enter`: Search
//! - `Esc`/`Tab`/`Down`: Focus results
//!
//! Browsing (results focused):
//! - `h`/`j`/`k`/`l`, arrows: Move selection
//! - `Enter`: Open details
//! - `/`: Focus search bar
//! - `]`/`n`/`PageDown`: Next page
//! - `[`/`p`/`PageUp`: Previous page
//! - `g`/`Home`, `G`/`End`: First and last page
//! - `r`: Refresh
//! - `q`/`Esc`: Close plugin
//!
//! Detail overlay:
//! - `Esc`/`Enter`/`q`/`Backspace`: Close details

#![allow(clippy::multiple_crate_versions)]

use chrono::Utc;
use std::collections::{BTreeMap, VecDeque};
use zellij_tile::prelude::*;

use reelsearch::app::{Direction, FetchRequest};
use reelsearch::domain::SearchKey;
use reelsearch::query::FetchTicket;
use reelsearch::ui::ToastQueue;
use reelsearch::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Seconds between timer ticks.
const TICK_INTERVAL_SECS: f64 = 1.0;

const CONTEXT_REQUEST_ID: &str = "reelsearch.request_id";
const CONTEXT_QUERY: &str = "reelsearch.query";
const CONTEXT_PAGE: &str = "reelsearch.page";

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with Zellij-specific concerns: the toast
/// queue and the web access permission.
struct State {
    /// Core application state from library layer.
    app: reelsearch::AppState,

    /// Toasts raised by notifications.
    toasts: ToastQueue,

    /// `None` until Zellij answers the permission request.
    web_access: Option<bool>,

    /// Library events produced while executing actions.
    pending: VecDeque<Event>,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: reelsearch::initialize(&default_config),
            toasts: ToastQueue::default(),
            web_access: None,
            pending: VecDeque::new(),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Parses configuration, initializes application state, requests the
    /// `WebAccess` permission, subscribes to events and arms the timer.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        reelsearch::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            base_url = %config.api_base_url,
            language = %config.language,
            has_token = config.tmdb_token.is_some(),
            "parsed configuration"
        );
        self.app = reelsearch::initialize(&config);

        tracing::debug!("requesting permissions");
        request_permission(&[PermissionType::WebAccess]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        set_timeout(TICK_INTERVAL_SECS);
        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let mut render = false;

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_request_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_) => {
                set_timeout(TICK_INTERVAL_SECS);
                render |= self.toasts.expire(Utc::now());
                Event::Tick
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                self.handle_permission_result(permissions);
                return false;
            }
            _ => return false,
        };

        self.pending.push_back(our_event);
        while let Some(event) = self.pending.pop_front() {
            match handle_event(&mut self.app, &event, Utc::now()) {
                Ok((should_render, actions)) => {
                    tracing::debug!(
                        action_count = actions.len(),
                        should_render = should_render,
                        "event handled successfully"
                    );
                    render |= should_render;
                    for a in actions {
                        render |= self.execute_action(a);
                    }
                }
                Err(e) => {
                    tracing::debug!(error = %e, "error handling event");
                }
            }
        }
        render
    }

    /// Renders the plugin UI.
    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_viewport(rows, cols);
        reelsearch::ui::render(&self.app, &self.toasts, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, mode = ?self.app.input_mode, "key event");

        if key.bare_key == BareKey::Char('c') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::CloseFocus);
        }

        Some(match self.app.input_mode {
            InputMode::Typing => match key.bare_key {
                BareKey::Enter => Event::Submit,
                BareKey::Esc | BareKey::Tab | BareKey::Down => Event::FocusResults,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) if key.key_modifiers.is_empty() || key.has_modifiers(&[KeyModifier::Shift]) => {
                    Event::Char(c)
                }
                _ => return None,
            },
            InputMode::Browsing => match key.bare_key {
                BareKey::Left | BareKey::Char('h') => Event::Move(Direction::Left),
                BareKey::Right | BareKey::Char('l') => Event::Move(Direction::Right),
                BareKey::Up | BareKey::Char('k') => Event::Move(Direction::Up),
                BareKey::Down | BareKey::Char('j') => Event::Move(Direction::Down),
                BareKey::Enter => Event::OpenDetail,
                BareKey::Char('/') | BareKey::Tab => Event::FocusSearch,
                BareKey::PageDown | BareKey::Char(']' | 'n') => Event::NextPage,
                BareKey::PageUp | BareKey::Char('[' | 'p') => Event::PrevPage,
                BareKey::Home | BareKey::Char('g') => Event::FirstPage,
                BareKey::End | BareKey::Char('G') => Event::LastPage,
                BareKey::Char('r') => Event::Refresh,
                BareKey::Esc | BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            },
            InputMode::Detail => match key.bare_key {
                BareKey::Esc | BareKey::Enter | BareKey::Backspace | BareKey::Char('q') => {
                    Event::CloseDetail
                }
                _ => return None,
            },
        })
    }

    /// Maps a finished web request back onto the ticket that issued it.
    ///
    /// Results whose context was not written by this plugin are ignored.
    fn map_web_request_result(
        status: u16,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(ticket) = Self::ticket_from_context(context) else {
            tracing::debug!(status = status, "ignoring web request result without a ticket");
            return None;
        };
        tracing::debug!(key = %ticket.key, request_id = ticket.id, status = status, "search response received");

        Some(Event::FetchCompleted {
            ticket,
            status,
            body,
        })
    }

    fn ticket_to_context(ticket: &FetchTicket) -> BTreeMap<String, String> {
        BTreeMap::from([
            (CONTEXT_REQUEST_ID.to_string(), ticket.id.to_string()),
            (CONTEXT_QUERY.to_string(), ticket.key.query().to_string()),
            (CONTEXT_PAGE.to_string(), ticket.key.page().to_string()),
        ])
    }

    fn ticket_from_context(context: &BTreeMap<String, String>) -> Option<FetchTicket> {
        let id = context.get(CONTEXT_REQUEST_ID)?.parse().ok()?;
        let page = context.get(CONTEXT_PAGE)?.parse().ok()?;
        let key = SearchKey::new(context.get(CONTEXT_QUERY)?, page).ok()?;
        Some(FetchTicket { id, key })
    }

    /// Handles permission request results.
    fn handle_permission_result(&mut self, permissions: PermissionStatus) {
        match permissions {
            PermissionStatus::Granted => {
                tracing::debug!("web access granted");
                self.web_access = Some(true);
            }
            PermissionStatus::Denied => {
                tracing::warn!("web access denied - searches will fail");
                self.web_access = Some(false);
            }
        }
    }

    /// Executes an action returned from event handling.
    ///
    /// Returns `true` if the action changed what is on screen.
    #[tracing::instrument(level = "debug", skip_all)]
    fn execute_action(&mut self, action: Action) -> bool {
        match action {
            Action::Fetch(FetchRequest { ticket, request }) => {
                if self.web_access == Some(false) {
                    self.pending.push_back(Event::FetchFailed {
                        ticket,
                        reason: "web access permission denied".to_string(),
                    });
                    return false;
                }
                tracing::debug!(key = %ticket.key, request_id = ticket.id, "sending search request");
                web_request(
                    request.url,
                    HttpVerb::Get,
                    request.headers,
                    Vec::new(),
                    Self::ticket_to_context(&ticket),
                );
                false
            }
            Action::Notify(notification) => {
                self.toasts.push(notification, Utc::now());
                true
            }
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
                false
            }
        }
    }
}

//! Side effects requested by the event handler.
//!
//! [`handle_event`](super::handle_event) never talks to Zellij directly. It
//! returns a `Vec<Action>` and the plugin shim executes them in order.

use super::notifications::Notification;
use crate::api::HttpRequest;
use crate::query::FetchTicket;

/// A search request to issue, tagged with the ticket it must come back with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub request: HttpRequest,
}

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Issue a `GET` through the host's web request API.
    ///
    /// The response must be fed back as
    /// [`Event::FetchCompleted`](super::Event::FetchCompleted) carrying the same
    /// ticket.
    Fetch(FetchRequest),

    /// Show a toast.
    Notify(Notification),

    /// Hides the plugin pane.
    CloseFocus,
}

//! User-facing notifications and the edge detector that raises them.

use crate::domain::SearchKey;
use crate::query::{Observation, QueryStatus};

/// Events the user is told about through a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// Submit was pressed with a blank query.
    EmptyQuery,
    /// The active search resolved with zero movies.
    NoResults,
    /// The active search failed.
    FetchError,
}

impl Notification {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EmptyQuery => "Please enter your search query.",
            Self::NoResults => "No movies found for your request.",
            Self::FetchError => "There was an error, please try again...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Pending,
    Movies,
    NoMovies,
    Failed,
}

impl Outcome {
    fn of(observation: &Observation) -> Self {
        match observation.status {
            QueryStatus::Success if observation.data.as_ref().is_some_and(|p| p.is_empty()) => {
                Self::NoMovies
            }
            QueryStatus::Success => Self::Movies,
            QueryStatus::Error => Self::Failed,
            QueryStatus::Idle | QueryStatus::Loading => Self::Pending,
        }
    }
}

/// Raises [`Notification::NoResults`] / [`Notification::FetchError`] once per
/// resolution of the active key.
///
/// Only transitions count: feeding the same `(key, outcome)` pair again, as
/// every re-render does, yields nothing.
#[derive(Debug, Clone, Default)]
pub struct ResolutionWatcher {
    last: Option<(SearchKey, Outcome)>,
}

impl ResolutionWatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the active key's observation and returns a notification on an edge.
    pub fn observe(&mut self, key: Option<&SearchKey>, observation: &Observation) -> Option<Notification> {
        let current = key.map(|k| (k.clone(), Outcome::of(observation)));
        if current == self.last {
            return None;
        }

        let notification = match &current {
            Some((_, Outcome::NoMovies)) => Some(Notification::NoResults),
            Some((_, Outcome::Failed)) => Some(Notification::FetchError),
            _ => None,
        };
        if let (Some(notification), Some((key, _))) = (notification, &current) {
            tracing::debug!(key = %key, notification = ?notification, "resolution edge");
        }

        self.last = current;
        notification
    }
}

//! Fetch deduplication, freshness and stale-result suppression.
//!
//! The coordinator decides *whether* a key needs a network request and records
//! what comes back. It never issues requests itself: [`QueryCoordinator::observe`]
//! hands out [`FetchTicket`]s and the caller turns them into transport calls, later
//! reporting the outcome through [`QueryCoordinator::complete`].
//!
//! # Rules
//!
//! | Cached state for key        | Passive observe        | User action             |
//! |-----------------------------|------------------------|-------------------------|
//! | request in flight           | no fetch               | no fetch                |
//! | nothing                     | fetch                  | fetch                   |
//! | fresh success               | no fetch               | no fetch                |
//! | stale success               | background refresh     | background refresh      |
//! | stale success, refresh failed | no fetch             | background refresh      |
//! | error                       | no fetch               | retry                   |
//!
//! Completions are stored under the ticket's own key. Only the entry of the
//! active key is ever displayed, so a late result for a superseded key lands in
//! the cache for later reuse without disturbing what the user sees.

use super::cache::{CacheEntry, FetchTicket, InFlight, QueryCache, RequestId, Resolved};
use crate::domain::{FetchFailure, SearchKey, SearchPage};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Timing knobs of the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Successes older than this are shown but refreshed in the background.
    pub stale_after: Duration,
    /// In-flight requests older than this resolve as [`FetchFailure::Timeout`].
    pub request_timeout: Duration,
    /// Resolved entries older than this are evicted unless active.
    pub evict_after: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            stale_after: Duration::from_secs(300),
            request_timeout: Duration::from_secs(30),
            evict_after: Duration::from_secs(600),
        }
    }
}

/// What caused an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Re-render or navigation that does not express a new intent to search.
    Passive,
    /// Explicit user intent (submit, page change, refresh); retries cached errors.
    UserAction,
}

/// Display status of the active key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// No active key, or the key has never been observed.
    Idle,
    /// A request is in flight and there is no data to show.
    Loading,
    Success,
    Error,
}

/// Snapshot of the active key's state as the presentation layer sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub status: QueryStatus,
    pub data: Option<Arc<SearchPage>>,
    pub error: Option<FetchFailure>,
    pub is_fetching: bool,
}

impl Observation {
    /// Observation for "no active search".
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            is_fetching: false,
        }
    }
}

/// Owns the query cache and hands out fetch tickets.
#[derive(Debug, Clone)]
pub struct QueryCoordinator {
    cache: QueryCache,
    policy: CachePolicy,
    next_id: RequestId,
}

impl QueryCoordinator {
    #[must_use]
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            cache: QueryCache::new(),
            policy,
            next_id: 1,
        }
    }

    #[must_use]
    pub const fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    #[must_use]
    pub const fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Observes a key and decides whether a request must be issued for it.
    ///
    /// Passing `None` (no active search) never fetches and yields
    /// [`Observation::idle`].
    ///
    /// ```
    /// use reelsearch::domain::SearchKey;
    /// use reelsearch::query::{CachePolicy, QueryCoordinator, QueryStatus, Trigger};
    ///
    /// let mut coordinator = QueryCoordinator::new(CachePolicy::default());
    /// let key = SearchKey::new("batman", 1).unwrap();
    /// let now = chrono::Utc::now();
    ///
    /// let (observation, ticket) = coordinator.observe(Some(&key), Trigger::UserAction, now);
    /// assert_eq!(observation.status, QueryStatus::Loading);
    /// assert!(ticket.is_some());
    ///
    /// // Same key while pending: no duplicate request.
    /// let (_, again) = coordinator.observe(Some(&key), Trigger::UserAction, now);
    /// assert!(again.is_none());
    /// ```
    pub fn observe(
        &mut self,
        key: Option<&SearchKey>,
        trigger: Trigger,
        now: DateTime<Utc>,
    ) -> (Observation, Option<FetchTicket>) {
        let Some(key) = key else {
            return (Observation::idle(), None);
        };

        let ticket = self
            .fetch_reason(key, trigger, now)
            .map(|background| self.start(key, background, now));

        (self.peek(Some(key)), ticket)
    }

    /// Returns `Some(background)` when `key` needs a request, `None` otherwise.
    fn fetch_reason(&self, key: &SearchKey, trigger: Trigger, now: DateTime<Utc>) -> Option<bool> {
        if self.cache.is_in_flight(key) {
            tracing::trace!(key = %key, "request already in flight");
            return None;
        }

        let Some(entry) = self.cache.get(key) else {
            return Some(false);
        };

        match &entry.result {
            Resolved::Success(_) if !entry.is_older_than(now, self.policy.stale_after) => None,
            Resolved::Success(_) => {
                if entry.refresh_error.is_some() && trigger == Trigger::Passive {
                    tracing::trace!(key = %key, "stale entry with failed refresh, waiting for user action");
                    None
                } else {
                    tracing::debug!(key = %key, "cached result is stale, refreshing in background");
                    Some(true)
                }
            }
            Resolved::Error(_) => match trigger {
                Trigger::UserAction => {
                    tracing::debug!(key = %key, "retrying failed search on user action");
                    Some(false)
                }
                Trigger::Passive => None,
            },
        }
    }

    fn start(&mut self, key: &SearchKey, background: bool, now: DateTime<Utc>) -> FetchTicket {
        let id = self.next_id;
        self.next_id += 1;

        self.cache.mark_in_flight(
            key.clone(),
            InFlight {
                id,
                started_at: now,
                background,
            },
        );

        tracing::debug!(key = %key, request_id = id, background = background, "issuing search request");
        FetchTicket {
            id,
            key: key.clone(),
        }
    }

    /// Returns the current observation for a key without side effects.
    #[must_use]
    pub fn peek(&self, key: Option<&SearchKey>) -> Observation {
        let Some(key) = key else {
            return Observation::idle();
        };

        let fetching = self.cache.is_in_flight(key);
        let entry = self.cache.get(key);

        match entry.map(|e| &e.result) {
            None if fetching => Observation {
                status: QueryStatus::Loading,
                data: None,
                error: None,
                is_fetching: true,
            },
            None => Observation::idle(),
            Some(Resolved::Success(page)) => Observation {
                status: QueryStatus::Success,
                data: Some(Arc::clone(page)),
                error: None,
                is_fetching: fetching,
            },
            Some(Resolved::Error(_)) if fetching => Observation {
                status: QueryStatus::Loading,
                data: None,
                error: None,
                is_fetching: true,
            },
            Some(Resolved::Error(failure)) => Observation {
                status: QueryStatus::Error,
                data: None,
                error: Some(failure.clone()),
                is_fetching: false,
            },
        }
    }

    /// Records the outcome of a request.
    ///
    /// Returns `false` (and changes nothing) when the ticket is not the request
    /// currently in flight for its key, e.g. after a timeout already resolved it.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<SearchPage, FetchFailure>,
        now: DateTime<Utc>,
    ) -> bool {
        let current = self.cache.in_flight(&ticket.key).map(|f| f.id);
        if current != Some(ticket.id) {
            tracing::debug!(
                key = %ticket.key,
                request_id = ticket.id,
                current_request_id = ?current,
                "dropping response for superseded request"
            );
            return false;
        }

        let Some(flight) = self.cache.clear_in_flight(&ticket.key) else {
            return false;
        };

        match outcome {
            Ok(page) => {
                tracing::debug!(
                    key = %ticket.key,
                    result_count = page.movies.len(),
                    total_pages = page.total_pages,
                    "search resolved"
                );
                self.cache.insert(
                    ticket.key.clone(),
                    CacheEntry::new(Resolved::Success(Arc::new(page)), now),
                );
            }
            Err(failure) => self.record_failure(&ticket.key, flight, failure, now),
        }
        true
    }

    fn record_failure(&mut self, key: &SearchKey, flight: InFlight, failure: FetchFailure, now: DateTime<Utc>) {
        if flight.background {
            if let Some(entry) = self.cache.get_mut(key) {
                if matches!(entry.result, Resolved::Success(_)) {
                    tracing::warn!(key = %key, error = %failure, "background refresh failed, keeping stale results");
                    entry.refresh_error = Some(failure);
                    return;
                }
            }
        }

        tracing::warn!(key = %key, error = %failure, "search failed");
        self.cache
            .insert(key.clone(), CacheEntry::new(Resolved::Error(failure), now));
    }

    /// Drops the cached result for `key` so the next observation fetches it.
    ///
    /// An in-flight request for the key is left alone and still resolves it.
    pub fn invalidate(&mut self, key: &SearchKey) -> bool {
        let removed = self.cache.remove(key).is_some();
        tracing::debug!(key = %key, removed = removed, "invalidated cached search");
        removed
    }

    /// Resolves requests that exceeded the request timeout.
    ///
    /// Returns the affected keys. Their late responses are rejected by
    /// [`complete`](Self::complete).
    pub fn expire_overdue(&mut self, now: DateTime<Utc>) -> Vec<SearchKey> {
        let timeout = self.policy.request_timeout;
        let overdue = self.cache.overdue(now, timeout);

        for key in &overdue {
            if let Some(flight) = self.cache.clear_in_flight(key) {
                let failure = FetchFailure::Timeout {
                    after_secs: timeout.as_secs(),
                };
                self.record_failure(key, flight, failure, now);
            }
        }
        overdue
    }

    /// Evicts resolved entries older than the eviction age, except `keep`.
    ///
    /// Returns the number of evicted entries.
    pub fn evict(&mut self, now: DateTime<Utc>, keep: Option<&SearchKey>) -> usize {
        let evict_after = self.policy.evict_after;
        let in_flight = self.cache.in_flight_keys();

        let evicted = self.cache.retain_entries(|key, entry| {
            keep == Some(key) || in_flight.contains(key) || !entry.is_older_than(now, evict_after)
        });

        if evicted > 0 {
            tracing::debug!(evicted = evicted, remaining = self.cache.len(), "evicted unused searches");
        }
        evicted
    }
}

impl Default for QueryCoordinator {
    fn default() -> Self {
        Self::new(CachePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Movie;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn key(query: &str, page: u32) -> SearchKey {
        SearchKey::new(query, page).unwrap()
    }

    fn page_of(titles: &[&str], total_pages: u32) -> SearchPage {
        let movies = titles
            .iter()
            .enumerate()
            .map(|(i, t)| Movie::new(i as u64 + 1, *t, None))
            .collect::<Vec<_>>();
        let count = movies.len() as u64;
        SearchPage::new(movies, 1, total_pages, count)
    }

    fn titles(observation: &Observation) -> Vec<String> {
        observation
            .data
            .as_ref()
            .map(|p| p.movies.iter().map(|m| m.title.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn none_key_is_idle_and_never_fetches() {
        let mut qc = QueryCoordinator::default();
        let (observation, ticket) = qc.observe(None, Trigger::UserAction, at(0));
        assert_eq!(observation, Observation::idle());
        assert!(ticket.is_none());
        assert_eq!(qc.cache().in_flight_count(), 0);
    }

    #[test]
    fn fresh_success_is_served_from_cache() {
        let mut qc = QueryCoordinator::default();
        let k = key("batman", 3);
        let (_, ticket) = qc.observe(Some(&k), Trigger::UserAction, at(0));
        assert!(qc.complete(&ticket.unwrap(), Ok(page_of(&["Batman"], 5)), at(1)));

        let (observation, ticket) = qc.observe(Some(&k), Trigger::UserAction, at(100));
        assert!(ticket.is_none());
        assert_eq!(observation.status, QueryStatus::Success);
        assert!(!observation.is_fetching);
        assert_eq!(titles(&observation), vec!["Batman"]);
    }

    #[test]
    fn stale_success_is_shown_while_one_refresh_runs() {
        let mut qc = QueryCoordinator::default();
        let k = key("alien", 1);
        let (_, ticket) = qc.observe(Some(&k), Trigger::UserAction, at(0));
        qc.complete(&ticket.unwrap(), Ok(page_of(&["Alien"], 1)), at(0));

        let (observation, refresh) = qc.observe(Some(&k), Trigger::Passive, at(301));
        assert!(refresh.is_some());
        assert_eq!(observation.status, QueryStatus::Success);
        assert!(observation.is_fetching);
        assert_eq!(titles(&observation), vec!["Alien"]);

        let (_, duplicate) = qc.observe(Some(&k), Trigger::UserAction, at(302));
        assert!(duplicate.is_none());

        qc.complete(&refresh.unwrap(), Ok(page_of(&["Alien", "Aliens"], 1)), at(303));
        let observation = qc.peek(Some(&k));
        assert_eq!(titles(&observation), vec!["Alien", "Aliens"]);
        assert!(!observation.is_fetching);
    }

    #[test]
    fn failed_background_refresh_keeps_stale_data_until_user_acts() {
        let mut qc = QueryCoordinator::default();
        let k = key("alien", 1);
        let (_, ticket) = qc.observe(Some(&k), Trigger::UserAction, at(0));
        qc.complete(&ticket.unwrap(), Ok(page_of(&["Alien"], 1)), at(0));

        let (_, refresh) = qc.observe(Some(&k), Trigger::Passive, at(400));
        qc.complete(&refresh.unwrap(), Err(FetchFailure::Transport("offline".into())), at(401));

        let observation = qc.peek(Some(&k));
        assert_eq!(observation.status, QueryStatus::Success);
        assert_eq!(titles(&observation), vec!["Alien"]);

        let (_, passive) = qc.observe(Some(&k), Trigger::Passive, at(402));
        assert!(passive.is_none());
        let (_, user) = qc.observe(Some(&k), Trigger::UserAction, at(403));
        assert!(user.is_some());
    }

    #[test]
    fn errors_are_cached_and_retried_only_on_user_action() {
        let mut qc = QueryCoordinator::default();
        let k = key("batman", 1);
        let (_, ticket) = qc.observe(Some(&k), Trigger::UserAction, at(0));
        qc.complete(&ticket.unwrap(), Err(FetchFailure::Transport("dns".into())), at(1));

        let (observation, passive) = qc.observe(Some(&k), Trigger::Passive, at(2));
        assert!(passive.is_none());
        assert_eq!(observation.status, QueryStatus::Error);
        assert_eq!(observation.error, Some(FetchFailure::Transport("dns".into())));

        let (observation, retry) = qc.observe(Some(&k), Trigger::UserAction, at(3));
        assert!(retry.is_some());
        assert_eq!(observation.status, QueryStatus::Loading);
        assert!(observation.error.is_none());
    }

    #[test]
    fn late_result_for_superseded_key_is_cached_but_not_displayed() {
        let mut qc = QueryCoordinator::default();
        let k1 = key("batman", 1);
        let k2 = key("superman", 1);

        let (_, t1) = qc.observe(Some(&k1), Trigger::UserAction, at(0));
        let (_, t2) = qc.observe(Some(&k2), Trigger::UserAction, at(1));

        qc.complete(&t2.unwrap(), Ok(page_of(&["Superman"], 1)), at(2));
        qc.complete(&t1.unwrap(), Ok(page_of(&["Batman"], 1)), at(3));

        assert_eq!(titles(&qc.peek(Some(&k2))), vec!["Superman"]);

        let (cached, ticket) = qc.observe(Some(&k1), Trigger::UserAction, at(4));
        assert!(ticket.is_none());
        assert_eq!(titles(&cached), vec!["Batman"]);
    }

    #[test]
    fn timed_out_requests_fail_and_reject_late_responses() {
        let mut qc = QueryCoordinator::default();
        let k = key("heat", 1);
        let (_, ticket) = qc.observe(Some(&k), Trigger::UserAction, at(0));
        let ticket = ticket.unwrap();

        assert!(qc.expire_overdue(at(29)).is_empty());
        assert_eq!(qc.expire_overdue(at(30)), vec![k.clone()]);

        let observation = qc.peek(Some(&k));
        assert_eq!(observation.status, QueryStatus::Error);
        assert_eq!(observation.error, Some(FetchFailure::Timeout { after_secs: 30 }));

        assert!(!qc.complete(&ticket, Ok(page_of(&["Heat"], 1)), at(31)));
        assert_eq!(qc.peek(Some(&k)).status, QueryStatus::Error);
    }

    #[test]
    fn invalidate_forces_a_new_request() {
        let mut qc = QueryCoordinator::default();
        let k = key("heat", 1);
        let (_, ticket) = qc.observe(Some(&k), Trigger::UserAction, at(0));
        qc.complete(&ticket.unwrap(), Ok(page_of(&["Heat"], 1)), at(0));

        assert!(qc.invalidate(&k));
        let (observation, ticket) = qc.observe(Some(&k), Trigger::Passive, at(1));
        assert!(ticket.is_some());
        assert_eq!(observation.status, QueryStatus::Loading);
    }

    #[test]
    fn eviction_spares_the_active_key() {
        let mut qc = QueryCoordinator::default();
        let old = key("old", 1);
        let active = key("active", 1);
        for k in [&old, &active] {
            let (_, ticket) = qc.observe(Some(k), Trigger::UserAction, at(0));
            qc.complete(&ticket.unwrap(), Ok(page_of(&["x"], 1)), at(0));
        }

        assert_eq!(qc.evict(at(599), Some(&active)), 0);
        assert_eq!(qc.evict(at(600), Some(&active)), 1);
        assert!(qc.cache().get(&old).is_none());
        assert!(qc.cache().get(&active).is_some());
    }
}

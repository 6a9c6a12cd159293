//! Keyed result cache with in-flight bookkeeping.
//!
//! [`QueryCache`] is deliberately dumb storage: a map from [`SearchKey`] to the last
//! resolved result plus a map of requests currently in flight. All freshness and
//! retry decisions live in [`QueryCoordinator`](super::QueryCoordinator).

use crate::domain::{FetchFailure, SearchKey, SearchPage};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Identifier attached to every issued request.
pub type RequestId = u64;

/// A request the coordinator wants issued, tagged with the key it belongs to.
///
/// The ticket travels with the request through the transport and comes back with
/// the response; only the ticket currently in flight for its key is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub id: RequestId,
    pub key: SearchKey,
}

/// Terminal outcome of a fetch for one key.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Success(Arc<SearchPage>),
    Error(FetchFailure),
}

/// Resolved result plus the metadata needed for freshness decisions.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub result: Resolved,
    pub resolved_at: DateTime<Utc>,
    /// Failure of the most recent background refresh of a successful entry.
    ///
    /// While set, the stale data keeps being shown and passive observers do not
    /// refresh it again.
    pub refresh_error: Option<FetchFailure>,
}

impl CacheEntry {
    #[must_use]
    pub const fn new(result: Resolved, resolved_at: DateTime<Utc>) -> Self {
        Self {
            result,
            resolved_at,
            refresh_error: None,
        }
    }

    /// Returns `true` once the entry is at least `max_age` old.
    #[must_use]
    pub fn is_older_than(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        age(self.resolved_at, now) >= max_age
    }
}

/// A request that has been handed to the transport and not yet resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight {
    pub id: RequestId,
    pub started_at: DateTime<Utc>,
    /// Refreshes a stale success that stays visible meanwhile.
    pub background: bool,
}

/// Map of resolved results and in-flight requests, keyed by [`SearchKey`].
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    entries: HashMap<SearchKey, CacheEntry>,
    in_flight: HashMap<SearchKey, InFlight>,
}

impl QueryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &SearchKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &SearchKey) -> Option<&mut CacheEntry> {
        self.entries.get_mut(key)
    }

    /// Stores a resolved result, replacing any previous one for the key.
    pub fn insert(&mut self, key: SearchKey, entry: CacheEntry) {
        self.entries.insert(key, entry);
    }

    pub fn remove(&mut self, key: &SearchKey) -> Option<CacheEntry> {
        self.entries.remove(key)
    }

    #[must_use]
    pub fn in_flight(&self, key: &SearchKey) -> Option<&InFlight> {
        self.in_flight.get(key)
    }

    #[must_use]
    pub fn is_in_flight(&self, key: &SearchKey) -> bool {
        self.in_flight.contains_key(key)
    }

    pub fn mark_in_flight(&mut self, key: SearchKey, flight: InFlight) {
        self.in_flight.insert(key, flight);
    }

    pub fn clear_in_flight(&mut self, key: &SearchKey) -> Option<InFlight> {
        self.in_flight.remove(key)
    }

    #[must_use]
    pub fn in_flight_keys(&self) -> Vec<SearchKey> {
        self.in_flight.keys().cloned().collect()
    }

    /// Keys whose request has been in flight for at least `timeout`.
    #[must_use]
    pub fn overdue(&self, now: DateTime<Utc>, timeout: Duration) -> Vec<SearchKey> {
        self.in_flight
            .iter()
            .filter(|(_, flight)| age(flight.started_at, now) >= timeout)
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Drops resolved entries matching `predicate`; returns how many were removed.
    pub fn retain_entries<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&SearchKey, &CacheEntry) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|key, entry| predicate(key, entry));
        before - self.entries.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }
}

/// Elapsed time between two instants; clock skew backwards counts as zero.
fn age(since: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (now - since).to_std().unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn key(page: u32) -> SearchKey {
        SearchKey::new("dune", page).unwrap()
    }

    #[test]
    fn entry_age_is_measured_from_resolution() {
        let entry = CacheEntry::new(Resolved::Error(FetchFailure::Decode("x".into())), at(0));
        assert!(!entry.is_older_than(at(299), Duration::from_secs(300)));
        assert!(entry.is_older_than(at(300), Duration::from_secs(300)));
        assert!(!entry.is_older_than(at(-10), Duration::from_secs(300)));
    }

    #[test]
    fn overdue_lists_only_requests_past_the_timeout() {
        let mut cache = QueryCache::new();
        cache.mark_in_flight(key(1), InFlight { id: 1, started_at: at(0), background: false });
        cache.mark_in_flight(key(2), InFlight { id: 2, started_at: at(20), background: false });

        assert_eq!(cache.overdue(at(30), Duration::from_secs(30)), vec![key(1)]);
        assert_eq!(cache.in_flight_count(), 2);
        assert_eq!(cache.clear_in_flight(&key(1)).map(|f| f.id), Some(1));
        assert!(!cache.is_in_flight(&key(1)));
    }

    #[test]
    fn retain_entries_reports_removed_count() {
        let mut cache = QueryCache::new();
        for page in 1..=3 {
            cache.insert(
                key(page),
                CacheEntry::new(Resolved::Error(FetchFailure::Decode("x".into())), at(0)),
            );
        }
        let removed = cache.retain_entries(|k, _| k.page() == 2);
        assert_eq!(removed, 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&key(2)).is_some());
    }
}

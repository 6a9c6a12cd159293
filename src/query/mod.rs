//! Query caching and request coordination for search keys.

pub mod cache;
pub mod coordinator;

pub use cache::{CacheEntry, FetchTicket, QueryCache, RequestId, Resolved};
pub use coordinator::{CachePolicy, Observation, QueryCoordinator, QueryStatus, Trigger};

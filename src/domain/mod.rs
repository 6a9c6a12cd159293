//! Domain layer for the reelsearch plugin.
//!
//! Core types independent of Zellij APIs and of the HTTP transport.
//!
//! # Organization
//!
//! - [`error`]: Error taxonomy and result alias
//! - [`movie`]: Movie model and image URL derivation
//! - [`search_key`]: `(query, page)` cache identity
//! - [`page`]: One resolved page of search results

pub mod error;
pub mod movie;
pub mod page;
pub mod search_key;

pub use error::{FetchFailure, ReelsearchError, Result, ValidationError};
pub use movie::Movie;
pub use page::SearchPage;
pub use search_key::SearchKey;

//! TMDB API client layer.
//!
//! - [`client`]: Request building and response parsing
//! - [`wire`]: JSON shapes of the search endpoint

pub mod client;
pub mod wire;

pub use client::{ApiConfig, HttpRequest, TmdbClient, DEFAULT_BASE_URL, DEFAULT_LANGUAGE};

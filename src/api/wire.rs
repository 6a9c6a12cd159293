//! Wire formats of the TMDB search endpoint.

use crate::domain::{Movie, SearchPage};
use serde::Deserialize;

/// Body of a successful `GET /search/movie` response.
#[derive(Debug, Deserialize)]
pub struct MoviesResponse {
    #[serde(default = "first_page")]
    pub page: u32,
    pub results: Vec<Movie>,
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

/// Body TMDB sends alongside error statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub status_message: String,
}

impl From<MoviesResponse> for SearchPage {
    fn from(response: MoviesResponse) -> Self {
        Self::new(
            response.results,
            response.page,
            response.total_pages,
            response.total_results,
        )
    }
}

const fn first_page() -> u32 {
    1
}

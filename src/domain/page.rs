//! One resolved page of search results.

use super::movie::Movie;

/// TMDB refuses to serve search pages beyond this one.
pub const MAX_PAGES: u32 = 500;

/// Movies for one search key plus pagination metadata.
///
/// Movies keep the order returned by the API (relevance order).
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub movies: Vec<Movie>,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
}

impl SearchPage {
    /// Creates a page, clamping `total_pages` to `1..=MAX_PAGES`.
    #[must_use]
    pub fn new(movies: Vec<Movie>, page: u32, total_pages: u32, total_results: u64) -> Self {
        Self {
            movies,
            page: page.max(1),
            total_pages: total_pages.clamp(1, MAX_PAGES),
            total_results,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Finds a movie of this page by TMDB id.
    #[must_use]
    pub fn movie(&self, id: u64) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_clamped_to_tmdb_limits() {
        assert_eq!(SearchPage::new(vec![], 1, 0, 0).total_pages, 1);
        assert_eq!(SearchPage::new(vec![], 1, 2_000, 40_000).total_pages, MAX_PAGES);
        assert_eq!(SearchPage::new(vec![], 1, 7, 140).total_pages, 7);
    }

    #[test]
    fn finds_movies_by_id() {
        let page = SearchPage::new(vec![Movie::new(1, "Alien", None), Movie::new(2, "Aliens", None)], 1, 1, 2);
        assert_eq!(page.movie(2).map(|m| m.title.as_str()), Some("Aliens"));
        assert!(page.movie(3).is_none());
    }
}

//! Search session: the query, page and selection the user is looking at.
//!
//! The session is the only owner of the active [`SearchKey`]. It validates user
//! intents and reports what changed; deciding whether that needs a network
//! request is the coordinator's job.

use crate::domain::{Movie, SearchKey, SearchPage, ValidationError};

/// Coarse lifecycle of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No query has been submitted (or it was cleared).
    Idle,
    /// A query is set; its results are pending or displayed.
    Searching,
}

/// Query, page and selection of the plugin's single search view.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    active: Option<SearchKey>,
    selected: Option<Movie>,
    /// Last `total_pages` seen for the active query, on any of its pages.
    known_total_pages: Option<u32>,
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        if self.active.is_some() {
            SessionState::Searching
        } else {
            SessionState::Idle
        }
    }

    /// Key whose result is displayed, `None` while idle.
    #[must_use]
    pub const fn active_key(&self) -> Option<&SearchKey> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.active.as_ref().map(SearchKey::query)
    }

    /// Current page; 1 while idle.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.active.as_ref().map_or(1, SearchKey::page)
    }

    #[must_use]
    pub const fn selected(&self) -> Option<&Movie> {
        self.selected.as_ref()
    }

    #[must_use]
    pub const fn known_total_pages(&self) -> Option<u32> {
        self.known_total_pages
    }

    /// Starts a new search at page 1 and clears the selection.
    ///
    /// Resubmitting the current query is allowed and also jumps back to page 1.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyQuery`] for blank input; the session is
    /// left untouched in that case.
    ///
    /// ```
    /// use reelsearch::app::session::SearchSession;
    ///
    /// let mut session = SearchSession::new();
    /// let key = session.submit("  heat ").unwrap();
    /// assert_eq!((key.query(), key.page()), ("heat", 1));
    /// assert!(session.submit("   ").is_err());
    /// assert_eq!(session.query(), Some("heat"));
    /// ```
    pub fn submit(&mut self, raw: &str) -> Result<SearchKey, ValidationError> {
        let key = SearchKey::new(raw, 1)?;

        if self.query() != Some(key.query()) {
            self.known_total_pages = None;
        }
        self.active = Some(key.clone());
        self.selected = None;

        tracing::debug!(key = %key, "search submitted");
        Ok(key)
    }

    /// Moves to page `page` of the active query.
    ///
    /// The upper bound is the last known page count for the query, or 1 when no
    /// page of it has resolved yet. The selection is cleared since it referenced
    /// the previous page's results.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::NoActiveSearch`] while idle
    /// - [`ValidationError::ZeroPage`] / [`ValidationError::PageOutOfRange`]
    ///   for pages outside `1..=bound`
    pub fn change_page(&mut self, page: u32) -> Result<SearchKey, ValidationError> {
        let current = self.active.as_ref().ok_or(ValidationError::NoActiveSearch)?;
        let total_pages = self.page_bound();

        if page > total_pages {
            return Err(ValidationError::PageOutOfRange {
                requested: page,
                total_pages,
            });
        }
        let key = current.with_page(page)?;

        if key.page() != current.page() {
            self.selected = None;
        }
        self.active = Some(key.clone());

        tracing::debug!(key = %key, total_pages = total_pages, "page changed");
        Ok(key)
    }

    /// Highest page [`change_page`](Self::change_page) accepts.
    #[must_use]
    pub fn page_bound(&self) -> u32 {
        self.known_total_pages.unwrap_or(1).max(1)
    }

    /// Records the page count reported by a resolved page of the active query.
    pub fn note_total_pages(&mut self, total_pages: u32) {
        self.known_total_pages = Some(total_pages.max(1));
    }

    /// Opens the detail view for a movie of the displayed page.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownMovie`] when nothing is displayed or the
    /// id is not on the displayed page.
    pub fn select_movie(
        &mut self,
        movie_id: u64,
        displayed: Option<&SearchPage>,
    ) -> Result<&Movie, ValidationError> {
        let movie = displayed
            .and_then(|page| page.movie(movie_id))
            .ok_or(ValidationError::UnknownMovie(movie_id))?;

        tracing::debug!(movie_id = movie.id, title = %movie.title, "movie selected");
        Ok(&*self.selected.insert(movie.clone()))
    }

    /// Keeps the selection only if `displayed` still contains it.
    ///
    /// Returns `false` when a selection was dropped.
    pub fn retain_selection(&mut self, displayed: &SearchPage) -> bool {
        let dangling = self
            .selected
            .as_ref()
            .is_some_and(|movie| displayed.movie(movie.id).is_none());
        if dangling {
            if let Some(movie) = self.selected.take() {
                tracing::debug!(movie_id = movie.id, "selection left the displayed results");
            }
        }
        !dangling
    }

    pub fn close_detail(&mut self) {
        if let Some(movie) = self.selected.take() {
            tracing::debug!(movie_id = movie.id, "detail closed");
        }
    }

    /// Returns to [`SessionState::Idle`].
    pub fn clear(&mut self) {
        tracing::debug!("search cleared");
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with(ids: &[u64], total_pages: u32) -> SearchPage {
        let movies = ids
            .iter()
            .map(|id| Movie::new(*id, format!("Movie {id}"), None))
            .collect();
        SearchPage::new(movies, 1, total_pages, ids.len() as u64)
    }

    fn searching(query: &str, total_pages: u32) -> SearchSession {
        let mut session = SearchSession::new();
        session.submit(query).unwrap();
        session.note_total_pages(total_pages);
        session
    }

    #[test]
    fn selection_is_dropped_when_results_no_longer_contain_it() {
        let mut session = searching("alien", 1);
        session.select_movie(7, Some(&page_with(&[7, 8], 1))).unwrap();

        assert!(session.retain_selection(&page_with(&[7], 1)));
        assert_eq!(session.selected().map(|m| m.id), Some(7));

        assert!(!session.retain_selection(&page_with(&[8], 1)));
        assert!(session.selected().is_none());
        assert!(session.retain_selection(&page_with(&[8], 1)));
    }

    #[test]
    fn starts_idle_without_a_key() {
        let session = SearchSession::new();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.active_key().is_none());
        assert_eq!(session.page(), 1);
    }

    #[test]
    fn submit_resets_page_and_selection() {
        let mut session = searching("alien", 5);
        session.change_page(4).unwrap();
        session.select_movie(7, Some(&page_with(&[7], 5))).unwrap();

        let key = session.submit("aliens").unwrap();
        assert_eq!(key.page(), 1);
        assert_eq!(session.state(), SessionState::Searching);
        assert!(session.selected().is_none());
        assert_eq!(session.known_total_pages(), None);
    }

    #[test]
    fn resubmitting_the_same_query_keeps_page_count() {
        let mut session = searching("alien", 5);
        session.change_page(3).unwrap();
        session.submit(" alien ").unwrap();
        assert_eq!(session.page(), 1);
        assert_eq!(session.known_total_pages(), Some(5));
    }

    #[test]
    fn blank_submit_changes_nothing() {
        let mut session = searching("alien", 5);
        session.change_page(2).unwrap();

        assert_eq!(session.submit(" \t "), Err(ValidationError::EmptyQuery));
        assert_eq!(session.query(), Some("alien"));
        assert_eq!(session.page(), 2);
    }

    #[test]
    fn page_changes_are_bounded_by_known_total() {
        let mut session = searching("alien", 5);
        assert_eq!(session.change_page(5).map(|k| k.page()), Ok(5));
        assert_eq!(
            session.change_page(6),
            Err(ValidationError::PageOutOfRange {
                requested: 6,
                total_pages: 5
            })
        );
        assert_eq!(session.change_page(0), Err(ValidationError::ZeroPage));
        assert_eq!(session.page(), 5);
    }

    #[test]
    fn unknown_total_allows_only_the_first_page() {
        let mut session = SearchSession::new();
        assert_eq!(session.change_page(1), Err(ValidationError::NoActiveSearch));

        session.submit("alien").unwrap();
        assert!(session.change_page(1).is_ok());
        assert!(session.change_page(2).is_err());
    }

    #[test]
    fn selection_must_come_from_displayed_page() {
        let mut session = searching("alien", 1);
        let page = page_with(&[1, 2], 1);

        assert_eq!(session.select_movie(3, Some(&page)).err(), Some(ValidationError::UnknownMovie(3)));
        assert_eq!(session.select_movie(1, None).err(), Some(ValidationError::UnknownMovie(1)));
        assert_eq!(session.select_movie(2, Some(&page)).map(|m| m.id), Ok(2));

        session.close_detail();
        assert!(session.selected().is_none());
        assert_eq!(session.query(), Some("alien"));
    }

    #[test]
    fn clear_returns_to_idle() {
        let mut session = searching("alien", 3);
        session.clear();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.known_total_pages(), None);
    }
}

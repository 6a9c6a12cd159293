//! Application state and view model computation.
//!
//! [`AppState`] owns everything the plugin knows: the search session, the query
//! coordinator with its cache, the API client, and transient UI state such as
//! the search bar text and the grid cursor. It is mutated only by
//! [`handle_event`](super::handle_event) and turned into a
//! [`UIViewModel`] on demand.

use super::modes::InputMode;
use super::notifications::ResolutionWatcher;
use super::session::SearchSession;
use crate::api::TmdbClient;
use crate::domain::{Movie, SearchPage};
use crate::query::{CachePolicy, Observation, QueryCoordinator, QueryStatus};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    page_items, BodyView, CardItem, DetailInfo, EmptyState, FooterInfo, GridInfo, HeaderInfo,
    PaginationInfo, SearchBarInfo, UIViewModel, CARD_HEIGHT, CARD_WIDTH, CHROME_ROWS,
};
use std::sync::Arc;

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    pub session: SearchSession,
    pub coordinator: QueryCoordinator,
    pub client: TmdbClient,
    pub watcher: ResolutionWatcher,

    /// Search bar contents. Only becomes the query on submit.
    pub input: String,

    pub input_mode: InputMode,

    /// Index of the highlighted card within the displayed page.
    ///
    /// Reset to 0 on every new search or page change, which scrolls the grid
    /// back to the top.
    pub cursor: usize,

    /// Last rendered `(rows, cols)`, used to lay out cursor movement.
    pub viewport: (usize, usize),

    pub theme: Theme,
}

impl AppState {
    #[must_use]
    pub fn new(client: TmdbClient, policy: CachePolicy, theme: Theme) -> Self {
        Self {
            session: SearchSession::new(),
            coordinator: QueryCoordinator::new(policy),
            client,
            watcher: ResolutionWatcher::new(),
            input: String::new(),
            input_mode: InputMode::Typing,
            cursor: 0,
            viewport: (24, 80),
            theme,
        }
    }

    /// Observation of the active key, without side effects.
    #[must_use]
    pub fn observation(&self) -> Observation {
        self.coordinator.peek(self.session.active_key())
    }

    /// Page currently shown in the grid, if any.
    #[must_use]
    pub fn displayed_page(&self) -> Option<Arc<SearchPage>> {
        self.observation().data
    }

    /// Movie under the grid cursor.
    #[must_use]
    pub fn movie_at_cursor(&self) -> Option<Movie> {
        self.displayed_page()
            .and_then(|page| page.movies.get(self.cursor).cloned())
    }

    /// Number of card columns that fit the last rendered width.
    #[must_use]
    pub fn grid_columns(&self) -> usize {
        grid_columns(self.viewport.1)
    }

    /// Records the terminal size the next render will use.
    pub fn set_viewport(&mut self, rows: usize, cols: usize) {
        self.viewport = (rows, cols);
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// Exactly one [`BodyView`] is chosen:
    ///
    /// | observation                      | body        |
    /// |----------------------------------|-------------|
    /// | no active search                 | `Welcome`   |
    /// | fetching, nothing to show        | `Loading`   |
    /// | error, not fetching              | `Failed`    |
    /// | success with zero movies         | `NoResults` |
    /// | success with movies (maybe stale)| `Grid`      |
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let observation = self.observation();

        let body = match (&observation.status, &observation.data) {
            (QueryStatus::Idle, _) => BodyView::Welcome(EmptyState {
                message: "Search for a movie".to_string(),
                subtitle: "Type a title and press Enter".to_string(),
            }),
            (_, Some(page)) if page.is_empty() => BodyView::NoResults,
            (_, Some(page)) => BodyView::Grid(self.compute_grid(page, rows, cols)),
            (QueryStatus::Error, None) => BodyView::Failed(EmptyState {
                message: "Whoops, something went wrong!".to_string(),
                subtitle: "Press r to try again".to_string(),
            }),
            (QueryStatus::Loading | QueryStatus::Success, None) => BodyView::Loading,
        };

        let pagination = observation
            .data
            .as_ref()
            .filter(|page| !page.is_empty() && page.total_pages > 1)
            .map(|page| PaginationInfo {
                page: self.session.page(),
                total_pages: page.total_pages,
                items: page_items(self.session.page(), page.total_pages),
            });

        UIViewModel {
            header: self.compute_header(&observation),
            search_bar: SearchBarInfo {
                query: self.input.clone(),
                focused: self.input_mode == InputMode::Typing,
            },
            body,
            pagination,
            detail: self.session.selected().map(compute_detail),
            footer: self.compute_footer(),
        }
    }

    fn compute_grid(&self, page: &SearchPage, rows: usize, cols: usize) -> GridInfo {
        let columns = grid_columns(cols);
        let visible_rows = (rows.saturating_sub(CHROME_ROWS) / CARD_HEIGHT).max(1);
        let total_rows = (page.movies.len() + columns - 1) / columns;

        let cursor_row = self.cursor / columns;
        let first_row = (cursor_row + 1).saturating_sub(visible_rows);
        let last_row = (first_row + visible_rows).min(total_rows);

        let rows = page
            .movies
            .chunks(columns)
            .enumerate()
            .skip(first_row)
            .take(last_row - first_row)
            .map(|(row, movies)| {
                movies
                    .iter()
                    .enumerate()
                    .map(|(col, movie)| compute_card(movie, row * columns + col == self.cursor))
                    .collect()
            })
            .collect();

        GridInfo {
            columns,
            rows,
            more_above: first_row > 0,
            more_below: last_row < total_rows,
        }
    }

    fn compute_header(&self, observation: &Observation) -> HeaderInfo {
        let summary = self.session.query().map(|query| {
            let mut parts = vec![format!("\"{query}\"")];
            if let Some(page) = &observation.data {
                parts.push(format!("page {}/{}", self.session.page(), page.total_pages));
                parts.push(format!("{} results", page.total_results));
            } else {
                parts.push(format!("page {}", self.session.page()));
            }
            if observation.is_fetching && observation.data.is_some() {
                parts.push("refreshing".to_string());
            }
            parts.join(" · ")
        });

        HeaderInfo {
            title: " reelsearch ".to_string(),
            summary,
            warning: self
                .client
                .configuration_error()
                .map(|reason| format!("TMDB token missing: {reason}")),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Typing => "Enter: search  Esc: results  Type to edit query",
            InputMode::Browsing => {
                "hjkl/arrows: move  Enter: details  [ ]: page  Home/End: first/last  r: refresh  /: search  q: quit"
            }
            InputMode::Detail => "Esc/Enter/q: close",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

fn grid_columns(cols: usize) -> usize {
    (cols / CARD_WIDTH).max(1)
}

fn compute_card(movie: &Movie, is_cursor: bool) -> CardItem {
    let subtitle = [
        movie.release_year().map(str::to_string),
        movie.rating_label(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" · ");

    CardItem {
        title: truncate(&movie.title, CARD_WIDTH - 2),
        subtitle: truncate(&subtitle, CARD_WIDTH - 2),
        has_poster: movie.poster_url().is_some(),
        is_cursor,
    }
}

fn compute_detail(movie: &Movie) -> DetailInfo {
    let mut facts = Vec::new();
    if !movie.release_date.is_empty() {
        facts.push(format!("Released {}", movie.release_date));
    }
    if let Some(rating) = movie.rating_label() {
        facts.push(format!("Rating {rating} ({} votes)", movie.vote_count));
    }

    DetailInfo {
        title: movie.title.clone(),
        original_title: (!movie.original_title.is_empty() && movie.original_title != movie.title)
            .then(|| movie.original_title.clone()),
        facts: facts.join(" · "),
        overview: if movie.overview.trim().is_empty() {
            "No overview available.".to_string()
        } else {
            movie.overview.clone()
        },
        poster_url: movie.poster_url(),
        backdrop_url: movie.backdrop_url(),
    }
}

/// Truncates to `max` characters, marking the cut with an ellipsis.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiConfig;
    use crate::query::Trigger;
    use chrono::Utc;
    use secrecy::SecretString;

    fn state() -> AppState {
        let client = TmdbClient::new(ApiConfig {
            token: Some(SecretString::new("t".to_string())),
            ..ApiConfig::default()
        });
        AppState::new(client, CachePolicy::default(), Theme::default())
    }

    fn resolve(state: &mut AppState, count: u64, total_pages: u32) {
        let key = state.session.active_key().cloned();
        let (_, ticket) = state.coordinator.observe(key.as_ref(), Trigger::UserAction, Utc::now());
        let movies = (1..=count).map(|id| Movie::new(id, format!("Movie {id}"), None)).collect();
        state.coordinator.complete(
            &ticket.unwrap(),
            Ok(SearchPage::new(movies, 1, total_pages, count)),
            Utc::now(),
        );
    }

    #[test]
    fn idle_state_shows_welcome() {
        let vm = state().compute_viewmodel(24, 80);
        assert!(matches!(vm.body, BodyView::Welcome(_)));
        assert!(vm.pagination.is_none());
        assert!(vm.header.summary.is_none());
        assert!(vm.header.warning.is_none());
    }

    #[test]
    fn missing_token_is_shown_in_header() {
        let state = AppState::new(
            TmdbClient::new(ApiConfig::default()),
            CachePolicy::default(),
            Theme::default(),
        );
        assert!(state.compute_viewmodel(24, 80).header.warning.is_some());
    }

    #[test]
    fn pending_search_shows_loader() {
        let mut state = state();
        let key = state.session.submit("heat").unwrap();
        state.coordinator.observe(Some(&key), Trigger::UserAction, Utc::now());
        assert_eq!(state.compute_viewmodel(24, 80).body, BodyView::Loading);
    }

    #[test]
    fn grid_lays_out_cards_by_width() {
        let mut state = state();
        state.session.submit("movie").unwrap();
        resolve(&mut state, 7, 3);

        let vm = state.compute_viewmodel(40, 80);
        let BodyView::Grid(grid) = vm.body else {
            panic!("expected grid");
        };
        assert_eq!(grid.columns, 3);
        assert_eq!(grid.rows.iter().map(Vec::len).collect::<Vec<_>>(), vec![3, 3, 1]);
        assert!(grid.rows[0][0].is_cursor);
        assert_eq!(vm.pagination.map(|p| p.total_pages), Some(3));
    }

    #[test]
    fn grid_scrolls_to_keep_cursor_visible() {
        let mut state = state();
        state.session.submit("movie").unwrap();
        resolve(&mut state, 20, 1);
        state.cursor = 19;

        // 18 rows leave room for two card rows of four columns.
        let BodyView::Grid(grid) = state.compute_viewmodel(18, 96).body else {
            panic!("expected grid");
        };
        assert_eq!(grid.rows.len(), 2);
        assert!(grid.more_above);
        assert!(!grid.more_below);
        assert!(grid.rows[1].last().is_some_and(|card| card.is_cursor));
    }

    #[test]
    fn single_page_has_no_pagination_and_empty_results_render_blank() {
        let mut state = state();
        state.session.submit("batman").unwrap();
        resolve(&mut state, 2, 1);
        assert!(state.compute_viewmodel(24, 80).pagination.is_none());

        state.session.submit("zzzznomatch").unwrap();
        resolve(&mut state, 0, 1);
        assert_eq!(state.compute_viewmodel(24, 80).body, BodyView::NoResults);
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("Alien", 10), "Alien");
        assert_eq!(truncate("The Lord of the Rings", 8), "The Lor…");
    }
}

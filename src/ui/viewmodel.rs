//! View model types representing renderable UI state.
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data: text is
//! already truncated and the grid is already windowed to the terminal size.

/// Width of one movie card, in columns.
pub const CARD_WIDTH: usize = 24;

/// Height of one movie card including its bottom gap, in rows.
pub const CARD_HEIGHT: usize = 4;

/// Rows taken by everything but the grid: blank line, header, border, search
/// box (3), pagination, border, footer.
pub const CHROME_ROWS: usize = 10;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    /// Main area below the search box.
    pub body: BodyView,
    /// Present only for successful searches spanning more than one page.
    pub pagination: Option<PaginationInfo>,
    /// Present while a movie is selected.
    pub detail: Option<DetailInfo>,
    pub footer: FooterInfo,
}

/// What the main area shows. Exactly one of these at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyView {
    /// Nothing searched yet.
    Welcome(EmptyState),
    /// Request in flight with nothing acceptable to show meanwhile.
    Loading,
    /// The active search failed.
    Failed(EmptyState),
    /// The active search succeeded with zero movies; the area stays blank.
    NoResults,
    Grid(GridInfo),
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Query, page and result count of the displayed search.
    pub summary: Option<String>,
    /// Configuration problem shown in warning colors.
    pub warning: Option<String>,
}

/// Search input box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Text being edited, not necessarily the submitted query.
    pub query: String,
    pub focused: bool,
}

/// Visible window of the movie grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridInfo {
    pub columns: usize,
    /// Card rows top to bottom, each at most `columns` long.
    pub rows: Vec<Vec<CardItem>>,
    /// Whether cards exist above the first visible row.
    pub more_above: bool,
    /// Whether cards exist below the last visible row.
    pub more_below: bool,
}

/// One movie card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    /// Title truncated to the card width.
    pub title: String,
    /// Release year and rating, e.g. `1989 · 7.2/10`.
    pub subtitle: String,
    pub has_poster: bool,
    pub is_cursor: bool,
}

/// Pagination strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    pub page: u32,
    pub total_pages: u32,
    pub items: Vec<PageItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page { number: u32, current: bool },
    Gap,
}

/// Detail overlay for the selected movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailInfo {
    pub title: String,
    /// Original title when it differs from the localized one.
    pub original_title: Option<String>,
    /// Release date, rating and vote count joined for one line.
    pub facts: String,
    pub overview: String,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text for the current mode.
    pub keybindings: String,
}

/// Centered two-line message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Page numbers to show: first and last page, a window of five around the
/// current one, and gaps in between.
///
/// ```
/// use reelsearch::ui::viewmodel::{page_items, PageItem};
///
/// let items = page_items(6, 20);
/// assert_eq!(items.first(), Some(&PageItem::Page { number: 1, current: false }));
/// assert_eq!(items[1], PageItem::Gap);
/// assert!(items.contains(&PageItem::Page { number: 6, current: true }));
/// ```
#[must_use]
pub fn page_items(page: u32, total_pages: u32) -> Vec<PageItem> {
    const WINDOW: u32 = 2;

    let total_pages = total_pages.max(1);
    let page = page.clamp(1, total_pages);
    let start = page.saturating_sub(WINDOW).max(1);
    let end = (page + WINDOW).min(total_pages);

    let mut items = Vec::new();
    if start > 1 {
        items.push(page_item(1, page));
        if start > 2 {
            items.push(PageItem::Gap);
        }
    }
    items.extend((start..=end).map(|number| page_item(number, page)));
    if end < total_pages {
        if end + 1 < total_pages {
            items.push(PageItem::Gap);
        }
        items.push(page_item(total_pages, page));
    }
    items
}

const fn page_item(number: u32, page: u32) -> PageItem {
    PageItem::Page {
        number,
        current: number == page,
    }
}

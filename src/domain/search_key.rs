//! Search key: the cache identity of one page of results.

use super::error::ValidationError;
use std::fmt;

/// Composite `(query, page)` key identifying one page of search results.
///
/// The query is stored trimmed and the page is always at least 1, so two keys
/// compare equal exactly when they address the same upstream request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SearchKey {
    query: String,
    page: u32,
}

impl SearchKey {
    /// Builds a key from raw user input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyQuery`] when the query is blank after
    /// trimming and [`ValidationError::ZeroPage`] when `page` is 0.
    ///
    /// ```
    /// use reelsearch::domain::SearchKey;
    ///
    /// let key = SearchKey::new("  batman ", 2).unwrap();
    /// assert_eq!(key.query(), "batman");
    /// assert_eq!(key.page(), 2);
    /// assert!(SearchKey::new("   ", 1).is_err());
    /// ```
    pub fn new(query: &str, page: u32) -> Result<Self, ValidationError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ValidationError::EmptyQuery);
        }
        if page == 0 {
            return Err(ValidationError::ZeroPage);
        }
        Ok(Self {
            query: query.to_string(),
            page,
        })
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the key for another page of the same query.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroPage`] when `page` is 0.
    pub fn with_page(&self, page: u32) -> Result<Self, ValidationError> {
        if page == 0 {
            return Err(ValidationError::ZeroPage);
        }
        Ok(Self {
            query: self.query.clone(),
            page,
        })
    }
}

impl fmt::Display for SearchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}#{}", self.query, self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_with_same_trimmed_query_and_page_are_equal() {
        let a = SearchKey::new("batman", 1).unwrap();
        let b = SearchKey::new("\tbatman  ", 1).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, a.with_page(2).unwrap());
    }

    #[test]
    fn rejects_blank_query_and_zero_page() {
        assert_eq!(SearchKey::new(" \n ", 1), Err(ValidationError::EmptyQuery));
        assert_eq!(SearchKey::new("alien", 0), Err(ValidationError::ZeroPage));
        let key = SearchKey::new("alien", 1).unwrap();
        assert_eq!(key.with_page(0), Err(ValidationError::ZeroPage));
    }

    #[test]
    fn inner_whitespace_is_preserved() {
        let key = SearchKey::new(" the  thing ", 1).unwrap();
        assert_eq!(key.query(), "the  thing");
        assert_eq!(key.to_string(), "\"the  thing\"#1");
    }
}

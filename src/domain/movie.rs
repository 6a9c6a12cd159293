//! Movie domain model and TMDB image URL derivation.
//!
//! Movies are deserialized straight from TMDB search results and are never mutated
//! afterwards. Only `id`, `title` and `poster_path` are interpreted by the core; the
//! remaining descriptive fields are carried through for the detail overlay.

use serde::{Deserialize, Deserializer, Serialize};

/// Base URL for poster images in grid and detail views.
const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Base URL for full-size backdrop images.
const BACKDROP_BASE_URL: &str = "https://image.tmdb.org/t/p/original";

/// A single title returned by the TMDB search endpoint.
///
/// # Fields
///
/// - `id`: TMDB identifier, stable across requests
/// - `title`: Localized display title
/// - `poster_path`: Relative poster path; empty strings are normalized to `None`
/// - `backdrop_path`: Relative backdrop path, normalized like `poster_path`
/// - `overview`, `release_date`, `vote_average`, `vote_count`, `original_title`:
///   descriptive fields shown in the detail overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default, deserialize_with = "non_empty_path")]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "non_empty_path")]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_title: String,
}

impl Movie {
    /// Creates a movie with only the fields the core interprets.
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>, poster_path: Option<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: poster_path.filter(|p| !p.is_empty()),
            backdrop_path: None,
            overview: String::new(),
            release_date: String::new(),
            vote_average: 0.0,
            vote_count: 0,
            original_title: String::new(),
        }
    }

    /// Returns the display URL of the poster, if the movie has one.
    ///
    /// ```
    /// use reelsearch::domain::Movie;
    ///
    /// let movie = Movie::new(268, "Batman", Some("/kBf3g9crrADGMc2AMAMlLBgSm2h.jpg".into()));
    /// assert_eq!(
    ///     movie.poster_url().as_deref(),
    ///     Some("https://image.tmdb.org/t/p/w500/kBf3g9crrADGMc2AMAMlLBgSm2h.jpg")
    /// );
    /// ```
    #[must_use]
    pub fn poster_url(&self) -> Option<String> {
        image_url(POSTER_BASE_URL, self.poster_path.as_deref())
    }

    /// Returns the full-size backdrop URL, if the movie has one.
    #[must_use]
    pub fn backdrop_url(&self) -> Option<String> {
        image_url(BACKDROP_BASE_URL, self.backdrop_path.as_deref())
    }

    /// Returns the release year (first four characters of `release_date`).
    #[must_use]
    pub fn release_year(&self) -> Option<&str> {
        self.release_date.get(..4).filter(|y| y.chars().all(|c| c.is_ascii_digit()))
    }

    /// Formats the average rating as `7.4/10`, or `None` when nobody voted.
    #[must_use]
    pub fn rating_label(&self) -> Option<String> {
        (self.vote_count > 0).then(|| format!("{:.1}/10", self.vote_average))
    }
}

fn image_url(base: &str, path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty()).map(|p| format!("{base}{p}"))
}

fn non_empty_path<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|p| !p.trim().is_empty()))
}

/// Descriptive fields are sometimes `null` in TMDB results.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_empty_poster_yields_no_url() {
        let json = r#"{"id": 1, "title": "No Poster", "poster_path": ""}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.poster_path, None);
        assert_eq!(movie.poster_url(), None);

        let json = r#"{"id": 2, "title": "Null Poster", "poster_path": null}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.poster_url(), None);

        let json = r#"{"id": 3, "title": "Missing Poster"}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.poster_url(), None);
    }

    #[test]
    fn null_descriptive_fields_fall_back_to_defaults() {
        let json = r#"{
            "id": 5,
            "title": "Obscure",
            "poster_path": null,
            "overview": null,
            "release_date": null,
            "original_title": null,
            "vote_average": null,
            "vote_count": null
        }"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie, Movie::new(5, "Obscure", None));
        assert_eq!(movie.release_year(), None);
        assert_eq!(movie.rating_label(), None);
    }

    #[test]
    fn backdrop_uses_original_size() {
        let mut movie = Movie::new(1, "Heat", None);
        movie.backdrop_path = Some("/b.jpg".to_string());
        assert_eq!(
            movie.backdrop_url().as_deref(),
            Some("https://image.tmdb.org/t/p/original/b.jpg")
        );
    }

    #[test]
    fn release_year_and_rating_labels() {
        let json = r#"{
            "id": 268, "title": "Batman", "release_date": "1989-06-21",
            "vote_average": 7.23, "vote_count": 7000, "overview": "The Dark Knight"
        }"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.release_year(), Some("1989"));
        assert_eq!(movie.rating_label().as_deref(), Some("7.2/10"));

        let unrated = Movie::new(5, "Unreleased", None);
        assert_eq!(unrated.release_year(), None);
        assert_eq!(unrated.rating_label(), None);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{"id": 9, "title": "Alien", "genre_ids": [27, 878], "popularity": 81.2}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 9);
        assert_eq!(movie.title, "Alien");
    }
}

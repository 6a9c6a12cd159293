//! TMDB search client.
//!
//! The client is transport-agnostic: it turns a [`SearchKey`] into an
//! [`HttpRequest`] and turns a status code plus body back into a [`SearchPage`].
//! Issuing the request is the plugin runtime's job (Zellij's `web_request`), which
//! keeps this module free of host calls and fully testable.

use super::wire::{ErrorResponse, MoviesResponse};
use crate::domain::{FetchFailure, ReelsearchError, Result, SearchKey, SearchPage};
use secrecy::{ExposeSecret, SecretString};
use std::collections::BTreeMap;

/// Default TMDB v3 API root.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Locale sent with every search.
pub const DEFAULT_LANGUAGE: &str = "en-US";

const SEARCH_MOVIE_ENDPOINT: &str = "/search/movie";

/// Settings the client is constructed from.
///
/// The token is optional here so that a plugin started without credentials still
/// loads; the client turns its absence into a permanent configuration error.
#[derive(Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<SecretString>,
    pub language: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// A GET request ready to hand to the transport.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
}

impl std::fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRequest")
            .field("url", &self.url)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builds TMDB search requests and parses their responses.
#[derive(Debug)]
pub struct TmdbClient {
    base_url: String,
    language: String,
    /// Either the bearer token or the configuration error every call reports.
    credential: std::result::Result<SecretString, String>,
}

impl TmdbClient {
    /// Creates a client from configuration.
    ///
    /// Never fails. A missing or blank token is logged once and remembered; every
    /// later [`search_request`](Self::search_request) returns
    /// [`ReelsearchError::Config`] without building a request.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        let credential = match config.token {
            Some(token) if !token.expose_secret().trim().is_empty() => Ok(token),
            _ => {
                let message = "tmdb_token is not set in the plugin configuration".to_string();
                tracing::error!(error = %message, "TMDB client has no credential; searches will fail");
                Err(message)
            }
        };

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language,
            credential,
        }
    }

    /// Returns the configuration problem, if the client was built without a token.
    #[must_use]
    pub fn configuration_error(&self) -> Option<&str> {
        self.credential.as_ref().err().map(String::as_str)
    }

    /// Builds the search request for one page of a query.
    ///
    /// # Errors
    ///
    /// Returns [`ReelsearchError::Config`] when the client has no credential.
    ///
    /// ```
    /// use reelsearch::api::{ApiConfig, TmdbClient};
    /// use reelsearch::domain::SearchKey;
    /// use secrecy::SecretString;
    ///
    /// let client = TmdbClient::new(ApiConfig {
    ///     token: Some(SecretString::new("token".to_string())),
    ///     ..ApiConfig::default()
    /// });
    /// let request = client.search_request(&SearchKey::new("star wars", 2).unwrap()).unwrap();
    /// assert_eq!(
    ///     request.url,
    ///     "https://api.themoviedb.org/3/search/movie?query=star%20wars&page=2&include_adult=false&language=en-US"
    /// );
    /// ```
    pub fn search_request(&self, key: &SearchKey) -> Result<HttpRequest> {
        let token = self
            .credential
            .as_ref()
            .map_err(|message| ReelsearchError::Config(message.clone()))?;

        let url = format!(
            "{}{SEARCH_MOVIE_ENDPOINT}?query={}&page={}&include_adult=false&language={}",
            self.base_url,
            urlencoding::encode(key.query()),
            key.page(),
            urlencoding::encode(&self.language),
        );

        let mut headers = BTreeMap::new();
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", token.expose_secret()),
        );
        headers.insert("Accept".to_string(), "application/json".to_string());

        tracing::debug!(key = %key, "built search request");
        Ok(HttpRequest { url, headers })
    }

    /// Parses a transport result into a page of movies.
    ///
    /// # Errors
    ///
    /// - [`FetchFailure::Status`] for non-2xx statuses, carrying TMDB's
    ///   `status_message` when the body has one
    /// - [`FetchFailure::Decode`] when a 2xx body is not a search response
    pub fn parse_search_response(
        &self,
        status: u16,
        body: &[u8],
    ) -> std::result::Result<SearchPage, FetchFailure> {
        if !(200..300).contains(&status) {
            let message = serde_json::from_slice::<ErrorResponse>(body).map_or_else(
                |_| String::from_utf8_lossy(body).chars().take(200).collect::<String>(),
                |e| e.status_message,
            );
            tracing::debug!(status = status, message = %message, "search request rejected");
            return Err(FetchFailure::Status { status, message });
        }

        let response: MoviesResponse =
            serde_json::from_slice(body).map_err(|e| FetchFailure::Decode(e.to_string()))?;

        tracing::debug!(
            page = response.page,
            total_pages = response.total_pages,
            result_count = response.results.len(),
            "search response decoded"
        );
        Ok(response.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TmdbClient {
        TmdbClient::new(ApiConfig {
            base_url: "https://example.test/3/".to_string(),
            token: Some(SecretString::new("secret-token".to_string())),
            language: "en-US".to_string(),
        })
    }

    #[test]
    fn builds_search_url_with_fixed_parameters() {
        let key = SearchKey::new("Amélie & co", 3).unwrap();
        let request = client().search_request(&key).unwrap();
        assert_eq!(
            request.url,
            "https://example.test/3/search/movie?query=Am%C3%A9lie%20%26%20co&page=3&include_adult=false&language=en-US"
        );
        assert_eq!(
            request.headers.get("Authorization").map(String::as_str),
            Some("Bearer secret-token")
        );
        assert_eq!(
            request.headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn debug_output_hides_the_token() {
        let key = SearchKey::new("heat", 1).unwrap();
        let request = client().search_request(&key).unwrap();
        assert!(!format!("{request:?}").contains("secret-token"));
    }

    #[test]
    fn missing_token_fails_every_call_without_a_request() {
        let client = TmdbClient::new(ApiConfig::default());
        assert!(client.configuration_error().is_some());

        let key = SearchKey::new("batman", 1).unwrap();
        for _ in 0..2 {
            let err = client.search_request(&key).unwrap_err();
            assert!(matches!(err, ReelsearchError::Config(_)));
        }
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let client = TmdbClient::new(ApiConfig {
            token: Some(SecretString::new("   ".to_string())),
            ..ApiConfig::default()
        });
        assert!(client.configuration_error().is_some());
    }

    #[test]
    fn parses_results_in_api_order() {
        let body = br#"{
            "page": 1,
            "results": [
                {"id": 268, "title": "Batman", "poster_path": "/a.jpg"},
                {"id": 364, "title": "Batman Returns", "poster_path": null}
            ],
            "total_pages": 1,
            "total_results": 2
        }"#;
        let page = client().parse_search_response(200, body).unwrap();
        let titles: Vec<&str> = page.movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Batman", "Batman Returns"]);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_results, 2);
        assert_eq!(page.movies[1].poster_path, None);
    }

    #[test]
    fn non_success_status_keeps_tmdb_message() {
        let body = br#"{"status_code": 7, "status_message": "Invalid API key: You must be granted a valid key.", "success": false}"#;
        let err = client().parse_search_response(401, body).unwrap_err();
        assert_eq!(
            err,
            FetchFailure::Status {
                status: 401,
                message: "Invalid API key: You must be granted a valid key.".to_string(),
            }
        );
    }

    #[test]
    fn non_json_error_body_is_preserved_as_text() {
        let err = client().parse_search_response(502, b"Bad Gateway").unwrap_err();
        assert_eq!(
            err,
            FetchFailure::Status {
                status: 502,
                message: "Bad Gateway".to_string(),
            }
        );
    }

    #[test]
    fn malformed_success_body_is_a_decode_failure() {
        let err = client().parse_search_response(200, b"{\"results\": 3}").unwrap_err();
        assert!(matches!(err, FetchFailure::Decode(_)));
    }
}

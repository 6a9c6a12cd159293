//! Reelsearch: a Zellij plugin for searching movies on TMDB.
//!
//! Reelsearch is a floating-pane plugin that provides:
//! - Free-text movie search against TMDB's `/search/movie` endpoint
//! - Paginated poster grid with keyboard navigation
//! - Detail overlay for the selected movie
//! - Request deduplication, caching and stale-while-revalidate refresh
//! - Toast notifications for empty queries, empty results and failures

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - web_request transport, timers, toasts            │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Search session and notifications                 │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Query Layer   │   │ API Layer     │
//! │ (ui/)         │   │ (query/)      │   │ (api/)        │
//! │ - Rendering   │   │ - Cache       │   │ - Requests    │
//! │ - Theming     │   │ - Dedup       │   │ - Responses   │
//! │ - Toasts      │   │ - Freshness   │   │ - Wire types  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Movie, SearchKey, SearchPage                     │
//! │  - Error types                                      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/reelsearch.wasm" {
//!         tmdb_token "eyJhbGciOi..."
//!         language "en-US"
//!         stale_after_secs "300"
//!         request_timeout_secs "30"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use reelsearch::{handle_event, initialize, Action, Config, Event};
//! use secrecy::SecretString;
//!
//! let config = Config {
//!     tmdb_token: Some(SecretString::new("token".to_string())),
//!     ..Config::default()
//! };
//! let mut state = initialize(&config);
//!
//! let now = chrono::Utc::now();
//! for c in "alien".chars() {
//!     handle_event(&mut state, &Event::Char(c), now)?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit, now)?;
//! assert!(matches!(actions.as_slice(), [Action::Fetch(_)]));
//! # Ok::<(), reelsearch::ReelsearchError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod query;
pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, Notification};
pub use domain::{ReelsearchError, Result};
pub use ui::Theme;

use api::{ApiConfig, DEFAULT_BASE_URL, DEFAULT_LANGUAGE};
use query::CachePolicy;
use secrecy::{ExposeSecret, SecretString};
use std::collections::BTreeMap;
use std::time::Duration;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// ```kdl
/// plugin location="file:/path/to/reelsearch.wasm" {
///     tmdb_token "eyJhbGciOi..."
///     api_base_url "https://api.themoviedb.org/3"
///     language "en-US"
///     stale_after_secs "300"
///     request_timeout_secs "30"
///     evict_after_secs "600"
///     theme "catppuccin-mocha"
///     theme_file "/path/to/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug)]
pub struct Config {
    /// TMDB v4 read access token, sent as a bearer token.
    ///
    /// Without it the plugin still loads but every search fails.
    pub tmdb_token: Option<SecretString>,

    /// Default: `https://api.themoviedb.org/3`
    pub api_base_url: String,

    /// Result language. Default: `"en-US"`
    pub language: String,

    /// Age after which a cached page is refreshed in the background. Default: 300
    pub stale_after_secs: u64,

    /// Age after which an unanswered request counts as failed. Default: 30
    pub request_timeout_secs: u64,

    /// Age after which an unused cached page is dropped. Default: 600
    pub evict_after_secs: u64,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let policy = CachePolicy::default();
        Self {
            tmdb_token: None,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            stale_after_secs: policy.stale_after.as_secs(),
            request_timeout_secs: policy.request_timeout.as_secs(),
            evict_after_secs: policy.evict_after.as_secs(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing or unparsable values fall back to their defaults; blank strings
    /// count as missing.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use reelsearch::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("tmdb_token".to_string(), "abc".to_string());
    /// map.insert("stale_after_secs".to_string(), "60".to_string());
    /// map.insert("request_timeout_secs".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert!(config.tmdb_token.is_some());
    /// assert_eq!(config.stale_after_secs, 60);
    /// assert_eq!(config.request_timeout_secs, 30);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let text = |name: &str| {
            config
                .get(name)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };
        let secs = |name: &str, default: u64| {
            config
                .get(name)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };

        Self {
            tmdb_token: text("tmdb_token").map(SecretString::new),
            api_base_url: text("api_base_url").unwrap_or(defaults.api_base_url),
            language: text("language").unwrap_or(defaults.language),
            stale_after_secs: secs("stale_after_secs", defaults.stale_after_secs),
            request_timeout_secs: secs("request_timeout_secs", defaults.request_timeout_secs),
            evict_after_secs: secs("evict_after_secs", defaults.evict_after_secs),
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
        }
    }

    /// Settings for the TMDB client.
    #[must_use]
    pub fn api(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api_base_url.clone(),
            token: self
                .tmdb_token
                .as_ref()
                .map(|token| SecretString::new(token.expose_secret().clone())),
            language: self.language.clone(),
        }
    }

    #[must_use]
    pub const fn cache_policy(&self) -> CachePolicy {
        CachePolicy {
            stale_after: Duration::from_secs(self.stale_after_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            evict_after: Duration::from_secs(self.evict_after_secs),
        }
    }
}

/// Initializes the plugin with configuration.
///
/// Creates an `AppState` with a TMDB client, the configured cache policy and
/// the loaded theme (from file, name, or default). A missing token is not an
/// error here; it surfaces as a header warning and failed searches.
///
/// ```rust
/// use reelsearch::{initialize, Config, InputMode};
///
/// let state = initialize(&Config::default());
/// assert_eq!(state.input_mode, InputMode::Typing);
/// assert!(state.client.configuration_error().is_some());
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing reelsearch plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(
                Theme::default,
                |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::debug!(theme_name = %theme_name, "failed to load theme, using default");
                        Theme::default()
                    })
                },
            )
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(
        api::TmdbClient::new(config.api()),
        config.cache_policy(),
        theme,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let map: BTreeMap<String, String> = [
            ("tmdb_token", "   "),
            ("language", ""),
            ("evict_after_secs", "-5"),
            ("theme", "catppuccin-latte"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = Config::from_zellij(&map);
        assert!(config.tmdb_token.is_none());
        assert_eq!(config.language, DEFAULT_LANGUAGE);
        assert_eq!(config.evict_after_secs, 600);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
    }

    #[test]
    fn cache_policy_uses_configured_seconds() {
        let config = Config {
            stale_after_secs: 5,
            request_timeout_secs: 2,
            evict_after_secs: 9,
            ..Config::default()
        };
        assert_eq!(config.cache_policy(), CachePolicy {
            stale_after: Duration::from_secs(5),
            request_timeout: Duration::from_secs(2),
            evict_after: Duration::from_secs(9),
        });
        assert_eq!(Config::default().cache_policy(), CachePolicy::default());
    }

    #[test]
    fn initialize_falls_back_to_default_theme() {
        let config = Config {
            theme_name: Some("no-such-theme".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme, Theme::default());

        let config = Config {
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme, Theme::default());
    }

    #[test]
    fn api_config_carries_token() {
        let config = Config {
            tmdb_token: Some(SecretString::new("abc".to_string())),
            ..Config::default()
        };
        let api = config.api();
        assert_eq!(api.token.as_ref().map(|t| t.expose_secret().as_str()), Some("abc"));
        assert_eq!(api.base_url, DEFAULT_BASE_URL);
    }
}

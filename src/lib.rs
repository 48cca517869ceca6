//! Jiffy: a Zellij plugin that searches Giphy and shows random clips.
//!
//! Type a term, press Enter, and a random clip matching it is added to a grid
//! of tiles. Each search picks one clip from up to 100 results, so repeating a
//! term keeps turning up new clips.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, stale reply filtering            │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Search Layer  │   │ Worker Layer  │
//! │ (ui/)         │   │ (search/)     │   │ (worker/)     │
//! │ - Rendering   │   │ - Request URL │   │ - Reply decode│
//! │ - Theming     │   │ - Giphy JSON  │   │ - IPC bridge  │
//! │ - Components  │   │ - Random pick │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure, Observability              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/jiffy.wasm" {
//!         api_key "your-giphy-key"
//!         results "accumulate"
//!         clear "true"
//!         error_hints "detailed"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Search Flow
//!
//! 1. Enter with a term longer than two characters emits a `DispatchSearch`
//!    action; the shim issues the web request tagged with a sequence number.
//! 2. The reply arrives as `WebRequestResult`. Replies for anything other than
//!    the outstanding request are dropped.
//! 3. The body is posted to the worker, which decodes it, picks a random clip
//!    and posts the outcome back.
//! 4. The outcome updates the results and the hint.
//!
//! # Example
//!
//! ```rust
//! use jiffy::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_render, actions) = handle_event(&mut state, &Event::TextChanged("cats".to_string()))?;
//! assert!(actions.is_empty());
//! assert_eq!(state.hint_text, "Hit enter to search cats");
//! # Ok::<(), jiffy::JiffyError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod search;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppOptions, AppState, Event, Key, ResultsMode};
pub use domain::{Clip, JiffyError, Result, SearchOutcome};
pub use search::{ErrorHints, SearchClient, SearchSettings};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Giphy request settings (`api_key`, `endpoint`, `limit`, `rating`,
    /// `lang`, `error_hints`).
    pub search: SearchSettings,

    /// Result and clear behaviour (`results`, `clear`).
    pub options: AppOptions,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; `~` maps to `/host`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchSettings::default(),
            options: AppOptions::default(),
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unknown keys are ignored. Values that fail to parse fall back to their
    /// defaults; blank strings count as absent.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use jiffy::{Config, ResultsMode};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_key".to_string(), "abc123".to_string());
    /// map.insert("results".to_string(), "replace".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.search.api_key.as_deref(), Some("abc123"));
    /// assert_eq!(config.options.results_mode, ResultsMode::Replace);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| config.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let search = SearchSettings {
            endpoint: get("endpoint").map_or(defaults.search.endpoint, String::from),
            api_key: get("api_key").map(String::from),
            limit: get("limit")
                .and_then(|s| s.parse::<u32>().ok())
                .filter(|&n| n > 0)
                .unwrap_or(defaults.search.limit),
            rating: get("rating").map_or(defaults.search.rating, String::from),
            lang: get("lang").map_or(defaults.search.lang, String::from),
            error_hints: get("error_hints")
                .and_then(ErrorHints::parse)
                .unwrap_or(defaults.search.error_hints),
        };

        let options = AppOptions {
            results_mode: get("results")
                .and_then(ResultsMode::parse)
                .unwrap_or(defaults.options.results_mode),
            clear_enabled: get("clear")
                .and_then(|s| s.parse::<bool>().ok())
                .unwrap_or(defaults.options.clear_enabled),
        };

        Self {
            search,
            options,
            theme_name: get("theme").map(String::from),
            theme_file: get("theme_file").map(String::from),
            trace_level: get("trace_level").map_or(defaults.trace_level, String::from),
        }
    }

    /// Resolves the configured theme: `theme_file`, then `theme`, then the
    /// default. Failures are traced and fall through to the default.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            match Theme::from_file(&path) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                }
            }
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial application state from configuration.
///
/// The state starts idle with an empty term, a blank hint, no results and
/// `loading` false.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing jiffy plugin");

    AppState::new(SearchClient::new(config.search.clone()), config.options, config.load_theme())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn every_key_is_read() {
        let config = Config::from_zellij(&map(&[
            ("api_key", "k"),
            ("endpoint", "https://example.test/search"),
            ("limit", "25"),
            ("rating", "G"),
            ("lang", "fr"),
            ("results", "replace"),
            ("clear", "false"),
            ("error_hints", "generic"),
            ("theme", "catppuccin-latte"),
            ("theme_file", "~/jiffy.toml"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.search.api_key.as_deref(), Some("k"));
        assert_eq!(config.search.endpoint, "https://example.test/search");
        assert_eq!(config.search.limit, 25);
        assert_eq!(config.search.rating, "G");
        assert_eq!(config.search.lang, "fr");
        assert_eq!(config.search.error_hints, ErrorHints::Generic);
        assert_eq!(config.options.results_mode, ResultsMode::Replace);
        assert!(!config.options.clear_enabled);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.theme_file.as_deref(), Some("~/jiffy.toml"));
        assert_eq!(config.trace_level, "debug");
    }

    #[test]
    fn bad_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("api_key", "   "),
            ("limit", "lots"),
            ("results", "shuffle"),
            ("clear", "maybe"),
            ("error_hints", "loud"),
        ]));

        assert_eq!(config.search.api_key, None);
        assert_eq!(config.search.limit, 100);
        assert_eq!(config.options, AppOptions::default());
        assert_eq!(config.search.error_hints, ErrorHints::Detailed);
    }

    #[test]
    fn theme_resolution_falls_back_to_default() {
        let config = Config {
            theme_name: Some("catppuccin-frappe".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, "catppuccin-frappe");

        let config = Config {
            theme_name: Some("nope".to_string()),
            theme_file: Some("/missing/theme.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, "catppuccin-mocha");
    }

    #[test]
    fn initialized_state_is_idle() {
        let state = initialize(&Config::default());
        assert!(state.search_term.is_empty());
        assert!(state.results.is_empty());
        assert!(!state.loading);
        assert!(!state.is_searching());
    }
}

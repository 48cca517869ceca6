//! Search client: request construction and reply classification.
//!
//! Zellij performs HTTP on the plugin's behalf and reports the reply as a later
//! event, so a search is split in two halves:
//!
//! ```text
//! SearchClient::request(term) ──▶ web_request(url, context) ··· WebRequestResult
//!                                                                      │
//! SearchOutcome ◀── SearchClient::resolve(term, status, body) ◀────────┘
//! ```
//!
//! Every failure is folded into [`SearchOutcome::Failure`] here; nothing
//! propagates past [`SearchClient::resolve`]. There are no retries and no
//! caching: the same term always issues a fresh request.

use crate::domain::{Clip, JiffyError, Result, SearchError, SearchOutcome};
use crate::search::{giphy, pick};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default Giphy search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.giphy.com/v1/gifs/search";

/// Hint shown for transport failures when detailed hints are disabled.
pub const GENERIC_FAILURE_HINT: &str = "oh no!";

/// Longest slice of an error body quoted in a transport failure hint.
const MAX_ERROR_SNIPPET: usize = 80;

/// Context key carrying the request sequence number.
const CONTEXT_SEQ: &str = "seq";

/// Context key carrying the searched term.
const CONTEXT_TERM: &str = "term";

/// How transport failures are reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorHints {
    /// Show the diagnostic message (status, body excerpt, decode error).
    #[default]
    Detailed,
    /// Show the fixed [`GENERIC_FAILURE_HINT`].
    Generic,
}

impl ErrorHints {
    /// Parses the `error_hints` configuration value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "detailed" => Some(Self::Detailed),
            "generic" => Some(Self::Generic),
            _ => None,
        }
    }
}

/// Query parameters and credentials for the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    /// Search endpoint URL, without query string.
    pub endpoint: String,
    /// Giphy API key. Searches cannot be issued without one.
    pub api_key: Option<String>,
    /// Number of items requested per search.
    pub limit: u32,
    /// Content rating filter.
    pub rating: String,
    /// Locale passed as `lang`.
    pub lang: String,
    /// Reporting style for transport failures.
    pub error_hints: ErrorHints,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            limit: 100,
            rating: "PG".to_string(),
            lang: "en".to_string(),
            error_hints: ErrorHints::default(),
        }
    }
}

/// Identifies a dispatched request when its reply comes back.
///
/// Round-trips through the string map Zellij hands back with the
/// `WebRequestResult` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTag {
    /// Sequence number assigned at dispatch.
    pub seq: u64,
    /// Term the request searched for.
    pub term: String,
}

impl RequestTag {
    /// Encodes the tag as a web request context map.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (CONTEXT_SEQ.to_string(), self.seq.to_string()),
            (CONTEXT_TERM.to_string(), self.term.clone()),
        ])
    }

    /// Decodes a tag from a web request context map.
    ///
    /// Returns `None` for replies that were not dispatched by the search client.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let seq = context.get(CONTEXT_SEQ)?.parse().ok()?;
        let term = context.get(CONTEXT_TERM)?.clone();
        Some(Self { seq, term })
    }
}

/// A fully built outbound search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Complete GET URL including the query string.
    pub url: String,
    /// Tag to attach as the request context.
    pub tag: RequestTag,
}

/// Builds search requests and classifies their replies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchClient {
    settings: SearchSettings,
}

impl SearchClient {
    /// Creates a client for the given settings.
    #[must_use]
    pub const fn new(settings: SearchSettings) -> Self {
        Self { settings }
    }

    /// Returns the client's settings.
    #[must_use]
    pub const fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Builds the GET request for `term`, tagged with `seq`.
    ///
    /// # Errors
    ///
    /// Returns [`JiffyError::Config`] when no API key is configured or the
    /// endpoint is not a valid URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiffy::search::{SearchClient, SearchSettings};
    ///
    /// let client = SearchClient::new(SearchSettings {
    ///     api_key: Some("k".to_string()),
    ///     ..SearchSettings::default()
    /// });
    /// let request = client.request(1, "cats").unwrap();
    /// assert!(request.url.contains("q=cats"));
    /// ```
    pub fn request(&self, seq: u64, term: &str) -> Result<SearchRequest> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| JiffyError::Config("api_key is not set".to_string()))?;

        let limit = self.settings.limit.to_string();
        let url = url::Url::parse_with_params(
            &self.settings.endpoint,
            &[
                ("api_key", api_key),
                ("q", term),
                ("limit", limit.as_str()),
                ("offset", "0"),
                ("rating", self.settings.rating.as_str()),
                ("lang", self.settings.lang.as_str()),
            ],
        )
        .map_err(|e| JiffyError::Config(format!("invalid endpoint {}: {e}", self.settings.endpoint)))?;

        tracing::debug!(seq = seq, term = %term, endpoint = %self.settings.endpoint, "built search request");

        Ok(SearchRequest {
            url: url.into(),
            tag: RequestTag {
                seq,
                term: term.to_string(),
            },
        })
    }

    /// Classifies the reply to a search for `term`.
    ///
    /// A 2xx reply whose body holds at least one valid clip yields
    /// `Success` with one clip picked at random; every other reply yields
    /// `Failure` carrying the hint to show.
    pub fn resolve<R: Rng + ?Sized>(&self, term: &str, status: u16, body: &[u8], rng: &mut R) -> SearchOutcome {
        let _span = tracing::debug_span!("resolve_search", term = %term, status = status, body_len = body.len()).entered();

        match Self::classify(term, status, body) {
            Ok(clips) => {
                let clip = pick(&clips, rng).clone();
                tracing::debug!(candidates = clips.len(), clip_id = %clip.id, "search succeeded");
                SearchOutcome::Success(vec![clip])
            }
            Err(err) => {
                tracing::debug!(error = %err, "search failed");
                SearchOutcome::Failure(self.failure_hint(&err))
            }
        }
    }

    /// Validates the reply and returns the non-empty list of candidate clips.
    fn classify(term: &str, status: u16, body: &[u8]) -> std::result::Result<Vec<Clip>, SearchError> {
        if !(200..300).contains(&status) {
            let text = String::from_utf8_lossy(body);
            let snippet: String = text.trim().chars().take(MAX_ERROR_SNIPPET).collect();
            return Err(SearchError::Transport(if snippet.is_empty() {
                format!("HTTP {status}")
            } else {
                format!("HTTP {status}: {snippet}")
            }));
        }

        let clips = giphy::parse_clips(body)?;
        if clips.is_empty() {
            return Err(SearchError::EmptyResult {
                term: term.to_string(),
            });
        }
        Ok(clips)
    }

    fn failure_hint(&self, err: &SearchError) -> String {
        if err.is_transport() {
            self.failure_hint_for(&err.to_string())
        } else {
            err.to_string()
        }
    }

    /// Hint for a transport-level failure described by `diagnostic`,
    /// honouring the configured [`ErrorHints`] style.
    #[must_use]
    pub fn failure_hint_for(&self, diagnostic: &str) -> String {
        match self.settings.error_hints {
            ErrorHints::Detailed => diagnostic.to_string(),
            ErrorHints::Generic => GENERIC_FAILURE_HINT.to_string(),
        }
    }
}

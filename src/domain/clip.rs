//! Clip domain model and search outcomes.
//!
//! A [`Clip`] is the part of a Giphy search item the plugin needs for display:
//! its identifier, the looping mp4 rendition, and the title. Clips are created
//! once by the response parser and never mutated afterwards; application state
//! only appends them or drops them wholesale.

use serde::{Deserialize, Serialize};

/// One playable media item returned by a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clip {
    /// Opaque Giphy identifier.
    pub id: String,
    /// URL of the looping mp4 rendition.
    pub media_url: String,
    /// Human readable title, empty when Giphy has none.
    pub title: String,
}

impl Clip {
    /// Creates a clip from its parts.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiffy::domain::Clip;
    ///
    /// let clip = Clip::new("g1", "https://x/g1.mp4", "Cat GIF");
    /// assert_eq!(clip.label(), "Cat GIF");
    /// ```
    pub fn new(id: impl Into<String>, media_url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            media_url: media_url.into(),
            title: title.into(),
        }
    }

    /// Text to show on the clip's tile: the title, or the id when untitled.
    #[must_use]
    pub fn label(&self) -> &str {
        let title = self.title.trim();
        if title.is_empty() {
            &self.id
        } else {
            title
        }
    }
}

/// Result of one search request as seen by the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome {
    /// The search found clips. Never empty.
    Success(Vec<Clip>),
    /// The search failed; the string is the hint to show.
    Failure(String),
}

impl SearchOutcome {
    /// Returns `true` for [`SearchOutcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

//! Giphy search response decoding.
//!
//! The search endpoint answers with `{ "data": [ item, ... ], ... }`. Each item
//! must carry an `id` and an `images.original.mp4` rendition; anything else in
//! the body is ignored. A body that does not fit this shape is rejected as a
//! whole instead of letting a missing field surface later at render time.

use crate::domain::{Clip, SearchError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    data: Vec<WireItem>,
}

#[derive(Debug, Deserialize)]
struct WireItem {
    id: String,
    #[serde(default)]
    title: Option<String>,
    images: WireImages,
}

#[derive(Debug, Deserialize)]
struct WireImages {
    original: WireRendition,
}

#[derive(Debug, Deserialize)]
struct WireRendition {
    mp4: String,
}

impl TryFrom<WireItem> for Clip {
    type Error = SearchError;

    fn try_from(item: WireItem) -> Result<Self, Self::Error> {
        if item.id.is_empty() {
            return Err(SearchError::MalformedResponse("item without an id".to_string()));
        }
        if item.images.original.mp4.is_empty() {
            return Err(SearchError::MalformedResponse(format!(
                "item {} has no mp4 rendition",
                item.id
            )));
        }

        Ok(Self {
            id: item.id,
            media_url: item.images.original.mp4,
            title: item.title.unwrap_or_default(),
        })
    }
}

/// Decodes a search response body into validated clips, preserving order.
///
/// An empty `data` array decodes to an empty vector; deciding that this is a
/// failure is left to the caller, which knows the search term.
///
/// # Errors
///
/// Returns [`SearchError::MalformedResponse`] if the body is not JSON, has no
/// `data` array, or any item lacks its id or mp4 rendition.
///
/// # Examples
///
/// ```
/// use jiffy::search::giphy::parse_clips;
///
/// let body = br#"{"data":[{"id":"g1","title":"Cat","images":{"original":{"mp4":"https://x/g1.mp4"}}}]}"#;
/// let clips = parse_clips(body).unwrap();
/// assert_eq!(clips[0].media_url, "https://x/g1.mp4");
/// ```
pub fn parse_clips(body: &[u8]) -> Result<Vec<Clip>, SearchError> {
    let envelope: SearchEnvelope = serde_json::from_slice(body)?;

    tracing::debug!(item_count = envelope.data.len(), "decoded search envelope");

    envelope.data.into_iter().map(Clip::try_from).collect()
}

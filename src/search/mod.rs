//! Giphy search: request building, response decoding and result picking.
//!
//! # Modules
//!
//! - [`client`]: Request construction and reply classification
//! - [`giphy`]: Response body decoding into validated clips
//! - [`picker`]: Uniform random choice of one result

pub mod client;
pub mod giphy;
pub mod picker;

pub use client::{ErrorHints, RequestTag, SearchClient, SearchRequest, SearchSettings};
pub use picker::{pick, pick_random};

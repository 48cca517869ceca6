//! Domain layer for the Jiffy plugin.
//!
//! Core types shared by the search client, the state machine and the worker,
//! free of any Zellij API.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`clip`]: Clip model and search outcomes

pub mod clip;
pub mod error;

pub use clip::{Clip, SearchOutcome};
pub use error::{JiffyError, Result, SearchError};

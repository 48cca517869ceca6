//! Search phase and result-handling mode types.
//!
//! # State Machine
//!
//! The search runs in one of two phases:
//! - **Idle**: no outstanding request; Enter with a long enough term dispatches one
//! - **Searching**: exactly one tracked request is outstanding
//!
//! ```text
//!            SubmitRequested (Enter, > 2 chars)
//!   Idle ─────────────────────────────────────▶ Searching { seq, term }
//!    ▲                                                │
//!    └──── SearchResolved (matching seq) / Clear ─────┘
//! ```

/// Search request lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// No request outstanding.
    #[default]
    Idle,

    /// One request outstanding.
    Searching {
        /// Sequence number of the outstanding request.
        seq: u64,
        /// Term the request searched for; used in the follow-up hint.
        term: String,
    },
}

impl Phase {
    /// Sequence number of the outstanding request, if any.
    #[must_use]
    pub const fn outstanding_seq(&self) -> Option<u64> {
        match self {
            Self::Idle => None,
            Self::Searching { seq, .. } => Some(*seq),
        }
    }
}

/// What a successful search does with the clips already on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultsMode {
    /// Append new clips after the existing ones.
    #[default]
    Accumulate,
    /// Replace the existing clips with the new ones.
    Replace,
}

impl ResultsMode {
    /// Parses the `results` configuration value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "accumulate" => Some(Self::Accumulate),
            "replace" => Some(Self::Replace),
            _ => None,
        }
    }
}

/// Whether the host granted the web access permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WebAccess {
    /// No answer yet; searches are attempted.
    #[default]
    Pending,
    /// Permission granted.
    Granted,
    /// Permission denied; searches are refused with a hint.
    Denied,
}

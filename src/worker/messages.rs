//! Worker thread message types for cross-thread communication.
//!
//! The plugin thread hands raw search replies to the worker and gets a
//! classified [`SearchOutcome`] back. Messages travel as JSON through Zellij's
//! plugin messaging, and carry the caller's trace context so the worker's
//! spans land in the same trace.

use crate::domain::SearchOutcome;
use crate::search::ErrorHints;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the active span.
    ///
    /// Returns `None` when there is no valid OpenTelemetry span context, for
    /// instance before tracing has been initialized.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Messages sent from the main thread to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Decode and classify the reply to search `seq`.
    ResolveSearch {
        /// Sequence number of the request.
        seq: u64,

        /// Term the request searched for.
        term: String,

        /// HTTP status reported by the host.
        status: u16,

        /// Response body.
        body: String,

        /// How transport failures should be worded.
        error_hints: ErrorHints,

        /// Trace context for linking spans across threads.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Creates a `ResolveSearch` message with the current trace context.
    #[must_use]
    pub fn resolve_search(seq: u64, term: String, status: u16, body: String, error_hints: ErrorHints) -> Self {
        Self::ResolveSearch {
            seq,
            term,
            status,
            body,
            error_hints,
            trace_context: TraceContext::from_current(),
        }
    }

    /// Sequence number of the search this message concerns.
    #[must_use]
    pub const fn seq(&self) -> u64 {
        match self {
            Self::ResolveSearch { seq, .. } => *seq,
        }
    }

    /// Trace context attached at construction, if any.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::ResolveSearch { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker thread back to the main thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The reply to search `seq` was classified.
    SearchCompleted {
        /// Sequence number of the request.
        seq: u64,
        /// Classified outcome.
        outcome: SearchOutcome,
    },

    /// The worker could not process a message.
    Error {
        /// Sequence number of the affected search, when it could be read.
        seq: Option<u64>,
        /// Human-readable error message.
        message: String,
    },
}

//! Worker thread implementation for search reply decoding.
//!
//! Giphy replies for a 100-item search run to hundreds of kilobytes of JSON.
//! Decoding them on the plugin thread would stall rendering, so the plugin
//! posts each reply here and the worker answers with the classified outcome.

use crate::search::{SearchClient, SearchSettings};
use crate::worker::{WorkerMessage, WorkerResponse};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state.
///
/// Holds nothing between messages; every message carries what it needs.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct JiffyWorker {}

impl JiffyWorker {
    /// Processes a worker message using the thread-local random source.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        self.handle_message_with(message, &mut rand::thread_rng())
    }

    /// Processes a worker message, picking results with `rng`.
    ///
    /// Attaches the sender's trace context and runs inside a span named after
    /// the message.
    pub fn handle_message_with<R: Rng + ?Sized>(&mut self, message: WorkerMessage, rng: &mut R) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", seq = message.seq());
        let _guard = span.entered();

        match message {
            WorkerMessage::ResolveSearch {
                seq,
                term,
                status,
                body,
                error_hints,
                ..
            } => {
                let client = SearchClient::new(SearchSettings {
                    error_hints,
                    ..SearchSettings::default()
                });
                let outcome = client.resolve(&term, status, body.as_bytes(), rng);
                tracing::debug!(seq = seq, success = outcome.is_success(), "search reply classified");
                WorkerResponse::SearchCompleted { seq, outcome }
            }
        }
    }

    /// Re-enters the sender's trace so worker spans become its children.
    ///
    /// Returns a guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

        Some(opentelemetry::Context::current().with_remote_span_context(span_context).attach())
    }

    /// Reads the sequence number out of a payload that failed to decode.
    fn salvage_seq(payload: &str) -> Option<u64> {
        let value: serde_json::Value = serde_json::from_str(payload).ok()?;
        value.get("ResolveSearch")?.get("seq")?.as_u64()
    }

    /// Decodes a JSON payload and handles it, reporting decode failures as
    /// [`WorkerResponse::Error`].
    pub fn handle_payload(&mut self, payload: &str) -> WorkerResponse {
        match serde_json::from_str::<WorkerMessage>(payload) {
            Ok(message) => self.handle_message(message),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                WorkerResponse::Error {
                    seq: Self::salvage_seq(payload),
                    message: format!("Failed to read worker message: {e}"),
                }
            }
        }
    }
}

/// Tracks whether worker tracing has been initialized.
static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

impl ZellijWorker<'_> for JiffyWorker {
    /// Handles a message from the plugin thread and posts the response back
    /// under the same message name.
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
            crate::observability::init_tracing(&crate::Config::default());
        }

        let response = self.handle_payload(&payload);

        match serde_json::to_string(&response) {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            }),
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker response");
            }
        }
    }
}

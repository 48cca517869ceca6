//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler stays free of host calls; it returns a `Vec<Action>` and
//! the plugin shim in `main.rs` carries them out in order.

use crate::search::SearchRequest;
use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues the outbound search through the host's web request API.
    ///
    /// The request's tag travels as the web request context so the reply can
    /// be matched to the outstanding search.
    DispatchSearch(SearchRequest),

    /// Posts a message to the background worker thread.
    PostToWorker(WorkerMessage),

    /// Arms the spinner timer.
    ScheduleTick,
}

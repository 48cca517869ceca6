//! Background worker thread for search reply decoding.
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing

pub mod handler;
pub mod messages;

pub use handler::JiffyWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};

//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider → JsonFileExporter → RotatingFile
//! ```
//!
//! Spans land in `~/.local/share/zellij/jiffy/jiffy-otlp.json` as one OTLP/JSON
//! document per line. The file rotates at 10 MB and keeps three backups. The
//! level comes from the `trace_level` plugin option (default `info`).
//!
//! - [`init`]: Subscriber setup
//! - [`export`]: Span exporter and tracer provider
//! - [`otlp`]: OTLP/JSON document model
//! - [`rotation`]: Size-capped file with timestamped backups

mod export;
mod init;
mod otlp;
mod rotation;

pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE_NAME};

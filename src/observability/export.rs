//! Span exporter that appends OTLP/JSON batches to a rotating file.
//!
//! The plugin runs in a WASI sandbox without sockets, so spans go to disk
//! instead of a collector.

use super::otlp::ExportRequest;
use super::rotation::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

#[derive(Debug)]
struct JsonFileExporter {
    file: RotatingFile,
    resource: Resource,
    stopped: bool,
}

impl JsonFileExporter {
    fn write(&self, batch: &[SpanData]) -> ExportResult {
        if self.stopped {
            return Err(TraceError::from("trace file exporter already shut down"));
        }

        let line = serde_json::to_string(&ExportRequest::new(&self.resource, batch))
            .map_err(|e| TraceError::from(e.to_string()))?;

        self.file.append_line(&line).map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for JsonFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = self.write(&batch);
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.stopped = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Builds a tracer provider that exports each finished span straight to
/// `trace_file`.
pub fn file_tracer_provider(trace_file: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = JsonFileExporter {
        file: RotatingFile::new(trace_file),
        resource: resource.clone(),
        stopped: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

//! Tracing subscriber setup.

use super::export;
use crate::infrastructure::paths::get_data_dir;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name recorded on every exported span.
pub const SERVICE_NAME: &str = "Jiffy";

/// Name of the trace file inside the data directory.
pub const TRACE_FILE_NAME: &str = "jiffy-otlp.json";

/// Installs the global subscriber: an `EnvFilter` built from
/// `config.trace_level` feeding an OpenTelemetry layer that exports to
/// `/host/.local/share/zellij/jiffy/jiffy-otlp.json`.
///
/// Tracing is best effort. If the data directory cannot be created, or a
/// subscriber is already installed, this returns without doing anything.
///
/// # Example
///
/// ```rust,no_run
/// use jiffy::observability::init_tracing;
/// use jiffy::Config;
///
/// init_tracing(&Config {
///     trace_level: "debug".to_string(),
///     ..Config::default()
/// });
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = export::file_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let filter = EnvFilter::try_new(&config.trace_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry().with(filter).with(otel_layer).try_init();
}

//! Tracing subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name reported as `service.name` and used for the tracer.
const SERVICE_NAME: &str = "reposearch";

/// File in the data directory that receives finished spans.
const TRACE_FILE: &str = "traces.jsonl";

/// Installs the global subscriber: an `EnvFilter` plus an OpenTelemetry layer
/// exporting spans to `<data dir>/traces.jsonl`.
///
/// `RUST_LOG` wins over `trace_level` from `config`, which defaults to
/// `info`. Calling this again, or failing to create the data directory, is a
/// silent no-op: tracing is never a reason to refuse to start.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.clone().unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let subscriber = tracing_subscriber::registry().with(filter).with(otel_layer);

    // Already initialized in this process.
    let _ = subscriber.try_init();
}

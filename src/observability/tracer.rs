//! OpenTelemetry tracer provider exporting spans as JSON lines.
//!
//! Every finished span becomes one line:
//!
//! ```json
//! {"timestamp":"2026-10-18T09:12:03.512004Z","service":"reposearch",
//!  "trace_id":"…","span_id":"…","parent_span_id":"…","name":"fetch_results",
//!  "duration_ms":412.7,"status":"unset","attributes":{"token":"#3"},
//!  "events":[{"timestamp":"…","name":"issuing search","attributes":{…}}]}
//! ```
//!
//! Spans are exported synchronously as they end, so nothing is lost when the
//! process exits without a shutdown.

use super::file_writer::FileWriter;
use chrono::{DateTime, SecondsFormat, Utc};
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{Key, KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Map, Value as JsonValue};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

/// Span exporter appending JSON lines to a rotating file.
struct FileSpanExporter {
    writer: FileWriter,
    service: String,
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    fn new(writer: FileWriter, resource: &Resource) -> Self {
        let service = resource
            .get(Key::new("service.name"))
            .map_or_else(|| "unknown".to_string(), |value| value.to_string());

        Self {
            writer,
            service,
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn export_batch(&self, batch: &[SpanData]) -> std::io::Result<()> {
        for span in batch {
            self.writer.write_line(&format_span(span, &self.service).to_string())?;
        }
        Ok(())
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from("exporter is shut down"))));
        }

        let result = self
            .export_batch(&batch)
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, resource: &Resource) {
        if let Some(service) = resource.get(Key::new("service.name")) {
            self.service = service.to_string();
        }
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("writer", &self.writer)
            .field("service", &self.service)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Creates a provider that writes finished spans to `file_path`.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(FileWriter::new(file_path), &resource);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

fn timestamp(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn format_span(span: &SpanData, service: &str) -> JsonValue {
    let duration_ms = span
        .end_time
        .duration_since(span.start_time)
        .map_or(0.0, |elapsed| elapsed.as_secs_f64() * 1_000.0);

    let events: Vec<JsonValue> = span
        .events
        .iter()
        .map(|event| {
            json!({
                "timestamp": timestamp(event.timestamp),
                "name": event.name.to_string(),
                "attributes": format_attributes(&event.attributes),
            })
        })
        .collect();

    let mut line = json!({
        "timestamp": timestamp(span.start_time),
        "service": service,
        "trace_id": format!("{:032x}", span.span_context.trace_id()),
        "span_id": format!("{:016x}", span.span_context.span_id()),
        "name": span.name.to_string(),
        "duration_ms": duration_ms,
        "status": format_status(&span.status),
        "attributes": format_attributes(&span.attributes),
        "events": events,
    });
    if span.parent_span_id != SpanId::INVALID {
        line["parent_span_id"] = json!(format!("{:016x}", span.parent_span_id));
    }
    line
}

fn format_attributes(attributes: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| (kv.key.to_string(), format_value(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

fn format_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        Value::String(s) => json!(s.to_string()),
        Value::Array(_) => json!(value.to_string()),
    }
}

fn format_status(status: &Status) -> String {
    match status {
        Status::Unset => "unset".to_string(),
        Status::Ok => "ok".to_string(),
        Status::Error { description } => format!("error: {description}"),
    }
}

//! OpenTelemetry tracing with file export.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → traces.jsonl
//! ```
//!
//! Spans cover every handled event (`handle_event`) and every fetch task
//! (`fetch_suggestions`, `fetch_results`). Fetch spans are parented to the
//! event span that issued them through [`TraceContext`], so a keystroke, its
//! debounce timer and the fetch it released read as one trace.
//!
//! Finished spans are written as one JSON object per line to
//! `$XDG_DATA_HOME/reposearch/traces.jsonl`, rotated at 10 MiB with three
//! numbered backups.
//!
//! Verbosity comes from `RUST_LOG`, then `trace_level` in the configuration,
//! then `info`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider and JSON-lines span exporter
//! - [`file_writer`]: Rotating line writer
//! - [`context`]: Trace context carried into spawned tasks

mod context;
mod file_writer;
mod init;
mod tracer;

pub use context::TraceContext;
pub use init::init_tracing;

//! Trace context carried from the state machine to spawned fetch tasks.
//!
//! Fetches run in their own tasks, outside the span that decided to issue
//! them. Requests capture the issuing span's OpenTelemetry ids so the task
//! span can be parented to it and the whole keystroke-to-render path reads as
//! one trace.

use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// OpenTelemetry ids of the span that issued a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// Trace id as 32 hex characters.
    pub trace_id: String,
    /// Span id of the issuing span as 16 hex characters.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the ids of the current span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span is
    /// not sampled.
    #[must_use]
    pub fn from_current() -> Option<Self> {
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

    /// Parents `span` to the captured context.
    ///
    /// Malformed ids are ignored and leave `span` as a root span.
    pub fn adopt(&self, span: &tracing::Span) {
        let (Ok(trace_id), Ok(span_id)) = (
            TraceId::from_hex(&self.trace_id),
            SpanId::from_hex(&self.parent_span_id),
        ) else {
            tracing::debug!(trace_id = %self.trace_id, "ignoring malformed trace context");
            return;
        };

        let remote = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        span.set_parent(opentelemetry::Context::new().with_remote_span_context(remote));
    }
}

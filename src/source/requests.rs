//! Fetch requests issued by the state machine.
//!
//! The state machine never calls a [`crate::source::SearchSource`] itself. It
//! emits a [`FetchRequest`] inside an action and the session runtime runs it
//! in a task, posting the outcome back as an event tagged with the same
//! [`RequestToken`]. Each request also carries the issuing span's trace
//! context so the fetch span joins the same trace.

use crate::domain::QueryIntent;
use crate::observability::TraceContext;
use crate::pipeline::RequestToken;

/// Generates constructors that attach the current trace context.
macro_rules! fetch_request_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl FetchRequest {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " request with current trace context")]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

fetch_request_builders! {
    suggestions(Suggestions { token: RequestToken, keyword: String }),
    results(Results { token: RequestToken, intent: QueryIntent }),
}

/// A fetch against the result source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    /// Fetch suggestions for a settled keyword.
    Suggestions {
        /// Latest-wins token of the suggestion pipeline.
        token: RequestToken,
        /// Keyword that passed debounce, distinct and length gating.
        keyword: String,
        /// Trace context of the issuing span.
        trace_context: Option<TraceContext>,
    },

    /// Execute a search for one query intent.
    Results {
        /// Latest-wins token of the query coordinator.
        token: RequestToken,
        /// Snapshot of keyword, sort, page and page size.
        intent: QueryIntent,
        /// Trace context of the issuing span.
        trace_context: Option<TraceContext>,
    },
}

impl FetchRequest {
    /// Token the outcome must be tagged with.
    #[must_use]
    pub const fn token(&self) -> RequestToken {
        match self {
            Self::Suggestions { token, .. } | Self::Results { token, .. } => *token,
        }
    }

    /// Trace context captured when the request was built.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::Suggestions { trace_context, .. } | Self::Results { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

//! Result dispatcher.
//!
//! One search produces one [`ResultEnvelope`], and every listener observes
//! that same envelope. Listeners never cause a fetch; adding subscribers only
//! adds callbacks.
//!
//! Snapshot-on-emit: a listener removed during an emission still sees that
//! emission, one added during it waits for the next. The lock is never held
//! while a listener runs, so listeners may call [`ResultDispatcher::on`] and
//! [`ResultDispatcher::off`] themselves.

use crate::domain::ResultEnvelope;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Handle returned by [`ResultDispatcher::on`].
pub type ListenerId = u64;

type Listener = dyn Fn(&ResultEnvelope) + Send + Sync;

/// Fans envelopes out to registered listeners.
pub struct ResultDispatcher {
    listeners: Mutex<Vec<(ListenerId, Arc<Listener>)>>,
    next_id: AtomicU64,
}

impl ResultDispatcher {
    /// Creates a dispatcher without listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Registers a listener for every envelope.
    pub fn on(&self, listener: impl Fn(&ResultEnvelope) + Send + Sync + 'static) -> ListenerId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Registers a listener for failure envelopes, called with their message.
    pub fn on_failure(&self, listener: impl Fn(&str) + Send + Sync + 'static) -> ListenerId {
        self.on(move |envelope| {
            if !envelope.success {
                listener(envelope.message.as_deref().unwrap_or_default());
            }
        })
    }

    /// Removes a listener. Unknown ids are ignored.
    pub fn off(&self, id: ListenerId) {
        self.listeners.lock().retain(|(listener_id, _)| *listener_id != id);
    }

    /// Delivers `envelope` to the listeners registered right now.
    pub fn emit(&self, envelope: &ResultEnvelope) {
        let snapshot: Vec<Arc<Listener>> = {
            let guard = self.listeners.lock();
            guard.iter().map(|(_, listener)| Arc::clone(listener)).collect()
        };

        tracing::trace!(listeners = snapshot.len(), success = envelope.success, "dispatching result");
        for listener in snapshot {
            listener(envelope);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Whether no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ResultDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ResultDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultDispatcher")
            .field("listeners", &self.len())
            .finish()
    }
}

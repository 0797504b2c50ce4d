use leptos::prelude::on_cleanup;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Ownership of a view's in-flight requests.
///
/// A scope is opened when a view mounts and closed when it is cleaned up.
/// Loads take a [`RequestTicket`] and only apply their result while the
/// ticket is current (scope open, no newer load started). One-shot actions
/// only check [`RequestScope::is_open`].
#[derive(Clone, Default)]
pub(crate) struct RequestScope {
    inner: Arc<ScopeInner>,
}

#[derive(Default)]
struct ScopeInner {
    generation: AtomicU64,
    closed: AtomicBool,
}

pub(crate) struct RequestTicket {
    generation: u64,
    inner: Arc<ScopeInner>,
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a latest-wins load; earlier tickets stop being current.
    pub fn begin(&self) -> RequestTicket {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket {
            generation,
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn is_open(&self) -> bool {
        !self.inner.closed.load(Ordering::SeqCst)
    }

    pub fn close(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);
    }
}

impl RequestTicket {
    pub fn is_current(&self) -> bool {
        !self.inner.closed.load(Ordering::SeqCst)
            && self.inner.generation.load(Ordering::SeqCst) == self.generation
    }
}

/// Scope tied to the current reactive owner; closed on unmount.
pub(crate) fn use_request_scope() -> RequestScope {
    let scope = RequestScope::new();
    let on_unmount = scope.clone();
    on_cleanup(move || on_unmount.close());
    scope
}

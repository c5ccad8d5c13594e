//! Session context provider.
//!
//! The gate is built once by [`SessionProvider`] and injected into the tree.
//! Screens reach it through [`use_session`], which fails fast when called
//! outside the provider instead of handing back a default session.
//!
//! ## Usage
//!
//! ```ignore
//! // At the root
//! SessionProvider { config, Router::<Route> {} }
//!
//! // In a screen
//! let session = use_session();
//! if session.state.read().signed_in { ... }
//! spawn(async move { session.gate.sign_out().await; });
//! ```

use dioxus::prelude::*;
use trapihaus_core::{SessionConfig, SessionError, SessionGate, SessionState};

/// What screens get from context: the gate for mutations and a signal
/// mirroring its state for rendering.
#[derive(Clone)]
pub struct SessionHandle {
    pub gate: SessionGate,
    pub state: Signal<SessionState>,
}

/// Owns the session for everything rendered inside it.
///
/// On mount it starts the one-time load and a watcher that copies gate
/// updates into the `state` signal. On unmount the gate is torn down so a
/// load still in flight cannot write.
#[component]
pub fn SessionProvider(config: SessionConfig, children: Element) -> Element {
    let gate = use_hook(|| SessionGate::open_or_volatile(&config));
    let mut state = use_signal(|| gate.state());

    use_context_provider(|| SessionHandle {
        gate: gate.clone(),
        state,
    });

    use_hook(|| {
        let watched = gate.clone();
        spawn(async move {
            let mut changes = watched.subscribe();
            state.set(*changes.borrow_and_update());
            while changes.changed().await.is_ok() {
                let current = *changes.borrow_and_update();
                state.set(current);
            }
        });

        let loading = gate.clone();
        spawn(async move {
            let loaded = loading.initialize().await;
            tracing::debug!(ready = loaded.ready, signed_in = loaded.signed_in, "Session provider ready");
        });
    });

    use_drop({
        let gate = gate.clone();
        move || gate.teardown()
    });

    rsx! { {children} }
}

/// Session from context, or `MissingProvider` outside a [`SessionProvider`].
pub fn try_use_session() -> Result<SessionHandle, SessionError> {
    try_use_context::<SessionHandle>().ok_or(SessionError::MissingProvider)
}

/// Session from context.
///
/// # Panics
///
/// Outside a [`SessionProvider`]. That is a wiring bug, not a runtime
/// condition.
pub fn use_session() -> SessionHandle {
    match try_use_session() {
        Ok(handle) => handle,
        Err(err) => panic!("{}", err),
    }
}

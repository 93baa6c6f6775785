//! Per-thread shared registry
//!
//! Popups on the UI thread normally share one registry. It is built on first
//! use (headless unless [`install`] ran earlier) and [`reset`] tears it down,
//! detaching every native listener, so tests and hot reloads start clean.

use std::cell::RefCell;
use std::rc::Rc;

use crate::{InteractionRegistry, ListenerHost};

thread_local! {
    static SHARED: RefCell<Option<Rc<InteractionRegistry>>> = const { RefCell::new(None) };
}

/// Install a registry backed by `host`, tearing down any previous one
pub fn install(host: impl ListenerHost + 'static) -> Rc<InteractionRegistry> {
    let registry = Rc::new(InteractionRegistry::new(host));
    let previous = SHARED.with(|cell| cell.borrow_mut().replace(Rc::clone(&registry)));
    if let Some(previous) = previous {
        previous.reset();
    }
    tracing::debug!("Installed shared interaction registry");
    registry
}

/// The shared registry, constructed on first use
pub fn registry() -> Rc<InteractionRegistry> {
    SHARED.with(|cell| {
        Rc::clone(
            cell.borrow_mut()
                .get_or_insert_with(|| Rc::new(InteractionRegistry::headless())),
        )
    })
}

/// Run `f` against the shared registry
pub fn with_registry<R>(f: impl FnOnce(&InteractionRegistry) -> R) -> R {
    f(&registry())
}

/// Tear down the shared registry
///
/// Handles obtained earlier stay usable but are emptied and detached; the
/// next [`registry`] call builds a fresh instance.
pub fn reset() {
    let previous = SHARED.with(|cell| cell.borrow_mut().take());
    if let Some(previous) = previous {
        previous.reset();
        tracing::debug!("Reset shared interaction registry");
    }
}

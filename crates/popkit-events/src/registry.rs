//! Interaction Registry
//!
//! One registry serves all five event categories, each in its own isolated
//! slot. A slot's native listener is attached exactly while the slot has
//! registrations or a forced attach is active.

use std::cell::RefCell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use popkit_dom::{EventCategory, InteractionEvent};

use crate::{ListenerHost, ListenerKey, ListenerRegistration, RegistryError, HeadlessHost};

/// Per-category state
#[derive(Debug, Default)]
struct CategorySlot {
    /// Insertion order is invocation order
    registrations: Vec<Rc<ListenerRegistration>>,
    attached: bool,
    forced: bool,
}

impl CategorySlot {
    fn wants_listener(&self) -> bool {
        self.forced || !self.registrations.is_empty()
    }
}

/// Outcome of one dispatch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Callbacks that ran to completion
    pub invoked: usize,
    /// Callbacks that panicked
    pub failed: usize,
}

/// Shared interaction registry
///
/// All methods take `&self` so callbacks holding an `Rc<InteractionRegistry>`
/// may add or remove listeners while an event is being dispatched.
pub struct InteractionRegistry {
    slots: RefCell<[CategorySlot; 5]>,
    host: Box<dyn ListenerHost>,
}

impl InteractionRegistry {
    /// Create a registry that attaches native listeners through `host`
    pub fn new(host: impl ListenerHost + 'static) -> Self {
        Self {
            slots: RefCell::new(Default::default()),
            host: Box::new(host),
        }
    }

    /// Create a registry with no native side
    pub fn headless() -> Self {
        Self::new(HeadlessHost)
    }

    /// Subscribe to `category`, attaching its native listener if needed
    ///
    /// A registration whose `(id, owner_id)` is already present in the
    /// category is rejected; use [`replace_listener`](Self::replace_listener)
    /// to re-register.
    pub fn add_listener(
        &self,
        category: EventCategory,
        registration: ListenerRegistration,
    ) -> Result<(), RegistryError> {
        {
            let mut slots = self.slots.borrow_mut();
            let slot = &mut slots[category.index()];
            if slot.registrations.iter().any(|r| r.matches(registration.key())) {
                tracing::warn!(
                    "Rejected duplicate {} listener {}/{}",
                    category,
                    registration.id(),
                    registration.owner_id()
                );
                return Err(RegistryError::DuplicateRegistration {
                    category,
                    id: registration.id().to_string(),
                    owner_id: registration.owner_id().to_string(),
                });
            }
            tracing::trace!(
                "Added {} listener {}/{}",
                category,
                registration.id(),
                registration.owner_id()
            );
            slot.registrations.push(Rc::new(registration));
        }
        self.sync(category);
        Ok(())
    }

    /// Remove any registration with the same key, then subscribe
    pub fn replace_listener(&self, category: EventCategory, registration: ListenerRegistration) {
        {
            let mut slots = self.slots.borrow_mut();
            let slot = &mut slots[category.index()];
            slot.registrations.retain(|r| !r.matches(registration.key()));
            slot.registrations.push(Rc::new(registration));
        }
        self.sync(category);
    }

    /// Remove every registration matching `key`, detaching the native
    /// listener when the category empties
    ///
    /// Removing an unknown key is a no-op. Returns how many were removed.
    pub fn remove_listener(&self, category: EventCategory, key: &ListenerKey) -> usize {
        let removed = {
            let mut slots = self.slots.borrow_mut();
            let slot = &mut slots[category.index()];
            let before = slot.registrations.len();
            slot.registrations.retain(|r| !r.matches(key));
            before - slot.registrations.len()
        };
        if removed > 0 {
            tracing::trace!("Removed {} {} listener(s) {}/{}", removed, category, key.id, key.owner_id);
        }
        self.sync(category);
        removed
    }

    /// [`add_listener`](Self::add_listener) with the category given by name
    pub fn add_listener_named(
        &self,
        category: &str,
        registration: ListenerRegistration,
    ) -> Result<(), RegistryError> {
        self.add_listener(category.parse()?, registration)
    }

    /// [`remove_listener`](Self::remove_listener) with the category given by name
    pub fn remove_listener_named(&self, category: &str, key: &ListenerKey) -> Result<usize, RegistryError> {
        Ok(self.remove_listener(category.parse()?, key))
    }

    /// Keep the native listener attached even with no registrations
    pub fn force_attach(&self, category: EventCategory) {
        self.slots.borrow_mut()[category.index()].forced = true;
        self.sync(category);
    }

    /// Tear a category down: drop the forced attach and every registration,
    /// then detach its native listener
    ///
    /// Returns the number of registrations dropped.
    pub fn force_detach(&self, category: EventCategory) -> usize {
        let dropped = {
            let mut slots = self.slots.borrow_mut();
            let slot = &mut slots[category.index()];
            slot.forced = false;
            std::mem::take(&mut slot.registrations).len()
        };
        if dropped > 0 {
            tracing::debug!("Force-detached {} with {} registration(s)", category, dropped);
        }
        self.sync(category);
        dropped
    }

    /// Tear down every category
    pub fn reset(&self) {
        for category in EventCategory::ALL {
            self.force_detach(category);
        }
    }

    /// Deliver a native event to every registration of its category
    ///
    /// Callbacks run in registration order over a snapshot taken before the
    /// first call, so registrations added or removed by a callback take effect
    /// from the next event on. A panicking callback is logged and skipped.
    pub fn dispatch(&self, event: &InteractionEvent) -> DispatchReport {
        let category = event.category;
        let snapshot: Vec<Rc<ListenerRegistration>> = {
            let slots = self.slots.borrow();
            let slot = &slots[category.index()];
            if !slot.attached {
                return DispatchReport::default();
            }
            slot.registrations.clone()
        };
        tracing::trace!("Dispatching {} to {} listener(s)", category, snapshot.len());

        let mut report = DispatchReport::default();
        for registration in &snapshot {
            match panic::catch_unwind(AssertUnwindSafe(|| registration.invoke(event))) {
                Ok(()) => report.invoked += 1,
                Err(payload) => {
                    report.failed += 1;
                    tracing::error!(
                        "{} listener {}/{} panicked: {}",
                        category,
                        registration.id(),
                        registration.owner_id(),
                        panic_message(payload.as_ref())
                    );
                }
            }
        }
        report
    }

    /// Check whether the native listener for `category` is attached
    pub fn is_attached(&self, category: EventCategory) -> bool {
        self.slots.borrow()[category.index()].attached
    }

    /// Check whether a forced attach is active for `category`
    pub fn is_forced(&self, category: EventCategory) -> bool {
        self.slots.borrow()[category.index()].forced
    }

    /// Number of registrations in `category`
    pub fn len(&self, category: EventCategory) -> usize {
        self.slots.borrow()[category.index()].registrations.len()
    }

    /// Check if `category` has no registrations
    pub fn is_empty(&self, category: EventCategory) -> bool {
        self.len(category) == 0
    }

    /// Registration keys of `category`, in invocation order
    pub fn keys(&self, category: EventCategory) -> Vec<ListenerKey> {
        self.slots.borrow()[category.index()]
            .registrations
            .iter()
            .map(|r| r.key().clone())
            .collect()
    }

    /// Bring the native listener in line with the slot's demand
    fn sync(&self, category: EventCategory) {
        let change = {
            let mut slots = self.slots.borrow_mut();
            let slot = &mut slots[category.index()];
            let wanted = slot.wants_listener();
            if wanted == slot.attached {
                None
            } else {
                slot.attached = wanted;
                Some(wanted)
            }
        };
        match change {
            Some(true) => {
                tracing::debug!("Attaching {} root listener", category);
                self.host.attach(category);
            }
            Some(false) => {
                tracing::debug!("Detaching {} root listener", category);
                self.host.detach(category);
            }
            None => {}
        }
    }
}

impl Default for InteractionRegistry {
    fn default() -> Self {
        Self::headless()
    }
}

impl fmt::Debug for InteractionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots.borrow();
        let mut s = f.debug_struct("InteractionRegistry");
        for category in EventCategory::ALL {
            s.field(category.name(), &slots[category.index()]);
        }
        s.finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn noop(id: &str, owner: &str) -> ListenerRegistration {
        ListenerRegistration::new(id, owner, |_| {})
    }

    #[test]
    fn test_attach_follows_registrations() {
        let registry = InteractionRegistry::headless();
        assert!(!registry.is_attached(EventCategory::Click));

        registry.add_listener(EventCategory::Click, noop("a", "p1")).unwrap();
        registry.add_listener(EventCategory::Click, noop("b", "p1")).unwrap();
        assert!(registry.is_attached(EventCategory::Click));

        registry.remove_listener(EventCategory::Click, &ListenerKey::new("a", "p1"));
        assert!(registry.is_attached(EventCategory::Click));
        registry.remove_listener(EventCategory::Click, &ListenerKey::new("b", "p1"));
        assert!(!registry.is_attached(EventCategory::Click));
    }

    #[test]
    fn test_categories_isolated() {
        let registry = InteractionRegistry::headless();
        registry.add_listener(EventCategory::FocusIn, noop("a", "p1")).unwrap();
        for category in EventCategory::ALL {
            assert_eq!(registry.is_attached(category), category == EventCategory::FocusIn);
        }
        // Same key in another category is a separate subscription
        registry.add_listener(EventCategory::FocusOut, noop("a", "p1")).unwrap();
        assert_eq!(registry.len(EventCategory::FocusIn), 1);
        assert_eq!(registry.len(EventCategory::FocusOut), 1);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let registry = InteractionRegistry::headless();
        assert_eq!(registry.remove_listener(EventCategory::MouseOut, &ListenerKey::new("x", "y")), 0);
        assert!(!registry.is_attached(EventCategory::MouseOut));
    }

    #[test]
    fn test_duplicate_rejected() {
        let registry = InteractionRegistry::headless();
        registry.add_listener(EventCategory::Click, noop("a", "p1")).unwrap();
        let err = registry.add_listener(EventCategory::Click, noop("a", "p1")).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateRegistration {
                category: EventCategory::Click,
                id: "a".to_string(),
                owner_id: "p1".to_string(),
            }
        );
        // Same id under a different owner is fine
        registry.add_listener(EventCategory::Click, noop("a", "p2")).unwrap();
        assert_eq!(registry.len(EventCategory::Click), 2);
    }

    #[test]
    fn test_replace_keeps_single_entry() {
        let registry = InteractionRegistry::headless();
        let hits = Rc::new(Cell::new(0));
        registry.add_listener(EventCategory::Click, noop("a", "p1")).unwrap();
        let h = hits.clone();
        registry.replace_listener(
            EventCategory::Click,
            ListenerRegistration::new("a", "p1", move |_| h.set(h.get() + 1)),
        );
        assert_eq!(registry.len(EventCategory::Click), 1);

        registry.dispatch(&InteractionEvent::click(popkit_dom::NodeId::ROOT));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_force_attach_without_registrations() {
        let registry = InteractionRegistry::headless();
        registry.force_attach(EventCategory::MouseOver);
        assert!(registry.is_attached(EventCategory::MouseOver));

        registry.add_listener(EventCategory::MouseOver, noop("a", "p1")).unwrap();
        registry.remove_listener(EventCategory::MouseOver, &ListenerKey::new("a", "p1"));
        assert!(registry.is_attached(EventCategory::MouseOver));

        assert_eq!(registry.force_detach(EventCategory::MouseOver), 0);
        assert!(!registry.is_attached(EventCategory::MouseOver));
    }

    #[test]
    fn test_force_detach_drops_registrations() {
        let registry = InteractionRegistry::headless();
        registry.add_listener(EventCategory::Click, noop("a", "p1")).unwrap();
        registry.add_listener(EventCategory::Click, noop("b", "p2")).unwrap();
        assert_eq!(registry.force_detach(EventCategory::Click), 2);
        assert!(registry.is_empty(EventCategory::Click));
        assert!(!registry.is_attached(EventCategory::Click));
    }

    #[test]
    fn test_named_category_fails_fast() {
        let registry = InteractionRegistry::headless();
        let err = registry.add_listener_named("scroll", noop("a", "p1")).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Dom(popkit_dom::DomError::UnknownCategory(ref name)) if name == "scroll"
        ));
        assert!(registry.remove_listener_named("wheel", &ListenerKey::new("a", "p1")).is_err());

        registry.add_listener_named("mouseout", noop("a", "p1")).unwrap();
        assert!(registry.is_attached(EventCategory::MouseOut));
    }

    #[test]
    fn test_dispatch_when_detached_is_silent() {
        let registry = InteractionRegistry::headless();
        let report = registry.dispatch(&InteractionEvent::click(popkit_dom::NodeId::ROOT));
        assert_eq!(report, DispatchReport::default());
    }
}

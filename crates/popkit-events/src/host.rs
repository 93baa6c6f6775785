//! Listener Host
//!
//! The seam between the registry and the environment that actually owns
//! native event listeners.

use std::rc::Rc;

use popkit_dom::{EventCategory, RootListeners};

/// Environment owning the native document-level listeners
pub trait ListenerHost {
    /// Attach the native listener for `category`
    fn attach(&self, category: EventCategory);

    /// Detach the native listener for `category`
    fn detach(&self, category: EventCategory);
}

impl ListenerHost for RootListeners {
    fn attach(&self, category: EventCategory) {
        RootListeners::attach(self, category);
    }

    fn detach(&self, category: EventCategory) {
        RootListeners::detach(self, category);
    }
}

impl<H: ListenerHost + ?Sized> ListenerHost for Rc<H> {
    fn attach(&self, category: EventCategory) {
        (**self).attach(category);
    }

    fn detach(&self, category: EventCategory) {
        (**self).detach(category);
    }
}

/// Host with no native side, for registries driven purely by `dispatch`
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessHost;

impl ListenerHost for HeadlessHost {
    fn attach(&self, _category: EventCategory) {}

    fn detach(&self, _category: EventCategory) {}
}

//! Listener registrations

use std::fmt;
use std::rc::Rc;

use popkit_dom::InteractionEvent;

/// Subscriber callback, invoked synchronously with the native event
pub type Callback = Rc<dyn Fn(&InteractionEvent)>;

/// Identity of a subscription: `(id, owner_id)`
///
/// One owner (a popup instance) may hold several subscriptions under
/// different ids, e.g. one for its reference element and one for its panel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListenerKey {
    pub id: String,
    pub owner_id: String,
}

impl ListenerKey {
    pub fn new(id: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
        }
    }
}

/// A subscription to one event category
#[derive(Clone)]
pub struct ListenerRegistration {
    key: ListenerKey,
    callback: Callback,
}

impl ListenerRegistration {
    /// Create a registration from a closure
    pub fn new<F>(id: impl Into<String>, owner_id: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&InteractionEvent) + 'static,
    {
        Self::from_callback(ListenerKey::new(id, owner_id), Rc::new(callback))
    }

    /// Create a registration from an already shared callback
    pub fn from_callback(key: ListenerKey, callback: Callback) -> Self {
        Self { key, callback }
    }

    pub fn key(&self) -> &ListenerKey {
        &self.key
    }

    pub fn id(&self) -> &str {
        &self.key.id
    }

    pub fn owner_id(&self) -> &str {
        &self.key.owner_id
    }

    pub(crate) fn matches(&self, key: &ListenerKey) -> bool {
        self.key == *key
    }

    pub(crate) fn invoke(&self, event: &InteractionEvent) {
        (self.callback)(event);
    }
}

impl fmt::Debug for ListenerRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistration")
            .field("id", &self.key.id)
            .field("owner_id", &self.key.owner_id)
            .finish_non_exhaustive()
    }
}

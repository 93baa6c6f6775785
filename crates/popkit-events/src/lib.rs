//! popkit Events
//!
//! Multiplexes one native listener per event category on the document root
//! across any number of popup instances.
//!
//! # Example
//! ```rust
//! use popkit_dom::{Document, EventCategory, InteractionEvent};
//! use popkit_events::{InteractionRegistry, ListenerRegistration};
//!
//! let doc = Document::new();
//! let registry = InteractionRegistry::new(doc.root_listeners());
//! registry
//!     .add_listener(
//!         EventCategory::Click,
//!         ListenerRegistration::new("ref", "popup-1", |_event| {}),
//!     )
//!     .unwrap();
//! assert!(doc.root_listeners().is_attached(EventCategory::Click));
//!
//! registry.dispatch(&InteractionEvent::click(doc.body()));
//! ```

mod host;
mod registration;
mod registry;
pub mod shared;

pub use host::{ListenerHost, HeadlessHost};
pub use registration::{ListenerKey, ListenerRegistration, Callback};
pub use registry::{InteractionRegistry, DispatchReport};

pub use popkit_dom::{EventCategory, InteractionEvent};

/// Registry error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Dom(#[from] popkit_dom::DomError),

    #[error("Listener {id}/{owner_id} is already registered for {category}")]
    DuplicateRegistration {
        category: EventCategory,
        id: String,
        owner_id: String,
    },
}

//! popkit
//!
//! Popups, dropdowns and tooltips layered on an external positioning engine.
//!
//! Every popup shares one root listener per event category through the
//! interaction registry, and hands the engine an options tree reconciled
//! from library defaults, computed values and user overrides.
//!
//! # Example
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use popkit::{Config, Popup, PopupProps, TriggerMode};
//! use popkit::dom::{Document, InteractionEvent};
//! use popkit::events::InteractionRegistry;
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let wrapper = doc.append_element(body, "div", Some("menu")).unwrap();
//! let button = doc.append_element(wrapper, "button", Some("menu-ref")).unwrap();
//!
//! let registry = Rc::new(InteractionRegistry::new(doc.root_listeners()));
//! let doc = Rc::new(RefCell::new(doc));
//!
//! let props = PopupProps {
//!     trigger: TriggerMode::Click,
//!     reference: Some("menu-ref".to_string()),
//!     ..PopupProps::default()
//! };
//! let popup = Popup::new("menu", props, Config::default(), doc, Rc::clone(&registry));
//! popup.mount().unwrap();
//!
//! registry.dispatch(&InteractionEvent::click(button));
//! assert!(popup.is_open());
//! ```

mod config;
mod options;
mod popup;
mod props;

pub use config::Config;
pub use options::{library_defaults, computed_options, resolve_options, Positioner};
pub use popup::{Popup, PopupEvent};
pub use props::{Offset, Placement, PopupProps, PositioningStrategy, TriggerMode};

// Re-export sub-crates for advanced usage
pub use popkit_dom as dom;
pub use popkit_events as events;
pub use popkit_merge as merge;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Popup error
#[derive(Debug, thiserror::Error)]
pub enum PopupError {
    #[error("Registry error: {0}")]
    Registry(#[from] popkit_events::RegistryError),

    #[error("DOM error: {0}")]
    Dom(#[from] popkit_dom::DomError),

    #[error("Element not found in document: #{0}")]
    MissingReference(String),
}

//! Popup instance
//!
//! Subscribes to the shared interaction registry according to its trigger
//! mode and drives a small show/hide state machine from the events it
//! receives.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde_json::Value;

use popkit_dom::{node_within_subtree, Document, EventCategory, InteractionEvent, NodeId};
use popkit_events::{InteractionRegistry, ListenerKey, ListenerRegistration};
use popkit_merge::merge_config;

use crate::{resolve_options, Config, PopupError, PopupProps, Positioner, TriggerMode};

/// Lifecycle and visibility notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupEvent {
    Show,
    Hide,
    Destroy,
}

#[derive(Debug, Default)]
struct PopupState {
    open: bool,
    mounted: bool,
    subscriptions: Vec<EventCategory>,
    events: Vec<PopupEvent>,
}

struct PopupInner {
    /// Element id of the subtree holding reference and panel
    id: String,
    props: RefCell<PopupProps>,
    config: Config,
    document: Rc<RefCell<Document>>,
    registry: Rc<InteractionRegistry>,
    state: RefCell<PopupState>,
}

/// A popup bound to a document and a registry
pub struct Popup {
    inner: Rc<PopupInner>,
}

impl Popup {
    /// Create an unmounted popup rooted at the element with id `id`
    pub fn new(
        id: &str,
        props: PopupProps,
        config: Config,
        document: Rc<RefCell<Document>>,
        registry: Rc<InteractionRegistry>,
    ) -> Self {
        let open = props.force_show || (props.model_value && !props.disabled && !props.force_hide);
        Self {
            inner: Rc::new(PopupInner {
                id: id.to_string(),
                props: RefCell::new(props),
                config,
                document,
                registry,
                state: RefCell::new(PopupState {
                    open,
                    ..PopupState::default()
                }),
            }),
        }
    }

    /// Element id of the popup subtree
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Check the popup and reference elements exist, then subscribe
    ///
    /// Mounting an already mounted popup is a no-op.
    pub fn mount(&self) -> Result<(), PopupError> {
        if self.inner.state.borrow().mounted {
            return Ok(());
        }
        {
            let doc = self.inner.document.borrow();
            if doc.get_element_by_id(&self.inner.id).is_none() {
                return Err(PopupError::MissingReference(self.inner.id.clone()));
            }
            if let Some(reference) = &self.inner.props.borrow().reference {
                if doc.get_element_by_id(reference).is_none() {
                    return Err(PopupError::MissingReference(reference.clone()));
                }
            }
        }
        self.inner.state.borrow_mut().mounted = true;
        if let Err(err) = self.subscribe() {
            self.unsubscribe();
            self.inner.state.borrow_mut().mounted = false;
            return Err(err);
        }
        tracing::debug!("Mounted popup #{}", self.inner.id);
        Ok(())
    }

    /// Unsubscribe and close; safe to call more than once
    pub fn unmount(&self) {
        if !self.inner.state.borrow().mounted {
            return;
        }
        self.unsubscribe();
        let mut state = self.inner.state.borrow_mut();
        state.mounted = false;
        if state.open {
            state.open = false;
            state.events.push(PopupEvent::Hide);
        }
        state.events.push(PopupEvent::Destroy);
        tracing::debug!("Unmounted popup #{}", self.inner.id);
    }

    /// Switch trigger mode, moving subscriptions over
    pub fn set_trigger(&self, trigger: TriggerMode) -> Result<(), PopupError> {
        self.unsubscribe();
        self.inner.props.borrow_mut().trigger = trigger;
        self.subscribe()
    }

    /// Disabling closes the popup and drops its subscriptions
    pub fn set_disabled(&self, disabled: bool) -> Result<(), PopupError> {
        self.inner.props.borrow_mut().disabled = disabled;
        if disabled {
            self.unsubscribe();
            self.inner.hide(true);
            Ok(())
        } else {
            self.subscribe()
        }
    }

    /// Keep the popup open regardless of interaction
    pub fn set_force_show(&self, force: bool) {
        self.inner.props.borrow_mut().force_show = force;
        if force {
            self.inner.show(true);
        }
    }

    /// Keep the popup closed regardless of interaction
    pub fn set_force_hide(&self, force: bool) {
        self.inner.props.borrow_mut().force_hide = force;
        if force {
            self.inner.hide(true);
        }
    }

    /// Open, subject to `disabled` and `force_hide`
    pub fn show(&self) {
        self.inner.show(false);
    }

    /// Close, subject to `force_show`
    pub fn hide(&self) {
        self.inner.hide(false);
    }

    pub fn is_open(&self) -> bool {
        self.inner.state.borrow().open
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.state.borrow().mounted
    }

    /// Categories this popup currently listens to
    pub fn subscriptions(&self) -> Vec<EventCategory> {
        self.inner.state.borrow().subscriptions.clone()
    }

    /// Drain the notifications emitted since the last call
    pub fn take_events(&self) -> Vec<PopupEvent> {
        std::mem::take(&mut self.inner.state.borrow_mut().events)
    }

    /// Options to hand to the positioning engine
    pub fn options(&self) -> Value {
        resolve_options(&self.inner.props.borrow(), &self.inner.config)
    }

    /// Merge this popup's options over the engine's current ones and apply them
    pub fn update_positioner(&self, positioner: &mut dyn Positioner) {
        let merged = merge_config(&self.options(), &positioner.options(), &self.inner.config.merge_options());
        positioner.set_options(merged);
    }

    fn listener_key(&self) -> ListenerKey {
        let props = self.inner.props.borrow();
        let id = props.reference.as_deref().unwrap_or(&self.inner.id);
        ListenerKey::new(id, self.inner.id.as_str())
    }

    fn wanted_categories(&self) -> Vec<EventCategory> {
        let props = self.inner.props.borrow();
        let mut categories = props.trigger.categories().to_vec();
        let outside = props.hide_on_click_outside.unwrap_or(self.inner.config.hide_on_click_outside);
        if outside && !categories.contains(&EventCategory::Click) {
            categories.push(EventCategory::Click);
        }
        categories
    }

    fn subscribe(&self) -> Result<(), PopupError> {
        {
            let state = self.inner.state.borrow();
            if !state.mounted || self.inner.props.borrow().disabled {
                return Ok(());
            }
        }
        let key = self.listener_key();
        // Registry teardown (reset, force_detach) drops registrations without telling us
        self.inner
            .state
            .borrow_mut()
            .subscriptions
            .retain(|category| self.inner.registry.keys(*category).contains(&key));
        for category in self.wanted_categories() {
            if self.inner.state.borrow().subscriptions.contains(&category) {
                continue;
            }
            let weak: Weak<PopupInner> = Rc::downgrade(&self.inner);
            let registration = ListenerRegistration::new(key.id.clone(), key.owner_id.clone(), move |event| {
                if let Some(inner) = weak.upgrade() {
                    inner.handle(event);
                }
            });
            self.inner.registry.add_listener(category, registration)?;
            self.inner.state.borrow_mut().subscriptions.push(category);
        }
        Ok(())
    }

    fn unsubscribe(&self) {
        let key = self.listener_key();
        let categories = std::mem::take(&mut self.inner.state.borrow_mut().subscriptions);
        for category in categories {
            self.inner.registry.remove_listener(category, &key);
        }
    }
}

impl Drop for Popup {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Popup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Popup")
            .field("id", &self.inner.id)
            .field("state", &self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

impl PopupInner {
    fn handle(&self, event: &InteractionEvent) {
        let (trigger, outside_closes) = {
            let props = self.props.borrow();
            (
                props.trigger,
                props.hide_on_click_outside.unwrap_or(self.config.hide_on_click_outside),
            )
        };
        let (in_popup, in_reference, related_in_popup) = {
            let doc = self.document.borrow();
            let tree = doc.tree();
            let reference = self.props.borrow().reference.clone();
            (
                node_within_subtree(tree, event.target, &self.id),
                match &reference {
                    Some(reference) => node_within_subtree(tree, event.target, reference),
                    None => node_within_subtree(tree, event.target, &self.id),
                },
                event
                    .related_target
                    .is_some_and(|related: NodeId| node_within_subtree(tree, related, &self.id)),
            )
        };

        match event.category {
            EventCategory::Click => {
                if trigger == TriggerMode::Click && in_reference {
                    if self.state.borrow().open {
                        self.hide(false);
                    } else {
                        self.show(false);
                    }
                } else if !in_popup && outside_closes {
                    self.hide(false);
                }
            }
            EventCategory::MouseOver | EventCategory::FocusIn => {
                if in_popup {
                    self.show(false);
                }
            }
            EventCategory::MouseOut | EventCategory::FocusOut => {
                if in_popup && !related_in_popup {
                    self.hide(false);
                }
            }
        }
    }

    fn show(&self, forced: bool) {
        {
            let props = self.props.borrow();
            if !forced && (props.disabled || props.force_hide) {
                return;
            }
        }
        let mut state = self.state.borrow_mut();
        if !state.open {
            state.open = true;
            state.events.push(PopupEvent::Show);
            tracing::debug!("Showing popup #{}", self.id);
        }
    }

    fn hide(&self, forced: bool) {
        if !forced && self.props.borrow().force_show {
            return;
        }
        let mut state = self.state.borrow_mut();
        if state.open {
            state.open = false;
            state.events.push(PopupEvent::Hide);
            tracing::debug!("Hiding popup #{}", self.id);
        }
    }
}

//! Interaction Events
//!
//! The document-level events popups subscribe to.

use std::fmt;
use std::str::FromStr;

use crate::{DomError, NodeId};

/// Event category observed on the document root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Click,
    FocusIn,
    FocusOut,
    MouseOver,
    MouseOut,
}

impl EventCategory {
    /// Every category, in slot order
    pub const ALL: [EventCategory; 5] = [
        EventCategory::Click,
        EventCategory::FocusIn,
        EventCategory::FocusOut,
        EventCategory::MouseOver,
        EventCategory::MouseOut,
    ];

    /// Native event type name
    pub fn name(self) -> &'static str {
        match self {
            EventCategory::Click => "click",
            EventCategory::FocusIn => "focusin",
            EventCategory::FocusOut => "focusout",
            EventCategory::MouseOver => "mouseover",
            EventCategory::MouseOut => "mouseout",
        }
    }

    /// Dense slot index, stable across runs
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Check if this is a focus transition
    pub fn is_focus(self) -> bool {
        matches!(self, EventCategory::FocusIn | EventCategory::FocusOut)
    }

    /// Check if this is a pointer hover transition
    pub fn is_hover(self) -> bool {
        matches!(self, EventCategory::MouseOver | EventCategory::MouseOut)
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventCategory {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventCategory::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomError::UnknownCategory(s.to_string()))
    }
}

/// An interaction event as delivered by the document root
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionEvent {
    pub category: EventCategory,
    /// Element the event originated on
    pub target: NodeId,
    /// The element being entered or left, for hover and focus transitions
    pub related_target: Option<NodeId>,
    pub timestamp: f64,
}

impl InteractionEvent {
    /// Create an event with no related target
    pub fn new(category: EventCategory, target: NodeId) -> Self {
        Self {
            category,
            target,
            related_target: None,
            timestamp: 0.0,
        }
    }

    /// Create click event
    pub fn click(target: NodeId) -> Self {
        Self::new(EventCategory::Click, target)
    }

    /// Create focusin event; `previous` is the element losing focus
    pub fn focus_in(target: NodeId, previous: Option<NodeId>) -> Self {
        Self::new(EventCategory::FocusIn, target).with_related(previous)
    }

    /// Create focusout event; `next` is the element gaining focus
    pub fn focus_out(target: NodeId, next: Option<NodeId>) -> Self {
        Self::new(EventCategory::FocusOut, target).with_related(next)
    }

    /// Create mouseover event; `from` is the element the pointer left
    pub fn mouse_over(target: NodeId, from: Option<NodeId>) -> Self {
        Self::new(EventCategory::MouseOver, target).with_related(from)
    }

    /// Create mouseout event; `to` is the element the pointer entered
    pub fn mouse_out(target: NodeId, to: Option<NodeId>) -> Self {
        Self::new(EventCategory::MouseOut, target).with_related(to)
    }

    /// Set the related target
    pub fn with_related(mut self, related: Option<NodeId>) -> Self {
        self.related_target = related;
        self
    }

    /// Set the timestamp (milliseconds)
    pub fn at(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }
}

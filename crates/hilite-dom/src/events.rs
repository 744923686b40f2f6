//! UI Events
//!
//! Pointer and click events dispatched to listeners registered on nodes.
//! Handlers get mutable access to the document, so a click handler can
//! restructure the tree it was dispatched in.

use std::rc::Rc;

use crate::{Document, NodeId};

/// UI event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    PointerEnter,
    PointerLeave,
    Click,
}

impl EventType {
    /// Event name as used in markup and logs
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PointerEnter => "pointerenter",
            Self::PointerLeave => "pointerleave",
            Self::Click => "click",
        }
    }

    /// Whether the event propagates to ancestors
    pub fn bubbles(self) -> bool {
        matches!(self, Self::Click)
    }

    /// Whether `prevent_default` has an effect
    pub fn cancelable(self) -> bool {
        matches!(self, Self::Click)
    }
}

/// Event listener callback
pub type EventHandler = Rc<dyn Fn(&mut Document, &mut UiEvent)>;

/// UI event
#[derive(Debug, Clone)]
pub struct UiEvent {
    pub event_type: EventType,
    pub target: NodeId,
    pub current_target: Option<NodeId>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl UiEvent {
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            current_target: None,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn bubbles(&self) -> bool {
        self.event_type.bubbles()
    }

    pub fn cancelable(&self) -> bool {
        self.event_type.cancelable()
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable() {
            self.default_prevented = true;
        }
    }

    /// Stop propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Check if propagation was stopped
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_is_cancelable() {
        let mut event = UiEvent::new(EventType::Click, NodeId(1));
        assert!(event.bubbles());
        event.prevent_default();
        event.stop_propagation();
        assert!(event.is_default_prevented());
        assert!(event.propagation_stopped());
    }

    #[test]
    fn test_pointer_events_do_not_bubble() {
        let mut event = UiEvent::new(EventType::PointerEnter, NodeId(1));
        assert!(!event.bubbles());
        event.prevent_default();
        assert!(!event.is_default_prevented());
        assert_eq!(EventType::PointerLeave.as_str(), "pointerleave");
    }
}

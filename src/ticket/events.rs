// src/ticket/events.rs

use super::document::{Document, ElementId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    KeyDown,
    KeyUp,
    Click,
}

/// Something the user did to an element.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    KeyDown { target: ElementId, key: String },
    KeyUp { target: ElementId, key: String },
    Click { target: ElementId },
}

impl UiEvent {
    pub fn key_up<I: Into<ElementId>, K: Into<String>>(target: I, key: K) -> Self {
        UiEvent::KeyUp { target: target.into(), key: key.into() }
    }

    pub fn key_down<I: Into<ElementId>, K: Into<String>>(target: I, key: K) -> Self {
        UiEvent::KeyDown { target: target.into(), key: key.into() }
    }

    pub fn click<I: Into<ElementId>>(target: I) -> Self {
        UiEvent::Click { target: target.into() }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            UiEvent::KeyDown { .. } => EventKind::KeyDown,
            UiEvent::KeyUp { .. } => EventKind::KeyUp,
            UiEvent::Click { .. } => EventKind::Click,
        }
    }

    pub fn target(&self) -> &ElementId {
        match self {
            UiEvent::KeyDown { target, .. }
            | UiEvent::KeyUp { target, .. }
            | UiEvent::Click { target } => target,
        }
    }
}

/// Anything that wants to react to an event. Handlers run to completion and may only
/// touch the document they're given.
pub trait EventListener {
    fn handle(&self, event: &UiEvent, document: &mut Document);
}

impl<F> EventListener for F
where
    F: Fn(&UiEvent, &mut Document),
{
    fn handle(&self, event: &UiEvent, document: &mut Document) {
        self(event, document)
    }
}

struct Registration {
    kind: EventKind,
    target: ElementId,
    listener: Box<dyn EventListener>,
}

/// Routes events to the listeners bound to their (kind, target).
#[derive(Default)]
pub struct EventDispatcher {
    registrations: Vec<Registration>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<I, L>(&mut self, kind: EventKind, target: I, listener: L)
    where
        I: Into<ElementId>,
        L: EventListener + 'static,
    {
        self.registrations.push(Registration {
            kind,
            target: target.into(),
            listener: Box::new(listener),
        });
    }

    /// Runs every matching listener in registration order, returns how many ran.
    pub fn dispatch(&self, event: &UiEvent, document: &mut Document) -> usize {
        let mut ran = 0;
        for reg in &self.registrations {
            if reg.kind == event.kind() && &reg.target == event.target() {
                reg.listener.handle(event, document);
                ran += 1;
            }
        }
        ran
    }

    pub fn listener_count(&self) -> usize {
        self.registrations.len()
    }
}

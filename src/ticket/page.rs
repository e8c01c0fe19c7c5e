// src/ticket/page.rs

//! A document plus the listeners attached to it, with a load lifecycle.
//! Listeners are normally attached from an `on_ready` hook so that nothing is bound
//! until the whole document exists.

use log::debug;

use super::document::{Document, ElementId};
use super::events::{EventDispatcher, UiEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Complete,
}

type ReadyHook = Box<dyn FnOnce(&mut EventDispatcher)>;

pub struct Page {
    document: Document,
    dispatcher: EventDispatcher,
    ready_hooks: Vec<ReadyHook>,
    state: ReadyState,
}

impl Page {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            dispatcher: EventDispatcher::new(),
            ready_hooks: Vec::new(),
            state: ReadyState::Loading,
        }
    }

    pub fn ready_state(&self) -> ReadyState {
        self.state
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Queues `hook` for when loading completes. Late hooks run straight away.
    pub fn on_ready<F>(&mut self, hook: F)
    where
        F: FnOnce(&mut EventDispatcher) + 'static,
    {
        match self.state {
            ReadyState::Loading => self.ready_hooks.push(Box::new(hook)),
            ReadyState::Complete => hook(&mut self.dispatcher),
        }
    }

    /// Marks the document loaded and runs the queued hooks once, oldest first.
    pub fn finish_loading(&mut self) {
        if self.state == ReadyState::Complete {
            return;
        }
        self.state = ReadyState::Complete;
        let hooks = std::mem::take(&mut self.ready_hooks);
        debug!("document ready, running {} hook(s)", hooks.len());
        for hook in hooks {
            hook(&mut self.dispatcher);
        }
    }

    /// Dispatches `event` against the document. Returns how many listeners ran.
    pub fn fire(&mut self, event: UiEvent) -> usize {
        self.dispatcher.dispatch(&event, &mut self.document)
    }

    /// Simulates typing: the input's value becomes `text`, then a key goes down and up.
    /// The key reported is the last character of `text` (or "Backspace" when it's empty).
    pub fn type_into<I: Into<ElementId>>(&mut self, target: I, text: &str) -> usize {
        let target = target.into();
        let key = text
            .chars()
            .last()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "Backspace".to_string());

        let mut ran = self.fire(UiEvent::KeyDown { target: target.clone(), key: key.clone() });
        self.document.set_value(&target, text);
        ran += self.fire(UiEvent::KeyUp { target, key });
        ran
    }
}

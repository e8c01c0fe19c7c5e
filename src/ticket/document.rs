// src/ticket/document.rs

//! The addressable elements a ticket page is made of.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::calculator::TicketBindings;

/// The id an element is looked up by, e.g. "shares".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        ElementId(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        ElementId(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Something the user types into.
    Input,
    /// Read-only text.
    Display,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub content: String,
}

impl Element {
    pub fn input<T: Into<String>>(value: T) -> Self {
        Self { kind: ElementKind::Input, content: value.into() }
    }

    pub fn display<T: Into<String>>(text: T) -> Self {
        Self { kind: ElementKind::Display, content: text.into() }
    }
}

/// A flat id → element map. Looking up an id that isn't there is not an error,
/// it just comes back empty.
#[derive(Debug, Default, Clone)]
pub struct Document {
    elements: HashMap<ElementId, Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// The three-element share ticket: an empty shares input, the current price, and
    /// an empty total.
    pub fn trading_ticket(bindings: &TicketBindings, price_text: &str) -> Self {
        let mut doc = Self::new();
        doc.insert(bindings.shares.clone(), Element::input(""));
        doc.insert(bindings.current.clone(), Element::display(price_text));
        doc.insert(bindings.total.clone(), Element::display(""));
        doc
    }

    pub fn insert<I: Into<ElementId>>(&mut self, id: I, element: Element) -> Option<Element> {
        self.elements.insert(id.into(), element)
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    /// The current value of an input element.
    pub fn value(&self, id: &ElementId) -> Option<&str> {
        self.elements
            .get(id)
            .filter(|e| e.kind == ElementKind::Input)
            .map(|e| e.content.as_str())
    }

    /// The text content of any element.
    pub fn text(&self, id: &ElementId) -> Option<&str> {
        self.elements.get(id).map(|e| e.content.as_str())
    }

    /// Returns `false` when there is no such input.
    pub fn set_value<T: Into<String>>(&mut self, id: &ElementId, value: T) -> bool {
        match self.elements.get_mut(id) {
            Some(e) if e.kind == ElementKind::Input => {
                e.content = value.into();
                true
            }
            _ => false,
        }
    }

    /// Returns `false` when there is no such element.
    pub fn set_text<T: Into<String>>(&mut self, id: &ElementId, text: T) -> bool {
        match self.elements.get_mut(id) {
            Some(e) => {
                e.content = text.into();
                true
            }
            None => false,
        }
    }
}

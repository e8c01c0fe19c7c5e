// src/ticket/mod.rs

pub mod calculator;
pub mod document;
pub mod events;
pub mod number;
pub mod page;

pub use calculator::{LiveTotalCalculator, TicketBindings, live_total};
pub use document::{Document, Element, ElementId, ElementKind};
pub use events::{EventDispatcher, EventKind, EventListener, UiEvent};
pub use number::{Numeric, format_number, parse_number};
pub use page::{Page, ReadyState};

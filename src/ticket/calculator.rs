// src/ticket/calculator.rs

//! The live total on the share ticket.
//!
//! Every key release in the shares input recomputes `shares * current price` and writes
//! it into the total display. Both numbers are read fresh from the document each time,
//! so the handler carries no state between events. Text that doesn't parse is not
//! rejected; the total simply reads `NaN`.

use log::trace;
use serde::{Deserialize, Serialize};

use super::document::{Document, ElementId};
use super::events::{EventKind, EventListener, UiEvent};
use super::number::{Numeric, parse_number};
use super::page::Page;

/// Which elements the calculator reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketBindings {
    pub shares: ElementId,
    pub current: ElementId,
    pub total: ElementId,
}

impl Default for TicketBindings {
    fn default() -> Self {
        Self {
            shares: ElementId::from("shares"),
            current: ElementId::from("current"),
            total: ElementId::from("total"),
        }
    }
}

/// `shares * price`, both parsed from raw element text.
pub fn live_total(shares: &str, price: &str) -> Numeric {
    parse_number(shares) * parse_number(price)
}

#[derive(Debug, Clone, Default)]
pub struct LiveTotalCalculator {
    bindings: TicketBindings,
}

impl LiveTotalCalculator {
    pub fn new(bindings: TicketBindings) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &TicketBindings {
        &self.bindings
    }

    /// One run of the handler: read both elements, multiply, overwrite the total.
    /// A missing source element reads as not-a-number; a missing total is left alone.
    pub fn recompute(&self, document: &mut Document) {
        let shares = document.value(&self.bindings.shares).unwrap_or_default();
        let price = document.text(&self.bindings.current).unwrap_or_default();
        let total = live_total(shares, price);
        trace!("{} * {} = {}", shares, price, total);
        document.set_text(&self.bindings.total, total.to_string());
    }

    /// Binds the calculator to key releases on the shares input once the page is ready.
    pub fn attach(self, page: &mut Page) {
        page.on_ready(move |dispatcher| {
            let target = self.bindings.shares.clone();
            dispatcher.on(EventKind::KeyUp, target, self);
        });
    }
}

impl EventListener for LiveTotalCalculator {
    fn handle(&self, event: &UiEvent, document: &mut Document) {
        if let UiEvent::KeyUp { target, .. } = event {
            if *target == self.bindings.shares {
                self.recompute(document);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::document::Element;

    fn ticket(price: &str) -> Page {
        let mut page = Page::new(Document::trading_ticket(&TicketBindings::default(), price));
        LiveTotalCalculator::default().attach(&mut page);
        page.finish_loading();
        page
    }

    fn total(page: &Page) -> &str {
        page.document().text(&"total".into()).unwrap_or_default()
    }

    #[test]
    fn live_total_of_plain_numbers() {
        assert_eq!(live_total("10", "2.5").to_string(), "25");
        assert_eq!(live_total("0", "100").to_string(), "0");
        assert_eq!(live_total("abc", "5").to_string(), "NaN");
        assert_eq!(live_total("3", "").to_string(), "NaN");
        assert_eq!(live_total("5", "abc").to_string(), "NaN");
    }

    #[test]
    fn key_release_rewrites_the_total() {
        // Arrange
        let mut page = ticket("2.5");

        // Act
        page.type_into("shares", "10");

        // Assert
        assert_eq!(total(&page), "25");
    }

    #[test]
    fn price_is_read_fresh_each_event() {
        let mut page = ticket("2.5");
        page.type_into("shares", "4");
        assert_eq!(total(&page), "10");

        page.document_mut().set_text(&"current".into(), "3");
        // Changing the price alone does nothing until the next key release.
        assert_eq!(total(&page), "10");

        page.fire(UiEvent::key_up("shares", "Shift"));
        assert_eq!(total(&page), "12");
    }

    #[test]
    fn refiring_is_idempotent() {
        let mut page = ticket("7");
        page.type_into("shares", "3");
        let first = total(&page).to_string();

        page.fire(UiEvent::key_up("shares", "ArrowLeft"));
        page.fire(UiEvent::key_up("shares", "ArrowLeft"));

        assert_eq!(total(&page), first);
    }

    #[test]
    fn other_events_leave_total_alone() {
        let mut page = ticket("2");
        page.document_mut().set_value(&"shares".into(), "5");

        page.fire(UiEvent::key_down("shares", "5"));
        page.fire(UiEvent::click("shares"));
        page.fire(UiEvent::key_up("current", "5"));

        assert_eq!(total(&page), "", "Only key-up on the shares input recomputes.");
    }

    #[test]
    fn missing_price_element_gives_nan() {
        let mut doc = Document::new();
        doc.insert("shares", Element::input("3"));
        doc.insert("total", Element::display(""));
        let calc = LiveTotalCalculator::default();

        calc.recompute(&mut doc);

        assert_eq!(doc.text(&"total".into()), Some("NaN"));
    }

    #[test]
    fn missing_total_element_is_a_no_op() {
        let mut doc = Document::new();
        doc.insert("shares", Element::input("3"));
        doc.insert("current", Element::display("2"));

        LiveTotalCalculator::default().recompute(&mut doc);

        assert!(!doc.contains(&"total".into()));
    }

    #[test]
    fn custom_bindings() {
        let bindings = TicketBindings {
            shares: "qty".into(),
            current: "px".into(),
            total: "notional".into(),
        };
        let mut page = Page::new(Document::trading_ticket(&bindings, "1.5"));
        LiveTotalCalculator::new(bindings).attach(&mut page);
        page.finish_loading();

        page.type_into("qty", "6");

        assert_eq!(page.document().text(&"notional".into()), Some("9"));
    }
}

// src/lib.rs

// === 1. Declare all the top-level modules ===
pub mod accounts;
pub mod config;
pub mod desk;
pub mod error;
pub mod forms;
pub mod logging;
pub mod portfolio;
pub mod quotes;
pub mod snapshot;
pub mod stocks;
pub mod ticket;
pub mod types;

// === 2. Re-export the public-facing components to create a clean API ===

// --- The live total ---
pub use ticket::{
    Document, Element, ElementId, EventDispatcher, EventKind, EventListener,
    LiveTotalCalculator, Numeric, Page, ReadyState, TicketBindings, UiEvent, live_total,
    parse_number,
};

// --- Trading ---
pub use accounts::{AccountError, Accounts, User};
pub use desk::TradingDesk;
pub use forms::{FormError, LoginForm, RegistrationForm, ShareCount, TickerSymbol};
pub use portfolio::{Portfolio, TradeError};
pub use types::order::{Fill, Side};

// --- Market data ---
pub use quotes::{GbmQuoteFeed, QuoteBoard, QuoteSource, QuoteTicker};
pub use stocks::{Stock, StockUniverse, Symbol};

// --- Ambient ---
pub use config::{AppConfig, QuoteConfig};
pub use error::{Error, Result};

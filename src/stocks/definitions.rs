// src/stocks/definitions.rs
//! The tickers the ticket can look up.
//
//! The default universe is a handful of large caps. Extend `DEFAULT_UNIVERSE`
//! whenever you add tickers.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::forms::TickerSymbol;

pub type Symbol = String;

/// Immutable facts about a listed company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    /// NASDAQ / NYSE ticker (e.g. "AAPL").
    pub ticker: Symbol,
    /// Human-readable company name.
    pub company_name: String,
    /// Shares available for trading.
    pub total_float: u64,
    /// Price the quote feed starts from.
    pub initial_price: f64,
}

impl Stock {
    #[inline]
    pub fn new<T1: Into<String>, T2: Into<String>>(
        ticker: T1,
        company_name: T2,
        total_float: u64,
        initial_price: f64,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            company_name: company_name.into(),
            total_float,
            initial_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no stock found for ticker {0}")]
    UnknownTicker(String),
}

pub static DEFAULT_UNIVERSE: Lazy<Vec<Stock>> = Lazy::new(|| {
    vec![
        Stock::new("AAPL", "Apple Inc.", 15_982_000_000, 195.37),
        Stock::new("MSFT", "Microsoft Corporation", 7_448_000_000, 422.12),
        Stock::new("GOOG", "Alphabet Inc.", 5_860_000_000, 172.50),
        Stock::new("AMZN", "Amazon.com, Inc.", 10_390_000_000, 185.07),
        Stock::new("NVDA", "NVIDIA Corporation", 24_530_000_000, 121.79),
    ]
});

/// Ordered list of stocks, looked up by ticker. Small enough that a linear scan wins
/// over keeping a map in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockUniverse {
    stocks: Vec<Stock>,
}

impl Default for StockUniverse {
    fn default() -> Self {
        Self { stocks: DEFAULT_UNIVERSE.clone() }
    }
}

impl StockUniverse {
    pub fn empty() -> Self {
        Self { stocks: Vec::new() }
    }

    /// Adds `stock`, replacing any existing entry with the same ticker.
    pub fn add(&mut self, stock: Stock) {
        match self.stocks.iter().position(|s| s.ticker == stock.ticker) {
            Some(pos) => self.stocks[pos] = stock,
            None => self.stocks.push(stock),
        }
    }

    pub fn remove(&mut self, ticker: &str) -> Option<Stock> {
        let pos = self.stocks.iter().position(|s| s.ticker == ticker)?;
        Some(self.stocks.remove(pos))
    }

    pub fn lookup(&self, ticker: &TickerSymbol) -> Result<&Stock, LookupError> {
        self.get(ticker.as_str())
            .ok_or_else(|| LookupError::UnknownTicker(ticker.to_string()))
    }

    pub fn get(&self, ticker: &str) -> Option<&Stock> {
        self.stocks.iter().find(|s| s.ticker == ticker)
    }

    pub fn tickers(&self) -> Vec<Symbol> {
        self.stocks.iter().map(|s| s.ticker.clone()).collect()
    }

    pub fn stocks(&self) -> &[Stock] {
        &self.stocks
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }
}

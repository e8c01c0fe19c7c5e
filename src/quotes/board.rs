// src/quotes/board.rs

use log::{debug, info};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use super::feed::{GbmQuoteFeed, QuoteSource};
use crate::config::QuoteConfig;
use crate::stocks::{StockUniverse, Symbol};

/// Latest price per ticker, shared between the ticker thread and the UI.
#[derive(Debug, Clone, Default)]
pub struct QuoteBoard {
    prices: Arc<RwLock<HashMap<Symbol, f64>>>,
}

impl QuoteBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A board holding every stock's starting price.
    pub fn seeded(universe: &StockUniverse) -> Self {
        let board = Self::new();
        {
            let mut map = board.prices.write();
            for s in universe.stocks() {
                map.insert(s.ticker.clone(), s.initial_price);
            }
        }
        board
    }

    pub fn price(&self, ticker: &str) -> Option<f64> {
        self.prices.read().get(ticker).copied()
    }

    pub fn set_price(&self, ticker: &str, price: f64) {
        self.prices.write().insert(ticker.to_string(), price);
    }

    pub fn snapshot(&self) -> HashMap<Symbol, f64> {
        self.prices.read().clone()
    }

    /// Starts one thread that steps a GBM feed per stock every `cfg.tick_interval()`
    /// and publishes the results here.
    pub fn spawn_ticker(&self, universe: &StockUniverse, cfg: QuoteConfig) -> QuoteTicker {
        let stop = Arc::new(AtomicBool::new(false));
        let board = self.clone();
        let thread_stop = Arc::clone(&stop);
        let stocks: Vec<(Symbol, f64)> = universe
            .stocks()
            .iter()
            .map(|s| (s.ticker.clone(), s.initial_price))
            .collect();

        info!("starting quote ticker for {} stock(s)", stocks.len());
        let handle = thread::spawn(move || {
            let mut feeds: Vec<(Symbol, GbmQuoteFeed)> = stocks
                .into_iter()
                .map(|(t, p)| (t, GbmQuoteFeed::new(p, cfg.drift, cfg.volatility)))
                .collect();
            while !thread_stop.load(Ordering::Relaxed) {
                thread::sleep(cfg.tick_interval());
                // step outside the lock, publish in one write
                let updates: Vec<(Symbol, f64)> =
                    feeds.iter_mut().map(|(t, f)| (t.clone(), f.step())).collect();
                let mut map = board.prices.write();
                for (t, p) in updates {
                    map.insert(t, p);
                }
            }
            debug!("quote ticker stopped");
        });

        QuoteTicker { stop, handle: Some(handle) }
    }
}

/// Handle to the background ticker. Dropping it stops the thread.
pub struct QuoteTicker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl QuoteTicker {
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for QuoteTicker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ──────────────────────────────────────────────────────────────────────────────
//  Unit tests for the quote board
// ──────────────────────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn seeded_board_has_initial_prices() {
        let u = StockUniverse::default();
        let board = QuoteBoard::seeded(&u);
        assert_eq!(board.price("AAPL"), Some(195.37));
        assert_eq!(board.snapshot().len(), u.len());
        assert_eq!(board.price("ZZZZ"), None);
    }

    #[test]
    fn clones_share_the_same_prices() {
        let board = QuoteBoard::new();
        let other = board.clone();
        other.set_price("AAPL", 1.0);
        assert_eq!(board.price("AAPL"), Some(1.0));
    }

    #[test]
    fn ticker_moves_prices_and_stops() {
        // Arrange
        let u = StockUniverse::default();
        let board = QuoteBoard::seeded(&u);
        let cfg = QuoteConfig { tick_interval_ms: 5, drift: 0.08, volatility: 0.5 };

        // Act
        let ticker = board.spawn_ticker(&u, cfg);
        sleep(Duration::from_millis(100));
        ticker.stop();

        // Assert
        let moved = u
            .stocks()
            .iter()
            .any(|s| board.price(&s.ticker) != Some(s.initial_price));
        assert!(moved, "At least one price should have ticked.");
        let frozen = board.snapshot();
        sleep(Duration::from_millis(30));
        assert_eq!(board.snapshot(), frozen, "No updates after stop.");
    }
}

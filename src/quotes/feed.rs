// src/quotes/feed.rs

use rand::Rng;
use rand::distributions::Distribution;
use rand::rngs::ThreadRng;
use rand_distr::StandardNormal;

use crate::config::TRADING_DAYS_PER_YEAR;

/// Anything that can produce a stream of prices for one stock.
/// This allows for a pluggable quote source.
pub trait QuoteSource {
    /// Advances the source by one tick and returns the new price.
    fn step(&mut self) -> f64;

    /// Returns the current price without advancing.
    fn current_price(&self) -> f64;

    /// Back to the starting price.
    fn reset(&mut self);
}

/// Geometric Brownian motion, one trading day per step.
pub struct GbmQuoteFeed<R: Rng = ThreadRng> {
    initial_price: f64,
    drift: f64,
    volatility: f64,
    current_price: f64,
    rng: R,
}

impl GbmQuoteFeed<ThreadRng> {
    pub fn new(initial_price: f64, drift: f64, volatility: f64) -> Self {
        Self::with_rng(initial_price, drift, volatility, rand::thread_rng())
    }
}

impl<R: Rng> GbmQuoteFeed<R> {
    pub fn with_rng(initial_price: f64, drift: f64, volatility: f64, rng: R) -> Self {
        Self {
            initial_price,
            drift,
            volatility,
            current_price: initial_price,
            rng,
        }
    }
}

impl<R: Rng> QuoteSource for GbmQuoteFeed<R> {
    fn step(&mut self) -> f64 {
        let daily_drift = self.drift / TRADING_DAYS_PER_YEAR;
        let daily_volatility = self.volatility / TRADING_DAYS_PER_YEAR.sqrt();
        let shock: f64 = StandardNormal.sample(&mut self.rng);
        // exact solution, hence the -sigma^2/2 term
        self.current_price *=
            ((daily_drift - 0.5 * daily_volatility.powi(2)) + daily_volatility * shock).exp();
        self.current_price
    }

    fn current_price(&self) -> f64 {
        self.current_price
    }

    fn reset(&mut self) {
        self.current_price = self.initial_price;
    }
}

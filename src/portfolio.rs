// src/portfolio.rs

//! Cash plus shares held, and the buy/sell bookkeeping against them.

use log::info;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

use crate::forms::ShareCount;
use crate::stocks::Symbol;
use crate::types::order::{Fill, Side};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TradeError {
    #[error("insufficient funds: need {needed} cents, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },
    #[error("cannot sell {requested} {ticker}: only {held} held")]
    InsufficientShares { ticker: Symbol, held: u64, requested: u64 },
    #[error("invalid price {0}")]
    InvalidPrice(f64),
    #[error("order amount overflows")]
    Overflow,
}

/// Dollars → whole cents, rounded to the nearest cent.
pub fn price_to_cents(price: f64) -> Result<u64, TradeError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(TradeError::InvalidPrice(price));
    }
    let cents = (price * 100.0).round();
    if cents < 1.0 || cents >= u64::MAX as f64 {
        return Err(TradeError::InvalidPrice(price));
    }
    Ok(cents as u64)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    balance: u64,
    holdings: BTreeMap<Symbol, u64>,
}

impl Portfolio {
    pub fn new(balance_cents: u64) -> Self {
        Self { balance: balance_cents, holdings: BTreeMap::new() }
    }

    pub fn balance_cents(&self) -> u64 {
        self.balance
    }

    pub fn shares_of(&self, ticker: &str) -> u64 {
        self.holdings.get(ticker).copied().unwrap_or(0)
    }

    pub fn holdings(&self) -> &BTreeMap<Symbol, u64> {
        &self.holdings
    }

    pub fn buy(&mut self, ticker: &str, shares: ShareCount, price: f64) -> Result<Fill, TradeError> {
        let unit = price_to_cents(price)?;
        let cost = unit.checked_mul(shares.get()).ok_or(TradeError::Overflow)?;
        if cost > self.balance {
            return Err(TradeError::InsufficientFunds { needed: cost, available: self.balance });
        }

        self.balance -= cost;
        *self.holdings.entry(ticker.to_string()).or_insert(0) += shares.get();
        info!("bought {} {} @ {} cents", shares, ticker, unit);

        Ok(Fill {
            side: Side::Buy,
            ticker: ticker.to_string(),
            shares,
            price: unit,
            amount: cost,
        })
    }

    pub fn sell(&mut self, ticker: &str, shares: ShareCount, price: f64) -> Result<Fill, TradeError> {
        let unit = price_to_cents(price)?;
        let held = self.shares_of(ticker);
        if held < shares.get() {
            return Err(TradeError::InsufficientShares {
                ticker: ticker.to_string(),
                held,
                requested: shares.get(),
            });
        }
        let proceeds = unit.checked_mul(shares.get()).ok_or(TradeError::Overflow)?;
        let balance = self.balance.checked_add(proceeds).ok_or(TradeError::Overflow)?;

        self.balance = balance;
        let left = held - shares.get();
        if left == 0 {
            self.holdings.remove(ticker);
        } else {
            self.holdings.insert(ticker.to_string(), left);
        }
        info!("sold {} {} @ {} cents", shares, ticker, unit);

        Ok(Fill {
            side: Side::Sell,
            ticker: ticker.to_string(),
            shares,
            price: unit,
            amount: proceeds,
        })
    }

    /// Dollar value of everything held. Tickers without a quote count as zero.
    pub fn market_value(&self, quotes: &HashMap<Symbol, f64>) -> f64 {
        self.holdings
            .iter()
            .map(|(ticker, qty)| quotes.get(ticker).copied().unwrap_or(0.0) * *qty as f64)
            .sum()
    }
}

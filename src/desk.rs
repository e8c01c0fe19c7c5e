// src/desk.rs

//! The trading desk: what the register / login / lookup / buy / sell forms act on.
//! Takes raw form text, validates it, prices it off the quote board and books it
//! against the logged-in user's portfolio.

use log::info;

use crate::accounts::{Accounts, User};
use crate::error::{Error, Result};
use crate::forms::{LoginForm, RegistrationForm, ShareCount, TickerSymbol};
use crate::portfolio::Portfolio;
use crate::quotes::QuoteBoard;
use crate::stocks::{Stock, StockUniverse};
use crate::types::order::{Fill, Side};

pub struct TradingDesk {
    universe: StockUniverse,
    board: QuoteBoard,
    accounts: Accounts,
}

impl TradingDesk {
    pub fn new(universe: StockUniverse, board: QuoteBoard, accounts: Accounts) -> Self {
        Self { universe, board, accounts }
    }

    pub fn universe(&self) -> &StockUniverse {
        &self.universe
    }

    pub fn board(&self) -> &QuoteBoard {
        &self.board
    }

    pub fn accounts(&self) -> &Accounts {
        &self.accounts
    }

    /// The registration form. The new user still has to log in.
    pub fn register(&mut self, form: &RegistrationForm) -> Result<u64> {
        let registration = form.validate()?;
        Ok(self.accounts.register(registration)?)
    }

    pub fn login(&mut self, form: &LoginForm) -> Result<&User> {
        let login = form.validate()?;
        Ok(self.accounts.login(&login)?)
    }

    pub fn logout(&mut self) -> Option<u64> {
        self.accounts.logout()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.accounts.current_user()
    }

    /// The logged-in user's portfolio, if anyone is logged in.
    pub fn portfolio(&self) -> Option<&Portfolio> {
        self.current_user().map(|u| &u.portfolio)
    }

    /// The lookup form.
    pub fn lookup(&self, ticker_input: &str) -> Result<&Stock> {
        let ticker = TickerSymbol::parse(ticker_input)?;
        Ok(self.universe.lookup(&ticker)?)
    }

    pub fn quote(&self, stock: &Stock) -> Result<f64> {
        self.board
            .price(&stock.ticker)
            .ok_or_else(|| Error::NoQuote(stock.ticker.clone()))
    }

    /// The buy and sell forms. Fills at the board's price at the moment of the call.
    pub fn place(&mut self, side: Side, ticker_input: &str, shares_input: &str) -> Result<Fill> {
        let ticker = TickerSymbol::parse(ticker_input)?;
        let shares = ShareCount::parse(shares_input)?;
        let stock = self.universe.lookup(&ticker)?;
        let price = self
            .board
            .price(&stock.ticker)
            .ok_or_else(|| Error::NoQuote(stock.ticker.clone()))?;
        let symbol = stock.ticker.clone();
        let portfolio = self.accounts.current_portfolio_mut()?;

        let fill = match side {
            Side::Buy => portfolio.buy(&symbol, shares, price)?,
            Side::Sell => portfolio.sell(&symbol, shares, price)?,
        };
        info!("{:?} {} {} filled, balance now {}", side, fill.shares, symbol, portfolio.balance_cents());
        Ok(fill)
    }
}

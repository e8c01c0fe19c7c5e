// src/quotes/mod.rs

pub mod board;
pub mod feed;

pub use board::{QuoteBoard, QuoteTicker};
pub use feed::{GbmQuoteFeed, QuoteSource};

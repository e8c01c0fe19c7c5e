// src/types/order.rs

use serde::{Deserialize, Serialize};

use crate::forms::ShareCount;
use crate::stocks::Symbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

/// What came back from a buy or sell on the ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    pub side: Side,
    pub ticker: Symbol,
    pub shares: ShareCount,
    /// Unit price in cents.
    pub price: u64,
    /// `price * shares`, in cents.
    pub amount: u64,
}

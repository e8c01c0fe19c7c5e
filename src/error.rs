// src/error.rs

use thiserror::Error;

use crate::accounts::AccountError;
use crate::config::ConfigError;
use crate::forms::FormError;
use crate::portfolio::TradeError;
use crate::stocks::LookupError;

/// Everything that can go wrong outside the live total (which never fails).
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Trade(#[from] TradeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no quote available for {0}")]
    NoQuote(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// src/forms.rs

//! Field validation for the lookup / buy / sell / registration / login forms.
//!
//! This is deliberately separate from the live total, which never validates anything.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const SHARE_COUNT_MESSAGE: &str = "Enter a whole number greater than zero";
pub const MAX_TICKER_LEN: usize = 10;
pub const MAX_FIRST_NAME_LEN: usize = 50;
pub const MAX_LAST_NAME_LEN: usize = 80;
pub const MAX_EMAIL_LEN: usize = 255;
pub const MAX_PASSWORD_LEN: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("This field is required.")]
    Required,
    #[error("{}", SHARE_COUNT_MESSAGE)]
    NotWholeNumber,
    #[error("{}", SHARE_COUNT_MESSAGE)]
    BelowMinimum,
    #[error("Field must be between 1 and {max} characters long.")]
    Length { max: usize },
    #[error("Ticker symbols may only contain letters, digits, '.' and '-'.")]
    BadSymbol,
    #[error("Invalid email address.")]
    InvalidEmail,
    #[error("Passwords must match")]
    PasswordMismatch,
}

/// A share quantity from the buy or sell form. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShareCount(u64);

impl ShareCount {
    pub fn new(count: u64) -> Result<Self, FormError> {
        if count == 0 {
            return Err(FormError::BelowMinimum);
        }
        Ok(Self(count))
    }

    pub fn parse(input: &str) -> Result<Self, FormError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(FormError::Required);
        }
        // "-3" is a whole number, just too small.
        if let Some(rest) = s.strip_prefix('-') {
            if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
                return Err(FormError::BelowMinimum);
            }
            return Err(FormError::NotWholeNumber);
        }
        let digits = s.strip_prefix('+').unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FormError::NotWholeNumber);
        }
        let count: u64 = digits.parse().map_err(|_| FormError::NotWholeNumber)?;
        Self::new(count)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ShareCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A ticker typed into the lookup form, normalised to upper case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TickerSymbol(String);

impl TickerSymbol {
    pub fn parse(input: &str) -> Result<Self, FormError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(FormError::Required);
        }
        if s.chars().count() > MAX_TICKER_LEN {
            return Err(FormError::Length { max: MAX_TICKER_LEN });
        }
        if !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-') {
            return Err(FormError::BadSymbol);
        }
        Ok(Self(s.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TickerSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// 1..=max characters after trimming; returns the trimmed text.
fn required_len(input: &str, max: usize) -> Result<&str, FormError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(FormError::Required);
    }
    if s.chars().count() > max {
        return Err(FormError::Length { max });
    }
    Ok(s)
}

// Passwords are taken as typed, surrounding spaces included.
fn password_len(input: &str) -> Result<&str, FormError> {
    if input.is_empty() {
        return Err(FormError::Required);
    }
    if input.chars().count() > MAX_PASSWORD_LEN {
        return Err(FormError::Length { max: MAX_PASSWORD_LEN });
    }
    Ok(input)
}

/// `local@domain.tld`, no white space, one `@`, a dot inside the domain.
pub fn validate_email(input: &str) -> Result<String, FormError> {
    let s = required_len(input, MAX_EMAIL_LEN)?;
    let (local, domain) = s.split_once('@').ok_or(FormError::InvalidEmail)?;
    let well_formed = !local.is_empty()
        && !domain.contains('@')
        && !s.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_alphanumeric() || c == '-')
        });
    if !well_formed {
        return Err(FormError::InvalidEmail);
    }
    Ok(s.to_string())
}

/// Raw text of the registration form.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

/// A registration that passed every field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl RegistrationForm {
    /// Checks fields top to bottom and stops at the first failure.
    pub fn validate(&self) -> Result<Registration, FormError> {
        let first_name = required_len(&self.first_name, MAX_FIRST_NAME_LEN)?.to_string();
        let last_name = required_len(&self.last_name, MAX_LAST_NAME_LEN)?.to_string();
        let email = validate_email(&self.email)?;
        let password = password_len(&self.password)?.to_string();
        password_len(&self.confirm)?;
        if self.confirm != self.password {
            return Err(FormError::PasswordMismatch);
        }
        Ok(Registration { first_name, last_name, email, password })
    }
}

/// Raw text of the login form.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Login {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Login, FormError> {
        let email = validate_email(&self.email)?;
        let password = password_len(&self.password)?.to_string();
        Ok(Login { email, password })
    }
}

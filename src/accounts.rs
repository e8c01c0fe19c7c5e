// src/accounts.rs

//! Registered users and the login session.
//!
//! Every user owns a portfolio. Passwords are kept as a salted SHA-256 digest, never as
//! typed. Only one user is logged in at a time and the session is not persisted.

use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::forms::{Login, Registration};
use crate::portfolio::Portfolio;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("Email not found.  Please create an account")]
    EmailNotFound,
    #[error("Invalid password")]
    InvalidPassword,
    #[error("An account with that email already exists")]
    EmailTaken,
    #[error("Please log in first")]
    NotLoggedIn,
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn digest_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    to_hex(&hasher.finalize())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    password_salt: String,
    password_hash: String,
    pub portfolio: Portfolio,
}

impl User {
    fn new(user_id: u64, reg: Registration, opening_balance_cents: u64) -> Self {
        let mut salt = [0u8; 16];
        rand::thread_rng().fill(&mut salt);
        let password_salt = to_hex(&salt);
        let password_hash = digest_password(&password_salt, &reg.password);
        Self {
            user_id,
            email: reg.email,
            first_name: reg.first_name,
            last_name: reg.last_name,
            password_salt,
            password_hash,
            portfolio: Portfolio::new(opening_balance_cents),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn check_password(&self, password: &str) -> bool {
        digest_password(&self.password_salt, password) == self.password_hash
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Accounts {
    users: Vec<User>,
    next_id: u64,
    opening_balance_cents: u64,
    #[serde(skip)]
    logged_in: Option<u64>,
}

impl Accounts {
    /// No users yet. Each new user starts with `opening_balance_cents` in cash.
    pub fn new(opening_balance_cents: u64) -> Self {
        Self {
            users: Vec::new(),
            next_id: 1,
            opening_balance_cents,
            logged_in: None,
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    /// Creates the user and returns its id. Does not log in.
    pub fn register(&mut self, reg: Registration) -> Result<u64, AccountError> {
        if self.find_by_email(&reg.email).is_some() {
            return Err(AccountError::EmailTaken);
        }
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        info!("registered user {} <{}>", id, reg.email);
        self.users.push(User::new(id, reg, self.opening_balance_cents));
        Ok(id)
    }

    pub fn login(&mut self, login: &Login) -> Result<&User, AccountError> {
        let pos = self
            .users
            .iter()
            .position(|u| u.email == login.email)
            .ok_or(AccountError::EmailNotFound)?;
        if !self.users[pos].check_password(&login.password) {
            return Err(AccountError::InvalidPassword);
        }
        let user = &self.users[pos];
        self.logged_in = Some(user.user_id);
        info!("user {} logged in", user.user_id);
        Ok(user)
    }

    /// Ends the session, returning who was logged in.
    pub fn logout(&mut self) -> Option<u64> {
        let was = self.logged_in.take();
        if let Some(id) = was {
            info!("user {} logged out", id);
        }
        was
    }

    pub fn current_user(&self) -> Option<&User> {
        let id = self.logged_in?;
        self.users.iter().find(|u| u.user_id == id)
    }

    pub fn current_portfolio_mut(&mut self) -> Result<&mut Portfolio, AccountError> {
        let id = self.logged_in.ok_or(AccountError::NotLoggedIn)?;
        self.users
            .iter_mut()
            .find(|u| u.user_id == id)
            .map(|u| &mut u.portfolio)
            .ok_or(AccountError::NotLoggedIn)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{LoginForm, RegistrationForm};

    fn ada() -> Registration {
        RegistrationForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password: "hunter2".into(),
            confirm: "hunter2".into(),
        }
        .validate()
        .unwrap()
    }

    fn login(email: &str, password: &str) -> Login {
        LoginForm { email: email.into(), password: password.into() }.validate().unwrap()
    }

    #[test]
    fn register_then_login() {
        // Arrange
        let mut accounts = Accounts::new(50_000);
        let id = accounts.register(ada()).unwrap();

        // Act
        let user = accounts.login(&login("ada@example.com", "hunter2")).unwrap();

        // Assert
        assert_eq!(user.user_id, id);
        assert_eq!(user.full_name(), "Ada Lovelace");
        assert_eq!(user.portfolio.balance_cents(), 50_000, "New users start with the opening balance.");
        assert_eq!(accounts.current_user().map(|u| u.user_id), Some(id));
    }

    #[test]
    fn login_errors_match_the_site() {
        let mut accounts = Accounts::new(0);
        accounts.register(ada()).unwrap();

        let unknown = accounts.login(&login("bob@example.com", "hunter2")).unwrap_err();
        assert_eq!(unknown, AccountError::EmailNotFound);
        assert_eq!(unknown.to_string(), "Email not found.  Please create an account");

        let wrong = accounts.login(&login("ada@example.com", "hunter3")).unwrap_err();
        assert_eq!(wrong, AccountError::InvalidPassword);
        assert_eq!(wrong.to_string(), "Invalid password");
        assert!(accounts.current_user().is_none(), "A failed login must not start a session.");
    }

    #[test]
    fn duplicate_email_is_refused() {
        let mut accounts = Accounts::new(0);
        accounts.register(ada()).unwrap();
        assert_eq!(accounts.register(ada()), Err(AccountError::EmailTaken));
        assert_eq!(accounts.len(), 1);
    }

    #[test]
    fn logout_ends_the_session() {
        let mut accounts = Accounts::new(0);
        let id = accounts.register(ada()).unwrap();
        accounts.login(&login("ada@example.com", "hunter2")).unwrap();

        assert_eq!(accounts.logout(), Some(id));
        assert_eq!(accounts.logout(), None);
        assert!(matches!(accounts.current_portfolio_mut(), Err(AccountError::NotLoggedIn)));
    }

    #[test]
    fn password_is_not_stored_as_typed() {
        let mut accounts = Accounts::new(0);
        accounts.register(ada()).unwrap();
        let json = accounts.to_json().unwrap();
        assert!(!json.contains("hunter2"));
    }

    #[test]
    fn json_keeps_users_but_not_the_session() {
        let mut accounts = Accounts::new(0);
        accounts.register(ada()).unwrap();
        accounts.login(&login("ada@example.com", "hunter2")).unwrap();

        let mut restored = Accounts::from_json(&accounts.to_json().unwrap()).unwrap();

        assert!(restored.current_user().is_none());
        assert!(restored.login(&login("ada@example.com", "hunter2")).is_ok());
        let id = restored.register(RegistrationForm {
            first_name: "Bob".into(),
            last_name: "B".into(),
            email: "bob@example.com".into(),
            password: "pw".into(),
            confirm: "pw".into(),
        }.validate().unwrap()).unwrap();
        assert_eq!(id, 2, "Ids keep counting after a reload.");
    }
}

// src/snapshot.rs

//! Keeps registered users and their portfolios on disk as one JSON file.

use log::{debug, info};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::accounts::Accounts;
use crate::error::Result;

/// Reads the snapshot at `path`. A missing file is a first run: no users yet.
pub fn load_accounts(path: &Path, opening_balance_cents: u64) -> Result<Accounts> {
    match fs::read_to_string(path) {
        Ok(text) => {
            let accounts = Accounts::from_json(&text)?;
            info!("loaded {} account(s) from {}", accounts.len(), path.display());
            Ok(accounts)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("no snapshot at {}, starting fresh", path.display());
            Ok(Accounts::new(opening_balance_cents))
        }
        Err(e) => Err(e.into()),
    }
}

/// Writes the snapshot next to `path` first and renames it over, so a crash mid-write
/// leaves the old file intact.
pub fn save_accounts(path: &Path, accounts: &Accounts) -> Result<()> {
    let json = accounts.to_json()?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    debug!("saved {} account(s) to {}", accounts.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::forms::{LoginForm, RegistrationForm, ShareCount};

    fn registered() -> Accounts {
        let mut accounts = Accounts::new(100_000);
        let reg = RegistrationForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password: "hunter2".into(),
            confirm: "hunter2".into(),
        };
        accounts.register(reg.validate().unwrap()).unwrap();
        accounts
    }

    fn ada_login() -> crate::forms::Login {
        LoginForm { email: "ada@example.com".into(), password: "hunter2".into() }
            .validate()
            .unwrap()
    }

    #[test]
    fn saved_portfolio_survives_a_reload() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("accounts.json");
        let mut accounts = registered();
        accounts.login(&ada_login()).unwrap();
        accounts
            .current_portfolio_mut()
            .unwrap()
            .buy("AAPL", ShareCount::new(4).unwrap(), 100.0)
            .unwrap();

        // Act
        save_accounts(&path, &accounts).unwrap();
        let mut reloaded = load_accounts(&path, 0).unwrap();

        // Assert
        let user = reloaded.login(&ada_login()).unwrap();
        assert_eq!(user.portfolio.balance_cents(), 100_000 - 40_000);
        assert_eq!(user.portfolio.shares_of("AAPL"), 4);
    }

    #[test]
    fn missing_file_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let accounts = load_accounts(&dir.path().join("absent.json"), 123).unwrap();
        assert!(accounts.is_empty());
        assert_eq!(accounts, Accounts::new(123));
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.json");
        fs::write(&path, "{ this is not json").unwrap();

        let err = load_accounts(&path, 0).unwrap_err();

        assert!(matches!(err, Error::Serialization(_)), "got {err:?}");
    }

    #[test]
    fn unreadable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // a directory can't be read as a file
        let err = load_accounts(dir.path(), 0).unwrap_err();
        assert!(matches!(err, Error::Io(_)), "got {err:?}");
    }
}

//! Store and bootstrap errors shared by the MoneyMate crates
//!
//! Lookup failures against the Place Lookup Service live in
//! `moneymate_payees::PlaceError`; this type covers everything that touches
//! the database, the filesystem or configuration.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Creating the database directory or reading the TOML file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unreadable or invalid TOML, missing API key
    #[error("Configuration error: {0}")]
    Config(String),

    /// No payer/payee with that id and type
    #[error("Payer/payee not found: {0}")]
    NotFound(String),

    /// Rejected payer/payee input: blank name, duplicate id, unknown type
    #[error("Invalid payer/payee: {0}")]
    InvalidInput(String),

    /// Stored row that cannot be mapped back (e.g. a malformed UUID)
    #[error("Corrupt payer/payee row: {0}")]
    Internal(String),
}

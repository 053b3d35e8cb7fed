//! # MoneyMate Common Library
//!
//! Shared code for the MoneyMate backend services including:
//! - Error type used across crates
//! - Bootstrap configuration loading (TOML + environment)
//! - SQLite pool initialization and schema
//! - Payer/payee domain models

pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use error::{Error, Result};

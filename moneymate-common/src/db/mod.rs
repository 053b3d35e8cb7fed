//! Database initialization and schema

pub mod init;

pub use init::{create_payer_payees_table, init_database};

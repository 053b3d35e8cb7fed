//! moneymate-payees library
//!
//! Payer/payee enrichment with self-healing place identifiers:
//! - [`places`]: Place Lookup Service client and the refresh negotiation
//! - [`enricher`]: turns resolutions into views plus at most one write-back
//! - [`db`]: payer/payee store boundary and its SQLite implementation
//! - [`service`]: list/get/autocomplete/create operations over enriched views

pub mod db;
pub mod enricher;
pub mod error;
pub mod places;
pub mod service;

pub use crate::enricher::PayerPayeeEnricher;
pub use crate::error::{EnrichError, EnrichResult, PlaceError};
pub use crate::service::{NewPayerPayee, PayerPayeeService};

use crate::db::SqlitePayerPayeeStore;
use crate::places::{PlaceLookup, PlaceResolver};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Wire the service over a SQLite pool and a place lookup implementation
pub fn build_service(pool: SqlitePool, lookup: Arc<dyn PlaceLookup>) -> PayerPayeeService {
    let store = Arc::new(SqlitePayerPayeeStore::new(pool));
    let enricher = PayerPayeeEnricher::new(PlaceResolver::new(lookup), store.clone());
    PayerPayeeService::new(store, enricher)
}

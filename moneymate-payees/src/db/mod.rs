//! Payer/payee persistence
//!
//! [`PayerPayeeStore`] is the boundary the enrichment orchestrator writes back
//! through; [`SqlitePayerPayeeStore`] is the SQLite implementation.

pub mod payer_payees;

pub use payer_payees::SqlitePayerPayeeStore;

use async_trait::async_trait;
use moneymate_common::models::{Pagination, PayerPayee, PayerPayeeType};
use moneymate_common::Result;
use uuid::Uuid;

/// Maximum number of autocomplete matches returned
pub const AUTOCOMPLETE_LIMIT: u32 = 20;

#[async_trait]
pub trait PayerPayeeStore: Send + Sync {
    /// Upsert by `record.id`, replacing every stored field with the record's
    async fn put_payer_or_payee(&self, ty: PayerPayeeType, record: &PayerPayee) -> Result<()>;

    /// Insert a new record; an existing id is rejected
    async fn create_payer_or_payee(&self, ty: PayerPayeeType, record: &PayerPayee) -> Result<()>;

    /// Fetch one record; `Error::NotFound` if absent
    async fn get_payer_or_payee(&self, ty: PayerPayeeType, id: Uuid) -> Result<PayerPayee>;

    /// Records of one type ordered by name
    async fn list_payers_or_payees(
        &self,
        ty: PayerPayeeType,
        pagination: Pagination,
    ) -> Result<Vec<PayerPayee>>;

    /// Case-insensitive name prefix search
    async fn autocomplete_payer_or_payee(
        &self,
        ty: PayerPayeeType,
        prefix: &str,
    ) -> Result<Vec<PayerPayee>>;
}

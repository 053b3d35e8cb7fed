//! Payer/payee service
//!
//! Read and create operations over the store, returning views. Enriched reads
//! run one enrichment per record concurrently; the first hard error fails the
//! whole call.

use crate::db::PayerPayeeStore;
use crate::enricher::PayerPayeeEnricher;
use crate::error::EnrichResult;
use futures::future::try_join_all;
use moneymate_common::models::{Pagination, PayerPayee, PayerPayeeType, PayerPayeeView};
use moneymate_common::Error;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Input for creating a payer or payee
#[derive(Debug, Clone)]
pub struct NewPayerPayee {
    pub name: String,
    pub external_id: Option<String>,
}

#[derive(Clone)]
pub struct PayerPayeeService {
    store: Arc<dyn PayerPayeeStore>,
    enricher: PayerPayeeEnricher,
}

impl PayerPayeeService {
    pub fn new(store: Arc<dyn PayerPayeeStore>, enricher: PayerPayeeEnricher) -> Self {
        Self { store, enricher }
    }

    pub async fn get_payers(
        &self,
        pagination: Pagination,
        include_enriched_data: bool,
    ) -> EnrichResult<Vec<PayerPayeeView>> {
        self.list(PayerPayeeType::Payer, pagination, include_enriched_data)
            .await
    }

    pub async fn get_payees(
        &self,
        pagination: Pagination,
        include_enriched_data: bool,
    ) -> EnrichResult<Vec<PayerPayeeView>> {
        self.list(PayerPayeeType::Payee, pagination, include_enriched_data)
            .await
    }

    pub async fn get_payer(&self, id: Uuid) -> EnrichResult<PayerPayeeView> {
        self.get(PayerPayeeType::Payer, id).await
    }

    pub async fn get_payee(&self, id: Uuid) -> EnrichResult<PayerPayeeView> {
        self.get(PayerPayeeType::Payee, id).await
    }

    pub async fn autocomplete_payer(&self, query: &str) -> EnrichResult<Vec<PayerPayeeView>> {
        self.autocomplete(PayerPayeeType::Payer, query).await
    }

    pub async fn autocomplete_payee(&self, query: &str) -> EnrichResult<Vec<PayerPayeeView>> {
        self.autocomplete(PayerPayeeType::Payee, query).await
    }

    pub async fn create_payer(&self, new: NewPayerPayee) -> EnrichResult<PayerPayeeView> {
        self.create(PayerPayeeType::Payer, new).await
    }

    pub async fn create_payee(&self, new: NewPayerPayee) -> EnrichResult<PayerPayeeView> {
        self.create(PayerPayeeType::Payee, new).await
    }

    pub async fn list(
        &self,
        ty: PayerPayeeType,
        pagination: Pagination,
        include_enriched_data: bool,
    ) -> EnrichResult<Vec<PayerPayeeView>> {
        let records = self.store.list_payers_or_payees(ty, pagination).await?;

        if include_enriched_data {
            self.enrich_all(ty, &records).await
        } else {
            Ok(records.iter().map(PayerPayeeView::plain).collect())
        }
    }

    pub async fn get(&self, ty: PayerPayeeType, id: Uuid) -> EnrichResult<PayerPayeeView> {
        let record = self.store.get_payer_or_payee(ty, id).await?;
        self.enricher.enrich(ty, &record).await
    }

    pub async fn autocomplete(
        &self,
        ty: PayerPayeeType,
        query: &str,
    ) -> EnrichResult<Vec<PayerPayeeView>> {
        let records = self.store.autocomplete_payer_or_payee(ty, query).await?;
        self.enrich_all(ty, &records).await
    }

    pub async fn create(
        &self,
        ty: PayerPayeeType,
        new: NewPayerPayee,
    ) -> EnrichResult<PayerPayeeView> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput(format!("{} name must not be empty", ty)).into());
        }

        let record = PayerPayee::new(name, new.external_id.unwrap_or_default());
        self.store.create_payer_or_payee(ty, &record).await?;
        info!(payer_payee_id = %record.id, name = %record.name, "Created {}", ty);

        self.enricher.enrich(ty, &record).await
    }

    async fn enrich_all(
        &self,
        ty: PayerPayeeType,
        records: &[PayerPayee],
    ) -> EnrichResult<Vec<PayerPayeeView>> {
        try_join_all(records.iter().map(|record| self.enricher.enrich(ty, record))).await
    }
}

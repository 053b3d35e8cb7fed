//! Payer/payee enrichment
//!
//! Turns a stored payer/payee into a view carrying its live postal address.
//! Identifier churn is absorbed here instead of surfacing to callers:
//!
//! | Resolution | Returned view                     | Store write            |
//! |------------|-----------------------------------|------------------------|
//! | unlinked   | no address, no lookup             | none                   |
//! | Resolved   | stored id + address               | none                   |
//! | Drifted    | new id + address                  | `external_id = new_id` |
//! | Defunct    | empty id, no address              | `external_id = ""`     |
//!
//! At most one store write happens per call, and only after resolution has
//! completed. Lookup hard errors propagate without any write.

use crate::db::PayerPayeeStore;
use crate::error::{EnrichResult, PlaceError};
use crate::places::{PlaceField, PlaceResolver, Resolution};
use moneymate_common::models::{PayerPayee, PayerPayeeType, PayerPayeeView};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Fields needed to build a [`PayerPayeeView`]
const ENRICHMENT_FIELDS: &[PlaceField] = &[PlaceField::FormattedAddress];

#[derive(Clone)]
pub struct PayerPayeeEnricher {
    resolver: PlaceResolver,
    store: Arc<dyn PayerPayeeStore>,
}

impl PayerPayeeEnricher {
    pub fn new(resolver: PlaceResolver, store: Arc<dyn PayerPayeeStore>) -> Self {
        Self { resolver, store }
    }

    /// Enrich one record, repairing or clearing its place link as needed
    pub async fn enrich(
        &self,
        ty: PayerPayeeType,
        record: &PayerPayee,
    ) -> EnrichResult<PayerPayeeView> {
        if !record.is_linked() {
            return Ok(PayerPayeeView::plain(record));
        }

        let resolution = self
            .resolver
            .resolve(&record.external_id, ENRICHMENT_FIELDS)
            .await?;

        self.apply(ty, record, resolution).await
    }

    /// Like [`enrich`](Self::enrich), aborting outstanding lookups on cancellation
    ///
    /// A cancelled resolution yields `PlaceError::Cancelled` and never writes.
    pub async fn enrich_cancellable(
        &self,
        ty: PayerPayeeType,
        record: &PayerPayee,
        cancel: &CancellationToken,
    ) -> EnrichResult<PayerPayeeView> {
        if !record.is_linked() {
            return Ok(PayerPayeeView::plain(record));
        }

        let resolution = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(payer_payee_id = %record.id, "Enrichment cancelled");
                return Err(PlaceError::Cancelled.into());
            }
            resolution = self.resolver.resolve(&record.external_id, ENRICHMENT_FIELDS) => resolution?,
        };

        self.apply(ty, record, resolution).await
    }

    async fn apply(
        &self,
        ty: PayerPayeeType,
        record: &PayerPayee,
        resolution: Resolution,
    ) -> EnrichResult<PayerPayeeView> {
        match resolution {
            Resolution::Resolved(details) => Ok(PayerPayeeView::with_address(
                record,
                &record.external_id,
                details.formatted_address,
            )),
            Resolution::Drifted { new_id, details } => {
                if new_id != record.external_id {
                    info!(
                        payer_payee_id = %record.id,
                        old_id = %record.external_id,
                        new_id = %new_id,
                        "Updating drifted place id"
                    );
                    self.store
                        .put_payer_or_payee(ty, &record.with_external_id(new_id.as_str()))
                        .await?;
                }
                Ok(PayerPayeeView::with_address(
                    record,
                    &new_id,
                    details.formatted_address,
                ))
            }
            Resolution::Defunct => {
                info!(
                    payer_payee_id = %record.id,
                    place_id = %record.external_id,
                    "Place id is defunct, removing it from the store"
                );
                let cleared = record.with_external_id("");
                self.store.put_payer_or_payee(ty, &cleared).await?;
                Ok(PayerPayeeView::plain(&cleared))
            }
        }
    }
}

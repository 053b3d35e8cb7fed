//! Test Helper Utilities
//!
//! Shared fakes for moneymate-payees integration tests:
//! - [`FakePlaces`]: keyed Place Lookup Service answers with call recording
//! - [`RecordingStore`]: in-memory payer/payee store counting writes
//! - [`memory_pool`]: single-connection in-memory SQLite with schema

#![allow(dead_code)]

use async_trait::async_trait;
use moneymate_common::models::{Pagination, PayerPayee, PayerPayeeType};
use moneymate_common::{Error, Result};
use moneymate_payees::db::PayerPayeeStore;
use moneymate_payees::places::{LookupOutcome, LookupStatus, PlaceDetails, PlaceField, PlaceLookup};
use moneymate_payees::PlaceError;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;

/// Which kind of request a lookup was
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Request {
    /// Only the `id` field (refresh negotiation)
    IdOnly,
    /// Anything else
    Details,
}

impl Request {
    fn of(fields: &[PlaceField]) -> Self {
        if matches!(fields, [PlaceField::Id]) {
            Request::IdOnly
        } else {
            Request::Details
        }
    }
}

/// Place Lookup Service fake answering from a table keyed by (id, request kind)
///
/// Unscripted lookups answer `NOT_FOUND`.
#[derive(Default)]
pub struct FakePlaces {
    answers: Mutex<HashMap<(String, Request), LookupOutcome>>,
    calls: Mutex<Vec<(String, Vec<PlaceField>)>>,
    delay: Option<Duration>,
}

impl FakePlaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every lookup sleeps for `delay` first
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn answer(&self, place_id: &str, request: Request, outcome: LookupOutcome) -> &Self {
        self.answers
            .lock()
            .unwrap()
            .insert((place_id.to_string(), request), outcome);
        self
    }

    /// Details lookup of `place_id` finds the place under `canonical_id`
    pub fn found(&self, place_id: &str, canonical_id: &str, address: &str) -> &Self {
        self.answer(
            place_id,
            Request::Details,
            LookupOutcome::Found(PlaceDetails {
                id: canonical_id.to_string(),
                formatted_address: address.to_string(),
            }),
        )
    }

    /// Id-only lookup of `place_id` returns `refreshed_id`
    pub fn refreshes_to(&self, place_id: &str, refreshed_id: &str) -> &Self {
        self.answer(
            place_id,
            Request::IdOnly,
            LookupOutcome::Found(PlaceDetails {
                id: refreshed_id.to_string(),
                formatted_address: String::new(),
            }),
        )
    }

    pub fn fails_with(&self, place_id: &str, request: Request, status_code: u16, status: &str) -> &Self {
        self.answer(
            place_id,
            request,
            LookupOutcome::Error {
                status_code,
                status: LookupStatus::parse(status),
                message: format!("{} for {}", status, place_id),
            },
        )
    }

    pub fn calls(&self) -> Vec<(String, Vec<PlaceField>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PlaceLookup for FakePlaces {
    async fn lookup(
        &self,
        place_id: &str,
        fields: &[PlaceField],
    ) -> std::result::Result<LookupOutcome, PlaceError> {
        self.calls
            .lock()
            .unwrap()
            .push((place_id.to_string(), fields.to_vec()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let answer = self
            .answers
            .lock()
            .unwrap()
            .get(&(place_id.to_string(), Request::of(fields)))
            .cloned();
        Ok(answer.unwrap_or_else(|| LookupOutcome::Error {
            status_code: 404,
            status: LookupStatus::NotFound,
            message: "Place not found".to_string(),
        }))
    }
}

/// In-memory store recording every `put_payer_or_payee`
#[derive(Default)]
pub struct RecordingStore {
    records: Mutex<HashMap<Uuid, (PayerPayeeType, PayerPayee)>>,
    puts: Mutex<Vec<(PayerPayeeType, PayerPayee)>>,
    fail_puts: AtomicBool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent put fail
    pub fn fail_puts(&self) {
        self.fail_puts.store(true, Ordering::SeqCst);
    }

    pub fn puts(&self) -> Vec<(PayerPayeeType, PayerPayee)> {
        self.puts.lock().unwrap().clone()
    }

    pub fn stored(&self, id: Uuid) -> Option<PayerPayee> {
        self.records.lock().unwrap().get(&id).map(|(_, r)| r.clone())
    }
}

#[async_trait]
impl PayerPayeeStore for RecordingStore {
    async fn put_payer_or_payee(&self, ty: PayerPayeeType, record: &PayerPayee) -> Result<()> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(Error::Internal("store unavailable".to_string()));
        }
        self.puts.lock().unwrap().push((ty, record.clone()));
        self.records
            .lock()
            .unwrap()
            .insert(record.id, (ty, record.clone()));
        Ok(())
    }

    async fn create_payer_or_payee(&self, ty: PayerPayeeType, record: &PayerPayee) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        if records.contains_key(&record.id) {
            return Err(Error::InvalidInput(format!("{} exists", record.id)));
        }
        records.insert(record.id, (ty, record.clone()));
        Ok(())
    }

    async fn get_payer_or_payee(&self, ty: PayerPayeeType, id: Uuid) -> Result<PayerPayee> {
        self.records
            .lock()
            .unwrap()
            .get(&id)
            .filter(|(t, _)| *t == ty)
            .map(|(_, r)| r.clone())
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    async fn list_payers_or_payees(
        &self,
        ty: PayerPayeeType,
        pagination: Pagination,
    ) -> Result<Vec<PayerPayee>> {
        let mut records: Vec<PayerPayee> = self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|(t, _)| *t == ty)
            .map(|(_, r)| r.clone())
            .collect();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records
            .into_iter()
            .skip(pagination.offset as usize)
            .take(pagination.limit as usize)
            .collect())
    }

    async fn autocomplete_payer_or_payee(
        &self,
        ty: PayerPayeeType,
        prefix: &str,
    ) -> Result<Vec<PayerPayee>> {
        let prefix = prefix.to_lowercase();
        let all = self
            .list_payers_or_payees(ty, Pagination { offset: 0, limit: u32::MAX })
            .await?;
        Ok(all
            .into_iter()
            .filter(|r| r.name.to_lowercase().starts_with(&prefix))
            .collect())
    }
}

/// In-memory SQLite pool with the payer/payee schema
///
/// One connection only: each `:memory:` connection is a separate database.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    moneymate_common::db::create_payer_payees_table(&pool)
        .await
        .unwrap();
    pool
}

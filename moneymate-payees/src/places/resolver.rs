//! Place identifier resolution with provider-side self-healing
//!
//! Stored place identifiers go stale: the provider may rotate them or delete
//! the place outright. Resolution negotiates with the service in at most three
//! sequential lookups:
//!
//! 1. Details lookup for the stored id with the requested fields.
//! 2. On `NOT_FOUND`, a minimal lookup requesting only `id`. Providers can
//!    often map a stale id to its replacement through this cheaper request.
//! 3. If the minimal lookup names a replacement, the details lookup is redone
//!    with it.
//!
//! A second `NOT_FOUND` confirms the place is gone ([`Resolution::Defunct`]).
//! Any other failure is a hard error: the link state is unknown, so nothing
//! may be concluded from it.

use super::{LookupOutcome, LookupStatus, PlaceDetails, PlaceField, PlaceLookup};
use crate::error::PlaceError;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of resolving a stored place identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Identifier is current
    Resolved(PlaceDetails),
    /// Service now knows the place under `new_id`
    Drifted { new_id: String, details: PlaceDetails },
    /// Service no longer recognizes the identifier under any alias
    Defunct,
}

/// Runs the refresh negotiation against a [`PlaceLookup`]
///
/// Free of side effects apart from the lookups themselves.
#[derive(Clone)]
pub struct PlaceResolver {
    lookup: Arc<dyn PlaceLookup>,
}

impl PlaceResolver {
    pub fn new(lookup: Arc<dyn PlaceLookup>) -> Self {
        Self { lookup }
    }

    /// Resolve `place_id`, requesting `fields` for the final details
    ///
    /// # Errors
    /// Propagates transport/protocol failures, any error status other than
    /// `NOT_FOUND`, and a refresh answer without an identifier.
    pub async fn resolve(
        &self,
        place_id: &str,
        fields: &[PlaceField],
    ) -> Result<Resolution, PlaceError> {
        debug!(place_id = %place_id, "Resolving place id");

        match self.lookup.lookup(place_id, fields).await? {
            LookupOutcome::Found(details) => Ok(classify(place_id, details)),
            LookupOutcome::Error {
                status: LookupStatus::NotFound,
                ..
            } => {
                info!(
                    place_id = %place_id,
                    "Place details not found, trying to refresh the place id"
                );
                self.refresh(place_id, fields).await
            }
            LookupOutcome::Error {
                status_code,
                status,
                message,
            } => Err(unexpected(status_code, status, message)),
        }
    }

    async fn refresh(
        &self,
        place_id: &str,
        fields: &[PlaceField],
    ) -> Result<Resolution, PlaceError> {
        let refreshed_id = match self.lookup.lookup(place_id, &[PlaceField::Id]).await? {
            LookupOutcome::Found(details) => details.id,
            LookupOutcome::Error {
                status: LookupStatus::NotFound,
                ..
            } => {
                info!(place_id = %place_id, "Place id can no longer be refreshed");
                return Ok(Resolution::Defunct);
            }
            LookupOutcome::Error {
                status_code,
                status,
                message,
            } => return Err(unexpected(status_code, status, message)),
        };

        if refreshed_id.trim().is_empty() {
            return Err(PlaceError::EmptyRefreshedId(place_id.to_string()));
        }

        debug!(
            place_id = %place_id,
            refreshed_id = %refreshed_id,
            "Refresh returned a place id, fetching details"
        );

        match self.lookup.lookup(&refreshed_id, fields).await? {
            LookupOutcome::Found(mut details) => {
                if details.id.is_empty() {
                    details.id = refreshed_id;
                }
                info!(
                    place_id = %place_id,
                    new_id = %details.id,
                    "Place id refreshed"
                );
                Ok(Resolution::Drifted {
                    new_id: details.id.clone(),
                    details,
                })
            }
            LookupOutcome::Error {
                status_code,
                status,
                message,
            } => Err(unexpected(status_code, status, message)),
        }
    }
}

/// Compare the id the service answered with against the requested one
///
/// An absent id (the `id` field was not requested) counts as the requested id.
fn classify(place_id: &str, mut details: PlaceDetails) -> Resolution {
    if details.id.is_empty() || details.id == place_id {
        details.id = place_id.to_string();
        return Resolution::Resolved(details);
    }

    info!(
        place_id = %place_id,
        new_id = %details.id,
        "Place id silently canonicalized by the service"
    );
    Resolution::Drifted {
        new_id: details.id.clone(),
        details,
    }
}

fn unexpected(status_code: u16, status: LookupStatus, message: String) -> PlaceError {
    warn!(
        status_code = status_code,
        status = %status,
        "Unsuccessful answer from Place Lookup Service"
    );
    PlaceError::UnexpectedStatus {
        status_code,
        status: status.to_string(),
        message,
    }
}

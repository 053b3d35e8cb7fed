//! Place Lookup Service integration
//!
//! - [`PlaceLookup`]: one lookup round-trip against the service
//! - [`PlacesClient`]: the HTTP implementation
//! - [`PlaceResolver`]: the refresh negotiation built on top of a lookup

pub mod client;
pub mod resolver;

pub use client::PlacesClient;
pub use resolver::{PlaceResolver, Resolution};

use crate::error::PlaceError;
use async_trait::async_trait;
use std::fmt;

/// Fields that can be requested from the Place Lookup Service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceField {
    Id,
    FormattedAddress,
}

impl PlaceField {
    /// Name used in the `fields` query parameter
    pub fn api_name(&self) -> &'static str {
        match self {
            PlaceField::Id => "id",
            PlaceField::FormattedAddress => "formatted_address",
        }
    }
}

/// Details of a place as currently known by the service
///
/// `id` is the identifier the service considers canonical right now, which
/// may differ from the identifier that was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceDetails {
    pub id: String,
    pub formatted_address: String,
}

/// Status carried in a structured error body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupStatus {
    Ok,
    NotFound,
    Other(String),
}

impl LookupStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "OK" => LookupStatus::Ok,
            "NOT_FOUND" => LookupStatus::NotFound,
            other => LookupStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LookupStatus::Ok => "OK",
            LookupStatus::NotFound => "NOT_FOUND",
            LookupStatus::Other(s) => s,
        }
    }
}

impl fmt::Display for LookupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single lookup that reached the service and was understood
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(PlaceDetails),
    Error {
        status_code: u16,
        status: LookupStatus,
        message: String,
    },
}

/// One details request against the Place Lookup Service
///
/// Returns `Err` only for failures where no structured answer was obtained
/// (network, timeout, unparseable body).
#[async_trait]
pub trait PlaceLookup: Send + Sync {
    async fn lookup(&self, place_id: &str, fields: &[PlaceField])
        -> Result<LookupOutcome, PlaceError>;
}

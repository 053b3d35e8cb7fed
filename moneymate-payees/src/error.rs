//! Error types for moneymate-payees
//!
//! Only transport/protocol failures are errors. Drifted and defunct place links
//! are ordinary outcomes (see [`crate::places::Resolution`]) and never appear here.

use thiserror::Error;

/// Place Lookup Service transport/protocol errors
#[derive(Debug, Error)]
pub enum PlaceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Place lookup timed out: {0}")]
    Timeout(String),

    #[error("Parse error: {0}")]
    Parse(String),

    /// HTTP failure without a structured error body
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Structured error whose status is not part of the refresh negotiation
    #[error("Unexpected place lookup status {status} (code {status_code}): {message}")]
    UnexpectedStatus {
        status_code: u16,
        status: String,
        message: String,
    },

    /// Refresh lookup succeeded but carried no identifier
    #[error("Refreshed place id for {0} returned empty")]
    EmptyRefreshedId(String),

    #[error("Place lookup cancelled")]
    Cancelled,
}

/// Enrichment errors: a lookup hard error or a store failure
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("Place lookup failed: {0}")]
    Place(#[from] PlaceError),

    #[error("Payer/payee store error: {0}")]
    Store(#[from] moneymate_common::Error),
}

/// Result type for enrichment and service operations
pub type EnrichResult<T> = Result<T, EnrichError>;

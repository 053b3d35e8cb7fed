//! Payer/payee domain models

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Which side of a transaction a counterparty sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayerPayeeType {
    Payer,
    Payee,
}

impl PayerPayeeType {
    /// Value stored in the `payer_payee_type` column
    pub fn as_str(&self) -> &'static str {
        match self {
            PayerPayeeType::Payer => "payer",
            PayerPayeeType::Payee => "payee",
        }
    }
}

impl fmt::Display for PayerPayeeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayerPayeeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "payer" | "payers" => Ok(PayerPayeeType::Payer),
            "payee" | "payees" => Ok(PayerPayeeType::Payee),
            other => Err(Error::InvalidInput(format!(
                "Unknown payer/payee type: {}",
                other
            ))),
        }
    }
}

/// Stored payer/payee record
///
/// `external_id` is the Place Lookup Service identifier; an empty string means
/// the record is not linked to any place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayerPayee {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub external_id: String,
}

impl PayerPayee {
    pub fn new(name: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            external_id: external_id.into(),
        }
    }

    pub fn is_linked(&self) -> bool {
        !self.external_id.is_empty()
    }

    /// Copy of this record with only `external_id` replaced
    pub fn with_external_id(&self, external_id: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            ..self.clone()
        }
    }
}

/// Payer/payee as returned to callers, optionally enriched with an address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayerPayeeView {
    pub payer_payee_id: Uuid,
    pub payer_payee_name: String,
    pub external_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl PayerPayeeView {
    /// View without an address (unlinked or not enriched)
    pub fn plain(record: &PayerPayee) -> Self {
        Self {
            payer_payee_id: record.id,
            payer_payee_name: record.name.clone(),
            external_id: record.external_id.clone(),
            address: None,
        }
    }

    pub fn with_address(record: &PayerPayee, external_id: &str, address: String) -> Self {
        Self {
            payer_payee_id: record.id,
            payer_payee_name: record.name.clone(),
            external_id: external_id.to_string(),
            address: Some(address),
        }
    }
}

/// Offset/limit window for listing queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 20,
        }
    }
}

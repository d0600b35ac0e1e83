//! Purchase records and their fulfillment tracking.
//!
//! # Responsibility
//! - Define purchases, the books they contain (line items) and the
//!   fulfillment steps they pass through (step records).
//! - Define the closed set of fulfillment statuses.
//!
//! # Invariants
//! - A purchase holds each book at most once; quantity is always positive.
//! - A purchase passes each step at most once.

use super::catalog::BookId;
use super::customer::ClientId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type PurchaseId = i64;
pub type StepId = i64;
pub type LineItemId = i64;
pub type StepRecordId = i64;

/// Fulfillment stage of a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseStatus {
    /// Waiting for the client to pay.
    Paying,
    /// Paid, books are being packed.
    Packing,
    /// Handed over for delivery.
    Delivering,
    /// Delivered to the client.
    Finished,
}

impl PurchaseStatus {
    /// Every status in fulfillment order.
    pub const ALL: [PurchaseStatus; 4] = [
        PurchaseStatus::Paying,
        PurchaseStatus::Packing,
        PurchaseStatus::Delivering,
        PurchaseStatus::Finished,
    ];

    /// Stable code persisted in `steps.status`.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Paying => "paying",
            Self::Packing => "packing",
            Self::Delivering => "delivering",
            Self::Finished => "finished",
        }
    }

    /// Parses a persisted status code. Unknown codes yield `None`.
    pub fn parse_db(value: &str) -> Option<Self> {
        match value {
            "paying" => Some(Self::Paying),
            "packing" => Some(Self::Packing),
            "delivering" => Some(Self::Delivering),
            "finished" => Some(Self::Finished),
            _ => None,
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Paying => "Paying",
            Self::Packing => "Packing",
            Self::Delivering => "Delivering",
            Self::Finished => "Finished",
        }
    }
}

impl Display for PurchaseStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: PurchaseId,
    pub description: String,
    pub client_id: ClientId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPurchase {
    pub description: String,
    pub client_id: ClientId,
}

impl NewPurchase {
    pub fn new(description: impl Into<String>, client_id: ClientId) -> Self {
        Self {
            description: description.into(),
            client_id,
        }
    }
}

/// One fulfillment step definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: StepId,
    pub status: PurchaseStatus,
}

/// Quantity of one book within one purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseLineItem {
    pub id: LineItemId,
    pub purchase_id: PurchaseId,
    pub book_id: BookId,
    pub quantity: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLineItem {
    pub purchase_id: PurchaseId,
    pub book_id: BookId,
    pub quantity: i64,
}

/// Time span a purchase spent in one step.
///
/// Timestamps are Unix epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseStepRecord {
    pub id: StepRecordId,
    pub purchase_id: PurchaseId,
    pub step_id: StepId,
    pub start_timestamp: i64,
    pub end_timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStepRecord {
    pub purchase_id: PurchaseId,
    pub step_id: StepId,
    pub start_timestamp: i64,
    pub end_timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::PurchaseStatus;

    #[test]
    fn status_codes_parse_back() {
        for status in PurchaseStatus::ALL {
            assert_eq!(PurchaseStatus::parse_db(status.as_db_str()), Some(status));
        }
        assert_eq!(PurchaseStatus::parse_db("Shipping"), None);
        assert_eq!(PurchaseStatus::parse_db("PAYING"), None);
    }

    #[test]
    fn status_serializes_as_storage_code() {
        let json = serde_json::to_string(&PurchaseStatus::Delivering).unwrap();
        assert_eq!(json, "\"delivering\"");

        let parsed: PurchaseStatus = serde_json::from_str("\"finished\"").unwrap();
        assert_eq!(parsed, PurchaseStatus::Finished);
        assert!(serde_json::from_str::<PurchaseStatus>("\"lost\"").is_err());
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(PurchaseStatus::Paying.to_string(), "Paying");
        assert_eq!(format!("{}", PurchaseStatus::Finished), "Finished");
    }
}

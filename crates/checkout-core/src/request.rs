//! # Checkout Records
//!
//! The records assembled from form state for a single submission
//! attempt, and the normalized outcome of processing one.
//!
//! Records are constructed fresh per attempt and have no identity
//! beyond the request; nothing here is persisted client-side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Manually entered card details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardInfo {
    /// Cardholder name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_on_card: Option<String>,

    /// Card number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,

    /// Security code (CVV)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_code: Option<String>,

    /// Expiration month
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp_month: Option<String>,

    /// Expiration year
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp_year: Option<String>,

    /// Whether the user asked to save this card for later
    #[serde(default)]
    pub store_payment: bool,
}

impl CardInfo {
    /// True when every card field is present
    pub fn is_complete(&self) -> bool {
        self.name_on_card.is_some()
            && self.card_number.is_some()
            && self.card_code.is_some()
            && self.exp_month.is_some()
            && self.exp_year.is_some()
    }
}

/// Billing address fields, each optionally absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillingInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_1: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_2: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl BillingInfo {
    /// Present fields as (semantic name, value) pairs, for building
    /// the flattened address-on-file record.
    pub fn present_fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = Vec::new();
        if let Some(ref v) = self.address_1 {
            fields.push(("address_1", v.as_str()));
        }
        if let Some(ref v) = self.address_2 {
            fields.push(("address_2", v.as_str()));
        }
        if let Some(ref v) = self.city {
            fields.push(("city", v.as_str()));
        }
        if let Some(ref v) = self.state {
            fields.push(("state", v.as_str()));
        }
        if let Some(ref v) = self.postal_code {
            fields.push(("postal_code", v.as_str()));
        }
        if let Some(ref v) = self.country {
            fields.push(("country", v.as_str()));
        }
        fields
    }
}

/// Reference to a previously saved, tokenized payment method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredProfile {
    /// Token identifying the saved payment method
    pub payment_id: String,

    /// Address record associated with the saved method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_name: Option<String>,
}

/// The payment source for one submission.
///
/// Exactly one of new-card details or a stored-payment reference is
/// populated per request; the enum makes "both" and "neither"
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentSource {
    /// Manually entered card details
    Card(CardInfo),
    /// Previously saved payment method
    Stored(StoredProfile),
}

impl PaymentSource {
    /// Card details, if this is a manual-entry source
    pub fn card(&self) -> Option<&CardInfo> {
        match self {
            PaymentSource::Card(card) => Some(card),
            PaymentSource::Stored(_) => None,
        }
    }

    /// Stored-payment reference, if selected
    pub fn stored(&self) -> Option<&StoredProfile> {
        match self {
            PaymentSource::Card(_) => None,
            PaymentSource::Stored(profile) => Some(profile),
        }
    }
}

/// A single submission attempt, assembled from current form state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRequest {
    /// Card details or stored-payment reference
    pub source: PaymentSource,

    /// Billing address
    pub billing: BillingInfo,

    /// Correlation id linking this submission to a server-side pending
    /// transaction record. Issued by the server, never generated here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_name: Option<String>,

    /// Local attempt id, used only for log correlation
    pub attempt_id: Uuid,

    /// When this attempt was assembled
    pub created_at: DateTime<Utc>,
}

impl ProcessRequest {
    /// Create a new attempt with a generated attempt id
    pub fn new(source: PaymentSource, billing: BillingInfo) -> Self {
        Self {
            source,
            billing,
            request_name: None,
            attempt_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    /// Builder: set the server-issued correlation id
    pub fn with_request_name(mut self, name: impl Into<String>) -> Self {
        self.request_name = Some(name.into());
        self
    }
}

/// Normalized successful processing outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessOutcome {
    /// Status string reported by the backend (e.g. "Completed")
    pub status: String,

    /// Where to send the user next
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,

    /// Full response payload, for fields the client does not model
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub raw: serde_json::Value,
}

impl ProcessOutcome {
    /// True when the backend reported the transaction as completed
    pub fn is_completed(&self) -> bool {
        self.status == "Completed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_completeness() {
        let card = CardInfo {
            name_on_card: Some("Nuran Verkleij".into()),
            card_number: Some("4111111111111111".into()),
            card_code: Some("123".into()),
            exp_month: Some("01".into()),
            exp_year: Some("2028".into()),
            store_payment: false,
        };
        assert!(card.is_complete());

        let partial = CardInfo {
            card_number: None,
            ..card
        };
        assert!(!partial.is_complete());
    }

    #[test]
    fn test_payment_source_exclusivity() {
        let stored = PaymentSource::Stored(StoredProfile {
            payment_id: "pay_123".into(),
            address_name: Some("Home".into()),
        });

        assert!(stored.card().is_none());
        assert_eq!(stored.stored().unwrap().payment_id, "pay_123");
    }

    #[test]
    fn test_present_billing_fields() {
        let billing = BillingInfo {
            address_1: Some("5555 5th Road".into()),
            city: Some("Orlando".into()),
            country: Some("United States".into()),
            ..Default::default()
        };

        let fields = billing.present_fields();
        assert_eq!(fields.len(), 3);
        assert!(fields.contains(&("city", "Orlando")));
    }

    #[test]
    fn test_fresh_attempt_ids() {
        let billing = BillingInfo::default();
        let source = PaymentSource::Stored(StoredProfile {
            payment_id: "pay_1".into(),
            address_name: None,
        });

        let a = ProcessRequest::new(source.clone(), billing.clone());
        let b = ProcessRequest::new(source, billing);
        assert_ne!(a.attempt_id, b.attempt_id);
        assert!(a.request_name.is_none());
    }

    #[test]
    fn test_outcome_completed() {
        let outcome = ProcessOutcome {
            status: "Completed".into(),
            redirect_to: Some("/orders/123".into()),
            raw: serde_json::Value::Null,
        };
        assert!(outcome.is_completed());

        let failed = ProcessOutcome {
            status: "Failed".into(),
            redirect_to: None,
            raw: serde_json::Value::Null,
        };
        assert!(!failed.is_completed());
    }
}

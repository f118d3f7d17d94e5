//! # Pre-submission Validation
//!
//! Field-presence validation run before any remote call is attempted.
//!
//! The required-field sets are policy, not code: observed checkout
//! pages disagree on whether billing state is mandatory, so the policy
//! is configurable and loadable from the deployment's config file.

use crate::collect::{BillingFieldMap, CardFieldMap};
use crate::request::{BillingInfo, CardInfo, StoredProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Error-map key used when no payment source is present at all
pub const PAYMENT_SOURCE_KEY: &str = "payment_source";

/// Card fields that may be marked required
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardField {
    NameOnCard,
    CardNumber,
    CardCode,
    ExpMonth,
    ExpYear,
}

impl CardField {
    fn label(self) -> &'static str {
        match self {
            CardField::NameOnCard => "Name on card",
            CardField::CardNumber => "Card number",
            CardField::CardCode => "Security code",
            CardField::ExpMonth => "Expiration month",
            CardField::ExpYear => "Expiration year",
        }
    }

    fn identifier<'a>(self, map: &'a CardFieldMap) -> &'a str {
        match self {
            CardField::NameOnCard => &map.name_on_card,
            CardField::CardNumber => &map.card_number,
            CardField::CardCode => &map.card_code,
            CardField::ExpMonth => &map.exp_month,
            CardField::ExpYear => &map.exp_year,
        }
    }

    fn value(self, card: &CardInfo) -> Option<&str> {
        match self {
            CardField::NameOnCard => card.name_on_card.as_deref(),
            CardField::CardNumber => card.card_number.as_deref(),
            CardField::CardCode => card.card_code.as_deref(),
            CardField::ExpMonth => card.exp_month.as_deref(),
            CardField::ExpYear => card.exp_year.as_deref(),
        }
    }
}

/// Billing fields that may be marked required
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillingField {
    #[serde(rename = "address_1")]
    Address1,
    #[serde(rename = "address_2")]
    Address2,
    #[serde(rename = "city")]
    City,
    #[serde(rename = "state")]
    State,
    #[serde(rename = "postal_code")]
    PostalCode,
    #[serde(rename = "country")]
    Country,
}

impl BillingField {
    fn label(self) -> &'static str {
        match self {
            BillingField::Address1 => "Address line 1",
            BillingField::Address2 => "Address line 2",
            BillingField::City => "City",
            BillingField::State => "State",
            BillingField::PostalCode => "Postal code",
            BillingField::Country => "Country",
        }
    }

    fn identifier<'a>(self, map: &'a BillingFieldMap) -> &'a str {
        match self {
            BillingField::Address1 => &map.address_1,
            BillingField::Address2 => &map.address_2,
            BillingField::City => &map.city,
            BillingField::State => &map.state,
            BillingField::PostalCode => &map.postal_code,
            BillingField::Country => &map.country,
        }
    }

    fn value(self, billing: &BillingInfo) -> Option<&str> {
        match self {
            BillingField::Address1 => billing.address_1.as_deref(),
            BillingField::Address2 => billing.address_2.as_deref(),
            BillingField::City => billing.city.as_deref(),
            BillingField::State => billing.state.as_deref(),
            BillingField::PostalCode => billing.postal_code.as_deref(),
            BillingField::Country => billing.country.as_deref(),
        }
    }
}

/// Which fields the manual-entry path requires.
///
/// Defaults require every card field plus billing line 1, city, postal
/// code, and country; billing state is left optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    pub required_card: Vec<CardField>,
    pub required_billing: Vec<BillingField>,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            required_card: vec![
                CardField::NameOnCard,
                CardField::CardNumber,
                CardField::CardCode,
                CardField::ExpMonth,
                CardField::ExpYear,
            ],
            required_billing: vec![
                BillingField::Address1,
                BillingField::City,
                BillingField::PostalCode,
                BillingField::Country,
            ],
        }
    }
}

impl ValidationPolicy {
    /// Builder: also require the billing state field
    pub fn with_required_state(mut self) -> Self {
        if !self.required_billing.contains(&BillingField::State) {
            self.required_billing.push(BillingField::State);
        }
        self
    }
}

/// Outcome of a validation pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// One message per missing required field, keyed by form identifier
    pub errors: BTreeMap<String, String>,

    /// Flattened address record for downstream address-on-file reuse
    pub address: BTreeMap<String, String>,
}

impl ValidationReport {
    /// True when no required field is missing
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate collected records against the policy.
///
/// A stored payment with a non-empty payment id passes regardless of
/// card/billing state. The manual path checks every required field
/// without short-circuiting, recording one message per missing field.
pub fn validate(
    card: Option<&CardInfo>,
    billing: &BillingInfo,
    stored: Option<&StoredProfile>,
    card_map: &CardFieldMap,
    billing_map: &BillingFieldMap,
    policy: &ValidationPolicy,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    if let Some(profile) = stored {
        if !profile.payment_id.trim().is_empty() {
            if let Some(ref name) = profile.address_name {
                report
                    .address
                    .insert("address_name".to_string(), name.clone());
            }
            return report;
        }
    }

    match card {
        None => {
            report.errors.insert(
                PAYMENT_SOURCE_KEY.to_string(),
                "Select a saved payment method or enter card details".to_string(),
            );
        }
        Some(card) => {
            for field in &policy.required_card {
                if field.value(card).is_none() {
                    report.errors.insert(
                        field.identifier(card_map).to_string(),
                        format!("{} is required", field.label()),
                    );
                }
            }
        }
    }

    for field in &policy.required_billing {
        if field.value(billing).is_none() {
            report.errors.insert(
                field.identifier(billing_map).to_string(),
                format!("{} is required", field.label()),
            );
        }
    }

    for (name, value) in billing.present_fields() {
        report.address.insert(name.to_string(), value.to_string());
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_card() -> CardInfo {
        CardInfo {
            name_on_card: Some("Nuran Verkleij".into()),
            card_number: Some("4111111111111111".into()),
            card_code: Some("123".into()),
            exp_month: Some("01".into()),
            exp_year: Some("2028".into()),
            store_payment: false,
        }
    }

    fn complete_billing() -> BillingInfo {
        BillingInfo {
            address_1: Some("5555 5th Road".into()),
            city: Some("Orlando".into()),
            state: Some("FL".into()),
            postal_code: Some("32801".into()),
            country: Some("United States".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_stored_payment_bypasses_field_checks() {
        let stored = StoredProfile {
            payment_id: "pay_123".into(),
            address_name: Some("Home".into()),
        };

        // Card and billing are completely blank
        let report = validate(
            None,
            &BillingInfo::default(),
            Some(&stored),
            &CardFieldMap::default(),
            &BillingFieldMap::default(),
            &ValidationPolicy::default(),
        );

        assert!(report.is_valid());
        assert_eq!(report.address.get("address_name").map(String::as_str), Some("Home"));
    }

    #[test]
    fn test_empty_stored_payment_id_falls_through() {
        let stored = StoredProfile {
            payment_id: "  ".into(),
            address_name: None,
        };

        let report = validate(
            None,
            &BillingInfo::default(),
            Some(&stored),
            &CardFieldMap::default(),
            &BillingFieldMap::default(),
            &ValidationPolicy::default(),
        );

        assert!(!report.is_valid());
        assert!(report.errors.contains_key(PAYMENT_SOURCE_KEY));
    }

    #[test]
    fn test_one_error_per_missing_field() {
        let card = CardInfo {
            name_on_card: None,
            card_number: None,
            ..complete_card()
        };

        let report = validate(
            Some(&card),
            &complete_billing(),
            None,
            &CardFieldMap::default(),
            &BillingFieldMap::default(),
            &ValidationPolicy::default(),
        );

        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 2);
        assert_eq!(
            report.errors.get("authorizenet_name").map(String::as_str),
            Some("Name on card is required")
        );
        assert!(report.errors.contains_key("authorizenet_number"));
    }

    #[test]
    fn test_state_requirement_is_policy() {
        let mut billing = complete_billing();
        billing.state = None;

        let relaxed = validate(
            Some(&complete_card()),
            &billing,
            None,
            &CardFieldMap::default(),
            &BillingFieldMap::default(),
            &ValidationPolicy::default(),
        );
        assert!(relaxed.is_valid());

        let strict = validate(
            Some(&complete_card()),
            &billing,
            None,
            &CardFieldMap::default(),
            &BillingFieldMap::default(),
            &ValidationPolicy::default().with_required_state(),
        );
        assert!(!strict.is_valid());
        assert!(strict.errors.contains_key("authorizenet_bill_state"));
    }

    #[test]
    fn test_address_record_copies_present_fields() {
        let report = validate(
            Some(&complete_card()),
            &complete_billing(),
            None,
            &CardFieldMap::default(),
            &BillingFieldMap::default(),
            &ValidationPolicy::default(),
        );

        assert!(report.is_valid());
        assert_eq!(report.address.get("city").map(String::as_str), Some("Orlando"));
        assert_eq!(report.address.get("state").map(String::as_str), Some("FL"));
        assert!(!report.address.contains_key("address_2"));
    }

    #[test]
    fn test_policy_from_toml() {
        let policy: ValidationPolicy = serde_json::from_str(
            r#"{
                "required_card": ["card_number", "card_code"],
                "required_billing": ["postal_code", "state"]
            }"#,
        )
        .unwrap();

        assert_eq!(policy.required_card.len(), 2);
        assert!(policy.required_billing.contains(&BillingField::State));
    }
}

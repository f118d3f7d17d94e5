//! # Field Collection
//!
//! Turns named form inputs into typed checkout records, driven by
//! declarative maps from form-field identifier to semantic field.
//!
//! Collection is pure reading: text values are trimmed, all-whitespace
//! collects as "not provided", checkboxes collect as booleans, and a
//! selected stored payment suppresses card collection entirely.

use crate::form::{FieldSource, StoredSelection};
use crate::request::{BillingInfo, CardInfo, StoredProfile};
use serde::{Deserialize, Serialize};

/// Form-field identifiers for the card inputs.
///
/// `Default` carries the identifiers used by the stock checkout page;
/// embedding pages with different markup override per field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardFieldMap {
    pub name_on_card: String,
    pub card_number: String,
    pub card_code: String,
    pub exp_month: String,
    pub exp_year: String,
    pub store_payment: String,
}

impl Default for CardFieldMap {
    fn default() -> Self {
        Self {
            name_on_card: "authorizenet_name".to_string(),
            card_number: "authorizenet_number".to_string(),
            card_code: "authorizenet_code".to_string(),
            exp_month: "authorizenet_exp_month".to_string(),
            exp_year: "authorizenet_exp_year".to_string(),
            store_payment: "authorizenet_store_payment".to_string(),
        }
    }
}

/// Form-field identifiers for the billing inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingFieldMap {
    pub address_1: String,
    pub address_2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl Default for BillingFieldMap {
    fn default() -> Self {
        Self {
            address_1: "authorizenet_bill_line1".to_string(),
            address_2: "authorizenet_bill_line2".to_string(),
            city: "authorizenet_bill_city".to_string(),
            state: "authorizenet_bill_state".to_string(),
            postal_code: "authorizenet_bill_zip".to_string(),
            country: "authorizenet_bill_country".to_string(),
        }
    }
}

/// External address-validation collaborator.
///
/// When the embedding page runs its own address form, billing
/// collection delegates to it instead of reading raw inputs.
pub trait AddressSource {
    /// The validated address as billing fields
    fn validated_address(&self) -> BillingInfo;

    /// Postal code entered outside the address form, if any.
    /// Overrides the validated address's postal code when present.
    fn postal_code_override(&self) -> Option<String> {
        None
    }
}

/// Collect card fields from the form.
///
/// Returns `None` whenever a stored payment method is selected: mutual
/// exclusivity with stored payments takes precedence over whatever the
/// card inputs currently hold.
pub fn collect_card_info(
    form: &dyn FieldSource,
    map: &CardFieldMap,
    selection: &StoredSelection,
) -> Option<CardInfo> {
    if selection.is_stored() {
        return None;
    }

    Some(CardInfo {
        name_on_card: form.text(&map.name_on_card),
        card_number: form.text(&map.card_number),
        card_code: form.text(&map.card_code),
        exp_month: form.text(&map.exp_month),
        exp_year: form.text(&map.exp_year),
        store_payment: form.is_checked(&map.store_payment),
    })
}

/// Collect billing fields from the form
pub fn collect_billing_info(form: &dyn FieldSource, map: &BillingFieldMap) -> BillingInfo {
    BillingInfo {
        address_1: form.text(&map.address_1),
        address_2: form.text(&map.address_2),
        city: form.text(&map.city),
        state: form.text(&map.state),
        postal_code: form.text(&map.postal_code),
        country: form.text(&map.country),
    }
}

/// Collect billing fields from an address-validation collaborator,
/// merging its validated address with the postal-code override.
pub fn collect_billing_from(source: &dyn AddressSource) -> BillingInfo {
    let mut billing = source.validated_address();
    if let Some(postal) = source.postal_code_override() {
        let trimmed = postal.trim();
        if !trimmed.is_empty() {
            billing.postal_code = Some(trimmed.to_string());
        }
    }
    billing
}

/// Collect the stored-payment reference from the selection state.
/// `None` when the user is entering a new card.
pub fn collect_stored_profile(selection: &StoredSelection) -> Option<StoredProfile> {
    match selection {
        StoredSelection::ManualEntry => None,
        StoredSelection::Stored {
            payment_id,
            address_name,
        } => Some(StoredProfile {
            payment_id: payment_id.clone(),
            address_name: address_name.clone(),
        }),
    }
}

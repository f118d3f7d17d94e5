//! # Form Abstraction
//!
//! Read-only view over named form inputs, plus the explicit
//! stored-payment selection state.
//!
//! The embedding page hands the checkout client a snapshot of its form
//! values; nothing here touches live UI state. Selection of a stored
//! payment method is an explicit value passed into collection and
//! validation calls rather than ambient state queried ad hoc.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single form input value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Checkbox-style input: the checked state
    Flag(bool),
    /// Any other input: the raw string value
    Text(String),
}

/// Read-only source of form-field values, keyed by field identifier.
pub trait FieldSource {
    /// Raw string value of a field, untrimmed. `None` if the field is
    /// absent or is a checkbox.
    fn raw_value(&self, id: &str) -> Option<String>;

    /// Checked state of a checkbox field. Absent or non-checkbox
    /// fields read as unchecked.
    fn is_checked(&self, id: &str) -> bool;

    /// Trimmed text value of a field. All-whitespace and empty values
    /// collect as `None` ("not provided").
    fn text(&self, id: &str) -> Option<String> {
        self.raw_value(id).and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }
}

/// Owned snapshot of a form's current values.
///
/// Deserializes from a flat JSON object, e.g.
/// `{"authorizenet_name": "Nuran Verkleij", "authorizenet_store_payment": true}`.
/// Reads are non-destructive: collecting twice from the same snapshot
/// yields structurally equal records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSnapshot {
    fields: BTreeMap<String, FieldValue>,
}

impl FormSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a text field
    pub fn with_text(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(id.into(), FieldValue::Text(value.into()));
        self
    }

    /// Builder: set a checkbox field
    pub fn with_flag(mut self, id: impl Into<String>, checked: bool) -> Self {
        self.fields.insert(id.into(), FieldValue::Flag(checked));
        self
    }

    /// Set a field value
    pub fn set(&mut self, id: impl Into<String>, value: FieldValue) {
        self.fields.insert(id.into(), value);
    }

    /// Check if the snapshot has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FieldSource for FormSnapshot {
    fn raw_value(&self, id: &str) -> Option<String> {
        match self.fields.get(id) {
            Some(FieldValue::Text(v)) => Some(v.clone()),
            _ => None,
        }
    }

    fn is_checked(&self, id: &str) -> bool {
        matches!(self.fields.get(id), Some(FieldValue::Flag(true)))
    }
}

/// Which payment source the user has selected.
///
/// Replaces the live radio-group query: the embedding page resolves its
/// `stored-payment` control once and passes the result into every
/// collection and validation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum StoredSelection {
    /// The "none" option: user is entering new card details
    ManualEntry,
    /// A previously saved payment method was selected
    Stored {
        /// Token identifying the saved payment method
        payment_id: String,
        /// Address record associated with the saved method
        #[serde(default, skip_serializing_if = "Option::is_none")]
        address_name: Option<String>,
    },
}

impl StoredSelection {
    /// Build from a raw radio-group value, where `"none"` (or empty)
    /// means manual entry and anything else is a payment id.
    pub fn from_radio_value(value: &str, address_name: Option<String>) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == "none" {
            StoredSelection::ManualEntry
        } else {
            StoredSelection::Stored {
                payment_id: trimmed.to_string(),
                address_name,
            }
        }
    }

    /// True when a stored payment method is selected
    pub fn is_stored(&self) -> bool {
        matches!(self, StoredSelection::Stored { .. })
    }
}

impl Default for StoredSelection {
    fn default() -> Self {
        StoredSelection::ManualEntry
    }
}

//! # checkout-core
//!
//! Core types and traits for the authorizenet-checkout client.
//!
//! This crate provides:
//! - `FieldSource` / `FormSnapshot` for reading named form inputs
//! - `StoredSelection` for explicit stored-payment selection state
//! - Collection of card, billing, and stored-payment records
//! - `ValidationPolicy` and the pre-submission validator
//! - The `Gateway` trait and `GatewayRegistry` for payment-method variants
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{FormSnapshot, StoredSelection, GatewayRegistry};
//!
//! // Snapshot the form the user filled in
//! let form: FormSnapshot = serde_json::from_value(fields)?;
//! let selection = StoredSelection::ManualEntry;
//!
//! // Pick the gateway and run the flow
//! let gateway = registry.get_or_default(Some("authorizenet")).unwrap();
//! let request = gateway.collect(&form, &selection)?;
//! let outcome = gateway.process(request).await?;
//!
//! // Redirect user to outcome.redirect_to
//! ```

pub mod collect;
pub mod error;
pub mod form;
pub mod gateway;
pub mod request;
pub mod validate;

// Re-exports for convenience
pub use collect::{
    collect_billing_from, collect_billing_info, collect_card_info, collect_stored_profile,
    AddressSource, BillingFieldMap, CardFieldMap,
};
pub use error::{CheckoutError, CheckoutResult};
pub use form::{FieldSource, FieldValue, FormSnapshot, StoredSelection};
pub use gateway::{BoxedGateway, Gateway, GatewayRegistry};
pub use request::{
    BillingInfo, CardInfo, PaymentSource, ProcessOutcome, ProcessRequest, StoredProfile,
};
pub use validate::{
    validate, BillingField, CardField, ValidationPolicy, ValidationReport, PAYMENT_SOURCE_KEY,
};

//! # checkout-authorizenet
//!
//! Authorize.Net gateway variant for the authorizenet-checkout client.
//!
//! The gateway assembles card/billing/stored-payment records from form
//! state, submits them to the payment backend's processing endpoint,
//! and normalizes the reply into one of three outcomes:
//!
//! - **Completed** — the transaction went through; redirect the user.
//! - **Declined** — the backend reported a structured failure with one
//!   or more error strings and a recoverability flag.
//! - **Server error** — transport or unhandled failure; diagnostics
//!   are best-effort extracted, never recoverable.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_authorizenet::AuthorizeNetGateway;
//! use checkout_core::{Gateway, StoredSelection};
//!
//! // Create gateway from environment
//! let gateway = AuthorizeNetGateway::from_env()?;
//!
//! // Collect and submit
//! let request = gateway.collect(&form, &StoredSelection::ManualEntry)?;
//! let outcome = gateway.process(request).await?;
//!
//! // Redirect user to outcome.redirect_to
//! ```

pub mod config;
pub mod diagnostics;
pub mod gateway;

// Re-exports
pub use config::AuthorizeNetConfig;
pub use diagnostics::extract_server_messages;
pub use gateway::AuthorizeNetGateway;

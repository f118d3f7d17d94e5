//! # checkout-api
//!
//! HTTP API layer for the authorizenet-checkout client.
//!
//! Exposes the checkout flow as a small service: the storefront posts
//! a form snapshot plus the stored-payment selection, and gets back
//! either a redirect target or a structured error envelope.

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};

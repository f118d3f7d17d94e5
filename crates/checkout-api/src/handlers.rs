//! # Request Handlers
//!
//! Axum request handlers for the checkout API.
//!
//! The processing handler runs the whole client-side flow: collect
//! records from the submitted form snapshot, validate them, and hand
//! the attempt to the selected gateway. All gateway failures share one
//! error envelope so the page has a single branch to render.

use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use checkout_core::{validate, CheckoutError, FormSnapshot, StoredSelection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Process-checkout request
#[derive(Debug, Deserialize)]
pub struct ProcessCheckoutRequest {
    /// Snapshot of the checkout form's current values
    pub fields: FormSnapshot,

    /// Stored-payment selection; defaults to manual entry
    #[serde(default)]
    pub selection: StoredSelection,

    /// Server-issued correlation id for the pending transaction record
    #[serde(default)]
    pub request_name: Option<String>,
}

/// Process-checkout success response
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessCheckoutResponse {
    /// Backend status string (e.g. "Completed")
    pub status: String,

    /// Where to send the user next
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

/// Error response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// One or more user-facing error messages
    pub errors: Vec<String>,

    /// HTTP-like status code
    pub code: u16,

    /// Whether the user may edit their input and resubmit
    pub recoverable: bool,

    /// Per-field messages for validation failures, keyed by the form
    /// identifier of the offending input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

impl ErrorResponse {
    pub fn new(errors: Vec<String>, code: u16) -> Self {
        Self {
            errors,
            code,
            recoverable: false,
            fields: None,
        }
    }
}

fn checkout_error_to_response(err: CheckoutError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse {
        errors: err.messages(),
        code,
        recoverable: err.is_recoverable(),
        fields: match err {
            CheckoutError::Validation { errors } => Some(errors),
            _ => None,
        },
    };
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "authorizenet-checkout",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// List registered gateways
pub async fn list_gateways(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "gateways": state.gateways.names(),
    }))
}

/// Run one checkout submission through the named gateway
#[instrument(skip(state, request), fields(gateway = %gateway_name))]
pub async fn process_checkout(
    State(state): State<AppState>,
    Path(gateway_name): Path<String>,
    Json(request): Json<ProcessCheckoutRequest>,
) -> Result<Json<ProcessCheckoutResponse>, (StatusCode, Json<ErrorResponse>)> {
    let gateway = state.gateways.get(&gateway_name).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                vec![format!("Unknown gateway: {}", gateway_name)],
                404,
            )),
        )
    })?;

    let mut attempt = gateway
        .collect(&request.fields, &request.selection)
        .map_err(checkout_error_to_response)?;

    // Validation runs before any remote call; a failed report blocks
    // submission with per-field messages.
    let report = validate(
        attempt.source.card(),
        &attempt.billing,
        attempt.source.stored(),
        &state.card_map,
        &state.billing_map,
        &state.policy,
    );
    if !report.is_valid() {
        warn!("Validation blocked submission: {} field(s)", report.errors.len());
        return Err(checkout_error_to_response(CheckoutError::Validation {
            errors: report.errors,
        }));
    }

    if let Some(request_name) = request.request_name {
        attempt = attempt.with_request_name(request_name);
    }

    let outcome = gateway
        .process(attempt)
        .await
        .map_err(checkout_error_to_response)?;

    info!("Checkout processed: status={}", outcome.status);

    Ok(Json(ProcessCheckoutResponse {
        status: outcome.status,
        redirect_to: outcome.redirect_to,
    }))
}

/// Query parameters for stored-payment deletion
#[derive(Debug, Deserialize)]
pub struct DeleteStoredPaymentQuery {
    /// Backend record type holding the stored payment
    #[serde(default = "default_stored_payment_doctype")]
    pub record_type: String,
}

fn default_stored_payment_doctype() -> String {
    "AuthorizeNet Stored Payment".to_string()
}

/// Remove a saved payment method
#[instrument(skip(state), fields(record_name = %record_name))]
pub async fn delete_stored_payment(
    State(state): State<AppState>,
    Path(record_name): Path<String>,
    Query(query): Query<DeleteStoredPaymentQuery>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state
        .authorizenet
        .delete_stored_payment(&query.record_type, &record_name)
        .await
        .map_err(checkout_error_to_response)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes;
    use crate::state::AppConfig;
    use async_trait::async_trait;
    use axum_test::TestServer;
    use checkout_authorizenet::{AuthorizeNetConfig, AuthorizeNetGateway};
    use checkout_core::{
        BillingFieldMap, CardFieldMap, CheckoutResult, FieldSource, Gateway, GatewayRegistry,
        PaymentSource, ProcessOutcome, ProcessRequest, ValidationPolicy,
    };
    use std::sync::Arc;

    /// Gateway double that reuses the real collection logic but
    /// resolves process() locally.
    struct CannedGateway {
        inner: AuthorizeNetGateway,
        result: fn() -> CheckoutResult<ProcessOutcome>,
    }

    #[async_trait]
    impl Gateway for CannedGateway {
        fn name(&self) -> &'static str {
            "authorizenet"
        }

        fn collect(
            &self,
            form: &dyn FieldSource,
            selection: &StoredSelection,
        ) -> CheckoutResult<ProcessRequest> {
            self.inner.collect(form, selection)
        }

        async fn process(&self, _request: ProcessRequest) -> CheckoutResult<ProcessOutcome> {
            (self.result)()
        }
    }

    fn test_state(result: fn() -> CheckoutResult<ProcessOutcome>) -> AppState {
        let authorizenet = Arc::new(AuthorizeNetGateway::new(AuthorizeNetConfig::new(
            "http://127.0.0.1:1",
        )));
        let canned = CannedGateway {
            inner: AuthorizeNetGateway::new(AuthorizeNetConfig::new("http://127.0.0.1:1")),
            result,
        };

        AppState {
            gateways: GatewayRegistry::with_default("authorizenet").with_gateway(Arc::new(canned)),
            authorizenet,
            policy: ValidationPolicy::default(),
            card_map: CardFieldMap::default(),
            billing_map: BillingFieldMap::default(),
            config: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                environment: "test".to_string(),
            },
        }
    }

    fn completed() -> CheckoutResult<ProcessOutcome> {
        Ok(ProcessOutcome {
            status: "Completed".into(),
            redirect_to: Some("/orders/123".into()),
            raw: serde_json::Value::Null,
        })
    }

    fn declined() -> CheckoutResult<ProcessOutcome> {
        Err(CheckoutError::Declined {
            errors: vec!["Card declined".into()],
            status_code: 402,
            recoverable: true,
            raw: serde_json::Value::Null,
        })
    }

    fn filled_fields() -> serde_json::Value {
        serde_json::json!({
            "authorizenet_name": "Nuran Verkleij",
            "authorizenet_number": "4111111111111111",
            "authorizenet_code": "123",
            "authorizenet_exp_month": "01",
            "authorizenet_exp_year": "2028",
            "authorizenet_bill_line1": "5555 5th Road",
            "authorizenet_bill_city": "Orlando",
            "authorizenet_bill_zip": "32801",
            "authorizenet_bill_country": "United States"
        })
    }

    #[tokio::test]
    async fn test_health() {
        let server = TestServer::new(routes::create_router(test_state(completed))).unwrap();

        let response = server.get("/health").await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_process_success_returns_redirect() {
        let server = TestServer::new(routes::create_router(test_state(completed))).unwrap();

        let response = server
            .post("/api/v1/checkout/authorizenet/process")
            .json(&serde_json::json!({ "fields": filled_fields() }))
            .await;

        response.assert_status_ok();
        let body: ProcessCheckoutResponse = response.json();
        assert_eq!(body.status, "Completed");
        assert_eq!(body.redirect_to.as_deref(), Some("/orders/123"));
    }

    #[tokio::test]
    async fn test_validation_blocks_submission() {
        let server = TestServer::new(routes::create_router(test_state(completed))).unwrap();

        let response = server
            .post("/api/v1/checkout/authorizenet/process")
            .json(&serde_json::json!({
                "fields": {
                    "authorizenet_bill_city": "Orlando"
                }
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, 400);
        let fields = body.fields.unwrap();
        assert!(fields.contains_key("authorizenet_name"));
        assert!(fields.contains_key("authorizenet_number"));
        assert!(!fields.contains_key("authorizenet_bill_city"));
    }

    #[tokio::test]
    async fn test_stored_selection_skips_card_validation() {
        let server = TestServer::new(routes::create_router(test_state(completed))).unwrap();

        let response = server
            .post("/api/v1/checkout/authorizenet/process")
            .json(&serde_json::json!({
                "fields": {},
                "selection": { "kind": "stored", "payment_id": "pay_123" }
            }))
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_declined_envelope_carries_recoverable_flag() {
        let server = TestServer::new(routes::create_router(test_state(declined))).unwrap();

        let response = server
            .post("/api/v1/checkout/authorizenet/process")
            .json(&serde_json::json!({ "fields": filled_fields() }))
            .await;

        response.assert_status(StatusCode::PAYMENT_REQUIRED);
        let body: ErrorResponse = response.json();
        assert_eq!(body.errors, vec!["Card declined".to_string()]);
        assert!(body.recoverable);
    }

    #[tokio::test]
    async fn test_unknown_gateway_is_404() {
        let server = TestServer::new(routes::create_router(test_state(completed))).unwrap();

        let response = server
            .post("/api/v1/checkout/nope/process")
            .json(&serde_json::json!({ "fields": {} }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}

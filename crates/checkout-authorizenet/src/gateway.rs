//! # Authorize.Net Gateway
//!
//! The Authorize.Net payment-method variant: assembles submission
//! records from form state and runs the single round trip to the
//! payment backend's processing endpoint.

use crate::config::AuthorizeNetConfig;
use crate::diagnostics::extract_server_messages;
use async_trait::async_trait;
use checkout_core::{
    collect_billing_info, collect_card_info, collect_stored_profile, BillingFieldMap, BillingInfo,
    CardFieldMap, CardInfo, CheckoutError, CheckoutResult, FieldSource, Gateway, PaymentSource,
    ProcessOutcome, ProcessRequest, StoredProfile, StoredSelection,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

/// Status string the backend reports on success
const COMPLETED_STATUS: &str = "Completed";

/// Authorize.Net gateway
///
/// Holds the backend connection settings plus the field maps of the
/// embedding checkout page. One `process` call issues exactly one
/// outbound request and resolves exactly once; it never retries.
pub struct AuthorizeNetGateway {
    config: AuthorizeNetConfig,
    client: Client,
    card_map: CardFieldMap,
    billing_map: BillingFieldMap,
}

impl AuthorizeNetGateway {
    /// Create a new gateway
    pub fn new(config: AuthorizeNetConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            client,
            card_map: CardFieldMap::default(),
            billing_map: BillingFieldMap::default(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        let config = AuthorizeNetConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Builder: use the embedding page's field identifiers
    pub fn with_field_maps(mut self, card_map: CardFieldMap, billing_map: BillingFieldMap) -> Self {
        self.card_map = card_map;
        self.billing_map = billing_map;
        self
    }

    /// Remove a previously saved payment method.
    ///
    /// `record_type` and `record_name` identify the stored-payment
    /// record on the backend. Nothing beyond the acknowledgment is
    /// consumed from the response.
    #[instrument(skip(self), fields(record_type = %record_type, record_name = %record_name))]
    pub async fn delete_stored_payment(
        &self,
        record_type: &str,
        record_name: &str,
    ) -> CheckoutResult<()> {
        let url = self.config.method_url(&self.config.delete_payment_method);
        let payload = DeletePaymentPayload {
            doctype: record_type,
            name: record_name,
        };

        let mut request = self.client.post(&url).json(&payload);
        if let Some(auth) = self.config.auth_header() {
            request = request.header("Authorization", auth);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| CheckoutError::Network(e.to_string()))?;
            error!("Stored-payment deletion failed: status={}", status);
            return Err(server_failure(status.as_u16(), &body));
        }

        info!("Deleted stored payment: {}", record_name);
        Ok(())
    }

    /// Map one backend reply to the normalized outcome or error
    fn normalize_reply(status_code: u16, body: &str) -> CheckoutResult<ProcessOutcome> {
        let raw: serde_json::Value = serde_json::from_str(body).map_err(|e| {
            CheckoutError::Serialization(format!("Failed to parse backend response: {}", e))
        })?;

        let envelope: RpcEnvelope = serde_json::from_value(raw.clone()).map_err(|e| {
            CheckoutError::Serialization(format!("Unexpected backend response shape: {}", e))
        })?;

        let reply = envelope.message;
        let reply_status = reply.status.unwrap_or_else(|| "Failed".to_string());

        if reply_status == COMPLETED_STATUS {
            return Ok(ProcessOutcome {
                status: reply_status,
                redirect_to: reply.redirect_to,
                raw,
            });
        }

        let errors = match reply.error {
            Some(ErrorField::One(message)) => vec![message],
            Some(ErrorField::Many(messages)) if !messages.is_empty() => messages,
            _ => vec![format!("Payment failed with status {}", reply_status)],
        };

        debug!(
            "Backend declined: status={}, http={}, errors={}",
            reply_status,
            status_code,
            errors.len()
        );

        Err(CheckoutError::Declined {
            errors,
            status_code: 402,
            recoverable: envelope.recoverable.unwrap_or(false),
            raw,
        })
    }
}

#[async_trait]
impl Gateway for AuthorizeNetGateway {
    fn name(&self) -> &'static str {
        "authorizenet"
    }

    fn show(&self) {
        debug!("authorizenet form shown");
    }

    fn hide(&self) {
        debug!("authorizenet form hidden");
    }

    fn collect(
        &self,
        form: &dyn FieldSource,
        selection: &StoredSelection,
    ) -> CheckoutResult<ProcessRequest> {
        let billing = collect_billing_info(form, &self.billing_map);

        let source = match collect_stored_profile(selection) {
            Some(profile) => PaymentSource::Stored(profile),
            None => {
                let card = collect_card_info(form, &self.card_map, selection).ok_or_else(|| {
                    CheckoutError::InvalidRequest("No payment source selected".to_string())
                })?;
                PaymentSource::Card(card)
            }
        };

        Ok(ProcessRequest::new(source, billing))
    }

    #[instrument(skip(self, request), fields(attempt_id = %request.attempt_id))]
    async fn process(&self, request: ProcessRequest) -> CheckoutResult<ProcessOutcome> {
        let payload = ProcessPayload {
            options: RpcOptions {
                card_info: request.source.card(),
                billing_info: &request.billing,
                authorizenet_profile: request.source.stored(),
            },
            request_name: request.request_name.as_deref(),
        };

        let url = self.config.method_url(&self.config.process_method);
        debug!("Submitting payment to {}", url);

        let mut outbound = self.client.post(&url).json(&payload);
        if let Some(auth) = self.config.auth_header() {
            outbound = outbound.header("Authorization", auth);
        }

        let response = outbound
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Backend error: status={}", status);
            return Err(server_failure(status.as_u16(), &body));
        }

        let outcome = Self::normalize_reply(status.as_u16(), &body)?;
        info!(
            "Payment completed: redirect_to={:?}",
            outcome.redirect_to.as_deref()
        );
        Ok(outcome)
    }
}

/// Build the non-recoverable server failure for a transport-level error
fn server_failure(status_code: u16, body: &str) -> CheckoutError {
    let mut messages = extract_server_messages(body);
    if messages.is_empty() {
        // Nothing structured to show; keep the raw diagnostic text
        if body.trim().is_empty() {
            messages.push(format!("Server returned HTTP {}", status_code));
        } else {
            messages.push(body.trim().to_string());
        }
    }
    CheckoutError::ServerError {
        messages,
        status_code,
    }
}

// =============================================================================
// Backend RPC Types
// =============================================================================

#[derive(Debug, Serialize)]
struct ProcessPayload<'a> {
    options: RpcOptions<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct RpcOptions<'a> {
    // Explicit nulls: the backend distinguishes "absent" from "null"
    card_info: Option<&'a CardInfo>,
    billing_info: &'a BillingInfo,
    authorizenet_profile: Option<&'a StoredProfile>,
}

#[derive(Debug, Serialize)]
struct DeletePaymentPayload<'a> {
    doctype: &'a str,
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    message: ReplyMessage,
    #[serde(default)]
    recoverable: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    redirect_to: Option<String>,
    #[serde(default)]
    error: Option<ErrorField>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorField {
    One(String),
    Many(Vec<String>),
}

//! # Authorize.Net Backend Configuration
//!
//! Configuration for reaching the payment backend's RPC endpoints.
//! Secrets are loaded from environment variables.

use checkout_core::CheckoutError;
use std::env;

/// Default RPC method handling payment processing
pub const DEFAULT_PROCESS_METHOD: &str =
    "authorizenet.authorizenet.doctype.authorizenet_settings.authorizenet_settings.process";

/// Default RPC method removing a stored payment method
pub const DEFAULT_DELETE_PAYMENT_METHOD: &str =
    "authorizenet.authorizenet.doctype.authorizenet_settings.authorizenet_settings.delete_stored_payment";

/// Connection settings for the payment backend
#[derive(Debug, Clone)]
pub struct AuthorizeNetConfig {
    /// Base URL of the backend (e.g. "https://shop.example.com")
    pub server_url: String,

    /// Dotted method path of the processing endpoint
    pub process_method: String,

    /// Dotted method path of the stored-payment deletion endpoint
    pub delete_payment_method: String,

    /// API key for token authentication (optional; session auth otherwise)
    pub api_key: Option<String>,

    /// API secret paired with the key
    pub api_secret: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl AuthorizeNetConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `AUTHNET_SERVER_URL`
    ///
    /// Optional:
    /// - `AUTHNET_PROCESS_METHOD`, `AUTHNET_DELETE_PAYMENT_METHOD`
    /// - `AUTHNET_API_KEY`, `AUTHNET_API_SECRET` (both or neither)
    /// - `AUTHNET_TIMEOUT_SECS` (default 30)
    pub fn from_env() -> Result<Self, CheckoutError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let server_url = env::var("AUTHNET_SERVER_URL").map_err(|_| {
            CheckoutError::Configuration("AUTHNET_SERVER_URL not set".to_string())
        })?;

        if !server_url.starts_with("http://") && !server_url.starts_with("https://") {
            return Err(CheckoutError::Configuration(
                "AUTHNET_SERVER_URL must start with http:// or https://".to_string(),
            ));
        }

        let api_key = env::var("AUTHNET_API_KEY").ok();
        let api_secret = env::var("AUTHNET_API_SECRET").ok();

        if api_key.is_some() != api_secret.is_some() {
            return Err(CheckoutError::Configuration(
                "AUTHNET_API_KEY and AUTHNET_API_SECRET must be set together".to_string(),
            ));
        }

        let timeout_secs = env::var("AUTHNET_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            process_method: env::var("AUTHNET_PROCESS_METHOD")
                .unwrap_or_else(|_| DEFAULT_PROCESS_METHOD.to_string()),
            delete_payment_method: env::var("AUTHNET_DELETE_PAYMENT_METHOD")
                .unwrap_or_else(|_| DEFAULT_DELETE_PAYMENT_METHOD.to_string()),
            api_key,
            api_secret,
            timeout_secs,
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(server_url: impl Into<String>) -> Self {
        let server_url: String = server_url.into();
        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            process_method: DEFAULT_PROCESS_METHOD.to_string(),
            delete_payment_method: DEFAULT_DELETE_PAYMENT_METHOD.to_string(),
            api_key: None,
            api_secret: None,
            timeout_secs: 30,
        }
    }

    /// Builder: set custom server URL (for testing against a mock)
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        let url: String = url.into();
        self.server_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Builder: set token credentials
    pub fn with_credentials(
        mut self,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        self.api_key = Some(api_key.into());
        self.api_secret = Some(api_secret.into());
        self
    }

    /// Authorization header value when token credentials are configured
    pub fn auth_header(&self) -> Option<String> {
        match (&self.api_key, &self.api_secret) {
            (Some(key), Some(secret)) => Some(format!("token {}:{}", key, secret)),
            _ => None,
        }
    }

    /// Full URL of an RPC method endpoint
    pub fn method_url(&self, method: &str) -> String {
        format!("{}/api/method/{}", self.server_url, method)
    }
}

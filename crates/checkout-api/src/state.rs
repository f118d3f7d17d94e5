//! # Application State
//!
//! Shared state for the Axum application: gateway registry, field
//! maps, validation policy, and server configuration.

use checkout_authorizenet::AuthorizeNetGateway;
use checkout_core::{BillingFieldMap, BoxedGateway, CardFieldMap, GatewayRegistry, ValidationPolicy};
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Gateway registry (default: authorizenet)
    pub gateways: GatewayRegistry,
    /// The Authorize.Net gateway, kept concrete for the
    /// stored-payment deletion endpoint
    pub authorizenet: Arc<AuthorizeNetGateway>,
    /// Required-field policy for manual entry
    pub policy: ValidationPolicy,
    /// Field identifiers of the embedding checkout page
    pub card_map: CardFieldMap,
    pub billing_map: BillingFieldMap,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState with the Authorize.Net gateway
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let policy = load_validation_policy()?;
        let card_map = CardFieldMap::default();
        let billing_map = BillingFieldMap::default();

        let authorizenet = Arc::new(
            AuthorizeNetGateway::from_env()
                .map_err(|e| anyhow::anyhow!("Failed to initialize Authorize.Net: {}", e))?
                .with_field_maps(card_map.clone(), billing_map.clone()),
        );

        let gateways = GatewayRegistry::with_default("authorizenet")
            .with_gateway(authorizenet.clone() as BoxedGateway);

        Ok(Self {
            gateways,
            authorizenet,
            policy,
            card_map,
            billing_map,
            config,
        })
    }

    /// Get a gateway by identifier or the default
    pub fn gateway(&self, name: Option<&str>) -> Option<&BoxedGateway> {
        self.gateways.get_or_default(name)
    }
}

/// Load the validation policy from the config file, if present
fn load_validation_policy() -> anyhow::Result<ValidationPolicy> {
    let config_paths = [
        "config/checkout.toml",
        "../config/checkout.toml",
        "../../config/checkout.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let policy: ValidationPolicy = toml::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!(
                "Loaded validation policy from {} ({} card, {} billing fields required)",
                path,
                policy.required_card.len(),
                policy.required_billing.len()
            );
            return Ok(policy);
        }
    }

    tracing::warn!("No checkout config found, using default validation policy");
    Ok(ValidationPolicy::default())
}

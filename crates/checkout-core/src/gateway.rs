//! # Gateway Trait
//!
//! Polymorphic interface for payment-method variants.
//!
//! Each payment method the checkout page can offer implements
//! `Gateway` with the capability set `{show, hide, collect, process}`.
//! Variants are selected through an explicit registry keyed by gateway
//! identifier; there is no inheritance chain to override.

use crate::error::CheckoutResult;
use crate::form::{FieldSource, StoredSelection};
use crate::request::{ProcessOutcome, ProcessRequest};
use async_trait::async_trait;
use std::sync::Arc;

/// One payment method's collection and submission logic.
///
/// `process` is a single-shot asynchronous operation: it resolves
/// exactly once with either a normalized outcome or a checkout error,
/// and it never retries on its own. Resubmission, if any, is a new
/// call initiated by the user. The caller is responsible for disabling
/// the submit control while a call is in flight.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Gateway identifier (for logging and registry lookup)
    fn name(&self) -> &'static str;

    /// Called when this gateway's form becomes visible.
    /// UI state is the embedding page's concern; default is a no-op.
    fn show(&self) {}

    /// Called when this gateway's form is hidden
    fn hide(&self) {}

    /// Assemble a submission attempt from current form state and the
    /// explicit stored-payment selection.
    fn collect(
        &self,
        form: &dyn FieldSource,
        selection: &StoredSelection,
    ) -> CheckoutResult<ProcessRequest>;

    /// Submit one attempt to the payment backend.
    async fn process(&self, request: ProcessRequest) -> CheckoutResult<ProcessOutcome>;
}

/// Type alias for a boxed gateway (dynamic dispatch)
pub type BoxedGateway = Arc<dyn Gateway>;

/// Registry of available gateways, keyed by identifier
#[derive(Clone, Default)]
pub struct GatewayRegistry {
    gateways: std::collections::HashMap<String, BoxedGateway>,
    default_gateway: Option<String>,
}

impl GatewayRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with a default gateway id
    pub fn with_default(default_gateway: impl Into<String>) -> Self {
        Self {
            gateways: std::collections::HashMap::new(),
            default_gateway: Some(default_gateway.into()),
        }
    }

    /// Register a gateway under its own name
    pub fn register(&mut self, gateway: BoxedGateway) {
        let name = gateway.name().to_string();
        self.gateways.insert(name, gateway);
    }

    /// Register with builder pattern
    pub fn with_gateway(mut self, gateway: BoxedGateway) -> Self {
        self.register(gateway);
        self
    }

    /// Get a gateway by identifier
    pub fn get(&self, name: &str) -> Option<&BoxedGateway> {
        self.gateways.get(name)
    }

    /// Get the default gateway
    pub fn default_gateway(&self) -> Option<&BoxedGateway> {
        self.default_gateway
            .as_ref()
            .and_then(|name| self.gateways.get(name))
    }

    /// Get a gateway by identifier or fall back to the default
    pub fn get_or_default(&self, name: Option<&str>) -> Option<&BoxedGateway> {
        match name {
            Some(n) => self.get(n).or_else(|| self.default_gateway()),
            None => self.default_gateway(),
        }
    }

    /// List all registered gateway identifiers
    pub fn names(&self) -> Vec<&str> {
        self.gateways.keys().map(|s| s.as_str()).collect()
    }

    /// Check if a gateway is registered
    pub fn has_gateway(&self, name: &str) -> bool {
        self.gateways.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckoutError;
    use crate::request::{BillingInfo, PaymentSource, StoredProfile};

    struct StubGateway;

    #[async_trait]
    impl Gateway for StubGateway {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn collect(
            &self,
            _form: &dyn FieldSource,
            selection: &StoredSelection,
        ) -> CheckoutResult<ProcessRequest> {
            match selection {
                StoredSelection::Stored { payment_id, .. } => Ok(ProcessRequest::new(
                    PaymentSource::Stored(StoredProfile {
                        payment_id: payment_id.clone(),
                        address_name: None,
                    }),
                    BillingInfo::default(),
                )),
                StoredSelection::ManualEntry => {
                    Err(CheckoutError::InvalidRequest("stub".into()))
                }
            }
        }

        async fn process(&self, _request: ProcessRequest) -> CheckoutResult<ProcessOutcome> {
            Ok(ProcessOutcome {
                status: "Completed".into(),
                redirect_to: Some("/done".into()),
                raw: serde_json::Value::Null,
            })
        }
    }

    #[test]
    fn test_registry_lookup_and_fallback() {
        let registry = GatewayRegistry::with_default("stub").with_gateway(Arc::new(StubGateway));

        assert!(registry.has_gateway("stub"));
        assert_eq!(registry.names(), vec!["stub"]);
        assert_eq!(registry.get("stub").unwrap().name(), "stub");
        assert_eq!(registry.get_or_default(Some("missing")).unwrap().name(), "stub");
        assert_eq!(registry.get_or_default(None).unwrap().name(), "stub");
    }

    #[test]
    fn test_empty_registry() {
        let registry = GatewayRegistry::new();
        assert!(registry.default_gateway().is_none());
        assert!(registry.get_or_default(Some("stub")).is_none());
    }

    #[tokio::test]
    async fn test_stub_round_trip() {
        let gateway = StubGateway;
        let selection = StoredSelection::Stored {
            payment_id: "pay_1".into(),
            address_name: None,
        };

        let request = gateway
            .collect(&crate::form::FormSnapshot::new(), &selection)
            .unwrap();
        let outcome = gateway.process(request).await.unwrap();
        assert!(outcome.is_completed());
    }
}

//! # AuthorizeNet Checkout
//!
//! Checkout glue service for an Authorize.Net payment backend.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export AUTHNET_SERVER_URL=https://shop.example.com
//! export AUTHNET_API_KEY=...
//! export AUTHNET_API_SECRET=...
//!
//! # Run the server
//! authorizenet-checkout
//! ```

use checkout_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Gateways: {:?}", state.gateways.names());

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("authorizenet-checkout starting on http://{}", addr);

    if !is_prod {
        info!("Checkout: POST http://{}/api/v1/checkout/authorizenet/process", addr);
        info!("Health:   GET  http://{}/health", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

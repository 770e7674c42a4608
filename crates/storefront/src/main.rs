//! ShopLite Storefront - Cart, checkout and discount API.
//!
//! This binary serves the storefront JSON API on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out
//! - One in-memory `Store` per process behind a mutex (nothing is persisted)
//! - A single-use 10% discount code unlocks every `DISCOUNT_EVERY_N` orders

#![cfg_attr(not(test), forbid(unsafe_code))]

use shoplite_storefront::config::{LogFormat, StorefrontConfig};
use shoplite_storefront::state::AppState;
use shoplite_storefront::store::Store;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shoplite_storefront=info,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() {
    init_tracing(LogFormat::from_env());

    // Load configuration from environment
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    let store = Store::new(config.discount_every_n);
    tracing::info!(
        discount_every_n = config.discount_every_n.get(),
        "in-memory store created"
    );

    let addr = config.socket_addr();
    let app = shoplite_storefront::app(AppState::new(store));

    // Start server
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

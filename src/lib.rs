//! Backend for the Plásticos Carmay marketing site.
//!
//! One endpoint: the contact form on the static site POSTs a quote request
//! to `/send`, the server re-validates and sanitizes every field, and the
//! request is relayed by email through Resend. Submissions are never stored;
//! each request lives and dies on its own.
//!
//! # Request pipeline
//!
//! - Honeypot check (`_trap` field, absorbed silently)
//! - Presence check over the required fields
//! - Email and quantity format checks
//! - Per-field length limits
//! - HTML escaping of everything interpolated into the email body
//! - One dispatch attempt against the Resend API, no retries
//!
//! # Configuration
//!
//! - `RUST_PORT`: listen port, defaults to 8000
//! - `RESEND_API_KEY`: provider credential, from the environment or
//!   `/run/secrets/RESEND_API_KEY`. Missing key turns every submission into
//!   a 500 instead of crashing the process.
//! - `MAIL_FROM` / `MAIL_TO`: sender and recipient overrides

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::post,
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod mailer;
pub mod models;
pub mod routes;
pub mod sanitize;
pub mod state;
pub mod validate;

use routes::{method_fallback, send_handler};
use state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/send", post(send_handler).fallback(method_fallback))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new();

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

//! # Relying-Party Server
//!
//! Binds the relying-party API to its HTTP surface: the form-based verify
//! page, the OIDC redirect flow, and the JSON verification passthroughs.

mod config;
mod handlers;
mod provider;

use anyhow::Result;
use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use verify_rp::Renderer;

use crate::config::AppConfig;
use crate::handlers::AppState;
use crate::provider::AppProvider;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;
    let state = AppState {
        provider: AppProvider::new(&config)?,
        renderer: Renderer::new(&config.templates.vp_html, &config.templates.didcomm_vp_html),
    };

    let router = Router::new()
        .route("/verifyPresentation", post(handlers::verify_vp))
        .route("/oauth2/request", get(handlers::create_request))
        .route("/oauth2/callback", get(handlers::callback))
        .route("/verify/presentation", post(handlers::verify_presentation))
        .route("/verify/credential", post(handlers::verify_credential))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_methods(Any).allow_origin(Any).allow_headers(Any))
        .with_state(state);

    let listener = TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).with_graceful_shutdown(shutdown()).await?;

    Ok(())
}

async fn shutdown() {
    let _ = tokio::signal::ctrl_c().await;
}

use axum::{Router, routing::get, routing::post};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use perfgate_api::AppState;
use perfgate_api::config::GateConfig;
use perfgate_api::handlers;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("perfgate_api=debug,tower_http=debug")
        }))
        .init();

    let config_path =
        std::env::var("PERFGATE_CONFIG").unwrap_or_else(|_| "./perfgate.toml".to_string());
    let config = Arc::new(GateConfig::load(&config_path)?);

    // Upstream timeout lives on the client; the evaluation engine has
    // no timeout semantics of its own.
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    let state = AppState { http, config };

    let app = Router::new()
        .route("/api/v1/signature", post(handlers::signature::evaluate))
        .route("/api/v1/version", get(handlers::health::version))
        .route("/healthz", get(handlers::health::healthz))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
    tracing::info!("perfgate-api listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

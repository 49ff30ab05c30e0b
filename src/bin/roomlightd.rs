//! roomlightd: HTTP front end for the roomlight pipeline.
//!
//! - `POST /generate_rdf`: body `{"rooms": [...]}`; answers
//!   `{"rawRDF": ..., "lightToggle": {...}}`, or `400 {"error": ...}`
//! - `GET  /health`: server status
//!
//! Every request builds its own graph; nothing is kept between requests.
//!
//! Build and run: `cargo run --features server --bin roomlightd`

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use roomlight::config::RoomlightConfig;
use roomlight::error::RoomlightError;
use roomlight::pipeline::Pipeline;

// ── Server state ──────────────────────────────────────────────────────────

struct ServerState {
    pipeline: Pipeline,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn generate_rdf(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Response {
    let payload = match body {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            tracing::debug!(%rejection, "rejected non-JSON body");
            return error_response(StatusCode::BAD_REQUEST, "Missing JSON in request");
        }
    };

    match state.pipeline.generate(&payload) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(RoomlightError::Validation(e)) => {
            tracing::info!(error = %e, "rejected payload");
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e) => {
            tracing::error!(error = %e, "generation failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/generate_rdf", post(generate_rdf))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Main ──────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::var("ROOMLIGHT_CONFIG").ok().map(PathBuf::from);
    let config = RoomlightConfig::resolve(config_path.as_deref()).unwrap_or_else(|e| {
        tracing::error!("failed to load config: {e}");
        std::process::exit(1);
    });
    let pipeline = Pipeline::from_config(&config).unwrap_or_else(|e| {
        tracing::error!("invalid config: {e}");
        std::process::exit(1);
    });

    let addr = config.server.addr();
    let state = Arc::new(ServerState { pipeline });
    let app = router(state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(namespace = %config.namespace, "roomlightd listening on {addr}");

    // Serve with graceful shutdown on SIGTERM/SIGINT.
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let ctrl_c = tokio::signal::ctrl_c();
            #[cfg(unix)]
            {
                match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                    Ok(mut sigterm) => {
                        tokio::select! {
                            _ = ctrl_c => {},
                            _ = sigterm.recv() => {},
                        }
                    }
                    Err(e) => {
                        tracing::warn!("failed to register SIGTERM handler: {e}");
                        ctrl_c.await.ok();
                    }
                }
            }
            #[cfg(not(unix))]
            {
                ctrl_c.await.ok();
            }
            tracing::info!("roomlightd shutting down");
        })
        .await;

    if let Err(e) = served {
        tracing::error!("server error: {e}");
        std::process::exit(1);
    }
}

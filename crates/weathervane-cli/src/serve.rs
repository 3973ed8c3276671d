// crates/weathervane-cli/src/serve.rs
// ============================================================================
// Module: HTTP Front End
// Description: Loopback HTTP surface exposing the skill dispatcher.
// Purpose: Serve invoke-per-request dispatch for local platform simulators.
// Dependencies: axum, serde_json, tokio, weathervane-core
// ============================================================================

//! ## Overview
//! The front end exposes two routes: `POST /` accepts one request envelope
//! and answers with the response envelope, and `GET /health` reports
//! readiness. The dispatcher is shared read-only behind `Arc`; each request
//! is an independent, stateless invocation. Unrecoverable dispatch failures
//! surface as HTTP 500 with no structured response body.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use serde_json::Value;
use serde_json::json;
use weathervane_core::RequestEnvelope;
use weathervane_core::runtime::Dispatcher;

// ============================================================================
// SECTION: State
// ============================================================================

/// Shared server state.
///
/// # Invariants
/// - The dispatcher is read-only and shared across concurrent requests.
pub(crate) struct ServeState {
    /// The assembled skill dispatcher.
    pub(crate) dispatcher: Arc<Dispatcher>,
}

// ============================================================================
// SECTION: Router
// ============================================================================

/// Builds the HTTP router over a shared dispatcher.
pub(crate) fn router(dispatcher: Arc<Dispatcher>) -> Router {
    let state = Arc::new(ServeState {
        dispatcher,
    });
    Router::new()
        .route("/", post(handle_dispatch))
        .route("/health", get(handle_health))
        .with_state(state)
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Dispatches one request envelope.
pub(crate) async fn handle_dispatch(
    State(state): State<Arc<ServeState>>,
    Json(envelope): Json<RequestEnvelope>,
) -> Response {
    match state.dispatcher.dispatch_to_envelope(&envelope) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// Reports readiness.
pub(crate) async fn handle_health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// Binds the listener and serves until shutdown.
///
/// # Errors
///
/// Returns the underlying I/O error when binding or serving fails.
pub(crate) async fn run_server(
    addr: SocketAddr,
    dispatcher: Arc<Dispatcher>,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(dispatcher)).await
}

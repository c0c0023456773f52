//! HTTP surface for the coach
//!
//! - GET  / - single-page chat UI
//! - GET  /api/status - health check
//! - GET  /api/catalogue - selector options and defaults
//! - POST /api/sessions - open a conversation
//! - GET  /api/sessions/{id}/messages - rendered transcript
//! - DELETE /api/sessions/{id}/messages - clear the conversation
//! - POST /api/sessions/{id}/chat/stream - SSE streaming turn
//! - POST /api/sessions/{id}/quick-actions/stream - SSE quick action

pub mod error;
mod handlers;
pub mod sessions;
pub mod types;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::coach::Coach;
use crate::config::CoachConfig;
use crate::llm::CompletionClient;
use crate::prompt::TurnSettings;

pub use sessions::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub coach: Coach,
    pub sessions: Arc<SessionStore>,
    /// Used for selector fields a request leaves out
    pub defaults: TurnSettings,
}

impl AppState {
    pub fn new(coach: Coach, defaults: TurnSettings) -> Self {
        Self {
            coach,
            sessions: Arc::new(SessionStore::new()),
            defaults,
        }
    }
}

/// Create the router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/api/status", get(handlers::status_handler))
        .route("/api/catalogue", get(handlers::catalogue_handler))
        .route("/api/sessions", post(handlers::create_session_handler))
        .route(
            "/api/sessions/{id}/messages",
            get(handlers::messages_handler).delete(handlers::clear_handler),
        )
        .route(
            "/api/sessions/{id}/chat/stream",
            post(handlers::chat_stream_handler),
        )
        .route(
            "/api/sessions/{id}/quick-actions/stream",
            post(handlers::quick_action_handler),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server until Ctrl-C
pub async fn run(config: &CoachConfig) -> Result<()> {
    let client = CompletionClient::from_config(config)?;
    if !client.has_credential() {
        tracing::warn!("GROQ_API_KEY not set; turns will answer with a configuration message");
    }

    let state = AppState::new(Coach::new(client), config.default_turn_settings()?);
    let app = create_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Coach listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

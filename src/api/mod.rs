//! REST endpoints: chat-driven and form-based registration.

pub mod error;

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::chat::ChatService;
use crate::students::RegistrationService;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
    pub registration: Arc<RegistrationService>,
}

/// Build the router. Cross-origin requests are allowed from anywhere.
pub fn routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
        .route("/chat/{conversation_id}", get(get_conversation))
        .route("/submit-form", post(submit_form))
        .route("/students/{id}", get(get_student))
        .layer(cors)
        .with_state(state)
}

/// Parse a request body leniently; anything that isn't JSON becomes `null`.
fn parse_body(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "enroll-assist"
    }))
}

// ── Chat ────────────────────────────────────────────────────────────────

/// POST /chat
///
/// Body: `{"conversation_id": string, "message": string}`. A non-string
/// value counts as missing.
async fn chat(State(state): State<AppState>, body: Bytes) -> Result<impl IntoResponse, ApiError> {
    let body = parse_body(&body);
    let conversation_id = body.get("conversation_id").and_then(Value::as_str);
    let message = body.get("message").and_then(Value::as_str);

    let (Some(conversation_id), Some(message)) = (conversation_id, message) else {
        warn!("Chat request missing conversation_id or message");
        return Err(ApiError::BadRequest("Missing required fields".to_string()));
    };

    let reply = state.chat.process_user_input(conversation_id, message).await?;
    Ok(Json(reply))
}

/// GET /chat/{conversation_id}
async fn get_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    match state.chat.snapshot(&conversation_id).await? {
        Some(conversation) => Ok(Json(conversation)),
        None => Err(ApiError::NotFound("Conversation not found".to_string())),
    }
}

// ── Registration ────────────────────────────────────────────────────────

/// POST /submit-form
///
/// Returns 201 with the stored record, or 400 naming the missing field.
async fn submit_form(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let form = parse_body(&body);
    let record = state.registration.register(&form).await?;
    info!(email = %record.email, "Form submission accepted");
    Ok((StatusCode::CREATED, Json(record.to_wire())))
}

/// GET /students/{id}
async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    match state.registration.find(&id).await? {
        Some(record) => Ok(Json(record.to_wire())),
        None => Err(ApiError::NotFound("Student not found".to_string())),
    }
}

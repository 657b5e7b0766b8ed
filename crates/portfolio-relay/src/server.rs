//! HTTP surface of the chat relay
//!
//! `POST /` and `POST /chatbot` accept a [`ChatRequest`] and answer with a
//! [`ChatReply`] or an [`ErrorPayload`]. Both paths answer CORS pre-flight
//! requests, and every response carries permissive CORS headers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{
    HeaderName, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use portfolio_core::{ChatReply, ChatRequest, ErrorPayload, RelayError};
use tracing::{error, warn};

use crate::relay::ChatRelay;

const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";
const ALLOWED_METHODS: &str = "POST, OPTIONS";

pub fn router(relay: Arc<ChatRelay>) -> Router {
    Router::new()
        .route("/", post(chat).options(preflight))
        .route("/chatbot", post(chat).options(preflight))
        .with_state(relay)
}

fn cors_headers() -> [(HeaderName, &'static str); 3] {
    [
        (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        (ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
        (ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS),
    ]
}

async fn preflight() -> impl IntoResponse {
    (StatusCode::OK, cors_headers())
}

async fn chat(State(relay): State<Arc<ChatRelay>>, body: Bytes) -> Response {
    let request: ChatRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "rejecting malformed chat request");
            return error_response(RelayError::InvalidRequest(format!("Invalid request body: {}", e)));
        }
    };

    match relay.complete(&request.message, &request.chat_history).await {
        Ok(content) => (StatusCode::OK, cors_headers(), Json(ChatReply { content })).into_response(),
        Err(err) => {
            error!(error = %err, "chatbot error");
            error_response(err)
        }
    }
}

fn error_response(err: RelayError) -> Response {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let payload = ErrorPayload {
        error: err.to_string(),
    };
    (status, cors_headers(), Json(payload)).into_response()
}

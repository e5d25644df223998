//! The relay proxy: accepts an analysis request, forwards a streaming
//! chat-completion request to the AI gateway, and pipes the SSE body back to
//! the caller untouched. All SSE parsing happens on the consuming side
//! (`streaming`), never here.

use crate::constants::ANALYSIS_MODEL;
use crate::main_helper::AppState;
use crate::prompt::{system_prompt, user_prompt};
use crate::types::{AnalyzeRequest, ChatMessage, CompletionRequest, RelayError, Result};
use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use futures_util::StreamExt;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub fn router(state: Arc<AppState>) -> Router {
    // Any origin may call the relay; preflight requests are answered by the
    // CORS layer with no body and no further processing.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/analyze-design", post(analyze_design))
        .route("/health", get(crate::health::liveness))
        .route("/readyz", get(crate::health::readiness))
        .layer(cors)
        .layer(middleware::from_fn(crate::logging::request_id_middleware))
        .with_state(state)
}

#[tracing::instrument(name = "relay.analyze", skip_all, fields(platform = tracing::field::Empty))]
async fn analyze_design(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AnalyzeRequest>,
) -> Response {
    if let Some(platform) = &payload.platform {
        tracing::Span::current().record("platform", platform.as_str());
    }

    match forward_to_gateway(&state, &payload).await {
        Ok(upstream) => pipe_event_stream(upstream),
        Err(e) => {
            tracing::error!("analyze-design rejected: {}", e);
            e.into_response()
        }
    }
}

/// Build the outbound completion request and forward it with streaming
/// enabled. Upstream rejections map to the fixed client-facing error set;
/// the upstream body is logged but never relayed.
async fn forward_to_gateway(
    state: &AppState,
    payload: &AnalyzeRequest,
) -> Result<reqwest::Response> {
    let key = state
        .api_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or(RelayError::MissingCredential)?;

    let outgoing = CompletionRequest {
        model: ANALYSIS_MODEL.to_string(),
        messages: vec![
            ChatMessage {
                role: "system",
                content: system_prompt(payload.platform.as_deref()),
            },
            ChatMessage {
                role: "user",
                content: user_prompt(
                    payload.design_url.as_deref(),
                    payload.platform.as_deref(),
                    payload.custom_prompt.as_deref(),
                ),
            },
        ],
        stream: true,
    };

    let response = state
        .client
        .post(&state.gateway_url)
        .bearer_auth(key)
        .json(&outgoing)
        .send()
        .await?;

    let status = response.status();
    if status.is_success() {
        tracing::info!("Gateway accepted analysis request, streaming");
        return Ok(response);
    }

    match status.as_u16() {
        429 => Err(RelayError::RateLimited),
        402 => Err(RelayError::PaymentRequired),
        _ => {
            let error_body = match response.text().await {
                Ok(text) => text,
                Err(e) => format!("(body unreadable: {})", e),
            };
            tracing::error!("AI gateway error: {} {}", status, error_body);
            Err(RelayError::Upstream(status, error_body))
        }
    }
}

/// Pipe the upstream body through byte for byte, announced as an event
/// stream. No buffering beyond what the transport requires.
fn pipe_event_stream(upstream: reqwest::Response) -> Response {
    let stream = upstream
        .bytes_stream()
        .map(|r| r.map_err(std::io::Error::other));

    match Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .body(Body::from_stream(stream))
    {
        Ok(response) => response,
        Err(e) => RelayError::Internal(
            format!("Failed to build stream response: {}", e),
            tracing_error::SpanTrace::capture(),
        )
        .into_response(),
    }
}

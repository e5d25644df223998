use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_error::SpanTrace;

/// Body of a POST to `/analyze-design`. Field names match the JSON wire
/// format used by the web client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(rename = "designUrl", skip_serializing_if = "Option::is_none")]
    pub design_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(rename = "customPrompt", skip_serializing_if = "Option::is_none")]
    pub custom_prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

/// Outbound chat-completion request forwarded to the AI gateway.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("LOVABLE_API_KEY is not configured")]
    MissingCredential,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Payment required. Please add credits to continue.")]
    PaymentRequired,

    #[error("Upstream error (status {0}): {1}")]
    Upstream(axum::http::StatusCode, String),

    #[error("Internal error: {0}")]
    Internal(String, SpanTrace),
}

impl axum::response::IntoResponse for RelayError {
    fn into_response(self) -> axum::response::Response {
        // The client-facing body is always `{"error": <message>}`. Upstream
        // bodies are logged by the relay handler, never relayed verbatim.
        let (status, msg) = match &self {
            RelayError::RateLimited => {
                (axum::http::StatusCode::TOO_MANY_REQUESTS, self.to_string())
            }
            RelayError::PaymentRequired => {
                (axum::http::StatusCode::PAYMENT_REQUIRED, self.to_string())
            }
            RelayError::MissingCredential => (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                self.to_string(),
            ),
            RelayError::Upstream(_, _) | RelayError::Network(_) => (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                "AI gateway error".to_string(),
            ),
            RelayError::Serialization(e) => (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                e.to_string(),
            ),
            RelayError::Io(e) => (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                e.to_string(),
            ),
            RelayError::Internal(m, _) => {
                (axum::http::StatusCode::INTERNAL_SERVER_ERROR, m.clone())
            }
        };
        (status, axum::Json(serde_json::json!({ "error": msg }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_request_uses_camel_case_wire_names() {
        let req: AnalyzeRequest = serde_json::from_str(
            r#"{"designUrl":"https://figma.com/file/x","platform":"nextjs","customPrompt":"p"}"#,
        )
        .expect("valid request json");
        assert_eq!(req.design_url.as_deref(), Some("https://figma.com/file/x"));
        assert_eq!(req.platform.as_deref(), Some("nextjs"));
        assert_eq!(req.custom_prompt.as_deref(), Some("p"));
    }

    #[test]
    fn all_fields_are_optional() {
        let req: AnalyzeRequest = serde_json::from_str("{}").expect("empty object is valid");
        assert!(req.design_url.is_none());
        assert!(req.platform.is_none());
        assert!(req.custom_prompt.is_none());
    }

    #[test]
    fn credential_error_message_names_the_env_var() {
        assert_eq!(
            RelayError::MissingCredential.to_string(),
            "LOVABLE_API_KEY is not configured"
        );
    }
}

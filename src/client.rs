//! The consuming side of the relay: posts an analysis request and decodes
//! the SSE response into incrementally delivered text.

use crate::accumulator::StreamAccumulator;
use crate::streaming::consume_sse;
use crate::types::{AnalyzeRequest, RelayError, Result};

/// Run one analysis against a relay endpoint. `on_fragment` fires for each
/// text fragment in arrival order; the full accumulated text is returned on
/// success. A non-success response never starts a stream; its `error` field
/// is surfaced instead.
pub async fn run_analysis(
    client: &reqwest::Client,
    endpoint: &str,
    request: &AnalyzeRequest,
    on_fragment: impl FnMut(&str),
) -> Result<String> {
    let response = client.post(endpoint).json(request).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body: serde_json::Value = match response.json().await {
            Ok(v) => v,
            Err(_) => serde_json::Value::Null,
        };
        let message = body
            .get("error")
            .and_then(|e| e.as_str())
            .unwrap_or("Failed to analyze design")
            .to_string();
        return Err(RelayError::Upstream(status, message));
    }

    let mut accumulator = StreamAccumulator::new();
    consume_sse(
        Box::pin(response.bytes_stream()),
        &mut accumulator,
        on_fragment,
    )
    .await?;

    Ok(accumulator.into_text())
}

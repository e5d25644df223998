use axum::{
    body::Body,
    http::{Request, Response},
    middleware::Next,
};
use std::panic;
use tracing::error;
use tracing::{info_span, Instrument};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-relay-request-id";

/// Sets up a global panic hook that logs panics using tracing.
pub fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let backtrace = std::backtrace::Backtrace::capture();

        let payload = panic_info.payload();
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            *s
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.as_str()
        } else {
            "Unknown panic payload"
        };

        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        error!(
            target: "panic",
            message = %message,
            location = %location,
            backtrace = %backtrace,
            "FATAL: Application panicked"
        );

        original_hook(panic_info);
    }));
}

/// Attaches a fresh request id to every inbound request and wraps handling
/// in a `request` span so stream logs correlate.
pub async fn request_id_middleware(mut req: Request<Body>, next: Next) -> Response<Body> {
    let request_id = Uuid::new_v4().to_string();
    if let Ok(val) = request_id.parse() {
        req.headers_mut().insert(REQUEST_ID_HEADER, val);
    }

    let span = info_span!("request", request_id = %crate::str_utils::prefix_chars(&request_id, 8));
    next.run(req).instrument(span).await
}

/// Per-stream counters logged once the stream finishes.
#[derive(Default)]
pub struct StreamMetric {
    pub chunks: usize,
    pub bytes: usize,
    pub fragments: usize,
    pub text_chars: usize,
}

impl StreamMetric {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_chunk(&mut self, len: usize) {
        self.chunks += 1;
        self.bytes += len;
    }

    pub fn record_fragment(&mut self, fragment: &str) {
        self.fragments += 1;
        self.text_chars += fragment.chars().count();
    }

    pub fn log_summary(&self) {
        tracing::info!(
            "[STREAM END] Chunks: {} ({} bytes) | Fragments: {} | Text: {} chars",
            self.chunks,
            self.bytes,
            self.fragments,
            self.text_chars
        );
    }
}

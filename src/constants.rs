/// AI gateway endpoints
pub const GATEWAY_BASE_URL: &str = "https://ai.gateway.lovable.dev/v1";
pub const GATEWAY_CHAT_COMPLETIONS: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";

/// Model used for design analysis
pub const ANALYSIS_MODEL: &str = "google/gemini-2.5-flash";

/// Logical end-of-stream marker inside a `data: ` line
pub const STREAM_DONE_MARKER: &str = "[DONE]";

/// Platform fallback when the client omits one
pub const DEFAULT_PLATFORM: &str = "web";

/// Platform catalog shown by the web client: (id, display name). The value
/// sent by a client is advisory and embedded in prompt text as-is, so an id
/// outside this list is not rejected.
pub const PLATFORM_CATALOG: &[(&str, &str)] = &[
    ("nextjs", "Next.js + Tailwind"),
    ("react", "React + Styled Components"),
    ("wordpress", "WordPress Theme"),
    ("shopify", "Shopify + Liquid"),
    ("webflow", "Webflow Export"),
    ("html", "HTML + CSS + JS"),
];

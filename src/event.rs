//! SSE line classification and delta extraction.

use crate::constants::STREAM_DONE_MARKER;

/// Classification of one complete SSE line. Unknown field types fall into
/// `Blank` so future additions to the wire format are ignored rather than
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    Comment,
    Blank,
    Terminator,
    Data(&'a str),
}

pub fn classify(line: &str) -> LineClass<'_> {
    if line.starts_with(':') {
        return LineClass::Comment;
    }
    if line.trim().is_empty() {
        return LineClass::Blank;
    }
    let payload = match line.strip_prefix("data: ") {
        Some(rest) => rest.trim(),
        None => return LineClass::Blank,
    };
    if payload == STREAM_DONE_MARKER {
        LineClass::Terminator
    } else {
        LineClass::Data(payload)
    }
}

/// Outcome of extracting a text fragment from a `data:` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeltaOutcome {
    /// Payload was valid JSON. `None` when `choices[0].delta.content` is
    /// absent or not a string; that is not an error, the event just carries
    /// no text.
    Parsed(Option<String>),
    /// Payload is not (yet) valid JSON. The line was likely cut mid-value by
    /// the transport; the caller should restore it and wait for more bytes.
    Incomplete,
}

pub fn extract_delta(payload: &str) -> DeltaOutcome {
    let value: serde_json::Value = match serde_json::from_str(payload) {
        Ok(v) => v,
        Err(_) => return DeltaOutcome::Incomplete,
    };

    let content = value
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|choice| choice.get("delta"))
        .and_then(|d| d.get("content"))
        .and_then(|c| c.as_str());

    DeltaOutcome::Parsed(content.map(str::to_owned))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_comments_and_blanks() {
        assert_eq!(classify(": keep-alive"), LineClass::Comment);
        assert_eq!(classify(""), LineClass::Blank);
        assert_eq!(classify("   "), LineClass::Blank);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        assert_eq!(classify("event: message"), LineClass::Blank);
        assert_eq!(classify("id: 42"), LineClass::Blank);
        assert_eq!(classify("retry: 5000"), LineClass::Blank);
    }

    #[test]
    fn recognizes_terminator_marker() {
        assert_eq!(classify("data: [DONE]"), LineClass::Terminator);
        assert_eq!(classify("data:  [DONE] "), LineClass::Terminator);
    }

    #[test]
    fn data_payload_is_trimmed() {
        assert_eq!(classify("data: {\"x\":1} "), LineClass::Data("{\"x\":1}"));
    }

    #[test]
    fn extracts_content_fragment() {
        let outcome = extract_delta(r#"{"choices":[{"delta":{"content":"Hello"}}]}"#);
        assert_eq!(outcome, DeltaOutcome::Parsed(Some("Hello".to_string())));
    }

    #[test]
    fn missing_delta_content_is_not_an_error() {
        assert_eq!(
            extract_delta(r#"{"choices":[{"delta":{}}]}"#),
            DeltaOutcome::Parsed(None)
        );
        assert_eq!(extract_delta(r#"{}"#), DeltaOutcome::Parsed(None));
        assert_eq!(
            extract_delta(r#"{"choices":[{"delta":{"content":42}}]}"#),
            DeltaOutcome::Parsed(None)
        );
    }

    #[test]
    fn truncated_json_is_incomplete() {
        assert_eq!(
            extract_delta(r#"{"choices":[{"delta":{"content":"Hel"#),
            DeltaOutcome::Incomplete
        );
    }
}

//! Per-request accumulation of streamed analysis text.

use crate::types::RelayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Idle,
    Active,
    Completed,
    Failed,
}

impl StreamState {
    pub fn is_terminal(self) -> bool {
        matches!(self, StreamState::Completed | StreamState::Failed)
    }
}

/// Owns the growing result text and the stream lifecycle for one in-flight
/// request. Appending is the only mutation path while the stream is active,
/// so append order equals arrival order. Once a terminal state is reached the
/// text is frozen; a new request gets a fresh accumulator.
pub struct StreamAccumulator {
    text: String,
    state: StreamState,
}

impl StreamAccumulator {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            state: StreamState::Idle,
        }
    }

    pub fn start(&mut self) {
        if self.state == StreamState::Idle {
            self.state = StreamState::Active;
        }
    }

    /// Append one fragment. Ignored outside the Active state, which also
    /// covers bytes arriving after a `[DONE]` marker.
    pub fn push_fragment(&mut self, fragment: &str) {
        if self.state == StreamState::Active {
            self.text.push_str(fragment);
        }
    }

    /// Terminator marker seen, or the transport closed cleanly. Some
    /// upstreams omit the marker, so a clean end counts as success.
    pub fn complete(&mut self) {
        if self.state == StreamState::Active {
            self.state = StreamState::Completed;
        }
    }

    /// Fatal transport or upstream failure. Text accumulated so far is kept.
    pub fn fail(&mut self, error: &RelayError) {
        if !self.state.is_terminal() {
            tracing::error!("Stream failed after {} chars: {}", self.text.len(), error);
            self.state = StreamState::Failed;
        }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl Default for StreamAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_append_in_arrival_order() {
        let mut acc = StreamAccumulator::new();
        acc.start();
        acc.push_fragment("Hel");
        acc.push_fragment("lo");
        assert_eq!(acc.text(), "Hello");
        assert_eq!(acc.state(), StreamState::Active);
    }

    #[test]
    fn fragments_are_ignored_before_start_and_after_completion() {
        let mut acc = StreamAccumulator::new();
        acc.push_fragment("early");
        assert_eq!(acc.text(), "");

        acc.start();
        acc.push_fragment("ok");
        acc.complete();
        acc.push_fragment("late");
        assert_eq!(acc.text(), "ok");
        assert_eq!(acc.state(), StreamState::Completed);
    }

    #[test]
    fn failure_preserves_partial_text() {
        let mut acc = StreamAccumulator::new();
        acc.start();
        acc.push_fragment("partial");
        acc.fail(&RelayError::MissingCredential);
        assert_eq!(acc.state(), StreamState::Failed);
        assert_eq!(acc.text(), "partial");
    }

    #[test]
    fn terminal_states_are_final() {
        let mut acc = StreamAccumulator::new();
        acc.start();
        acc.complete();
        acc.fail(&RelayError::MissingCredential);
        assert_eq!(acc.state(), StreamState::Completed);
    }
}

//! Byte-chunk to line reassembly for SSE response bodies.
//!
//! Transport chunks can cut a line anywhere, including in the middle of a
//! multi-byte UTF-8 sequence. The splitter decodes incrementally (partial
//! sequences wait for their remaining bytes) and hands out one complete line
//! at a time, so the caller can push a line back when its payload turns out
//! to be incomplete.

pub struct FrameSplitter {
    /// Decoded text not yet confirmed to end in a line terminator.
    buffer: String,
    /// Trailing bytes of an incomplete UTF-8 sequence, kept separate from
    /// the line buffer until the rest of the sequence arrives.
    utf8_tail: Vec<u8>,
}

impl FrameSplitter {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            utf8_tail: Vec::new(),
        }
    }

    /// Decode the next transport chunk and append it to the line buffer.
    pub fn extend(&mut self, chunk: &[u8]) {
        let mut bytes = std::mem::take(&mut self.utf8_tail);
        bytes.extend_from_slice(chunk);

        let mut rest: &[u8] = &bytes;
        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    self.buffer.push_str(text);
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    self.buffer.push_str(&String::from_utf8_lossy(valid));
                    match e.error_len() {
                        // Incomplete sequence at the end of the chunk: hold
                        // the bytes until the next chunk completes it.
                        None => {
                            self.utf8_tail = after.to_vec();
                            break;
                        }
                        // Genuinely invalid bytes: replace and move on.
                        Some(n) => {
                            self.buffer.push('\u{FFFD}');
                            rest = &after[n..];
                        }
                    }
                }
            }
        }
    }

    /// Pop the next complete line, with the `\n` terminator and a trailing
    /// `\r` stripped. Returns `None` while the buffer holds at most a
    /// partial line.
    pub fn next_line(&mut self) -> Option<String> {
        let idx = self.buffer.find('\n')?;
        let mut line: String = self.buffer.drain(..=idx).collect();
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
        Some(line)
    }

    /// Push a line (with its terminator) back onto the front of the buffer.
    /// Used when a `data:` payload fails to parse because the rest of it has
    /// not arrived yet; the line is retried once more bytes come in.
    pub fn restore(&mut self, line: &str) {
        self.buffer.insert(0, '\n');
        self.buffer.insert_str(0, line);
    }

    /// End of stream. Any unterminated remainder is an incomplete line and
    /// is dropped; it is returned so the caller can log it.
    pub fn finish(&mut self) -> Option<String> {
        self.utf8_tail.clear();
        if self.buffer.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.buffer))
        }
    }
}

impl Default for FrameSplitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_lines_and_strips_terminators() {
        let mut splitter = FrameSplitter::new();
        splitter.extend(b"first\nsecond\r\nthird");
        assert_eq!(splitter.next_line().as_deref(), Some("first"));
        assert_eq!(splitter.next_line().as_deref(), Some("second"));
        assert_eq!(splitter.next_line(), None);

        splitter.extend(b"\n");
        assert_eq!(splitter.next_line().as_deref(), Some("third"));
    }

    #[test]
    fn holds_back_partial_line_across_chunks() {
        let mut splitter = FrameSplitter::new();
        splitter.extend(b"data: hel");
        assert_eq!(splitter.next_line(), None);
        splitter.extend(b"lo\n");
        assert_eq!(splitter.next_line().as_deref(), Some("data: hello"));
    }

    #[test]
    fn decodes_multibyte_sequence_split_across_chunks() {
        // "é" is 0xC3 0xA9; cut between the two bytes.
        let mut splitter = FrameSplitter::new();
        splitter.extend(&[b'c', b'a', b'f', 0xC3]);
        assert_eq!(splitter.next_line(), None);
        splitter.extend(&[0xA9, b'\n']);
        assert_eq!(splitter.next_line().as_deref(), Some("café"));
    }

    #[test]
    fn invalid_bytes_become_replacement_chars() {
        let mut splitter = FrameSplitter::new();
        splitter.extend(&[b'a', 0xFF, b'b', b'\n']);
        assert_eq!(splitter.next_line().as_deref(), Some("a\u{FFFD}b"));
    }

    #[test]
    fn restore_puts_line_back_at_the_front() {
        let mut splitter = FrameSplitter::new();
        splitter.extend(b"one\ntwo\n");
        let line = splitter.next_line().expect("line available");
        splitter.restore(&line);
        assert_eq!(splitter.next_line().as_deref(), Some("one"));
        assert_eq!(splitter.next_line().as_deref(), Some("two"));
    }

    #[test]
    fn finish_discards_unterminated_remainder() {
        let mut splitter = FrameSplitter::new();
        splitter.extend(b"complete\npartial");
        assert_eq!(splitter.next_line().as_deref(), Some("complete"));
        assert_eq!(splitter.finish().as_deref(), Some("partial"));
        assert_eq!(splitter.next_line(), None);
        assert_eq!(splitter.finish(), None);
    }
}

//! The consuming side of an analysis stream: drives the frame splitter,
//! line classifier, and delta extractor over a response body and feeds the
//! accumulator in arrival order.

use crate::accumulator::StreamAccumulator;
use crate::event::{classify, extract_delta, DeltaOutcome, LineClass};
use crate::frame::FrameSplitter;
use crate::logging::StreamMetric;
use crate::types::{RelayError, Result};
use bytes::Bytes;
use futures_util::{Stream, StreamExt};

const MAX_STREAM_LINES: usize = 100_000;

/// Consume an SSE byte stream to completion. `on_fragment` fires after each
/// append so the caller can render incrementally; reading the next chunk is
/// the only suspension point, so dropping the future aborts the transport
/// read without touching text already accumulated.
///
/// Returns once a `[DONE]` marker is seen or the stream ends cleanly (both
/// complete the accumulator); a transport error fails the accumulator and is
/// returned to the caller with partial text preserved.
pub async fn consume_sse<S, E>(
    mut stream: S,
    accumulator: &mut StreamAccumulator,
    mut on_fragment: impl FnMut(&str),
) -> Result<()>
where
    S: Stream<Item = std::result::Result<Bytes, E>> + Unpin,
    E: Into<RelayError>,
{
    accumulator.start();
    let mut splitter = FrameSplitter::new();
    let mut metric = StreamMetric::new();
    let mut line_count = 0usize;

    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(bytes) => bytes,
            Err(e) => {
                let err = e.into();
                accumulator.fail(&err);
                return Err(err);
            }
        };
        metric.record_chunk(chunk.len());
        splitter.extend(&chunk);

        while let Some(line) = splitter.next_line() {
            line_count += 1;
            if line_count > MAX_STREAM_LINES {
                let err = RelayError::Internal(
                    format!("Stream exceeded max line limit ({})", MAX_STREAM_LINES),
                    tracing_error::SpanTrace::capture(),
                );
                tracing::error!("{}", err);
                accumulator.fail(&err);
                return Err(err);
            }

            match classify(&line) {
                LineClass::Comment | LineClass::Blank => continue,
                LineClass::Terminator => {
                    tracing::debug!("Stream end marker [DONE] received");
                    accumulator.complete();
                    metric.log_summary();
                    return Ok(());
                }
                LineClass::Data(payload) => match extract_delta(payload) {
                    DeltaOutcome::Parsed(Some(fragment)) => {
                        metric.record_fragment(&fragment);
                        accumulator.push_fragment(&fragment);
                        on_fragment(&fragment);
                    }
                    DeltaOutcome::Parsed(None) => {}
                    // Payload cut mid-value; put the line back and wait for
                    // the next chunk.
                    DeltaOutcome::Incomplete => {
                        splitter.restore(&line);
                        break;
                    }
                },
            }
        }
    }

    // Clean transport end without an explicit marker still counts as
    // success; some upstreams omit [DONE].
    if let Some(remainder) = splitter.finish() {
        tracing::debug!(
            "Discarding unterminated trailing line ({} chars) at stream end",
            remainder.len()
        );
    }
    accumulator.complete();
    metric.log_summary();
    Ok(())
}

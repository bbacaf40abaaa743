//! Streaming response handling for Ollama-compatible servers
//!
//! Ollama streams newline-delimited JSON. Network chunks do not respect line
//! boundaries, so bytes are buffered until a full line is available.

use std::collections::VecDeque;
use std::fmt::Display;
use std::pin::Pin;

use futures::stream::{self, Stream, StreamExt};
use tracing::trace;

use super::wire::TransportResponse;
use crate::error::InferenceError;

/// Stream of decoded response elements
pub type TransportStream =
    Pin<Box<dyn Stream<Item = Result<TransportResponse, InferenceError>> + Send>>;

struct Decoder<S> {
    bytes: S,
    buffer: Vec<u8>,
    pending: VecDeque<Result<TransportResponse, InferenceError>>,
    finished: bool,
}

/// Decode an NDJSON byte stream into transport responses
pub fn decode_ndjson<S, B, E>(bytes: S) -> TransportStream
where
    S: Stream<Item = Result<B, E>> + Send + Unpin + 'static,
    B: AsRef<[u8]>,
    E: Display,
{
    let decoder = Decoder {
        bytes,
        buffer: Vec::new(),
        pending: VecDeque::new(),
        finished: false,
    };

    Box::pin(stream::unfold(decoder, |mut decoder| async move {
        loop {
            if let Some(item) = decoder.pending.pop_front() {
                return Some((item, decoder));
            }
            if decoder.finished {
                return None;
            }

            match decoder.bytes.next().await {
                Some(Ok(chunk)) => {
                    decoder.buffer.extend_from_slice(chunk.as_ref());
                    let lines = drain_lines(&mut decoder.buffer);
                    decoder.pending.extend(lines);
                },
                Some(Err(e)) => {
                    decoder.finished = true;
                    decoder
                        .pending
                        .push_back(Err(InferenceError::StreamError(e.to_string())));
                },
                None => {
                    decoder.finished = true;
                    let rest = std::mem::take(&mut decoder.buffer);
                    if !rest.iter().all(u8::is_ascii_whitespace) {
                        decoder.pending.push_back(parse_line(&rest));
                    }
                },
            }
        }
    }))
}

/// Remove every complete line from `buffer` and parse it
fn drain_lines(buffer: &mut Vec<u8>) -> Vec<Result<TransportResponse, InferenceError>> {
    let mut items = Vec::new();
    while let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
        let line: Vec<u8> = buffer.drain(..=pos).collect();
        let line = &line[..pos];
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        items.push(parse_line(line));
    }
    items
}

fn parse_line(line: &[u8]) -> Result<TransportResponse, InferenceError> {
    let text = std::str::from_utf8(line)
        .map_err(|e| InferenceError::InvalidResponse(format!("Invalid UTF-8: {e}")))?;
    trace!(line = %text, "Parsing stream chunk");

    serde_json::from_str(text.trim_end_matches('\r'))
        .map_err(|e| InferenceError::InvalidResponse(format!("JSON parse error: {e}")))
}

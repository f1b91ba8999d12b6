//! Incremental decoder for OpenAI-style chat-completion event streams.
//!
//! Upstream sends `data: {"choices":[{"delta":{"content":"..."}}]}` lines in
//! arbitrary byte chunks, possibly splitting a line (or a UTF-8 sequence)
//! across chunks. The decoder buffers raw bytes and only decodes complete
//! lines, so split characters are reassembled before conversion.

use std::collections::VecDeque;

use futures::stream::{self, Stream, StreamExt};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::llm_client::ByteStream;

pub const DONE_SENTINEL: &str = "[DONE]";

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Debug, Default, Deserialize)]
struct Delta {
    content: Option<String>,
}

#[derive(Debug, Default)]
pub struct SseDeltaDecoder {
    buffer: Vec<u8>,
    done: bool,
}

impl SseDeltaDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the `[DONE]` sentinel has been seen. Later input is ignored.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Consumes one chunk and returns the non-empty content deltas completed by it.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        if self.done {
            return Vec::new();
        }
        self.buffer.extend_from_slice(chunk);

        let mut deltas = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            deltas.extend(self.decode_line(&line[..pos]));
            if self.done {
                self.buffer.clear();
                break;
            }
        }
        deltas
    }

    /// Decodes whatever is left in the buffer once upstream has closed.
    pub fn finish(&mut self) -> Vec<String> {
        if self.done || self.buffer.is_empty() {
            return Vec::new();
        }
        let line = std::mem::take(&mut self.buffer);
        self.decode_line(&line).into_iter().collect()
    }

    fn decode_line(&mut self, raw: &[u8]) -> Option<String> {
        let decoded = String::from_utf8_lossy(raw);
        let line = decoded.strip_suffix('\r').unwrap_or(&decoded);

        if line.is_empty() || line.starts_with(':') {
            return None;
        }
        let data = line.strip_prefix("data:")?.trim();
        if data == DONE_SENTINEL {
            self.done = true;
            return None;
        }

        match serde_json::from_str::<StreamChunk>(data) {
            Ok(chunk) => chunk
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.delta.content)
                .filter(|content| !content.is_empty()),
            Err(e) => {
                warn!("Skipping malformed stream line ({e}): {data}");
                None
            }
        }
    }
}

/// Re-encodes one delta in the shape the browser client consumes.
pub fn delta_payload(content: &str) -> String {
    json!({ "choices": [{ "delta": { "content": content } }] }).to_string()
}

struct RelayState {
    upstream: ByteStream,
    decoder: SseDeltaDecoder,
    pending: VecDeque<String>,
    exhausted: bool,
}

/// Turns the raw upstream byte stream into a stream of content deltas.
/// Ends at `[DONE]`, at upstream close, or at the first transport error.
pub fn decode_deltas(upstream: ByteStream) -> impl Stream<Item = String> + Send + 'static {
    let state = RelayState {
        upstream,
        decoder: SseDeltaDecoder::new(),
        pending: VecDeque::new(),
        exhausted: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(delta) = state.pending.pop_front() {
                return Some((delta, state));
            }
            if state.exhausted {
                return None;
            }
            match state.upstream.next().await {
                Some(Ok(chunk)) => {
                    let deltas = state.decoder.feed(&chunk);
                    state.pending.extend(deltas);
                    state.exhausted = state.decoder.is_done();
                }
                Some(Err(e)) => {
                    warn!("Upstream stream interrupted: {e}");
                    state.exhausted = true;
                }
                None => {
                    let deltas = state.decoder.finish();
                    state.pending.extend(deltas);
                    state.exhausted = true;
                }
            }
        }
    })
}

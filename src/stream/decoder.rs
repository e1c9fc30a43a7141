//! Line assembly and per-line classification for server-sent events.

use memchr::memchr;
use serde_json::Value;

use crate::constants::{SSE_DATA_PREFIX, SSE_DONE_SENTINEL};
use crate::error::{Error, Result};

/// What a single line contributes to the event sequence.
#[derive(Debug)]
pub enum LineOutcome {
    /// Not a `data: ` line (blank keep-alive, `:` comment, `event:`, `id:` ...).
    Skip,
    /// A decoded JSON event.
    Event(Value),
    /// The `[DONE]` sentinel.
    Done,
    /// A `data: ` payload that is not valid JSON.
    Invalid(Error),
}

/// Classifies one line of an SSE body.
///
/// Only lines starting with the literal `"data: "` are considered. The
/// remainder is either the sentinel or a JSON document.
pub fn decode_line(line: &str) -> LineOutcome {
    let Some(payload) = line.strip_prefix(SSE_DATA_PREFIX) else {
        return LineOutcome::Skip;
    };

    if payload == SSE_DONE_SENTINEL {
        return LineOutcome::Done;
    }

    match serde_json::from_str::<Value>(payload) {
        Ok(value) => LineOutcome::Event(value),
        Err(e) => LineOutcome::Invalid(Error::decode(payload, e)),
    }
}

/// Accumulates raw body chunks and hands out complete lines.
///
/// Holds at most one partial line between chunks. Line terminators (`\n` or
/// `\r\n`) are stripped.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buffer: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Pops the next complete line, if one is buffered.
    ///
    /// A `data: ` line that is not valid UTF-8 comes back as a decode error
    /// carrying the lossy payload. Other malformed lines are passed through
    /// lossily, since the decoder skips them anyway.
    pub fn next_line(&mut self) -> Option<Result<String>> {
        let newline_pos = memchr(b'\n', &self.buffer)?;
        let mut line: Vec<u8> = self.buffer.drain(..=newline_pos).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(String::from_utf8(line).or_else(|e| {
            let lossy = String::from_utf8_lossy(e.as_bytes()).into_owned();
            match lossy.strip_prefix(SSE_DATA_PREFIX) {
                Some(payload) => Err(Error::invalid_utf8(payload)),
                None => Ok(lossy),
            }
        }))
    }

    /// Terminates a trailing partial line so the final [`next_line`](Self::next_line)
    /// call can return it.
    pub fn finish(&mut self) {
        if !self.buffer.is_empty() {
            self.buffer.push(b'\n');
        }
    }
}

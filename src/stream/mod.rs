//! Server-sent-event decoding for streamed chat completions.
//!
//! [`EventStream`] turns an HTTP response body into a lazy, single-consumer
//! sequence of JSON events. Each `data: ` line becomes one event, in arrival
//! order. The `[DONE]` sentinel ends the sequence cleanly. A malformed payload
//! or a transport failure ends it with an error, and nothing follows that
//! error. Nothing is read from the source until the consumer polls.

mod decoder;

pub use decoder::{decode_line, LineBuffer, LineOutcome};

use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};
use serde_json::Value;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::{Error, Result};

/// A pull-based stream of decoded SSE events.
pub struct EventStream {
    inner: BoxStream<'static, Result<Value>>,
}

impl EventStream {
    /// Decodes a stream of already-split text lines.
    pub fn from_lines<S>(lines: S) -> Self
    where
        S: Stream<Item = Result<String>> + Send + 'static,
    {
        Self {
            inner: decode_lines(lines.boxed()).boxed(),
        }
    }

    /// Decodes a raw byte stream such as `reqwest::Response::bytes_stream`,
    /// with transport errors already mapped to [`Error`].
    pub fn from_bytes<S, B>(bytes: S) -> Self
    where
        S: Stream<Item = Result<B>> + Send + 'static,
        B: AsRef<[u8]> + Send + 'static,
    {
        Self::from_lines(split_lines(bytes.boxed()))
    }

    /// Moves decoding onto a background tokio task.
    ///
    /// The hand-off channel holds a single event, so the producer only reads
    /// ahead by one event. The task stops when the stream ends or this handle
    /// is dropped.
    pub fn spawn(self) -> Self {
        let (tx, rx) = mpsc::channel::<Result<Value>>(1);
        let mut source = self.inner;
        tokio::spawn(async move {
            while let Some(item) = source.next().await {
                if tx.send(item).await.is_err() {
                    debug!("event stream consumer dropped; stopping producer");
                    break;
                }
            }
        });

        let received = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|item| (item, rx))
        });
        Self {
            inner: received.boxed(),
        }
    }

    /// Maps each event to its `choices[0].delta.content` text fragment,
    /// dropping events that carry no text.
    pub fn text_deltas(self) -> impl Stream<Item = Result<String>> + Send {
        self.filter_map(|item| async move {
            match item {
                Ok(event) => delta_content(&event)
                    .filter(|s| !s.is_empty())
                    .map(|s| Ok(s.to_string())),
                Err(e) => Some(Err(e)),
            }
        })
    }
}

impl Stream for EventStream {
    type Item = Result<Value>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

/// Text fragment of a streamed chunk (`choices[0].delta.content`).
pub fn delta_content(event: &Value) -> Option<&str> {
    event
        .pointer("/choices/0/delta/content")
        .and_then(Value::as_str)
}

struct LineState {
    source: BoxStream<'static, Result<String>>,
    finished: bool,
}

fn decode_lines(source: BoxStream<'static, Result<String>>) -> impl Stream<Item = Result<Value>> {
    let state = LineState {
        source,
        finished: false,
    };
    stream::unfold(state, |mut st| async move {
        if st.finished {
            return None;
        }
        loop {
            let line = match st.source.next().await {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    st.finished = true;
                    return Some((Err(e), st));
                }
                None => {
                    st.finished = true;
                    return Some((Err(Error::truncated_stream()), st));
                }
            };
            match decode_line(&line) {
                LineOutcome::Skip => continue,
                LineOutcome::Done => {
                    debug!("event stream reached [DONE]");
                    return None;
                }
                LineOutcome::Event(value) => return Some((Ok(value), st)),
                LineOutcome::Invalid(e) => {
                    st.finished = true;
                    return Some((Err(e), st));
                }
            }
        }
    })
}

struct ByteState<B> {
    source: BoxStream<'static, Result<B>>,
    lines: LineBuffer,
    exhausted: bool,
    failed: bool,
}

fn split_lines<B>(source: BoxStream<'static, Result<B>>) -> impl Stream<Item = Result<String>>
where
    B: AsRef<[u8]> + Send + 'static,
{
    let state = ByteState {
        source,
        lines: LineBuffer::new(),
        exhausted: false,
        failed: false,
    };
    stream::unfold(state, |mut st| async move {
        if st.failed {
            return None;
        }
        loop {
            match st.lines.next_line() {
                Some(Ok(line)) => return Some((Ok(line), st)),
                Some(Err(e)) => {
                    st.failed = true;
                    return Some((Err(e), st));
                }
                None => {}
            }
            if st.exhausted {
                return None;
            }
            match st.source.next().await {
                Some(Ok(chunk)) => st.lines.extend(chunk.as_ref()),
                Some(Err(e)) => {
                    st.failed = true;
                    return Some((Err(e), st));
                }
                None => {
                    st.exhausted = true;
                    st.lines.finish();
                }
            }
        }
    })
}

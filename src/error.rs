//! Typed errors for the completion client, stream decoder, and conversation loop.
//!
//! Transport, API, and decode failures abort the current run or stream and are
//! surfaced to the caller. Tool failures never appear here: the conversation
//! loop folds them into the history as tool messages instead.

/// Errors returned by [`GroqClient`](crate::provider::GroqClient),
/// [`EventStream`](crate::stream::EventStream), and
/// [`Agent`](crate::agent::Agent).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The connection failed, dropped mid-stream, or a stream was refused with
    /// a non-success status before any data arrived.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        status: Option<u16>,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The API answered with a non-success status, or with an error object
    /// inside an otherwise successful body.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        error_type: Option<String>,
        error_code: Option<String>,
    },

    /// A response body or stream payload was not valid JSON of the expected shape.
    #[error("failed to decode payload: {raw}")]
    Decode {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    /// The outbound request could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// A request was rejected before anything was sent, e.g. a malformed image URL.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The model kept requesting tools past the configured turn cap.
    #[error("conversation exceeded {turns} turns without a final answer")]
    TurnLimit { turns: usize },
}

/// Coarse classification of an [`Error`], for callers that branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Api,
    Decode,
    Encode,
    InvalidRequest,
    TurnLimit,
}

impl Error {
    /// Returns the error's kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport { .. } => ErrorKind::Transport,
            Error::Api { .. } => ErrorKind::Api,
            Error::Decode { .. } => ErrorKind::Decode,
            Error::Encode(_) => ErrorKind::Encode,
            Error::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Error::TurnLimit { .. } => ErrorKind::TurnLimit,
        }
    }

    /// HTTP status carried by an API error or a refused stream.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Transport { status, .. } => *status,
            _ => None,
        }
    }

    pub(crate) fn transport(message: impl Into<String>, source: reqwest::Error) -> Self {
        Error::Transport {
            message: message.into(),
            status: None,
            source: Some(source),
        }
    }

    /// A streaming request answered with a non-success status.
    pub(crate) fn stream_refused(status: u16, body: &str) -> Self {
        let parsed = ErrorBody::parse(body);
        Error::Transport {
            message: format!("stream request failed with status {status}: {}", parsed.message),
            status: Some(status),
            source: None,
        }
    }

    /// The byte stream ended without the `[DONE]` sentinel.
    pub(crate) fn truncated_stream() -> Self {
        Error::Transport {
            message: "stream closed before [DONE]".to_string(),
            status: None,
            source: None,
        }
    }

    pub(crate) fn decode(raw: impl Into<String>, source: serde_json::Error) -> Self {
        Error::Decode {
            raw: raw.into(),
            source,
        }
    }

    /// A `data: ` line whose bytes are not valid UTF-8. `raw` is the lossy
    /// rendering of the payload.
    pub(crate) fn invalid_utf8(raw: impl Into<String>) -> Self {
        use serde::de::Error as _;
        Error::Decode {
            raw: raw.into(),
            source: serde_json::Error::custom("stream payload is not valid UTF-8"),
        }
    }

    /// Builds an API error from a status and a raw response body.
    pub(crate) fn from_response_body(status: u16, body: &str) -> Self {
        let parsed = ErrorBody::parse(body);
        Error::Api {
            status,
            message: parsed.message,
            error_type: parsed.error_type,
            error_code: parsed.error_code,
        }
    }
}

/// Fields pulled out of an error response body.
struct ErrorBody {
    message: String,
    error_type: Option<String>,
    error_code: Option<String>,
}

impl ErrorBody {
    /// Reads `error.message`, `error.type`, and `error.code` from a JSON body
    /// when present; otherwise the trimmed body becomes the message.
    fn parse(body: &str) -> Self {
        let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
        let error_obj = parsed.as_ref().and_then(|v| v.get("error"));

        let message = error_obj
            .and_then(|e| match e {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Object(map) => {
                    map.get("message").and_then(|m| m.as_str()).map(String::from)
                }
                _ => None,
            })
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    "<no body>".to_string()
                } else {
                    trimmed.to_string()
                }
            });

        Self {
            message,
            error_type: error_obj.and_then(|e| string_field(e, "type")),
            error_code: error_obj.and_then(|e| string_field(e, "code")),
        }
    }
}

fn string_field(value: &serde_json::Value, key: &str) -> Option<String> {
    match value.get(key)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Convenience alias used across the library.
pub type Result<T> = std::result::Result<T, Error>;

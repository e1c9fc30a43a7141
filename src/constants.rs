//! Centralized constants for hayate.
//!
//! All magic numbers, default strings, and configuration constants live here
//! so they can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "hayate";

/// Default chat model identifier.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Default system prompt used by `hayate ask` when none is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Use the provided tools when they help answer the question. \
Be concise.";

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Per-project configuration filename.
pub const PROJECT_CONFIG_FILENAME: &str = "hayate.toml";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "HAYATE_LOG";

/// Log filter used when `HAYATE_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

// --- API endpoints ---

/// Default base URL of the OpenAI-compatible API.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Chat completions endpoint, relative to the base URL.
pub const CHAT_COMPLETIONS_ENDPOINT: &str = "/chat/completions";

/// Model listing endpoint, relative to the base URL.
pub const MODELS_ENDPOINT: &str = "/models";

/// Speech-to-text endpoint, relative to the base URL.
pub const TRANSCRIPTIONS_ENDPOINT: &str = "/audio/transcriptions";

/// Speech-to-English-text endpoint, relative to the base URL.
pub const TRANSLATIONS_ENDPOINT: &str = "/audio/translations";

/// Seconds to wait for a TCP/TLS connection before giving up.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

// --- Audio and vision ---

/// Model used by `hayate transcribe` when none is given.
pub const DEFAULT_AUDIO_MODEL: &str = "whisper-large-v3";

/// `response_format` sent with audio requests unless overridden.
pub const DEFAULT_AUDIO_RESPONSE_FORMAT: &str = "json";

/// Model used by `hayate vision` when none is given.
pub const DEFAULT_VISION_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

// --- Conversation loop ---

/// Sampling temperature sent with every completion request.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Turn cap applied by the CLI when neither the flag nor config sets one.
pub const DEFAULT_MAX_TURNS: usize = 16;

/// `tool_choice` value sent alongside tool definitions.
pub const TOOL_CHOICE_AUTO: &str = "auto";

// --- SSE framing ---

/// Prefix marking an SSE line that carries a payload.
pub const SSE_DATA_PREFIX: &str = "data: ";

/// Payload signalling the normal end of a stream.
pub const SSE_DONE_SENTINEL: &str = "[DONE]";

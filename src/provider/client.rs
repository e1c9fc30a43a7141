//! HTTP client for an OpenAI-compatible chat-completion API.
//!
//! [`GroqClient`] wraps a `reqwest::Client` plus the endpoint and key. It
//! implements [`CompletionInvoker`] for the conversation loop, and it also
//! provides the one-shot chat helpers, image-URL vision, SSE streaming,
//! audio transcription/translation, and model listing.

use anyhow::Context;
use futures::{StreamExt, TryStreamExt};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::audio::{parse_audio_output, AudioOutput, AudioRequest, AudioTask};
use super::invoker::CompletionInvoker;
use super::request::ChatRequest;
use super::response::{ChatCompletion, ModelInfo, ModelList};
use crate::config::Config;
use crate::constants::{
    CHAT_COMPLETIONS_ENDPOINT, DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, MODELS_ENDPOINT,
};
use crate::error::{Error, Result};
use crate::message::Message;
use crate::stream::EventStream;

/// Endpoint and credentials for a [`GroqClient`].
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub api_key: String,
    pub base_url: String,
    pub connect_timeout: Duration,
}

impl ApiSettings {
    /// Settings for the default endpoint with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolves settings from the loaded config.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.resolve_api_key().context(
            "No API key found. Set GROQ_API_KEY or configure api.api_key in config.toml",
        )?;
        Ok(Self {
            api_key,
            base_url: config.base_url().to_string(),
            connect_timeout: config.connect_timeout(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint)
    }
}

/// A configured client ready to send chat-completion requests.
#[derive(Debug, Clone)]
pub struct GroqClient {
    http: reqwest::Client,
    settings: ApiSettings,
}

impl GroqClient {
    /// Builds a client with its own connection pool.
    pub fn new(settings: ApiSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|e| Error::transport("failed to build HTTP client", e))?;
        Ok(Self::with_http(http, settings))
    }

    /// Uses a caller-supplied `reqwest::Client`, e.g. one shared across services.
    pub fn with_http(http: reqwest::Client, settings: ApiSettings) -> Self {
        Self { http, settings }
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    fn post_json(&self, endpoint: &str, request: &ChatRequest) -> Result<reqwest::RequestBuilder> {
        let body = serde_json::to_vec(request).map_err(Error::Encode)?;
        Ok(self
            .http
            .post(self.settings.url(endpoint))
            .bearer_auth(&self.settings.api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(body))
    }

    /// Sends a chat-completion request and returns the parsed response.
    pub async fn create_chat_completion(&self, request: &ChatRequest) -> Result<ChatCompletion> {
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "sending chat completion"
        );
        let response = self
            .post_json(CHAT_COMPLETIONS_ENDPOINT, request)?
            .send()
            .await
            .map_err(|e| Error::transport("chat completion request failed", e))?;
        let body = success_body(response).await?;
        parse_completion(&body)
    }

    /// One-shot chat: optional system message, one user message.
    pub async fn chat(
        &self,
        model: &str,
        user_message: &str,
        system_message: Option<&str>,
        temperature: f32,
    ) -> Result<ChatCompletion> {
        let request = ChatRequest::simple(model, user_message, system_message, temperature);
        self.create_chat_completion(&request).await
    }

    /// Like [`chat`](Self::chat) but returns only the answer text (`""` when absent).
    pub async fn chat_text(
        &self,
        model: &str,
        user_message: &str,
        system_message: Option<&str>,
        temperature: f32,
    ) -> Result<String> {
        let completion = self
            .chat(model, user_message, system_message, temperature)
            .await?;
        Ok(completion.content().unwrap_or_default().to_string())
    }

    /// Asks a vision model about one image given by URL.
    ///
    /// The URL must be `http`, `https` or a `data:` URI; anything else fails
    /// with [`Error::InvalidRequest`] before a request is sent.
    pub async fn chat_with_image_url(
        &self,
        model: &str,
        prompt: &str,
        image_url: &str,
        temperature: Option<f32>,
    ) -> Result<ChatCompletion> {
        validate_image_url(image_url)?;
        let messages = vec![Message::user_with_image(prompt, image_url)];
        let mut request = ChatRequest::new(model, messages);
        request.temperature = temperature;
        self.create_chat_completion(&request).await
    }

    /// Streams a chat completion as decoded SSE events.
    ///
    /// Forces `stream: true` on a copy of the request. Nothing is sent until
    /// the returned stream is first polled. A non-success status ends the
    /// stream with a transport error carrying that status.
    pub fn stream_chat(&self, request: &ChatRequest) -> EventStream {
        let request = request.clone().streaming();
        let prepared = self.post_json(CHAT_COMPLETIONS_ENDPOINT, &request);

        let body = futures::stream::once(async move {
            let response = prepared?
                .send()
                .await
                .map_err(|e| Error::transport("stream request failed", e))?;

            let status = response.status();
            if !status.is_success() {
                let text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<no body>".to_string());
                return Err(Error::stream_refused(status.as_u16(), &text));
            }

            debug!(status = status.as_u16(), "event stream opened");
            Ok(response
                .bytes_stream()
                .map_err(|e| Error::transport("stream interrupted", e)))
        })
        .try_flatten();

        EventStream::from_bytes(body)
    }

    /// Streams a one-shot chat as text fragments.
    pub fn chat_text_stream(
        &self,
        model: &str,
        user_message: &str,
        system_message: Option<&str>,
        temperature: f32,
    ) -> impl futures::Stream<Item = Result<String>> + Send {
        let request = ChatRequest::simple(model, user_message, system_message, temperature);
        self.stream_chat(&request).text_deltas()
    }

    /// Transcribes speech in its own language.
    pub async fn create_transcription(&self, request: AudioRequest) -> Result<AudioOutput> {
        self.send_audio(AudioTask::Transcription, request).await
    }

    /// Translates speech into English text.
    pub async fn create_translation(&self, request: AudioRequest) -> Result<AudioOutput> {
        self.send_audio(AudioTask::Translation, request).await
    }

    async fn send_audio(&self, task: AudioTask, request: AudioRequest) -> Result<AudioOutput> {
        debug!(
            task = ?task,
            model = %request.model,
            file = %request.file_name,
            bytes = request.file.len(),
            "sending audio request"
        );
        let response_format = request.response_format.clone();
        let response = self
            .http
            .post(self.settings.url(task.endpoint()))
            .bearer_auth(&self.settings.api_key)
            .multipart(request.into_form(task))
            .send()
            .await
            .map_err(|e| Error::transport("audio request failed", e))?;
        let body = success_body(response).await?;
        parse_audio_output(&response_format, &body)
    }

    /// Lists the models available to this key.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let response = self
            .http
            .get(self.settings.url(MODELS_ENDPOINT))
            .bearer_auth(&self.settings.api_key)
            .send()
            .await
            .map_err(|e| Error::transport("model listing request failed", e))?;
        let body = success_body(response).await?;

        let list: ModelList = serde_json::from_str(&body).map_err(|e| Error::decode(&body, e))?;
        Ok(list.data)
    }
}

#[async_trait::async_trait]
impl CompletionInvoker for GroqClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion> {
        self.create_chat_completion(request).await
    }
}

/// Reads the body, turning a non-success status into an API error.
async fn success_body(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| Error::transport("failed to read response body", e))?;
    if !status.is_success() {
        return Err(Error::from_response_body(status.as_u16(), &body));
    }
    Ok(body)
}

fn validate_image_url(url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(Error::InvalidRequest("image URL cannot be empty".to_string()));
    }
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| Error::InvalidRequest(format!("invalid image URL {url:?}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" | "data" => Ok(()),
        other => Err(Error::InvalidRequest(format!(
            "unsupported image URL scheme: {other}"
        ))),
    }
}

/// Parses a 2xx completion body, surfacing an embedded `error` object as an
/// API error with status 400.
fn parse_completion(body: &str) -> Result<ChatCompletion> {
    let value: Value = serde_json::from_str(body).map_err(|e| Error::decode(body, e))?;
    if value.get("error").is_some_and(|e| !e.is_null()) {
        return Err(Error::from_response_body(400, body));
    }
    serde_json::from_value(value).map_err(|e| Error::decode(body, e))
}

#[cfg(test)]
mod tests;

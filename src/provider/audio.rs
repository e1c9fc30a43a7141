//! Multipart audio requests: transcription and translation.

use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::constants::{
    DEFAULT_AUDIO_RESPONSE_FORMAT, TRANSCRIPTIONS_ENDPOINT, TRANSLATIONS_ENDPOINT,
};
use crate::error::{Error, Result};

/// Which audio endpoint a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioTask {
    /// Speech to text in the spoken language.
    Transcription,
    /// Speech to English text.
    Translation,
}

impl AudioTask {
    pub(crate) fn endpoint(self) -> &'static str {
        match self {
            AudioTask::Transcription => TRANSCRIPTIONS_ENDPOINT,
            AudioTask::Translation => TRANSLATIONS_ENDPOINT,
        }
    }
}

/// An audio file plus the form fields sent alongside it.
#[derive(Debug, Clone)]
pub struct AudioRequest {
    pub file: Vec<u8>,
    pub file_name: String,
    pub model: String,
    pub prompt: Option<String>,
    pub response_format: String,
    /// Spoken language hint. Only sent for transcriptions.
    pub language: Option<String>,
    pub temperature: Option<f32>,
}

impl AudioRequest {
    pub fn new(
        file: impl Into<Vec<u8>>,
        file_name: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            file_name: file_name.into(),
            model: model.into(),
            prompt: None,
            response_format: DEFAULT_AUDIO_RESPONSE_FORMAT.to_string(),
            language: None,
            temperature: None,
        }
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// `json`, `verbose_json`, `text`, `srt` or `vtt`.
    pub fn response_format(mut self, format: impl Into<String>) -> Self {
        self.response_format = format.into();
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Text fields in send order. Blank prompts and languages are left out.
    pub(crate) fn text_fields(&self, task: AudioTask) -> Vec<(&'static str, String)> {
        let mut fields = vec![("model", self.model.clone())];
        if let Some(prompt) = non_blank(&self.prompt) {
            fields.push(("prompt", prompt.to_string()));
        }
        fields.push(("response_format", self.response_format.clone()));
        if task == AudioTask::Transcription {
            if let Some(language) = non_blank(&self.language) {
                fields.push(("language", language.to_string()));
            }
        }
        if let Some(temperature) = self.temperature {
            fields.push(("temperature", temperature.to_string()));
        }
        fields
    }

    pub(crate) fn into_form(self, task: AudioTask) -> Form {
        let fields = self.text_fields(task);
        let file = Part::bytes(self.file).file_name(self.file_name);
        fields
            .into_iter()
            .fold(Form::new().part("file", file), |form, (name, value)| {
                form.text(name, value)
            })
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Result of a transcription or translation.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioOutput {
    /// The recognized text.
    pub text: String,
    /// The whole response: the JSON object for `json`/`verbose_json`,
    /// otherwise the body as a JSON string.
    pub raw: Value,
}

/// Interprets a 2xx audio response according to the requested format.
pub(crate) fn parse_audio_output(response_format: &str, body: &str) -> Result<AudioOutput> {
    match response_format {
        "json" | "verbose_json" => {
            let raw: Value = serde_json::from_str(body).map_err(|e| Error::decode(body, e))?;
            let text = raw
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            Ok(AudioOutput { text, raw })
        }
        _ => Ok(AudioOutput {
            text: body.to_string(),
            raw: Value::String(body.to_string()),
        }),
    }
}

//! Outbound chat-completion request payload.

use serde::Serialize;

use crate::constants::TOOL_CHOICE_AUTO;
use crate::message::Message;
use crate::tools::ToolDefinition;

/// Body of a `POST /chat/completions` request.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub stream: bool,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            tools: Vec::new(),
            tool_choice: None,
            temperature: None,
            stream: false,
        }
    }

    /// A one-shot request: optional system message followed by the user message.
    ///
    /// A blank system message is treated as absent.
    pub fn simple(
        model: impl Into<String>,
        user_message: &str,
        system_message: Option<&str>,
        temperature: f32,
    ) -> Self {
        Self::new(model, opening_messages(user_message, system_message)).temperature(temperature)
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Attaches tool definitions and lets the model decide whether to call them.
    ///
    /// `tool_choice` is only sent when there is at least one tool, since the
    /// API rejects `tool_choice` without `tools`.
    pub fn tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tool_choice = (!tools.is_empty()).then(|| TOOL_CHOICE_AUTO.to_string());
        self.tools = tools;
        self
    }

    pub fn streaming(mut self) -> Self {
        self.stream = true;
        self
    }
}

/// `[system?, user]`, skipping a missing or blank system message.
pub fn opening_messages(user_message: &str, system_message: Option<&str>) -> Vec<Message> {
    let mut messages = Vec::with_capacity(2);
    if let Some(sys) = system_message.filter(|s| !s.trim().is_empty()) {
        messages.push(Message::system(sys));
    }
    messages.push(Message::user(user_message));
    messages
}

//! The tool-calling conversation loop.
//!
//! [`Agent::run_conversation`] turns one user prompt into a final answer. Each
//! turn sends the whole history to the [`CompletionInvoker`]. If the model asks
//! for tools, every call in that turn runs concurrently, the results are
//! appended in call order, and the loop asks the model again. The run ends
//! when a response carries text and no tool calls.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::constants::DEFAULT_TEMPERATURE;
use crate::error::{Error, Result};
use crate::message::{Message, ToolCall};
use crate::provider::{opening_messages, ChatRequest, CompletionInvoker};
use crate::tools::{self, Tool};

/// Knobs for a conversation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentOptions {
    /// Sampling temperature sent with every request.
    pub temperature: f32,
    /// Maximum number of completion requests per run. `None` trusts the
    /// model to stop asking for tools.
    pub max_turns: Option<usize>,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_turns: None,
        }
    }
}

impl AgentOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            temperature: config.temperature(),
            max_turns: config.max_turns(),
        }
    }

    pub fn max_turns(mut self, max_turns: Option<usize>) -> Self {
        self.max_turns = max_turns;
        self
    }
}

/// Drives conversations against a completion backend.
pub struct Agent<I> {
    invoker: I,
    options: AgentOptions,
}

impl<I: CompletionInvoker> Agent<I> {
    pub fn new(invoker: I) -> Self {
        Self::with_options(invoker, AgentOptions::default())
    }

    pub fn with_options(invoker: I, options: AgentOptions) -> Self {
        Self { invoker, options }
    }

    pub fn options(&self) -> &AgentOptions {
        &self.options
    }

    /// Runs one conversation to completion.
    ///
    /// Returns `Ok(Some(text))` for a final answer and `Ok(None)` when the
    /// model returns no choices, or neither text nor tool calls. Unknown
    /// tools and failing executors are reported back to the model as tool
    /// messages and never end the run.
    ///
    /// # Errors
    ///
    /// Any invoker failure ends the run unchanged. Exceeding
    /// [`AgentOptions::max_turns`] returns [`Error::TurnLimit`].
    pub async fn run_conversation(
        &self,
        prompt: &str,
        tools: &[Arc<dyn Tool>],
        model: &str,
        system_message: Option<&str>,
    ) -> Result<Option<String>> {
        let definitions = tools::definitions(tools);
        let mut history = opening_messages(prompt, system_message);
        let mut turns = 0usize;

        loop {
            if let Some(limit) = self.options.max_turns {
                if turns >= limit {
                    warn!(turns = limit, "turn limit reached without a final answer");
                    return Err(Error::TurnLimit { turns: limit });
                }
            }
            turns += 1;

            let request = ChatRequest::new(model, std::mem::take(&mut history))
                .tools(definitions.clone())
                .temperature(self.options.temperature);
            debug!(turn = turns, messages = request.messages.len(), "awaiting model");
            let outcome = self.invoker.complete(&request).await;
            history = request.messages;
            let completion = outcome?;

            let Some(message) = completion.choices.into_iter().next().map(|c| c.message) else {
                warn!(turn = turns, "response had no choices");
                return Ok(None);
            };

            if !message.has_tool_calls() {
                let text = message.text();
                if text.is_empty() {
                    warn!(turn = turns, "response had neither content nor tool calls");
                    return Ok(None);
                }
                info!(turn = turns, "final answer received");
                return Ok(Some(text.to_string()));
            }

            let calls = message.tool_calls.clone();
            history.push(message);

            info!(turn = turns, calls = calls.len(), "dispatching tool calls");
            let results = join_all(calls.iter().map(|call| dispatch(tools, call))).await;
            history.extend(results);
            debug!(turn = turns, "tool results appended, continuing");
        }
    }
}

/// Runs one tool call and wraps the outcome, success or not, as a tool message.
async fn dispatch(tools: &[Arc<dyn Tool>], call: &ToolCall) -> Message {
    let name = call.function_name();
    let content = match tools::find_tool(tools, name) {
        Some(tool) => {
            debug!(tool = name, id = %call.id, "executing tool");
            match tool.execute(call.arguments()).await {
                Ok(output) => {
                    debug!(tool = name, id = %call.id, bytes = output.len(), "tool finished");
                    output
                }
                Err(e) => {
                    warn!(tool = name, id = %call.id, error = %e, "tool failed");
                    format!("Error: {e:#}")
                }
            }
        }
        None => {
            warn!(tool = name, id = %call.id, "tool not found");
            format!("Error: Tool '{name}' not found.")
        }
    };
    Message::tool_result(call.id.clone(), name, content)
}

pub mod clock_tool;
pub mod function_tool;
pub mod weather_tool;

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use clock_tool::ClockTool;
pub use function_tool::FunctionTool;
use weather_tool::WeatherTool;

/// Definition sent to the model so it knows what tools are available.
///
/// Serializes to the chat-completions shape
/// `{"type": "function", "function": {"name", "description", "parameters"}}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: FunctionDefinition,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value, // JSON Schema
}

/// Every tool implements this trait.
///
/// Tools are owned by the caller and only borrowed for the duration of a
/// conversation; the loop never mutates or retains them.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Unique name the model uses to call this tool.
    fn name(&self) -> &str;

    /// Human-readable description sent with the tool definition.
    fn description(&self) -> &str;

    /// JSON Schema describing the tool's input parameters.
    fn schema(&self) -> Value;

    /// Execute the tool with the raw argument text from the model.
    async fn execute(&self, arguments: &str) -> Result<String>;

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            kind: "function",
            function: FunctionDefinition {
                name: self.name().to_string(),
                description: self.description().to_string(),
                parameters: self.schema(),
            },
        }
    }
}

/// Produce definitions for the model (sent in the API request).
pub fn definitions(tools: &[Arc<dyn Tool>]) -> Vec<ToolDefinition> {
    tools.iter().map(|t| t.definition()).collect()
}

/// Look up a tool by name. When two tools share a name, the first one wins.
pub fn find_tool<'a>(tools: &'a [Arc<dyn Tool>], name: &str) -> Option<&'a Arc<dyn Tool>> {
    tools.iter().find(|t| t.name() == name)
}

/// The demo tools registered by `hayate ask`.
pub fn builtin_tools() -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(ClockTool::new()) as Arc<dyn Tool>,
        Arc::new(WeatherTool::new()),
    ]
}

#[cfg(test)]
mod tests;

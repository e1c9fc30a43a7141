use anyhow::Result;
use chrono::{Local, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use super::Tool;

pub struct ClockTool;

impl ClockTool {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Deserialize, Default)]
struct ClockInput {
    /// `"utc"` or `"local"`; defaults to UTC.
    #[serde(default)]
    timezone: Option<String>,
}

#[async_trait::async_trait]
impl Tool for ClockTool {
    fn name(&self) -> &str { "get_current_time" }

    fn description(&self) -> &str {
        "Get the current date and time as an RFC 3339 timestamp."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "timezone": {
                    "type": "string",
                    "enum": ["utc", "local"],
                    "description": "Which clock to read. Defaults to utc."
                }
            }
        })
    }

    async fn execute(&self, arguments: &str) -> Result<String> {
        // Models sometimes send "" instead of "{}" for parameterless calls.
        let input: ClockInput = if arguments.trim().is_empty() {
            ClockInput::default()
        } else {
            serde_json::from_str(arguments)?
        };

        let now = match input.timezone.as_deref().unwrap_or("utc") {
            "utc" => Utc::now().to_rfc3339(),
            "local" => Local::now().to_rfc3339(),
            other => anyhow::bail!("Unsupported timezone: {}", other),
        };
        Ok(json!({ "now": now }).to_string())
    }
}

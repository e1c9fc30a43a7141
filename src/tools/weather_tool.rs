use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};

use super::Tool;

/// Simulated weather lookup, handy for exercising the tool loop end to end
/// without a real weather service.
pub struct WeatherTool;

impl WeatherTool {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Deserialize)]
struct WeatherInput {
    location: String,
    #[serde(default)]
    unit: Option<String>,
}

#[async_trait::async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str { "get_current_weather" }

    fn description(&self) -> &str {
        "Get the current weather in a given location"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "The city and state, e.g. San Francisco, CA"
                },
                "unit": {
                    "type": "string",
                    "enum": ["fahrenheit", "celsius"]
                }
            },
            "required": ["location"]
        })
    }

    async fn execute(&self, arguments: &str) -> Result<String> {
        let input: WeatherInput = serde_json::from_str(arguments)?;
        let (temperature, unit) = match input.unit.as_deref() {
            Some("celsius") => (22, "celsius"),
            _ => (72, "fahrenheit"),
        };
        Ok(json!({
            "location": input.location,
            "temperature": temperature,
            "unit": unit,
            "description": "Sunny"
        })
        .to_string())
    }
}

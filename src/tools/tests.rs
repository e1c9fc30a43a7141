use super::*;
use serde_json::json;

fn echo_tool(name: &str, prefix: &'static str) -> Arc<dyn Tool> {
    Arc::new(FunctionTool::new(
        name,
        "Echo the arguments back",
        json!({"type": "object"}),
        move |args| async move { Ok::<_, anyhow::Error>(format!("{prefix}{args}")) },
    ))
}

#[test]
fn test_builtin_definitions() {
    let tools = builtin_tools();
    let defs = definitions(&tools);
    assert_eq!(defs.len(), 2);
    assert_eq!(defs[0].function.name, "get_current_time");
    assert_eq!(defs[1].function.name, "get_current_weather");
    assert_eq!(defs[1].function.parameters["required"], json!(["location"]));
}

#[test]
fn test_definition_wire_shape() {
    let tool = echo_tool("echo", "");
    let value = serde_json::to_value(tool.definition()).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "function",
            "function": {
                "name": "echo",
                "description": "Echo the arguments back",
                "parameters": {"type": "object"}
            }
        })
    );
}

#[tokio::test]
async fn test_find_tool_first_match_wins() {
    let tools = vec![echo_tool("dup", "first:"), echo_tool("dup", "second:")];
    let tool = find_tool(&tools, "dup").unwrap();
    assert_eq!(tool.execute("x").await.unwrap(), "first:x");
}

#[test]
fn test_find_tool_unknown() {
    let tools = builtin_tools();
    assert!(find_tool(&tools, "nonexistent_tool").is_none());
}

#[tokio::test]
async fn test_function_tool_propagates_failure() {
    let tool = FunctionTool::new("boom", "Always fails", json!({}), |_args| async move {
        Err::<String, _>(anyhow::anyhow!("kaboom"))
    });
    let err = tool.execute("{}").await.unwrap_err();
    assert_eq!(err.to_string(), "kaboom");
}

#[tokio::test]
async fn test_weather_tool_simulated() {
    let tools = builtin_tools();
    let result = find_tool(&tools, "get_current_weather")
        .unwrap()
        .execute(r#"{"location":"SF"}"#)
        .await
        .unwrap();
    let value: Value = serde_json::from_str(&result).unwrap();
    assert_eq!(value["location"], "SF");
    assert_eq!(value["temperature"], 72);
    assert_eq!(value["unit"], "fahrenheit");
}

#[tokio::test]
async fn test_weather_tool_rejects_bad_arguments() {
    let tools = builtin_tools();
    let result = find_tool(&tools, "get_current_weather")
        .unwrap()
        .execute("not json")
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_clock_tool_accepts_empty_arguments() {
    let tools = builtin_tools();
    let clock = find_tool(&tools, "get_current_time").unwrap();

    let result = clock.execute("").await.unwrap();
    let value: Value = serde_json::from_str(&result).unwrap();
    assert!(value["now"].as_str().unwrap().contains('T'));

    let result = clock.execute(r#"{"timezone":"mars"}"#).await;
    assert!(result.is_err());
}

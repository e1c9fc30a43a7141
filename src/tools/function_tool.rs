//! Closure-backed [`Tool`] for callers that don't want to define a type.

use anyhow::Result;
use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::Value;
use std::future::Future;

use super::Tool;

type Executor = Box<dyn Fn(String) -> BoxFuture<'static, Result<String>> + Send + Sync>;

/// A tool whose executor is an async closure over the raw argument text.
///
/// ```ignore
/// let echo = FunctionTool::new("echo", "Echo the input", json!({"type": "object"}), |args| async move {
///     Ok(args)
/// });
/// ```
pub struct FunctionTool {
    name: String,
    description: String,
    parameters: Value,
    executor: Executor,
}

impl FunctionTool {
    pub fn new<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
        executor: F,
    ) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            executor: Box::new(move |args| executor(args).boxed()),
        }
    }
}

#[async_trait::async_trait]
impl Tool for FunctionTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn schema(&self) -> Value {
        self.parameters.clone()
    }

    async fn execute(&self, arguments: &str) -> Result<String> {
        (self.executor)(arguments.to_string()).await
    }
}

//! The seam between the conversation loop and the completion API.

use std::sync::Arc;

use super::request::ChatRequest;
use super::response::ChatCompletion;
use crate::error::Result;

/// Sends one chat-completion request and waits for the full response.
///
/// Implementations fail with [`Error::Api`](crate::error::Error::Api) for
/// non-success statuses and error payloads, [`Error::Transport`](crate::error::Error::Transport)
/// for connection problems, and [`Error::Decode`](crate::error::Error::Decode) for
/// malformed bodies. The conversation loop never retries.
#[async_trait::async_trait]
pub trait CompletionInvoker: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion>;
}

#[async_trait::async_trait]
impl<T: CompletionInvoker + ?Sized> CompletionInvoker for Arc<T> {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion> {
        (**self).complete(request).await
    }
}

#[async_trait::async_trait]
impl<T: CompletionInvoker + ?Sized> CompletionInvoker for &T {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion> {
        (**self).complete(request).await
    }
}

//! Completion API access for hayate.
//!
//! [`CompletionInvoker`] is the seam the conversation loop depends on;
//! [`GroqClient`] implements it over reqwest for any OpenAI-compatible
//! endpoint and adds vision, streaming, audio and model listing.

mod audio;
mod client;
mod invoker;
mod request;
mod response;

pub use audio::{AudioOutput, AudioRequest, AudioTask};
pub use client::{ApiSettings, GroqClient};
pub use invoker::CompletionInvoker;
pub use request::{opening_messages, ChatRequest};
pub use response::{ChatCompletion, Choice, ModelInfo, Usage};

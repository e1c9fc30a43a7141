//! hayate: a tool-calling conversation loop and SSE stream decoder for
//! OpenAI-compatible chat-completion APIs.
//!
//! [`agent::Agent`] drives a prompt to a final answer, dispatching the model's
//! tool calls concurrently. [`stream::EventStream`] decodes a streamed
//! response into JSON events. [`provider::GroqClient`] is the reqwest-backed
//! client both of them run against.

pub mod agent;
pub mod config;
pub mod constants;
pub mod error;
pub mod message;
pub mod output;
pub mod provider;
pub mod stream;
pub mod tools;

pub use error::{Error, ErrorKind, Result};

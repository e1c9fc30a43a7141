//! Output rendering abstraction for hayate.
//!
//! Defines the [`Renderer`] trait that decouples streamed model output from
//! the display layer. [`StdoutRenderer`] prints fragments directly to the
//! terminal; [`render_stream`] pumps a text stream into any renderer.

use colored::Colorize;
use futures::{Stream, StreamExt};
use std::io::{self, Write};

use crate::error::Result;

/// Trait for rendering streamed model output.
pub trait Renderer {
    /// Render a single text fragment as it arrives.
    fn render_token(&mut self, token: &str);

    /// Called when the full response is complete.
    fn render_done(&mut self);

    /// Called when an error occurs during streaming.
    fn render_error(&mut self, err: &str);
}

/// Renders streaming output directly to stdout.
///
/// Each fragment is printed immediately with an explicit flush so the user
/// sees a "typing" effect. Counts fragments and buffers the raw text.
#[derive(Debug, Default)]
pub struct StdoutRenderer {
    token_count: usize,
    buffer: String,
}

impl StdoutRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of fragments rendered.
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    /// Returns the accumulated raw text from all fragments.
    pub fn raw_text(&self) -> &str {
        &self.buffer
    }
}

impl Renderer for StdoutRenderer {
    fn render_token(&mut self, token: &str) {
        self.buffer.push_str(token);
        print!("{}", token);
        // Flush immediately so each fragment appears as it arrives
        io::stdout().flush().ok();
        self.token_count += 1;
    }

    fn render_done(&mut self) {
        println!(); // Final newline after stream ends
        println!();
        println!("{}", format!("[{} chunks]", self.token_count).dimmed());
    }

    fn render_error(&mut self, err: &str) {
        eprintln!();
        eprintln!("{} {}", "error:".red().bold(), err);
    }
}

/// Feeds every fragment of `stream` to `renderer` and returns the full text.
///
/// The first error is shown through [`Renderer::render_error`] and returned;
/// [`Renderer::render_done`] only runs when the stream ends cleanly.
pub async fn render_stream<S>(stream: S, renderer: &mut dyn Renderer) -> Result<String>
where
    S: Stream<Item = Result<String>>,
{
    let mut stream = std::pin::pin!(stream);
    let mut text = String::new();
    while let Some(item) = stream.next().await {
        match item {
            Ok(fragment) => {
                renderer.render_token(&fragment);
                text.push_str(&fragment);
            }
            Err(e) => {
                renderer.render_error(&e.to_string());
                return Err(e);
            }
        }
    }
    renderer.render_done();
    Ok(text)
}

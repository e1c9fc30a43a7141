//! Command-line interface definition and dispatch for hayate.
//!
//! Uses [`clap`] for argument parsing with derive macros. Each subcommand
//! loads the config, builds a [`GroqClient`], and routes to its handler.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use hayate::agent::{Agent, AgentOptions};
use hayate::config::Config;
use hayate::constants::{APP_NAME, DEFAULT_AUDIO_MODEL, DEFAULT_MAX_TURNS, DEFAULT_VISION_MODEL};
use hayate::output::{self, StdoutRenderer};
use hayate::provider::{ApiSettings, AudioRequest, GroqClient};
use hayate::tools;

/// Top-level CLI structure for hayate.
#[derive(Parser)]
#[command(
    name = "hayate",
    about = "Tool-calling chat loop and streaming client for OpenAI-compatible APIs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the hayate CLI.
///
/// The `///` doc comments on variants double as `--help` text rendered by clap.
#[derive(Subcommand)]
pub enum Commands {
    /// Ask a question, letting the model call the built-in tools
    Ask {
        /// The question to ask
        prompt: Vec<String>,
        /// Model to use (overrides config)
        #[arg(short, long)]
        model: Option<String>,
        /// System message (overrides config)
        #[arg(short, long)]
        system: Option<String>,
        /// Maximum completion requests before giving up
        #[arg(long)]
        max_turns: Option<usize>,
        /// Don't offer any tools to the model
        #[arg(long)]
        no_tools: bool,
    },
    /// Stream an answer token by token
    Stream {
        /// The question to ask
        prompt: Vec<String>,
        /// Model to use (overrides config)
        #[arg(short, long)]
        model: Option<String>,
        /// System message (overrides config)
        #[arg(short, long)]
        system: Option<String>,
    },
    /// Describe an image at a URL with a vision model
    Vision {
        /// http(s) or data: URL of the image
        image_url: String,
        /// What to ask about the image
        prompt: Vec<String>,
        /// Model to use
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Transcribe an audio file, or translate it into English
    Transcribe {
        /// Path to the audio file
        file: PathBuf,
        /// Translate into English instead of transcribing
        #[arg(long)]
        translate: bool,
        /// Model to use
        #[arg(short, long)]
        model: Option<String>,
        /// Spoken language (ISO-639-1), transcription only
        #[arg(short, long)]
        language: Option<String>,
    },
    /// List available models
    Models,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Subcommands for the `config` command.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current config
    Show,
}

/// Parses command-line arguments into a [`Cli`] struct.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Dispatches the parsed CLI command to its handler.
pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    match cli.command {
        Commands::Ask {
            prompt,
            model,
            system,
            max_turns,
            no_tools,
        } => {
            let prompt = join_prompt(prompt)?;
            let model = model.unwrap_or_else(|| config.model.clone());
            let system = system.as_deref().or(config.system_prompt());
            print_header(&model, &prompt);

            let client = client_from(&config)?;
            let options = AgentOptions::from_config(&config)
                .max_turns(max_turns.or(config.max_turns()).or(Some(DEFAULT_MAX_TURNS)));
            let agent = Agent::with_options(client, options);
            let tools = if no_tools {
                Vec::new()
            } else {
                tools::builtin_tools()
            };

            match agent.run_conversation(&prompt, &tools, &model, system).await? {
                Some(answer) => println!("{}", answer),
                None => println!("{}", "(the model returned no answer)".dimmed()),
            }
            Ok(())
        }
        Commands::Stream {
            prompt,
            model,
            system,
        } => {
            let prompt = join_prompt(prompt)?;
            let model = model.unwrap_or_else(|| config.model.clone());
            let system = system.as_deref().or(config.system_prompt());
            print_header(&model, &prompt);

            let client = client_from(&config)?;
            let fragments =
                client.chat_text_stream(&model, &prompt, system, config.temperature());
            let mut renderer = StdoutRenderer::new();
            output::render_stream(fragments, &mut renderer).await?;
            Ok(())
        }
        Commands::Vision {
            image_url,
            prompt,
            model,
        } => {
            let prompt = join_prompt(prompt)?;
            let model = model.unwrap_or_else(|| DEFAULT_VISION_MODEL.to_string());
            print_header(&model, &prompt);

            let client = client_from(&config)?;
            let completion = client
                .chat_with_image_url(&model, &prompt, &image_url, Some(config.temperature()))
                .await?;
            match completion.content() {
                Some(answer) if !answer.is_empty() => println!("{}", answer),
                _ => println!("{}", "(the model returned no answer)".dimmed()),
            }
            Ok(())
        }
        Commands::Transcribe {
            file,
            translate,
            model,
            language,
        } => {
            let model = model.unwrap_or_else(|| DEFAULT_AUDIO_MODEL.to_string());
            let mut request = audio_request(&file, &model)?;
            if let Some(language) = language {
                request = request.language(language);
            }

            let client = client_from(&config)?;
            let output = if translate {
                client.create_translation(request).await?
            } else {
                client.create_transcription(request).await?
            };
            println!("{}", output.text);
            Ok(())
        }
        Commands::Models => {
            let client = client_from(&config)?;
            let mut models = client.list_models().await?;
            models.sort_by(|a, b| a.id.cmp(&b.id));
            println!("{}", "Available models:".bold());
            for model in models {
                match model.owned_by {
                    Some(owner) => println!("  {} {}", model.id, format!("({})", owner).dimmed()),
                    None => println!("  {}", model.id),
                }
            }
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let path = Config::config_path()?;
                println!("{} {}", "Config path:".bold(), path.display());
                println!();
                let mut shown = config.clone();
                if let Some(key) = shown.api.api_key.as_mut() {
                    *key = mask_key(key);
                }
                let toml_str = toml::to_string_pretty(&shown)?;
                println!("{}", toml_str);
                Ok(())
            }
        },
    }
}

fn join_prompt(words: Vec<String>) -> Result<String> {
    let prompt = words.join(" ");
    if prompt.trim().is_empty() {
        anyhow::bail!("No prompt provided. Usage: hayate ask \"your question here\"");
    }
    Ok(prompt)
}

fn audio_request(path: &Path, model: &str) -> Result<AudioRequest> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("Not a file: {}", path.display()))?;
    Ok(AudioRequest::new(bytes, file_name, model))
}

fn client_from(config: &Config) -> Result<GroqClient> {
    let settings = ApiSettings::from_config(config)?;
    GroqClient::new(settings).context("Failed to create HTTP client")
}

fn print_header(model: &str, prompt: &str) {
    println!("{} [model: {}]", APP_NAME.bold().cyan(), model.yellow());
    println!();
    println!("{} {}", ">".green().bold(), prompt);
    println!();
}

/// Keeps the last four characters of a key visible.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("gsk_abcdef1234"), "**********1234");
        assert_eq!(mask_key("abc"), "***");
        assert_eq!(mask_key(""), "");
    }

    #[test]
    fn test_join_prompt_rejects_blank() {
        assert!(join_prompt(vec![]).is_err());
        assert!(join_prompt(vec!["  ".into()]).is_err());
        assert_eq!(join_prompt(vec!["hi".into(), "there".into()]).unwrap(), "hi there");
    }

    #[test]
    fn test_parse_ask_flags() {
        let cli = Cli::try_parse_from([
            "hayate", "ask", "what", "time", "--max-turns", "3", "--no-tools", "-m", "x",
        ])
        .unwrap();
        match cli.command {
            Commands::Ask {
                prompt,
                model,
                max_turns,
                no_tools,
                ..
            } => {
                assert_eq!(prompt, vec!["what", "time"]);
                assert_eq!(model.as_deref(), Some("x"));
                assert_eq!(max_turns, Some(3));
                assert!(no_tools);
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn test_parse_transcribe_flags() {
        let cli = Cli::try_parse_from([
            "hayate", "transcribe", "talk.m4a", "--translate", "-l", "de",
        ])
        .unwrap();
        match cli.command {
            Commands::Transcribe {
                file,
                translate,
                model,
                language,
            } => {
                assert_eq!(file, PathBuf::from("talk.m4a"));
                assert!(translate);
                assert!(model.is_none());
                assert_eq!(language.as_deref(), Some("de"));
            }
            _ => panic!("expected transcribe"),
        }
    }

    #[test]
    fn test_audio_request_reads_file() {
        let dir = std::env::temp_dir().join(format!("hayate-audio-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("note.wav");
        std::fs::write(&path, b"RIFF").unwrap();

        let request = audio_request(&path, "whisper-large-v3").unwrap();
        assert_eq!(request.file, b"RIFF".to_vec());
        assert_eq!(request.file_name, "note.wav");
        assert_eq!(request.model, "whisper-large-v3");

        assert!(audio_request(&dir.join("missing.wav"), "m").is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}

//! Command-line interface for Chatrelay
//!
//! Provides argument parsing and subcommand handling for the chatrelay binary.

use clap::{Parser, Subcommand};

/// Minimal HTTP relay between a chat client and a text-generation provider
#[derive(Parser)]
#[command(name = "chatrelay")]
#[command(version)]
#[command(about = "Minimal HTTP relay between a chat client and a text-generation provider")]
#[command(
    long_about = "Chatrelay exposes a single POST endpoint that forwards one user message \
    to a configured text-generation provider and returns the generated reply."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# Chatrelay Configuration
# =======================
#
# This file configures the HTTP server, the text-generation provider, and
# observability settings for chatrelay.
#
# The provider API key is NOT configured here. It is read from the
# OPENAI_API_KEY environment variable at startup; the process refuses to
# start without it.

[server]
# IP address literal to bind to (0.0.0.0 for all interfaces, 127.0.0.1 for
# localhost only). Hostnames are rejected at startup.
host = "0.0.0.0"

# Port to listen on
port = 3000

# Timeout for the outbound provider call, in seconds (1-300)
request_timeout_seconds = 30

[provider]
# Model identifier sent with every completion request
model = "gpt-4o-mini"

# Provider API root. Must end with /v1.
base_url = "https://api.openai.com/v1"

# Sampling temperature (0.0-2.0)
temperature = 0.7

# Maximum output tokens per completion
max_tokens = 512

# Optional persona instruction prepended to every prompt as a system message.
# Remove this line to send the user message alone.
system_instruction = "You are a concise assistant. Explain concepts simply."

[observability]
# Log level: trace, debug, info, warn, error
# Can be overridden at runtime with the RUST_LOG environment variable.
log_level = "info"
"#
}

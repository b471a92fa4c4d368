//! Chatrelay - minimal HTTP relay to a text-generation provider
//!
//! Exposes a single-shot chat relay: a POST endpoint accepts one user message,
//! forwards it to the configured provider, and returns the generated text.
//! No conversation state is retained between requests.

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod provider;
pub mod telemetry;

//! Text-generation provider abstraction
//!
//! The relay's only seam: one trait, one concrete adapter wired at startup.
//! Handlers depend on the trait object, never on a vendor client directly,
//! so tests can inject a stub provider and stay hermetic.

use async_trait::async_trait;
use thiserror::Error;

pub mod openai;

pub use openai::OpenAiProvider;

/// Errors from the outbound provider call
///
/// The full variant detail is for server-side logs only. HTTP responses render
/// these through `AppError::Provider`, which emits a fixed generic summary.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("transport failure talking to provider: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode provider response: {0}")]
    Decode(String),

    #[error("provider response contained no generated text")]
    EmptyCompletion,
}

/// Convenience type alias for provider results
pub type ProviderResult<T> = Result<T, ProviderError>;

/// A synchronous (single round trip, non-streaming) text-generation backend
///
/// Implementations own their generation parameters (model, temperature, max
/// output tokens, optional system instruction); callers pass only the raw user
/// prompt. One outbound network call per invocation, no retries.
#[async_trait]
pub trait TextGenerationProvider: Send + Sync {
    /// Human-readable adapter name, used in log lines
    fn name(&self) -> &'static str;

    /// Generate a completion for the given user prompt
    async fn generate(&self, prompt: &str) -> ProviderResult<String>;
}

//! OpenAI chat-completions adapter
//!
//! Speaks the `/chat/completions` wire format directly over reqwest. Only the
//! fields this service actually sends and reads are modelled; everything else
//! in the vendor schema is ignored by serde.

use crate::config::ProviderConfig;
use crate::provider::{ProviderError, ProviderResult, TextGenerationProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound on upstream error text carried into logs. Vendor error bodies
/// can be arbitrarily large HTML on proxy failures.
const MAX_UPSTREAM_ERROR_LEN: usize = 512;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Error body shape returned by the OpenAI API (best-effort parse)
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Text-generation adapter for the OpenAI chat-completions API
///
/// Holds the fixed generation parameters from configuration and the API
/// credential read from the environment at startup. Constructed once and
/// shared read-only across requests.
pub struct OpenAiProvider {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f64,
    max_tokens: u32,
    system_instruction: Option<String>,
}

impl OpenAiProvider {
    /// Create a new adapter from provider configuration and a credential
    ///
    /// The request timeout bounds the entire outbound call (connect, send,
    /// read). There is no retry - a timeout fails the single relay request.
    pub fn new(
        config: &ProviderConfig,
        api_key: String,
        request_timeout: Duration,
    ) -> ProviderResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            http,
            api_key,
            model: config.model().to_string(),
            base_url: config.base_url().trim_end_matches('/').to_string(),
            temperature: config.temperature(),
            max_tokens: config.max_tokens(),
            system_instruction: config.system_instruction().map(str::to_string),
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_messages<'a>(&'a self, prompt: &'a str) -> Vec<ChatMessage<'a>> {
        let mut messages = Vec::with_capacity(2);
        if let Some(instruction) = self.system_instruction.as_deref() {
            messages.push(ChatMessage {
                role: "system",
                content: instruction,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });
        messages
    }
}

#[async_trait]
impl TextGenerationProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate(&self, prompt: &str) -> ProviderResult<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: self.build_messages(prompt),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        tracing::debug!(
            model = %self.model,
            prompt_length = prompt.len(),
            "Sending completion request to provider"
        );

        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Prefer the structured API error message; fall back to the raw
            // (truncated) body for proxies that answer with HTML or plain text.
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(parsed) => parsed.error.message,
                Err(_) => body.chars().take(MAX_UPSTREAM_ERROR_LEN).collect(),
            };
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        let reply = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if reply.trim().is_empty() {
            return Err(ProviderError::EmptyCompletion);
        }

        Ok(reply)
    }
}

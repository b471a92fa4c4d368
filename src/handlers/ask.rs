//! Ask endpoint handler
//!
//! Handles POST /ask requests: validate the message, relay it to the
//! configured provider, return the generated text.

use crate::error::AppError;
use crate::handlers::AppState;
use crate::middleware::RequestId;
use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};

/// Maximum allowed message length in characters (100K chars)
const MAX_MESSAGE_LENGTH: usize = 100_000;

/// Chat request from client
///
/// `message` defaults to empty when the field is absent, so a missing field
/// takes the same 400 validation path as an empty one instead of surfacing a
/// deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    message: String,
}

impl AskRequest {
    /// Get the message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Validate the message and return it trimmed
    ///
    /// Empty and whitespace-only messages are rejected before any provider
    /// call is attempted; over-length messages likewise (character count, not
    /// bytes).
    fn validated_message(&self) -> Result<&str, AppError> {
        let trimmed = self.message.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation("No message provided".to_string()));
        }

        let char_count = self.message.chars().count();
        if char_count > MAX_MESSAGE_LENGTH {
            return Err(AppError::Validation(format!(
                "message exceeds maximum length of {} characters (got {})",
                MAX_MESSAGE_LENGTH, char_count
            )));
        }

        Ok(trimmed)
    }
}

/// Chat response to client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// Provider's generated text
    pub reply: String,
}

/// POST /ask handler
///
/// A single stateless transaction with exactly two outcomes: success with a
/// reply, or failure with an error body. Blocks its own task for one outbound
/// provider round trip, bounded by the HTTP client's request timeout.
pub async fn handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<AskRequest>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(
        request_id = %request_id,
        message_length = request.message().len(),
        "Received ask request"
    );

    let message = request.validated_message()?;

    match state.provider().generate(message).await {
        Ok(reply) => {
            tracing::info!(
                request_id = %request_id,
                provider = state.provider().name(),
                reply_length = reply.len(),
                "Relay completed successfully"
            );
            Ok(Json(AskResponse { reply }))
        }
        Err(e) => {
            // Full upstream detail stays in the log. The client receives only
            // the generic summary rendered by AppError::Provider.
            tracing::error!(
                request_id = %request_id,
                provider = state.provider().name(),
                error = %e,
                "Provider call failed"
            );
            Err(AppError::Provider(e))
        }
    }
}

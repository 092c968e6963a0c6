//! Text generation layer: the remote reply client and its fallbacks.

mod gemini;

use async_trait::async_trait;
use thiserror::Error;

pub use gemini::GeminiClient;

/// Returned when the endpoint answered but carried no generated text.
pub const NO_REPLY_FALLBACK: &str = "⚠️ No reply";
/// Returned when the request itself failed.
pub const API_ERROR_FALLBACK: &str = "⚠️ Generation API error";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("endpoint answered with status {status}")]
    Status { status: u16 },
    #[error("response carried no generated text")]
    EmptyResponse,
}

/// Produces a reply for a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Calls `generator` and never fails: errors are logged and replaced by a
/// fixed fallback string.
pub async fn reply_or_fallback(generator: &dyn TextGenerator, prompt: &str) -> String {
    match generator.generate(prompt).await {
        Ok(text) => text,
        Err(GenerationError::EmptyResponse) => {
            tracing::warn!("generation endpoint returned no text");
            NO_REPLY_FALLBACK.to_owned()
        }
        Err(error) => {
            tracing::error!(error = %error, "text generation failed");
            API_ERROR_FALLBACK.to_owned()
        }
    }
}

/// Returns the generation module name for smoke checks.
pub fn module_name() -> &'static str {
    "generation"
}

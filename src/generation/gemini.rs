use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::{GenerationError, TextGenerator};
use crate::infra::{config::GenerationConfig, error::AppError};

const GENERATE_CONTENT_ACTION: &str = "generateContent";
const API_KEY_HEADER: &str = "x-goog-api-key";
const ERROR_BODY_LOG_CHARS: usize = 200;

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Client for the `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn from_config(config: &GenerationConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(AppError::HttpClient)?;

        Ok(Self {
            client,
            url: format!(
                "{}/{}:{GENERATE_CONTENT_ACTION}",
                config.endpoint.trim_end_matches('/'),
                config.model
            ),
            api_key: config.api_key.clone(),
        })
    }

    #[cfg(test)]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        if self.api_key.is_empty() {
            return Err(GenerationError::MissingApiKey);
        }

        let response = self
            .client
            .post(&self.url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request_body(prompt))
            .send()
            .await
            .map_err(|err| GenerationError::Transport(err.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(
                status = status.as_u16(),
                body = %body.chars().take(ERROR_BODY_LOG_CHARS).collect::<String>(),
                "generation endpoint rejected request"
            );
            return Err(GenerationError::Status {
                status: status.as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| GenerationError::Transport(err.without_url().to_string()))?;

        extract_text(&body).ok_or(GenerationError::EmptyResponse)
    }
}

fn request_body(prompt: &str) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part { text: prompt }],
        }],
    }
}

/// `candidates[0].content.parts[0].text`, ignoring empty strings.
fn extract_text(body: &Value) -> Option<String> {
    body.pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

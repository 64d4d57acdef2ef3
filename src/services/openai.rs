use crate::prompts;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Sampling temperature for field validation calls
const VALIDATION_TEMPERATURE: f32 = 0.3;

/// Sampling temperature for match ranking calls
const MATCHING_TEMPERATURE: f32 = 0.7;

/// Errors that can occur when calling the OpenAI API
#[derive(Debug, Error)]
pub enum OpenAiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Model ids used per operation
#[derive(Debug, Clone)]
pub struct OpenAiModels {
    pub validation: String,
    pub matching: String,
}

/// OpenAI chat-completion client
///
/// The single entry point for model calls. Handles both uses of the
/// model service:
/// - Judging individual profile fields
/// - Ranking candidate collaborators as strict JSON
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    client: Client,
    models: OpenAiModels,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

impl OpenAiClient {
    /// Create a new OpenAI client
    pub fn new(base_url: String, api_key: String, models: OpenAiModels) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
            models,
        }
    }

    /// Ask the model to judge a single profile field
    ///
    /// Returns the raw completion text. The caller passes it through
    /// without checking it against the JSON shape the template asked for.
    pub async fn validate_field(&self, instruction: &str) -> Result<String, OpenAiError> {
        self.chat(
            &self.models.validation,
            prompts::VALIDATOR_SYSTEM,
            instruction,
            VALIDATION_TEMPERATURE,
            false,
        )
        .await
    }

    /// Ask the model to rank candidate collaborators, requesting strict
    /// JSON output
    pub async fn rank_matches(&self, prompt: &str) -> Result<String, OpenAiError> {
        self.chat(
            &self.models.matching,
            prompts::MATCHMAKER_SYSTEM,
            prompt,
            MATCHING_TEMPERATURE,
            true,
        )
        .await
    }

    async fn chat(
        &self,
        model: &str,
        system: &str,
        user: &str,
        temperature: f32,
        json_output: bool,
    ) -> Result<String, OpenAiError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let body = ChatCompletionRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature,
            response_format: json_output.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        tracing::debug!("Sending chat completion to {} (model: {})", url, model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            let message = serde_json::from_str::<OpenAiErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            tracing::error!("Chat completion failed: {} - {}", status, message);
            return Err(OpenAiError::ApiError(format!("{}: {}", status, message)));
        }

        let completion: ChatCompletionResponse = response.json().await?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| OpenAiError::InvalidResponse("Missing completion content".into()))
    }
}

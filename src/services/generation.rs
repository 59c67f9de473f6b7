//! Generation-provider client (OpenAI-compatible chat completions).
//!
//! Sends the fixed system instruction plus a built user prompt, then runs
//! the reply through the interpreter. No timeout and no retries: a failed
//! call surfaces immediately to the caller.

use reqwest::header;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::config::LlmConfig;
use crate::error::{AppError, AppResult};
use crate::models::GenerateResponse;
use crate::prompt::SYSTEM_PROMPT;
use crate::services::interpreter::{ensure_unique_ids, interpret_reply};

/// Client for the chat-completions generation provider.
pub struct GenerationClient {
    config: LlmConfig,
    http_client: reqwest::Client,
}

/// Chat completion response, reduced to the fields we consume.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    model: Option<String>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

impl GenerationClient {
    /// Create a client from provider configuration.
    pub fn new(config: LlmConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Run one generation: user prompt in, validated response out.
    pub async fn generate(&self, user_prompt: &str) -> AppResult<GenerateResponse> {
        let url = format!("{}/chat/completions", self.config.base_url);
        debug!("Requesting generation from {} ({})", url, self.config.model);

        let response = self
            .http_client
            .post(&url)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.config.api_key.expose_secret()),
            )
            .json(&json!({
                "model": self.config.model,
                "messages": [
                    {"role": "system", "content": SYSTEM_PROMPT},
                    {"role": "user", "content": user_prompt},
                ],
                "response_format": {"type": "json_object"},
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Generation provider error: {} - {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::InvalidReply("reply contained no choices".to_string()))?;

        let mut cases = interpret_reply(&content)?;
        ensure_unique_ids(&mut cases);

        let (prompt_tokens, completion_tokens) = completion
            .usage
            .map(|u| (u.prompt_tokens, u.completion_tokens))
            .unwrap_or((0, 0));

        info!(
            "Generated {} test cases ({} prompt / {} completion tokens)",
            cases.len(),
            prompt_tokens,
            completion_tokens
        );

        Ok(GenerateResponse {
            cases,
            model: completion.model.or_else(|| Some(self.config.model.clone())),
            prompt_tokens,
            completion_tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(base_url: &str) -> LlmConfig {
        LlmConfig {
            base_url: base_url.to_string(),
            api_key: "test-key".to_string().into(),
            model: "gpt-4o-mini".to_string(),
        }
    }

    #[test]
    fn test_completion_response_deserializes() {
        let raw = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "model": "gpt-4o-mini-2024-07-18",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "{}"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 42, "completion_tokens": 17, "total_tokens": 59}
        }"#;
        let completion: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(completion.choices.len(), 1);
        assert_eq!(completion.model.as_deref(), Some("gpt-4o-mini-2024-07-18"));
        let usage = completion.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 42);
        assert_eq!(usage.completion_tokens, 17);
    }

    #[test]
    fn test_completion_without_usage_deserializes() {
        let raw = r#"{"choices": [{"message": {"content": "{}"}}]}"#;
        let completion: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert!(completion.usage.is_none());
        assert!(completion.model.is_none());
    }

    #[tokio::test]
    async fn test_network_failure_surfaces_as_upstream_error() {
        let client = GenerationClient::new(test_config("http://127.0.0.1:9"));
        assert!(matches!(
            client.generate("prompt").await,
            Err(AppError::Upstream(_))
        ));
    }
}

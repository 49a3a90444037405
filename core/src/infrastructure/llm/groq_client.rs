use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    ingredient_analysis::{ports::LLMClient, value_objects::ChatPrompt},
};

#[derive(Debug, Clone)]
pub struct GroqLLMClient {
    api_key: String,
    model_name: String,
    temperature: f32,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    temperature: f32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<MessageResponse>,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Option<String>,
}

impl GroqLLMClient {
    pub fn new(config: LLMConfig) -> Self {
        Self {
            api_key: config.groq_api_key,
            model_name: config.groq_model,
            temperature: config.temperature,
            base_url: config.groq_base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    async fn call_groq_api(&self, request: ChatCompletionRequest) -> Result<String, CoreError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Groq API request failed: {}", e);
                CoreError::AIAnalysisFailed(format!("LLM API unreachable: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Groq API error: {} - {}", status, error_text);
            return Err(CoreError::UpstreamError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Groq response: {}", e);
            CoreError::AIAnalysisFailed(format!("Failed to parse LLM response: {}", e))
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|content| !content.is_empty())
            .ok_or(CoreError::EmptyResponse)
    }
}

impl LLMClient for GroqLLMClient {
    async fn complete(&self, prompt: ChatPrompt) -> Result<String, CoreError> {
        let request = ChatCompletionRequest {
            model: self.model_name.clone(),
            temperature: self.temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt.user,
                },
            ],
        };

        self.call_groq_api(request).await
    }
}

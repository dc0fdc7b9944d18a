use crate::{
    errors::AgentError,
    providers::ai::{error_for_status, AiProvider},
    types::GenerationOptions,
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, time::Duration};
use tracing::debug;

// --- OpenAI-compatible request and response structures ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage>,
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatMessage,
}

// --- Provider implementation ---

/// A provider for any OpenAI-compatible chat completions API.
///
/// This covers hosted services such as Groq as well as local servers
/// (LM Studio, Ollama, llama.cpp) that expose the same endpoint.
#[derive(Clone, Debug)]
pub struct OpenAiCompatibleProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: Option<String>,
    options: GenerationOptions,
}

impl OpenAiCompatibleProvider {
    /// Creates a new `OpenAiCompatibleProvider`.
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        options: GenerationOptions,
        timeout: Duration,
    ) -> Result<Self, AgentError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(AgentError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key: api_key.filter(|k| !k.is_empty()),
            options,
        })
    }
}

#[async_trait]
impl AiProvider for OpenAiCompatibleProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, AgentError> {
        let messages = vec![
            ChatMessage {
                role: "system".to_string(),
                content: system_prompt.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: user_prompt.to_string(),
            },
        ];

        let request_body = ChatRequest {
            messages,
            model: &self.options.model,
            temperature: self.options.temperature,
            max_tokens: self.options.max_tokens,
            stream: false,
        };

        debug!(url = %self.api_url, model = %self.options.model, "--> Sending chat completion request");

        let mut request_builder = self.client.post(&self.api_url);
        if let Some(key) = &self.api_key {
            request_builder = request_builder.bearer_auth(key);
        }

        let response = request_builder
            .json(&request_body)
            .send()
            .await
            .map_err(AgentError::AiRequest)?;
        let response = error_for_status(response).await?;

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(AgentError::AiDeserialization)?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AgentError::AiEmptyResponse)
    }

    fn model_name(&self) -> &str {
        &self.options.model
    }
}

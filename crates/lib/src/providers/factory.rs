//! # AI Provider Factory
//!
//! Builds the configured AI provider so the server and the CLI construct it the same way.

use crate::{
    config::AiConfig,
    errors::AgentError,
    providers::ai::{gemini::GeminiProvider, openai::OpenAiCompatibleProvider, AiProvider},
};
use tracing::info;

/// Creates the AI provider described by `config`.
///
/// - `openai`: an OpenAI-compatible hosted API. An API key is required.
/// - `local`: an OpenAI-compatible local server. The key is optional.
/// - `gemini`: the Google Gemini API. An API key is required.
pub fn create_provider(config: &AiConfig) -> Result<Box<dyn AiProvider>, AgentError> {
    let api_url = config.resolved_api_url();
    let options = config.generation_options();
    let timeout = config.timeout();

    info!(
        provider = %config.provider,
        model = %config.model_name,
        url = %api_url,
        "Configuring AI provider"
    );

    let provider: Box<dyn AiProvider> = match config.provider.as_str() {
        "openai" => {
            let api_key = config.api_key().ok_or_else(|| {
                AgentError::MissingApiKey(
                    "set AI_API_KEY (or GROQ_API_KEY) in the environment or .env file".to_string(),
                )
            })?;
            Box::new(OpenAiCompatibleProvider::new(
                api_url,
                Some(api_key.to_string()),
                options,
                timeout,
            )?)
        }
        "local" => Box::new(OpenAiCompatibleProvider::new(
            api_url,
            config.api_key().map(str::to_string),
            options,
            timeout,
        )?),
        "gemini" => {
            let api_key = config.api_key().ok_or_else(|| {
                AgentError::MissingApiKey(
                    "set AI_API_KEY in the environment to use Gemini models".to_string(),
                )
            })?;
            Box::new(GeminiProvider::new(
                api_url,
                api_key.to_string(),
                options,
                timeout,
            )?)
        }
        other => {
            return Err(AgentError::Configuration(format!(
                "unknown AI provider '{other}' (expected 'openai', 'local' or 'gemini')"
            )))
        }
    };

    Ok(provider)
}

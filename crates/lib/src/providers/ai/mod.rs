pub mod gemini;
pub mod openai;

use crate::errors::AgentError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use reqwest::{Response, StatusCode};
use std::fmt::Debug;

/// A trait for interacting with an AI provider.
///
/// This trait treats the hosted model as an opaque text-in/text-out service. The
/// sampling parameters (model, temperature, max tokens) are fixed when the provider
/// is constructed.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a completion from a given system and user prompt.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, AgentError>;

    /// The model identifier requests are sent to.
    fn model_name(&self) -> &str;
}

dyn_clone::clone_trait_object!(AiProvider);

/// Maps a non-success HTTP response from a provider onto the matching error variant.
pub(crate) async fn error_for_status(response: Response) -> Result<Response, AgentError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AgentError::AiAuthentication {
            status: status.as_u16(),
            message,
        },
        StatusCode::TOO_MANY_REQUESTS => AgentError::AiRateLimited(message),
        _ => AgentError::AiApi {
            status: status.as_u16(),
            message,
        },
    })
}

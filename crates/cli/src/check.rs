use bizquery::{
    check_connection, config::AppConfig, providers::factory::create_provider, AgentError,
};
use std::process::ExitCode;

/// Runs the connectivity check and reports the outcome. Any failure exits non-zero.
pub async fn handle_check_api(config: &AppConfig) -> ExitCode {
    let ai = &config.ai;
    println!(
        "🔌 Checking {} provider, model '{}' at {}...",
        ai.provider,
        ai.model_name,
        ai.resolved_api_url()
    );

    let result = match create_provider(ai) {
        Ok(provider) => check_connection(provider.as_ref()).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(reply) => {
            println!("✅ API connection successful!");
            println!("Model reply: {reply}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ API connection failed: {e}");
            eprintln!("\nTroubleshooting:");
            for hint in troubleshooting_hints(&e) {
                eprintln!("  - {hint}");
            }
            ExitCode::FAILURE
        }
    }
}

fn troubleshooting_hints(error: &AgentError) -> Vec<&'static str> {
    match error {
        AgentError::MissingApiKey(_) => vec![
            "Set AI_API_KEY (or GROQ_API_KEY) in your environment or .env file.",
            "Or set AI_PROVIDER=local to use a local OpenAI-compatible server.",
        ],
        AgentError::AiAuthentication { .. } => vec![
            "Check that your API key is correct and has not been revoked.",
            "Make sure the key belongs to the provider at AI_API_URL.",
        ],
        AgentError::AiRateLimited(_) => {
            vec!["You have hit the provider's rate limit. Wait a moment and try again."]
        }
        AgentError::AiRequest(_) => vec![
            "Check your internet connection.",
            "Check that AI_API_URL points at a running chat completions endpoint.",
        ],
        AgentError::AiApi { .. } | AgentError::AiDeserialization(_) => vec![
            "The provider returned an unexpected response. Check AI_MODEL and AI_API_URL.",
        ],
        _ => vec!["Check your configuration (config.yml, .env and AI_* variables)."],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_hint_names_the_variables() {
        let hints = troubleshooting_hints(&AgentError::MissingApiKey("x".into()));
        assert!(hints[0].contains("AI_API_KEY"));
        assert!(hints[0].contains("GROQ_API_KEY"));
    }

    #[test]
    fn rate_limit_has_its_own_hint() {
        let hints = troubleshooting_hints(&AgentError::AiRateLimited("slow".into()));
        assert_eq!(hints.len(), 1);
        assert!(hints[0].contains("rate limit"));
    }
}

//! # Query Agent
//!
//! Turns a business question into an [`Answer`]: a fixed shortcut query or a
//! model-generated one, validated as read-only, executed, and optionally
//! interpreted by a second model call.

use crate::{
    chart::ChartSpec,
    config::AgentConfig,
    constants::{DEFAULT_MAX_ROWS, INTERPRETATION_ROW_LIMIT, NO_DATA_MESSAGE},
    errors::AgentError,
    extraction::{ensure_read_only, extract_sql, ExtractedSql},
    prompts::core::{
        render, CHECK_SYSTEM_PROMPT, CHECK_USER_PROMPT, INTERPRETATION_SYSTEM_PROMPT,
        INTERPRETATION_USER_PROMPT, QUERY_SYSTEM_PROMPT, QUERY_USER_PROMPT, SCHEMA_DESCRIPTION,
    },
    providers::{ai::AiProvider, db::storage::Storage},
    shortcuts::match_shortcut,
    types::{Answer, QueryResult, QuerySource},
};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Delay before the first retry of a failed completion call. Doubles per attempt.
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// Behaviour switches for a [`QueryAgent`].
#[derive(Debug, Clone)]
pub struct AgentOptions {
    pub use_shortcuts: bool,
    pub interpret_results: bool,
    pub max_rows: usize,
    pub max_retries: u32,
    /// The schema text sent with every query-generation prompt.
    pub schema_description: String,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            use_shortcuts: true,
            interpret_results: true,
            max_rows: DEFAULT_MAX_ROWS,
            max_retries: 0,
            schema_description: SCHEMA_DESCRIPTION.to_string(),
        }
    }
}

impl From<&AgentConfig> for AgentOptions {
    fn from(config: &AgentConfig) -> Self {
        Self {
            use_shortcuts: config.use_shortcuts,
            interpret_results: config.interpret_results,
            max_rows: config.max_rows,
            max_retries: config.max_retries,
            ..Default::default()
        }
    }
}

/// Answers natural-language questions against a storage backend.
///
/// The agent holds no per-question state, so one instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct QueryAgent {
    ai_provider: Box<dyn AiProvider>,
    storage: Box<dyn Storage>,
    options: AgentOptions,
}

/// A builder for creating a `QueryAgent`.
#[derive(Default)]
pub struct QueryAgentBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
    storage: Option<Box<dyn Storage>>,
    options: AgentOptions,
}

impl QueryAgentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ai_provider(mut self, ai_provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(ai_provider);
        self
    }

    pub fn storage(mut self, storage: Box<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn options(mut self, options: AgentOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the `QueryAgent`. Both an AI provider and a storage backend are required.
    pub fn build(self) -> Result<QueryAgent, AgentError> {
        let ai_provider = self.ai_provider.ok_or_else(|| {
            AgentError::Configuration("an AI provider is required".to_string())
        })?;
        let storage = self.storage.ok_or_else(|| {
            AgentError::Configuration("a storage provider is required".to_string())
        })?;
        if self.options.max_rows == 0 {
            return Err(AgentError::Configuration(
                "max_rows must be greater than zero".to_string(),
            ));
        }
        Ok(QueryAgent {
            ai_provider,
            storage,
            options: self.options,
        })
    }
}

impl QueryAgent {
    pub fn builder() -> QueryAgentBuilder {
        QueryAgentBuilder::new()
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn options(&self) -> &AgentOptions {
        &self.options
    }

    /// The model that generates queries.
    pub fn model_name(&self) -> &str {
        self.ai_provider.model_name()
    }

    /// Answers a business question.
    ///
    /// Fails with `InvalidInput` for an empty question, `ExternalService` when the
    /// completion API fails, `Parse` when the completion holds no SQL, and `Query`
    /// when the SQL is not read-only or the database rejects it. A failed
    /// interpretation does not fail the answer.
    pub async fn answer(&self, question: &str) -> Result<Answer, AgentError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AgentError::EmptyQuestion);
        }
        info!(question = %question, "[answer] Received question.");

        let shortcut = if self.options.use_shortcuts {
            match_shortcut(question)
        } else {
            None
        };

        let (sql, narrative, source) = match shortcut {
            Some(sql) => {
                info!("[answer] Using shortcut query.");
                (sql.to_string(), None, QuerySource::Shortcut)
            }
            None => {
                let ExtractedSql { sql, narrative } = self.generate_sql(question).await?;
                (sql, narrative, QuerySource::Model)
            }
        };

        if let Err(e) = ensure_read_only(&sql) {
            warn!(sql = %sql, "[answer] Rejected statement: {e}");
            return Err(e);
        }

        let result = self
            .storage
            .execute_query(&sql, self.options.max_rows)
            .await?;
        info!(
            rows = result.rows.len(),
            truncated = result.truncated,
            "[answer] Query executed."
        );

        let chart = ChartSpec::suggest(&result.columns, &result.rows);

        let (analysis, analysis_error) = if !self.options.interpret_results {
            (None, None)
        } else if result.is_empty() {
            (Some(NO_DATA_MESSAGE.to_string()), None)
        } else {
            match self.interpret(question, &result).await {
                Ok(analysis) => (Some(analysis), None),
                Err(e) => {
                    warn!("[answer] Interpretation failed: {e}");
                    (None, Some(e.to_string()))
                }
            }
        };

        let QueryResult {
            columns,
            rows,
            truncated,
        } = result;

        Ok(Answer {
            question: question.to_string(),
            sql,
            source,
            row_count: rows.len(),
            columns,
            rows,
            truncated,
            narrative,
            analysis,
            analysis_error,
            chart,
        })
    }

    async fn generate_sql(&self, question: &str) -> Result<ExtractedSql, AgentError> {
        let dialect = self.storage.dialect();
        let system_prompt = render(QUERY_SYSTEM_PROMPT, &[("dialect", dialect)]);
        let user_prompt = render(
            QUERY_USER_PROMPT,
            &[
                ("schema", self.options.schema_description.as_str()),
                ("dialect", dialect),
                ("question", question),
            ],
        );

        let completion = self.generate_with_retry(&system_prompt, &user_prompt).await?;
        debug!(completion = %completion, "[generate_sql] Model completion.");

        let extracted = extract_sql(&completion)?;
        info!(sql = %extracted.sql, "[generate_sql] Extracted SQL.");
        Ok(extracted)
    }

    async fn interpret(&self, question: &str, result: &QueryResult) -> Result<String, AgentError> {
        let row_count = result.rows.len().to_string();
        let results = format_results(result);
        let user_prompt = render(
            INTERPRETATION_USER_PROMPT,
            &[
                ("question", question),
                ("row_count", row_count.as_str()),
                ("results", results.as_str()),
            ],
        );
        let analysis = self
            .generate_with_retry(INTERPRETATION_SYSTEM_PROMPT, &user_prompt)
            .await?;
        Ok(analysis.trim().to_string())
    }

    async fn generate_with_retry(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, AgentError> {
        let mut attempt = 0;
        loop {
            match self.ai_provider.generate(system_prompt, user_prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt < self.options.max_retries => {
                    let delay = RETRY_BASE_DELAY * 2u32.saturating_pow(attempt);
                    warn!(attempt = attempt + 1, "Completion failed, retrying in {delay:?}: {e}");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Sends one short prompt to `provider` and returns its trimmed reply.
pub async fn check_connection(provider: &dyn AiProvider) -> Result<String, AgentError> {
    info!(model = %provider.model_name(), "Checking completion API connectivity.");
    let reply = provider
        .generate(CHECK_SYSTEM_PROMPT, CHECK_USER_PROMPT)
        .await?;
    Ok(reply.trim().to_string())
}

/// Renders rows for the interpretation prompt: all of them when there are few,
/// otherwise a count and the first five.
fn format_results(result: &QueryResult) -> String {
    let format_row = |(i, row): (usize, &crate::types::Row)| {
        let fields: Vec<String> = result
            .columns
            .iter()
            .map(|col| {
                let value = row.get(col).map(|v| match v {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                });
                format!("{col}: {}", value.unwrap_or_default())
            })
            .collect();
        format!("{}. {}", i + 1, fields.join(" | "))
    };

    if result.rows.len() <= INTERPRETATION_ROW_LIMIT {
        result
            .rows
            .iter()
            .enumerate()
            .map(format_row)
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        let head: Vec<String> = result.rows.iter().take(5).enumerate().map(format_row).collect();
        format!(
            "Found {} records. Here are the first 5:\n{}",
            result.rows.len(),
            head.join("\n")
        )
    }
}

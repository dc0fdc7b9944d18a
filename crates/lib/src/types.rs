use crate::chart::ChartSpec;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single result row, keyed by column name.
pub type Row = Map<String, Value>;

/// The tabular result of running a SQL statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Column names in select-list order.
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    /// Set when the row cap was reached and further rows were dropped.
    #[serde(default)]
    pub truncated: bool,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the first column of the first row, if any.
    pub fn scalar(&self) -> Option<&Value> {
        let column = self.columns.first()?;
        self.rows.first()?.get(column)
    }
}

/// Sampling parameters sent with every completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Which hosted model to call.
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: crate::constants::DEFAULT_AI_MODEL.to_string(),
            temperature: crate::constants::DEFAULT_TEMPERATURE,
            max_tokens: crate::constants::DEFAULT_MAX_TOKENS,
        }
    }
}

/// Where the executed SQL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuerySource {
    /// Generated by the model from the question.
    Model,
    /// A fixed query matched from the question's keywords.
    Shortcut,
}

/// The full answer to a natural-language question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub question: String,
    /// The statement that was executed.
    pub sql: String,
    pub source: QuerySource,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub row_count: usize,
    pub truncated: bool,
    /// Prose the model wrote around the SQL statement, if any.
    pub narrative: Option<String>,
    /// The business interpretation of the rows, if requested.
    pub analysis: Option<String>,
    /// Why the interpretation step failed, when it did.
    pub analysis_error: Option<String>,
    pub chart: Option<ChartSpec>,
}

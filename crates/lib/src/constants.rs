//! # Shared Constants
//!
//! Values shared by the library, the server, and the CLI.

/// The root directory for local databases.
pub const DB_DIR: &str = "db";

/// The default path for the inventory and sales database.
pub const DEFAULT_DB_FILE: &str = "db/inventory_sales.db";

/// The default OpenAI-compatible chat completions endpoint (Groq).
pub const DEFAULT_AI_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// The default hosted model.
pub const DEFAULT_AI_MODEL: &str = "llama3-8b-8192";

/// Low temperature keeps generated SQL stable between runs.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

pub const DEFAULT_MAX_TOKENS: u32 = 1500;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Upper bound on the rows returned for a single model-generated query.
pub const DEFAULT_MAX_ROWS: usize = 500;

/// Result sets larger than this are summarized rather than listed in the interpretation prompt.
pub const INTERPRETATION_ROW_LIMIT: usize = 10;

/// Message used when a query returns no rows.
pub const NO_DATA_MESSAGE: &str = "No data found for your query.";

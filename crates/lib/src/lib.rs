//! # Natural Language Business Queries
//!
//! This crate answers business questions about an inventory and sales database.
//! A [`QueryAgent`] sends the question and a fixed schema description to a hosted
//! completion API, extracts a single read-only SQL statement from the reply, runs
//! it against SQLite, and returns the rows with an optional chart and analysis.
//!
//! It also owns the schema, a sample-data generator, the canned dashboard views
//! and the configuration shared by the server and the CLI.

pub mod agent;
pub mod chart;
pub mod config;
pub mod constants;
pub mod errors;
pub mod extraction;
pub mod prompts;
pub mod providers;
pub mod seed;
pub mod shortcuts;
pub mod types;
pub mod views;

pub use agent::{check_connection, AgentOptions, QueryAgent, QueryAgentBuilder};
pub use errors::{AgentError, ErrorKind};
pub use types::{Answer, QueryResult, QuerySource};

//! # Prompt Template Modules
//!
//! This module organizes all prompt templates used by the query agent.

pub mod core;
pub mod samples;

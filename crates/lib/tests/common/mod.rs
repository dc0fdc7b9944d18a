#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared helpers for the library's integration tests: a scripted AI provider,
//! temporary databases, and a tiny known dataset.

use async_trait::async_trait;
use bizquery::providers::ai::AiProvider;
use bizquery::providers::db::sqlite::SqliteProvider;
use bizquery::AgentError;
use dotenvy::dotenv;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};
use tempfile::TempDir;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber and loads .env for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// --- Mock AI Provider ---

/// Replies with queued results in order, then with a fixed fallback.
#[derive(Clone, Debug)]
pub struct MockAiProvider {
    pub call_history: Arc<Mutex<Vec<(String, String)>>>,
    replies: Arc<Mutex<VecDeque<Result<String, AgentError>>>>,
}

impl MockAiProvider {
    pub fn new(responses: Vec<&str>) -> Self {
        Self::with_results(responses.into_iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn with_results(results: Vec<Result<String, AgentError>>) -> Self {
        Self {
            call_history: Arc::new(Mutex::new(Vec::new())),
            replies: Arc::new(Mutex::new(results.into())),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.call_history.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AgentError> {
        self.call_history
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("Default mock response".to_string()))
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

// --- Databases ---

/// A file-backed database with the schema applied. Keep the `TempDir` alive.
pub async fn new_test_db() -> (SqliteProvider, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    let provider = SqliteProvider::new(path.to_str().unwrap()).await.unwrap();
    provider.initialize_schema().await.unwrap();
    (provider, dir)
}

/// One warehouse, one product ("Widget" at 9.99) and one sale of three units.
pub const WIDGET_SCENARIO_SQL: &str = "
INSERT INTO warehouses (warehouse_id, warehouse_name, location, capacity, manager_name) VALUES (1, 'W1', 'Lagos', 100, 'Ada');
INSERT INTO categories (category_id, category_name, description) VALUES (1, 'Gadgets', 'Small devices');
INSERT INTO suppliers (supplier_id, supplier_name, contact_email, country) VALUES (1, 'Acme', 'sales@acme.example.com', 'Nigeria');
INSERT INTO products (product_id, product_name, product_code, category_id, supplier_id, unit_price, cost_price, reorder_level, is_active) VALUES (1, 'Widget', 'PRD0001', 1, 1, 9.99, 5.0, 10, 1);
INSERT INTO customers (customer_id, customer_name, customer_type, email, phone, city, country, credit_limit) VALUES (1, 'Tunde Bello', 'Individual', 'tunde@example.com', '+234-801-000-0000', 'Lagos', 'Nigeria', 1000.0);
INSERT INTO inventory (inventory_id, product_id, warehouse_id, quantity_on_hand, quantity_reserved, max_stock_level) VALUES (1, 1, 1, 4, 0, 100);
INSERT INTO sales (sale_id, sale_number, customer_id, product_id, warehouse_id, quantity, unit_price, discount_percentage, total_amount, sale_date, order_status, payment_status) VALUES (1, 'SO000001', 1, 1, 1, 3, 9.99, 0.0, 29.97, '2024-05-14', 'Delivered', 'Paid');
";

pub async fn widget_db() -> (SqliteProvider, TempDir) {
    let (provider, dir) = new_test_db().await;
    provider
        .initialize_with_data(WIDGET_SCENARIO_SQL)
        .await
        .unwrap();
    (provider, dir)
}

/// An OpenAI-style chat completion body with the given content.
pub fn completion(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
}

//! Shared helpers for the server and CLI integration tests: temporary databases,
//! a small known dataset, a scripted AI provider and completion bodies for
//! `httpmock`.

use anyhow::Result;
use async_trait::async_trait;
use bizquery::providers::ai::AiProvider;
use bizquery::providers::db::sqlite::SqliteProvider;
use bizquery::AgentError;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// --- Test Setup ---

/// A file-backed database in its own temporary directory, with the schema applied.
pub struct TestSetup {
    pub provider: SqliteProvider,
    pub db_path: PathBuf,
    _dir: TempDir,
}

impl TestSetup {
    pub async fn new() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let db_path = dir.path().join("inventory_sales.db");
        let path = db_path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("temporary path is not valid UTF-8"))?;
        let provider = SqliteProvider::new(path).await?;
        provider.initialize_schema().await?;
        Ok(Self {
            provider,
            db_path,
            _dir: dir,
        })
    }

    /// A database holding only the Widget scenario.
    pub async fn with_widget_scenario() -> Result<Self> {
        let setup = Self::new().await?;
        setup
            .provider
            .initialize_with_data(WIDGET_SCENARIO_SQL)
            .await?;
        Ok(setup)
    }

    pub fn db_url(&self) -> String {
        self.db_path.to_string_lossy().into_owned()
    }
}

/// One warehouse, one product ("Widget" at 9.99, 4 in stock) and one delivered sale
/// of three units, worth 29.97.
pub const WIDGET_SCENARIO_SQL: &str = "
INSERT INTO warehouses (warehouse_id, warehouse_name, location, capacity, manager_name) VALUES (1, 'W1', 'Lagos', 100, 'Ada');
INSERT INTO categories (category_id, category_name, description) VALUES (1, 'Gadgets', 'Small devices');
INSERT INTO suppliers (supplier_id, supplier_name, contact_email, country) VALUES (1, 'Acme', 'sales@acme.example.com', 'Nigeria');
INSERT INTO products (product_id, product_name, product_code, category_id, supplier_id, unit_price, cost_price, reorder_level, is_active) VALUES (1, 'Widget', 'PRD0001', 1, 1, 9.99, 5.0, 10, 1);
INSERT INTO customers (customer_id, customer_name, customer_type, email, phone, city, country, credit_limit) VALUES (1, 'Tunde Bello', 'Individual', 'tunde@example.com', '+234-801-000-0000', 'Lagos', 'Nigeria', 1000.0);
INSERT INTO inventory (inventory_id, product_id, warehouse_id, quantity_on_hand, quantity_reserved, max_stock_level) VALUES (1, 1, 1, 4, 0, 100);
INSERT INTO sales (sale_id, sale_number, customer_id, product_id, warehouse_id, quantity, unit_price, discount_percentage, total_amount, sale_date, order_status, payment_status) VALUES (1, 'SO000001', 1, 1, 1, 3, 9.99, 0.0, 29.97, '2024-05-14', 'Delivered', 'Paid');
";

/// The revenue query a well-behaved model would write for the Widget scenario.
pub const WIDGET_REVENUE_SQL: &str = "SELECT SUM(s.total_amount) AS revenue FROM sales s JOIN products p ON s.product_id = p.product_id WHERE p.product_name = 'Widget'";

// --- Mock AI Provider ---

/// Replies with queued results in order, then with a fixed fallback.
#[derive(Clone, Debug)]
pub struct MockAiProvider {
    replies: Arc<Mutex<VecDeque<Result<String, AgentError>>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAiProvider {
    pub fn new(replies: Vec<&str>) -> Self {
        Self::with_results(replies.into_iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn with_results(results: Vec<Result<String, AgentError>>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(results.into())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Retrieves the recorded `(system, user)` prompt pairs for assertion.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AgentError> {
        self.calls
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

// --- HTTP Fixtures ---

/// An OpenAI-style chat completion body with the given content.
pub fn chat_completion(content: &str) -> Value {
    json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
}

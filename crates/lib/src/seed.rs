//! # Sample Data Generator
//!
//! Fills the inventory and sales tables with plausible demo data. Tables are
//! written in foreign-key order and every referenced id is read back from the
//! database, so generated sales and movements never point at missing rows.

use crate::{
    errors::AgentError,
    providers::db::sqlite::{sql::TABLES_IN_DELETE_ORDER, SqliteProvider},
};
use chrono::{Local, NaiveDate};
use rand::{
    distributions::{Distribution, WeightedIndex},
    rngs::StdRng,
    seq::SliceRandom,
    Rng, SeedableRng,
};
use serde::Serialize;
use tracing::{info, warn};
use turso::{Connection, Value as TursoValue};

const CATEGORIES: &[(&str, &str)] = &[
    ("Electronics", "Consumer electronics and gadgets"),
    ("Clothing", "Apparel and fashion items"),
    ("Home & Garden", "Home improvement and garden supplies"),
    ("Books", "Books and educational materials"),
    ("Sports", "Sports equipment and accessories"),
    ("Automotive", "Car parts and accessories"),
    ("Health & Beauty", "Health and beauty products"),
    ("Toys & Games", "Toys and gaming products"),
    ("Office Supplies", "Office and business supplies"),
    ("Kitchen & Dining", "Kitchenware and dining accessories"),
];

/// (name, category, unit price, cost price)
const PRODUCT_TEMPLATES: &[(&str, &str, f64, f64)] = &[
    ("Smartphone Pro 15", "Electronics", 899.99, 750.00),
    ("Android Flagship S24", "Electronics", 799.99, 650.00),
    ("Ultrabook 13", "Electronics", 999.99, 820.00),
    ("Wireless Earbuds", "Electronics", 249.99, 180.00),
    ("Noise Cancelling Headphones", "Electronics", 399.99, 280.00),
    ("Classic Sneakers", "Clothing", 109.99, 65.00),
    ("Original Fit Jeans", "Clothing", 79.99, 45.00),
    ("Cotton Hoodie", "Clothing", 69.99, 35.00),
    ("Basic T-Shirt", "Clothing", 19.99, 8.00),
    ("Cordless Vacuum", "Home & Garden", 649.99, 450.00),
    ("Expandable Garden Hose", "Home & Garden", 39.99, 18.00),
    ("Business Strategy Handbook", "Books", 34.99, 15.00),
    ("Children's Picture Book", "Books", 12.99, 5.00),
    ("Yoga Mat", "Sports", 29.99, 12.00),
    ("Football", "Sports", 24.99, 10.00),
    ("Car Phone Mount", "Automotive", 19.99, 7.50),
    ("Engine Oil 5L", "Automotive", 49.99, 30.00),
    ("Shea Butter Lotion", "Health & Beauty", 14.99, 6.00),
    ("Electric Toothbrush", "Health & Beauty", 59.99, 32.00),
    ("Building Blocks Set", "Toys & Games", 44.99, 22.00),
    ("Board Game Classic", "Toys & Games", 29.99, 14.00),
    ("A4 Paper Ream", "Office Supplies", 7.99, 3.50),
    ("Ergonomic Office Chair", "Office Supplies", 229.99, 140.00),
    ("Stand Mixer", "Kitchen & Dining", 349.99, 220.00),
    ("Non-stick Pan Set", "Kitchen & Dining", 89.99, 48.00),
];

/// (name, location, capacity, manager)
const WAREHOUSES: &[(&str, &str, i64, &str)] = &[
    ("Main Warehouse", "Lagos, Nigeria", 10000, "John Adebayo"),
    ("North Warehouse", "Kano, Nigeria", 8000, "Fatima Hassan"),
    ("South Warehouse", "Port Harcourt, Nigeria", 6000, "Emeka Okafor"),
    ("West Warehouse", "Ibadan, Nigeria", 7500, "Bola Adeyemi"),
    ("East Warehouse", "Enugu, Nigeria", 5500, "Chika Okwu"),
];

const FIRST_NAMES: &[&str] = &[
    "Ada", "Tunde", "Ngozi", "Ibrahim", "Kemi", "Chinedu", "Aisha", "Segun", "Funmi", "Musa",
    "Zainab", "Obinna",
];
const LAST_NAMES: &[&str] = &[
    "Okafor", "Adeyemi", "Bello", "Eze", "Ogunleye", "Abubakar", "Nwosu", "Balogun", "Danjuma",
    "Uche",
];
const COMPANY_WORDS: &[&str] = &[
    "Apex", "Harbor", "Sunrise", "Delta", "Unity", "Crest", "Pioneer", "Summit", "Royal",
    "Greenfield",
];
const COMPANY_SUFFIXES: &[&str] = &["Traders", "Ventures", "Holdings", "Supplies", "Enterprises"];
const CITIES: &[&str] = &[
    "Lagos", "Abuja", "Kano", "Ibadan", "Port Harcourt", "Enugu", "Benin City", "Kaduna",
];
const SUPPLIER_COUNTRIES: &[&str] = &["Nigeria", "China", "Germany", "United States", "India"];

const ORDER_STATUSES: &[(&str, u32)] = &[
    ("Delivered", 60),
    ("Shipped", 15),
    ("Processing", 10),
    ("Pending", 10),
    ("Cancelled", 5),
];

/// What to do with rows that are already in the database.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedMode {
    /// Delete all rows, then seed from scratch.
    #[default]
    Reset,
    /// Keep existing rows and add more. Unique codes continue after the existing ones.
    Append,
}

/// How much data to generate.
#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub mode: SeedMode,
    pub warehouses: usize,
    pub suppliers: usize,
    pub products: usize,
    pub customers: usize,
    pub sales: usize,
    /// Seed for the random generator; the same seed and reference date give the same data.
    pub rng_seed: Option<u64>,
    /// Sales and movements are dated within `history_days` before this date. Defaults to today.
    pub reference_date: Option<NaiveDate>,
    pub history_days: u32,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            mode: SeedMode::Reset,
            warehouses: WAREHOUSES.len(),
            suppliers: 15,
            products: 60,
            customers: 50,
            sales: 300,
            rng_seed: None,
            reference_date: None,
            history_days: 180,
        }
    }
}

/// Rows written to one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCount {
    pub table: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedReport {
    pub mode: SeedMode,
    /// Inserted rows per table, in insertion order.
    pub inserted: Vec<TableCount>,
}

impl SeedReport {
    pub fn rows_for(&self, table: &str) -> usize {
        self.inserted
            .iter()
            .find(|c| c.table == table)
            .map_or(0, |c| c.rows)
    }

    pub fn total(&self) -> usize {
        self.inserted.iter().map(|c| c.rows).sum()
    }

    fn record(&mut self, table: &str, rows: usize) {
        info!("  Added {rows} rows to {table}");
        self.inserted.push(TableCount {
            table: table.to_string(),
            rows,
        });
    }
}

/// Populates the database with sample data.
///
/// The schema is created first if it is missing. Each table is written in its own
/// transaction.
pub async fn seed_sample_data(
    provider: &SqliteProvider,
    options: &SeedOptions,
) -> Result<SeedReport, AgentError> {
    provider.initialize_schema().await?;
    let conn = provider.connect()?;

    let mut rng = match options.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let reference_date = options
        .reference_date
        .unwrap_or_else(|| Local::now().date_naive());

    let mut report = SeedReport {
        mode: options.mode,
        ..Default::default()
    };

    match options.mode {
        SeedMode::Reset => {
            info!("Clearing existing data.");
            let deletes: Vec<(String, Vec<TursoValue>)> = TABLES_IN_DELETE_ORDER
                .iter()
                .map(|table| (format!("DELETE FROM {table}"), Vec::new()))
                .collect();
            run_in_transaction(&conn, deletes).await?;
        }
        SeedMode::Append => info!("Appending to existing data."),
    }

    // --- Categories ---
    let existing: Vec<String> = query_texts(&conn, "SELECT category_name FROM categories").await?;
    let rows = CATEGORIES
        .iter()
        .filter(|(name, _)| !existing.iter().any(|e| e == name))
        .map(|(name, description)| vec![text(name), text(description)])
        .map(|params| {
            (
                "INSERT INTO categories (category_name, description) VALUES (?, ?)".to_string(),
                params,
            )
        })
        .collect();
    report.record("categories", run_in_transaction(&conn, rows).await?);

    // --- Suppliers ---
    let rows = (0..options.suppliers)
        .map(|_| {
            let name = format!(
                "{} {}",
                COMPANY_WORDS.choose(&mut rng).copied().unwrap_or("Apex"),
                COMPANY_SUFFIXES.choose(&mut rng).copied().unwrap_or("Supplies")
            );
            let email = format!("sales@{}.example.com", slug(&name));
            let country = SUPPLIER_COUNTRIES.choose(&mut rng).copied().unwrap_or("Nigeria");
            (
                "INSERT INTO suppliers (supplier_name, contact_email, country) VALUES (?, ?, ?)"
                    .to_string(),
                vec![text(&name), text(&email), text(country)],
            )
        })
        .collect();
    report.record("suppliers", run_in_transaction(&conn, rows).await?);

    // --- Warehouses ---
    let rows = (0..options.warehouses)
        .map(|i| {
            let (name, location, capacity, manager) = WAREHOUSES[i % WAREHOUSES.len()];
            let round = i / WAREHOUSES.len();
            let name = if round == 0 {
                name.to_string()
            } else {
                format!("{name} {}", round + 1)
            };
            (
                "INSERT INTO warehouses (warehouse_name, location, capacity, manager_name) VALUES (?, ?, ?, ?)"
                    .to_string(),
                vec![text(&name), text(location), TursoValue::Integer(capacity), text(manager)],
            )
        })
        .collect();
    report.record("warehouses", run_in_transaction(&conn, rows).await?);

    let categories = query_id_text_pairs(&conn, "SELECT category_id, category_name FROM categories").await?;
    let supplier_ids = query_ids(&conn, "SELECT supplier_id FROM suppliers").await?;
    let warehouse_ids = query_ids(&conn, "SELECT warehouse_id FROM warehouses").await?;

    // --- Products ---
    let first_new_product = query_max_id(&conn, "SELECT MAX(product_id) FROM products").await?;
    let code_offset = provider.count_rows("products").await? as usize;
    if options.products > 0 && supplier_ids.is_empty() {
        return Err(AgentError::Configuration(
            "cannot generate products without suppliers".to_string(),
        ));
    }
    let rows = (0..options.products)
        .map(|i| {
            let (name, category, price, cost) = PRODUCT_TEMPLATES[i % PRODUCT_TEMPLATES.len()];
            let variant = i / PRODUCT_TEMPLATES.len();
            let name = if variant == 0 {
                name.to_string()
            } else {
                format!("{name} - Variant {}", variant + 1)
            };
            let code = format!("PRD{:04}", code_offset + i + 1);
            let category_id = categories
                .iter()
                .find(|(_, n)| n == category)
                .map_or(TursoValue::Null, |(id, _)| TursoValue::Integer(*id));
            let supplier_id = supplier_ids.choose(&mut rng).copied().unwrap_or_default();
            let factor = rng.gen_range(0.9..1.1);
            let is_active = i64::from(rng.gen_bool(0.9));
            (
                "INSERT INTO products (product_name, product_code, category_id, supplier_id, unit_price, cost_price, reorder_level, is_active) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
                    .to_string(),
                vec![
                    text(&name),
                    text(&code),
                    category_id,
                    TursoValue::Integer(supplier_id),
                    TursoValue::Real(round2(price * factor)),
                    TursoValue::Real(round2(cost * factor)),
                    TursoValue::Integer(rng.gen_range(5..=30)),
                    TursoValue::Integer(is_active),
                ],
            )
        })
        .collect();
    report.record("products", run_in_transaction(&conn, rows).await?);

    // --- Customers ---
    let rows = (0..options.customers)
        .map(|_| {
            let business = rng.gen_bool(0.5);
            let name = if business {
                format!(
                    "{} {}",
                    COMPANY_WORDS.choose(&mut rng).copied().unwrap_or("Unity"),
                    COMPANY_SUFFIXES.choose(&mut rng).copied().unwrap_or("Ventures")
                )
            } else {
                format!(
                    "{} {}",
                    FIRST_NAMES.choose(&mut rng).copied().unwrap_or("Ada"),
                    LAST_NAMES.choose(&mut rng).copied().unwrap_or("Okafor")
                )
            };
            let credit_limit = if business {
                rng.gen_range(5000.0..50000.0)
            } else {
                rng.gen_range(500.0..5000.0)
            };
            let email = format!("{}{}@example.com", slug(&name), rng.gen_range(1..1000));
            let phone = format!(
                "+234-80{}-{:03}-{:04}",
                rng.gen_range(1..10),
                rng.gen_range(0..1000),
                rng.gen_range(0..10000)
            );
            let city = CITIES.choose(&mut rng).copied().unwrap_or("Lagos");
            (
                "INSERT INTO customers (customer_name, customer_type, email, phone, city, country, credit_limit) VALUES (?, ?, ?, ?, ?, ?, ?)"
                    .to_string(),
                vec![
                    text(&name),
                    text(if business { "Business" } else { "Individual" }),
                    text(&email),
                    text(&phone),
                    text(city),
                    text("Nigeria"),
                    TursoValue::Real(round2(credit_limit)),
                ],
            )
        })
        .collect();
    report.record("customers", run_in_transaction(&conn, rows).await?);

    // --- Inventory (new products only, so the product/warehouse pair stays unique) ---
    let new_product_ids = query_ids(
        &conn,
        &format!("SELECT product_id FROM products WHERE product_id > {first_new_product}"),
    )
    .await?;
    let mut stock_positions: Vec<(i64, i64, i64)> = Vec::new();
    if !warehouse_ids.is_empty() {
        for product_id in &new_product_ids {
            let n = rng.gen_range(1..=warehouse_ids.len());
            for warehouse_id in warehouse_ids.choose_multiple(&mut rng, n) {
                stock_positions.push((*product_id, *warehouse_id, rng.gen_range(0..=500)));
            }
        }
    } else if !new_product_ids.is_empty() {
        warn!("No warehouses exist; products were added without stock.");
    }
    let rows = stock_positions
        .iter()
        .map(|(product_id, warehouse_id, on_hand)| {
            let reserved = rng.gen_range(0..=(*on_hand).min(50));
            (
                "INSERT INTO inventory (product_id, warehouse_id, quantity_on_hand, quantity_reserved, max_stock_level) VALUES (?, ?, ?, ?, ?)"
                    .to_string(),
                vec![
                    TursoValue::Integer(*product_id),
                    TursoValue::Integer(*warehouse_id),
                    TursoValue::Integer(*on_hand),
                    TursoValue::Integer(reserved),
                    TursoValue::Integer(rng.gen_range(100..=1000)),
                ],
            )
        })
        .collect();
    report.record("inventory", run_in_transaction(&conn, rows).await?);

    // --- Sales ---
    let customer_ids = query_ids(&conn, "SELECT customer_id FROM customers").await?;
    let active_products =
        query_id_price_pairs(&conn, "SELECT product_id, unit_price FROM products WHERE is_active = 1")
            .await?;
    if options.sales > 0
        && (customer_ids.is_empty() || active_products.is_empty() || warehouse_ids.is_empty())
    {
        return Err(AgentError::Configuration(
            "cannot generate sales without customers, active products and warehouses".to_string(),
        ));
    }
    let status_dist = WeightedIndex::new(ORDER_STATUSES.iter().map(|(_, w)| *w))
        .map_err(|e| AgentError::Configuration(e.to_string()))?;
    let number_offset = provider.count_rows("sales").await? as usize;
    let rows = (0..options.sales)
        .map(|i| {
            let customer_id = customer_ids.choose(&mut rng).copied().unwrap_or_default();
            let warehouse_id = warehouse_ids.choose(&mut rng).copied().unwrap_or_default();
            let (product_id, unit_price) =
                active_products.choose(&mut rng).copied().unwrap_or_default();
            let quantity: i64 = rng.gen_range(1..=10);
            let discount = round2(rng.gen_range(0.0..15.0));
            let total = round2(quantity as f64 * unit_price * (1.0 - discount / 100.0));
            let status = ORDER_STATUSES[status_dist.sample(&mut rng)].0;
            let payment = if matches!(status, "Delivered" | "Shipped") {
                "Paid"
            } else {
                ["Pending", "Paid", "Partial"]
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or("Pending")
            };
            let sale_date = random_date(&mut rng, reference_date, options.history_days);
            (
                "INSERT INTO sales (sale_number, customer_id, product_id, warehouse_id, quantity, unit_price, discount_percentage, total_amount, sale_date, order_status, payment_status) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
                    .to_string(),
                vec![
                    text(&format!("SO{:06}", number_offset + i + 1)),
                    TursoValue::Integer(customer_id),
                    TursoValue::Integer(product_id),
                    TursoValue::Integer(warehouse_id),
                    TursoValue::Integer(quantity),
                    TursoValue::Real(unit_price),
                    TursoValue::Real(discount),
                    TursoValue::Real(total),
                    text(&sale_date),
                    text(status),
                    text(payment),
                ],
            )
        })
        .collect();
    report.record("sales", run_in_transaction(&conn, rows).await?);

    // --- Inventory movements ---
    let mut rows = Vec::new();
    for (product_id, warehouse_id, on_hand) in stock_positions.iter().filter(|p| p.2 > 0).take(200) {
        for _ in 0..rng.gen_range(1..=5) {
            let (movement_type, reason) = match rng.gen_range(0..3) {
                0 => ("IN", "PURCHASE_ORDER"),
                1 => ("OUT", "SALES_ORDER"),
                _ => ("ADJUSTMENT", "ADJUSTMENT"),
            };
            let magnitude = rng.gen_range(1..=(*on_hand).min(50));
            let quantity = if movement_type == "OUT" {
                -magnitude
            } else {
                magnitude
            };
            let movement_date = random_date(&mut rng, reference_date, options.history_days);
            rows.push((
                "INSERT INTO inventory_movements (product_id, warehouse_id, movement_type, quantity, reason, movement_date) VALUES (?, ?, ?, ?, ?, ?)"
                    .to_string(),
                vec![
                    TursoValue::Integer(*product_id),
                    TursoValue::Integer(*warehouse_id),
                    text(movement_type),
                    TursoValue::Integer(quantity),
                    text(reason),
                    text(&movement_date),
                ],
            ));
        }
    }
    report.record("inventory_movements", run_in_transaction(&conn, rows).await?);

    info!("Seeding complete: {} rows inserted.", report.total());
    Ok(report)
}

/// Runs the statements in one transaction, rolling back on the first failure.
async fn run_in_transaction(
    conn: &Connection,
    statements: Vec<(String, Vec<TursoValue>)>,
) -> Result<usize, AgentError> {
    conn.execute("BEGIN TRANSACTION", ())
        .await
        .map_err(|e| AgentError::StorageOperationFailed(e.to_string()))?;

    let count = statements.len();
    for (sql, params) in statements {
        if let Err(e) = conn.execute(&sql, params).await {
            if let Err(rollback) = conn.execute("ROLLBACK", ()).await {
                warn!("Rollback failed: {rollback}");
            }
            return Err(AgentError::StorageOperationFailed(format!("{sql}: {e}")));
        }
    }

    conn.execute("COMMIT", ())
        .await
        .map_err(|e| AgentError::StorageOperationFailed(e.to_string()))?;
    Ok(count)
}

async fn query_rows(conn: &Connection, sql: &str) -> Result<Vec<turso::Row>, AgentError> {
    let mut rows = conn
        .query(sql, ())
        .await
        .map_err(|e| AgentError::StorageQueryFailed(e.to_string()))?;
    let mut out = Vec::new();
    while let Some(row) = rows
        .next()
        .await
        .map_err(|e| AgentError::StorageQueryFailed(e.to_string()))?
    {
        out.push(row);
    }
    Ok(out)
}

async fn query_ids(conn: &Connection, sql: &str) -> Result<Vec<i64>, AgentError> {
    Ok(query_rows(conn, sql)
        .await?
        .iter()
        .filter_map(|row| match row.get_value(0) {
            Ok(TursoValue::Integer(id)) => Some(id),
            _ => None,
        })
        .collect())
}

async fn query_max_id(conn: &Connection, sql: &str) -> Result<i64, AgentError> {
    Ok(query_ids(conn, sql).await?.first().copied().unwrap_or(0))
}

async fn query_texts(conn: &Connection, sql: &str) -> Result<Vec<String>, AgentError> {
    Ok(query_rows(conn, sql)
        .await?
        .iter()
        .filter_map(|row| match row.get_value(0) {
            Ok(TursoValue::Text(s)) => Some(s),
            _ => None,
        })
        .collect())
}

async fn query_id_text_pairs(conn: &Connection, sql: &str) -> Result<Vec<(i64, String)>, AgentError> {
    Ok(query_rows(conn, sql)
        .await?
        .iter()
        .filter_map(|row| match (row.get_value(0), row.get_value(1)) {
            (Ok(TursoValue::Integer(id)), Ok(TursoValue::Text(s))) => Some((id, s)),
            _ => None,
        })
        .collect())
}

async fn query_id_price_pairs(conn: &Connection, sql: &str) -> Result<Vec<(i64, f64)>, AgentError> {
    Ok(query_rows(conn, sql)
        .await?
        .iter()
        .filter_map(|row| match (row.get_value(0), row.get_value(1)) {
            (Ok(TursoValue::Integer(id)), Ok(TursoValue::Real(price))) => Some((id, price)),
            (Ok(TursoValue::Integer(id)), Ok(TursoValue::Integer(price))) => {
                Some((id, price as f64))
            }
            _ => None,
        })
        .collect())
}

fn text(s: &str) -> TursoValue {
    TursoValue::Text(s.to_string())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn slug(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

fn random_date(rng: &mut StdRng, reference: NaiveDate, history_days: u32) -> String {
    let back = rng.gen_range(0..=i64::from(history_days));
    (reference - chrono::Duration::days(back))
        .format("%Y-%m-%d")
        .to_string()
}

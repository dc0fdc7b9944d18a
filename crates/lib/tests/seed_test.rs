//! # Sample Data Generator Tests

mod common;

use bizquery::providers::db::storage::Storage;
use bizquery::seed::{seed_sample_data, SeedMode, SeedOptions};
use chrono::NaiveDate;
use common::{new_test_db, setup_tracing};
use serde_json::Value;

fn small_options() -> SeedOptions {
    SeedOptions {
        warehouses: 3,
        suppliers: 4,
        products: 12,
        customers: 8,
        sales: 40,
        rng_seed: Some(42),
        reference_date: NaiveDate::from_ymd_opt(2024, 6, 30),
        ..Default::default()
    }
}

async fn scalar(provider: &dyn Storage, sql: &str) -> i64 {
    provider
        .execute_query(sql, 1)
        .await
        .unwrap()
        .scalar()
        .and_then(Value::as_i64)
        .unwrap()
}

#[tokio::test]
async fn seeds_every_table_with_requested_counts() {
    setup_tracing();
    let (provider, _dir) = new_test_db().await;

    let report = seed_sample_data(&provider, &small_options()).await.unwrap();

    assert_eq!(report.mode, SeedMode::Reset);
    assert_eq!(report.rows_for("categories"), 10);
    assert_eq!(report.rows_for("suppliers"), 4);
    assert_eq!(report.rows_for("warehouses"), 3);
    assert_eq!(report.rows_for("products"), 12);
    assert_eq!(report.rows_for("customers"), 8);
    assert_eq!(report.rows_for("sales"), 40);
    assert!(report.rows_for("inventory") >= 12);
    assert_eq!(provider.count_rows("sales").await.unwrap(), 40);
}

#[tokio::test]
async fn generated_rows_never_reference_missing_rows() {
    setup_tracing();
    let (provider, _dir) = new_test_db().await;
    seed_sample_data(&provider, &small_options()).await.unwrap();

    let dangling_checks = [
        "SELECT COUNT(*) FROM sales s LEFT JOIN customers c ON s.customer_id = c.customer_id WHERE c.customer_id IS NULL",
        "SELECT COUNT(*) FROM sales s LEFT JOIN products p ON s.product_id = p.product_id WHERE p.product_id IS NULL",
        "SELECT COUNT(*) FROM sales s LEFT JOIN warehouses w ON s.warehouse_id = w.warehouse_id WHERE w.warehouse_id IS NULL",
        "SELECT COUNT(*) FROM inventory i LEFT JOIN products p ON i.product_id = p.product_id WHERE p.product_id IS NULL",
        "SELECT COUNT(*) FROM inventory i LEFT JOIN warehouses w ON i.warehouse_id = w.warehouse_id WHERE w.warehouse_id IS NULL",
        "SELECT COUNT(*) FROM inventory_movements m LEFT JOIN products p ON m.product_id = p.product_id WHERE p.product_id IS NULL",
        "SELECT COUNT(*) FROM products p LEFT JOIN suppliers s ON p.supplier_id = s.supplier_id WHERE s.supplier_id IS NULL",
        "SELECT COUNT(*) FROM products p LEFT JOIN categories c ON p.category_id = c.category_id WHERE c.category_id IS NULL",
    ];
    for sql in dangling_checks {
        assert_eq!(scalar(&provider, sql).await, 0, "dangling rows for: {sql}");
    }
}

#[tokio::test]
async fn stock_and_movement_values_are_consistent() {
    setup_tracing();
    let (provider, _dir) = new_test_db().await;
    seed_sample_data(&provider, &small_options()).await.unwrap();

    assert_eq!(
        scalar(
            &provider,
            "SELECT COUNT(*) FROM inventory WHERE quantity_on_hand < 0 OR quantity_reserved < 0 OR quantity_reserved > quantity_on_hand"
        )
        .await,
        0
    );
    assert_eq!(
        scalar(
            &provider,
            "SELECT COUNT(*) FROM inventory_movements WHERE (movement_type = 'OUT' AND quantity >= 0) OR (movement_type != 'OUT' AND quantity <= 0)"
        )
        .await,
        0
    );
    assert_eq!(
        scalar(&provider, "SELECT COUNT(*) FROM sales WHERE quantity <= 0").await,
        0
    );
    assert_eq!(
        scalar(
            &provider,
            "SELECT COUNT(*) FROM sales WHERE order_status IN ('Delivered', 'Shipped') AND payment_status != 'Paid'"
        )
        .await,
        0
    );
    assert_eq!(
        scalar(
            &provider,
            "SELECT COUNT(*) FROM sales WHERE sale_date > '2024-06-30' OR sale_date < '2024-01-02'"
        )
        .await,
        0
    );
}

#[tokio::test]
async fn reset_mode_replaces_previous_data() {
    setup_tracing();
    let (provider, _dir) = new_test_db().await;
    let options = small_options();

    seed_sample_data(&provider, &options).await.unwrap();
    seed_sample_data(&provider, &options).await.unwrap();

    assert_eq!(provider.count_rows("sales").await.unwrap(), 40);
    assert_eq!(provider.count_rows("products").await.unwrap(), 12);
    assert_eq!(provider.count_rows("categories").await.unwrap(), 10);
}

#[tokio::test]
async fn append_mode_adds_rows_with_fresh_codes() {
    setup_tracing();
    let (provider, _dir) = new_test_db().await;
    let options = small_options();
    seed_sample_data(&provider, &options).await.unwrap();

    let append = SeedOptions {
        mode: SeedMode::Append,
        rng_seed: Some(7),
        ..options
    };
    let report = seed_sample_data(&provider, &append).await.unwrap();

    assert_eq!(report.rows_for("categories"), 0);
    assert_eq!(provider.count_rows("products").await.unwrap(), 24);
    assert_eq!(provider.count_rows("sales").await.unwrap(), 80);
    // Both columns are UNIQUE, so the inserts above would have failed on a clash.
    let last_code = provider
        .execute_query(
            "SELECT product_code FROM products ORDER BY product_code DESC LIMIT 1",
            1,
        )
        .await
        .unwrap();
    assert_eq!(last_code.scalar(), Some(&Value::from("PRD0024")));
    let last_sale = provider
        .execute_query(
            "SELECT sale_number FROM sales ORDER BY sale_number DESC LIMIT 1",
            1,
        )
        .await
        .unwrap();
    assert_eq!(last_sale.scalar(), Some(&Value::from("SO000080")));
}

#[tokio::test]
async fn same_seed_gives_same_data() {
    setup_tracing();
    let (first, _d1) = new_test_db().await;
    let (second, _d2) = new_test_db().await;

    seed_sample_data(&first, &small_options()).await.unwrap();
    seed_sample_data(&second, &small_options()).await.unwrap();

    let sql = "SELECT sale_number, customer_id, product_id, total_amount, sale_date FROM sales ORDER BY sale_id";
    let a = first.execute_query(sql, 1000).await.unwrap();
    let b = second.execute_query(sql, 1000).await.unwrap();
    assert_eq!(a, b);
}

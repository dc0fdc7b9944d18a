//! # SQL Extraction Tests
//!
//! Covers the shapes of completions models actually produce: bare statements,
//! fenced blocks, labelled lines, and prose before or after the query.

use bizquery::extraction::{ensure_read_only, extract_sql};
use bizquery::{AgentError, ErrorKind};

#[test]
fn bare_statement_is_returned_without_terminator() {
    let extracted = extract_sql("SELECT COUNT(*) AS total FROM sales;").unwrap();
    assert_eq!(extracted.sql, "SELECT COUNT(*) AS total FROM sales");
    assert_eq!(extracted.narrative, None);
}

#[test]
fn fenced_block_wins_and_surrounding_prose_becomes_narrative() {
    let response = "Here is the query you asked for:\n\n```sql\nSELECT product_name\nFROM products\nLIMIT 5;\n```\n\nIt lists five products.";
    let extracted = extract_sql(response).unwrap();
    assert_eq!(extracted.sql, "SELECT product_name\nFROM products\nLIMIT 5");
    assert_eq!(
        extracted.narrative.as_deref(),
        Some("Here is the query you asked for:\n\nIt lists five products.")
    );
}

#[test]
fn fence_without_language_tag_is_accepted() {
    let extracted = extract_sql("```\nSELECT 1\n```").unwrap();
    assert_eq!(extracted.sql, "SELECT 1");
}

#[test]
fn labelled_line_is_recognised() {
    let response = "To answer this we sum the sales.\nSQL: SELECT SUM(total_amount) AS revenue FROM sales";
    let extracted = extract_sql(response).unwrap();
    assert_eq!(extracted.sql, "SELECT SUM(total_amount) AS revenue FROM sales");
    assert_eq!(
        extracted.narrative.as_deref(),
        Some("To answer this we sum the sales.")
    );
}

#[test]
fn statement_stops_at_blank_line() {
    let response = "WITH monthly AS (\n  SELECT substr(sale_date, 1, 7) AS month, SUM(total_amount) AS revenue\n  FROM sales GROUP BY month\n)\nSELECT * FROM monthly\n\nThis shows revenue per month.";
    let extracted = extract_sql(response).unwrap();
    assert!(extracted.sql.starts_with("WITH monthly AS ("));
    assert!(extracted.sql.ends_with("SELECT * FROM monthly"));
    assert_eq!(
        extracted.narrative.as_deref(),
        Some("This shows revenue per month.")
    );
}

#[test]
fn blank_line_inside_fenced_block_keeps_the_whole_statement() {
    let response = "```sql\nSELECT *\nFROM sales\n\nWHERE order_status = 'Pending';\n```";
    let extracted = extract_sql(response).unwrap();
    assert_eq!(
        extracted.sql,
        "SELECT *\nFROM sales\n\nWHERE order_status = 'Pending'"
    );

    let extracted = extract_sql("```sql\nSELECT product_name\n\nFROM products;\n```").unwrap();
    assert_eq!(extracted.sql, "SELECT product_name\n\nFROM products");
    ensure_read_only(&extracted.sql).unwrap();
}

#[test]
fn semicolon_inside_literal_does_not_end_statement() {
    let extracted =
        extract_sql("SELECT * FROM customers WHERE customer_name = 'A; B'; -- done").unwrap();
    assert_eq!(
        extracted.sql,
        "SELECT * FROM customers WHERE customer_name = 'A; B'"
    );
}

#[test]
fn capitalised_prose_is_not_mistaken_for_sql() {
    let response = "Select the right table first.\nSELECT warehouse_name FROM warehouses";
    let extracted = extract_sql(response).unwrap();
    assert_eq!(extracted.sql, "SELECT warehouse_name FROM warehouses");
}

#[test]
fn lower_case_sql_is_found_when_nothing_else_matches() {
    let extracted = extract_sql("select * from products").unwrap();
    assert_eq!(extracted.sql, "select * from products");
}

#[test]
fn prose_opening_with_a_keyword_is_skipped_for_lower_case_sql() {
    let response = "With the schema above, the query is:\nselect count(*) as n from sales;";
    let extracted = extract_sql(response).unwrap();
    assert_eq!(extracted.sql, "select count(*) as n from sales");
    assert_eq!(
        extracted.narrative.as_deref(),
        Some("With the schema above, the query is:")
    );
    ensure_read_only(&extracted.sql).unwrap();
}

#[test]
fn lower_case_common_table_expression_is_recognised() {
    let response = "Update the report with this:\nwith totals as (select product_id, sum(quantity) as q from sales group by product_id)\nselect * from totals";
    let extracted = extract_sql(response).unwrap();
    assert!(extracted.sql.starts_with("with totals as ("));
    assert!(extracted.sql.ends_with("select * from totals"));
}

#[test]
fn response_without_sql_is_a_parse_error() {
    let err = extract_sql("I'm sorry, I can't help with that question.").unwrap_err();
    assert!(matches!(err, AgentError::NoSqlFound(_)));
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn write_statements_are_still_extracted_for_the_guard() {
    let extracted = extract_sql("DELETE FROM sales;").unwrap();
    assert_eq!(extracted.sql, "DELETE FROM sales");
    assert!(ensure_read_only(&extracted.sql).is_err());
}

#[test]
fn read_only_guard_accepts_queries() {
    ensure_read_only("SELECT * FROM sales").unwrap();
    ensure_read_only("with t as (select 1 as x) select x from t;").unwrap();
    ensure_read_only("SELECT 'DROP TABLE sales' AS joke").unwrap();
    ensure_read_only("SELECT updated_total FROM \"delete\"").unwrap();
    ensure_read_only("SELECT replace(product_name, ' ', '-') AS slug FROM products").unwrap();
}

#[test]
fn read_only_guard_rejects_writes() {
    for sql in [
        "DELETE FROM sales",
        "UPDATE products SET unit_price = 0",
        "INSERT INTO warehouses (warehouse_name) VALUES ('x')",
        "DROP TABLE sales",
        "PRAGMA table_info(sales)",
        "WITH doomed AS (SELECT 1) DELETE FROM sales",
        "SELECT 1; DROP TABLE sales",
        "WITH x AS (SELECT 1) REPLACE INTO categories (category_name) VALUES ('y')",
        "",
    ] {
        let err = ensure_read_only(sql).unwrap_err();
        assert!(
            matches!(err, AgentError::ReadOnlyViolation(_)),
            "expected rejection for {sql:?}"
        );
        assert_eq!(err.kind(), ErrorKind::Query);
    }
}

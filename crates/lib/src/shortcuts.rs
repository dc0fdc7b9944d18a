//! Fixed queries for a handful of common questions.
//!
//! These run without a model call, which keeps the most frequent dashboard
//! questions fast and deterministic.

const BEST_SELLERS_BY_MONTH: &str = "SELECT
    substr(s.sale_date, 1, 7) AS month,
    p.product_name,
    SUM(s.quantity) AS total_quantity,
    ROUND(SUM(s.total_amount), 2) AS total_revenue,
    COUNT(s.sale_id) AS order_count
FROM sales s
JOIN products p ON s.product_id = p.product_id
WHERE s.order_status != 'Cancelled'
GROUP BY month, p.product_id, p.product_name
ORDER BY month DESC, total_revenue DESC";

const TOP_PRODUCTS_BY_REVENUE: &str = "SELECT
    p.product_name,
    ROUND(SUM(s.total_amount), 2) AS total_revenue,
    SUM(s.quantity) AS total_quantity,
    COUNT(s.sale_id) AS order_count
FROM sales s
JOIN products p ON s.product_id = p.product_id
WHERE s.order_status != 'Cancelled'
GROUP BY p.product_id, p.product_name
ORDER BY total_revenue DESC
LIMIT 10";

const SALES_BY_MONTH: &str = "SELECT
    substr(sale_date, 1, 7) AS month,
    COUNT(*) AS order_count,
    ROUND(SUM(total_amount), 2) AS total_revenue,
    ROUND(AVG(total_amount), 2) AS avg_order_value
FROM sales
WHERE order_status != 'Cancelled'
GROUP BY month
ORDER BY month DESC
LIMIT 12";

const LOW_STOCK: &str = "SELECT
    p.product_name,
    w.warehouse_name,
    i.quantity_on_hand,
    p.reorder_level,
    i.max_stock_level
FROM inventory i
JOIN products p ON i.product_id = p.product_id
JOIN warehouses w ON i.warehouse_id = w.warehouse_id
WHERE i.quantity_on_hand <= p.reorder_level
ORDER BY i.quantity_on_hand ASC";

/// Returns the fixed query for a recognised question, if any.
pub fn match_shortcut(question: &str) -> Option<&'static str> {
    let q = question.to_lowercase();
    let has = |needle: &str| q.contains(needle);

    if (has("best seller") || has("best-seller")) && has("month") {
        Some(BEST_SELLERS_BY_MONTH)
    } else if has("top") && has("product") && has("revenue") {
        Some(TOP_PRODUCTS_BY_REVENUE)
    } else if has("sales by month") || has("monthly sales") {
        Some(SALES_BY_MONTH)
    } else if has("low stock") || has("reorder") {
        Some(LOW_STOCK)
    } else {
        None
    }
}

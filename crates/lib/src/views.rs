//! # Canned Dashboard Views
//!
//! Fixed queries behind the dashboard panels. They run directly against storage
//! and never involve the model.

use crate::{
    chart::{ChartKind, ChartSpec},
    errors::AgentError,
    providers::db::storage::Storage,
    types::{QueryResult, Row},
};
use serde::Serialize;
use serde_json::Value;
use std::{fmt, str::FromStr};
use tracing::debug;

/// Views return few rows; this only guards against a runaway table.
const VIEW_ROW_LIMIT: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CannedView {
    /// The twenty lowest stock positions, each classed Low, Medium or Good.
    InventoryLevels,
    /// Every stock position at or below its product's reorder level.
    LowStock,
    /// Revenue and order count per month for the last twelve months.
    MonthlySales,
    /// The ten products with the highest revenue.
    TopProducts,
    /// Revenue per product category.
    SalesByCategory,
}

impl CannedView {
    pub const ALL: [CannedView; 5] = [
        CannedView::InventoryLevels,
        CannedView::LowStock,
        CannedView::MonthlySales,
        CannedView::TopProducts,
        CannedView::SalesByCategory,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CannedView::InventoryLevels => "inventory_levels",
            CannedView::LowStock => "low_stock",
            CannedView::MonthlySales => "monthly_sales",
            CannedView::TopProducts => "top_products",
            CannedView::SalesByCategory => "sales_by_category",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CannedView::InventoryLevels => "Inventory Levels",
            CannedView::LowStock => "Low Stock Alerts",
            CannedView::MonthlySales => "Monthly Sales",
            CannedView::TopProducts => "Top Products by Revenue",
            CannedView::SalesByCategory => "Sales by Category",
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            CannedView::InventoryLevels => {
                "SELECT
    p.product_name,
    w.warehouse_name,
    i.quantity_on_hand,
    p.reorder_level,
    CASE
        WHEN i.quantity_on_hand <= p.reorder_level THEN 'Low'
        WHEN i.quantity_on_hand <= p.reorder_level * 2 THEN 'Medium'
        ELSE 'Good'
    END AS stock_status
FROM inventory i
JOIN products p ON i.product_id = p.product_id
JOIN warehouses w ON i.warehouse_id = w.warehouse_id
ORDER BY i.quantity_on_hand ASC
LIMIT 20"
            }
            CannedView::LowStock => {
                "SELECT
    p.product_name,
    p.product_code,
    w.warehouse_name,
    i.quantity_on_hand,
    p.reorder_level
FROM inventory i
JOIN products p ON i.product_id = p.product_id
JOIN warehouses w ON i.warehouse_id = w.warehouse_id
WHERE i.quantity_on_hand <= p.reorder_level
ORDER BY i.quantity_on_hand ASC"
            }
            CannedView::MonthlySales => {
                "SELECT
    substr(sale_date, 1, 7) AS month,
    COUNT(*) AS order_count,
    ROUND(SUM(total_amount), 2) AS revenue
FROM sales
WHERE order_status != 'Cancelled'
GROUP BY month
ORDER BY month DESC
LIMIT 12"
            }
            CannedView::TopProducts => {
                "SELECT
    p.product_name,
    ROUND(SUM(s.total_amount), 2) AS revenue,
    SUM(s.quantity) AS quantity_sold
FROM sales s
JOIN products p ON s.product_id = p.product_id
WHERE s.order_status != 'Cancelled'
GROUP BY p.product_id, p.product_name
ORDER BY revenue DESC
LIMIT 10"
            }
            CannedView::SalesByCategory => {
                "SELECT
    c.category_name,
    ROUND(SUM(s.total_amount), 2) AS revenue
FROM sales s
JOIN products p ON s.product_id = p.product_id
JOIN categories c ON p.category_id = c.category_id
WHERE s.order_status != 'Cancelled'
GROUP BY c.category_id, c.category_name
ORDER BY revenue DESC"
            }
        }
    }

    /// The chart drawn for this view, as `(kind, label column, value column)`.
    fn chart_layout(&self) -> Option<(ChartKind, &'static str, &'static str)> {
        match self {
            CannedView::InventoryLevels => {
                Some((ChartKind::Bar, "product_name", "quantity_on_hand"))
            }
            CannedView::LowStock => None,
            CannedView::MonthlySales => Some((ChartKind::Line, "month", "revenue")),
            CannedView::TopProducts => Some((ChartKind::Bar, "product_name", "revenue")),
            CannedView::SalesByCategory => Some((ChartKind::Bar, "category_name", "revenue")),
        }
    }
}

impl fmt::Display for CannedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CannedView {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CannedView::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| AgentError::UnknownView(s.to_string()))
    }
}

/// The rows of a canned view, ready for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ViewResult {
    pub name: String,
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub chart: Option<ChartSpec>,
}

/// Runs a canned view.
pub async fn run_view(storage: &dyn Storage, view: CannedView) -> Result<ViewResult, AgentError> {
    debug!(view = %view, "Running canned view");
    let QueryResult { columns, rows, .. } = storage.execute_query(view.sql(), VIEW_ROW_LIMIT).await?;

    let chart = view.chart_layout().and_then(|(kind, x, y)| {
        if view == CannedView::MonthlySales {
            // Newest first in the table, oldest first on the time axis.
            let chronological: Vec<Row> = rows.iter().rev().cloned().collect();
            ChartSpec::for_columns(kind, x, y, &chronological)
        } else {
            ChartSpec::for_columns(kind, x, y, &rows)
        }
    });

    Ok(ViewResult {
        name: view.name().to_string(),
        title: view.title().to_string(),
        columns,
        rows,
        chart,
    })
}

/// Headline figures for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_products: i64,
    pub total_customers: i64,
    pub total_orders: i64,
    /// Revenue across all orders that were not cancelled.
    pub total_revenue: f64,
    pub pending_orders: i64,
    pub low_stock: i64,
}

/// Computes the headline figures.
pub async fn dashboard_stats(storage: &dyn Storage) -> Result<DashboardStats, AgentError> {
    Ok(DashboardStats {
        total_products: scalar_i64(
            storage,
            "SELECT COUNT(*) AS count FROM products WHERE is_active = 1",
        )
        .await?,
        total_customers: scalar_i64(storage, "SELECT COUNT(*) AS count FROM customers").await?,
        total_orders: scalar_i64(storage, "SELECT COUNT(*) AS count FROM sales").await?,
        total_revenue: scalar_f64(
            storage,
            "SELECT COALESCE(SUM(total_amount), 0) AS revenue FROM sales WHERE order_status != 'Cancelled'",
        )
        .await?,
        pending_orders: scalar_i64(
            storage,
            "SELECT COUNT(*) AS count FROM sales WHERE order_status = 'Pending'",
        )
        .await?,
        low_stock: scalar_i64(
            storage,
            "SELECT COUNT(*) AS count FROM inventory i JOIN products p ON i.product_id = p.product_id WHERE i.quantity_on_hand <= p.reorder_level",
        )
        .await?,
    })
}

async fn scalar_i64(storage: &dyn Storage, sql: &str) -> Result<i64, AgentError> {
    let result = storage.execute_query(sql, 1).await?;
    Ok(result.scalar().and_then(Value::as_i64).unwrap_or(0))
}

async fn scalar_f64(storage: &dyn Storage, sql: &str) -> Result<f64, AgentError> {
    let result = storage.execute_query(sql, 1).await?;
    Ok(result.scalar().and_then(Value::as_f64).unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_names_round_trip() {
        for view in CannedView::ALL {
            assert_eq!(view.name().parse::<CannedView>().unwrap(), view);
        }
    }

    #[test]
    fn unknown_view_is_invalid_input() {
        let err = "revenue_forecast".parse::<CannedView>().unwrap_err();
        assert_eq!(err.kind(), crate::errors::ErrorKind::InvalidInput);
    }
}

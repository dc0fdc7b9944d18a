/// Example questions offered on the dashboard and by `bizquery ask --samples`.
pub const SAMPLE_QUESTIONS: &[&str] = &[
    "What are the top 5 best-selling products by revenue?",
    "Show me total sales by month for this year",
    "Which customers have the highest total order value?",
    "What products are low in stock across all warehouses?",
    "How much revenue did we generate last month?",
    "Which product categories are most profitable?",
    "Show me pending orders that need attention",
    "Which warehouse has the highest sales volume?",
    "Show me customers with pending or partial payments",
];

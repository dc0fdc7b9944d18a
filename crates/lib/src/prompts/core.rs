//! # Default Prompt Templates
//!
//! This module contains the default prompt templates used by the `QueryAgent`.
//! The query templates can be overridden through the `agent` section of the
//! configuration.

// --- Schema Description ---

/// The fixed description of the inventory and sales schema that is sent with every
/// query-generation prompt.
pub const SCHEMA_DESCRIPTION: &str = r#"DATABASE SCHEMA (SQLite):

1. warehouses
   - warehouse_id (PRIMARY KEY)
   - warehouse_name, location, capacity, manager_name

2. categories
   - category_id (PRIMARY KEY)
   - category_name (e.g., Electronics, Clothing), description

3. suppliers
   - supplier_id (PRIMARY KEY)
   - supplier_name, contact_email, country

4. products
   - product_id (PRIMARY KEY)
   - product_name, product_code
   - category_id (FOREIGN KEY -> categories)
   - supplier_id (FOREIGN KEY -> suppliers)
   - unit_price, cost_price, reorder_level, is_active (1 or 0)

5. customers
   - customer_id (PRIMARY KEY)
   - customer_name, customer_type (Individual/Business)
   - email, phone, city, country, credit_limit

6. inventory
   - product_id (FOREIGN KEY -> products), warehouse_id (FOREIGN KEY -> warehouses)
   - quantity_on_hand, quantity_reserved, max_stock_level
   - stock is low when quantity_on_hand <= products.reorder_level

7. sales
   - sale_id (PRIMARY KEY), sale_number
   - customer_id (FOREIGN KEY -> customers)
   - product_id (FOREIGN KEY -> products)
   - warehouse_id (FOREIGN KEY -> warehouses)
   - quantity, unit_price, discount_percentage, total_amount
   - sale_date (TEXT, 'YYYY-MM-DD')
   - order_status (Pending, Processing, Shipped, Delivered, Cancelled)
   - payment_status (Pending, Paid, Partial, Refunded)

8. inventory_movements
   - movement_id (PRIMARY KEY)
   - product_id, warehouse_id
   - movement_type (IN, OUT, ADJUSTMENT)
   - quantity (signed: OUT movements are negative), reason, movement_date

COMMON BUSINESS QUERIES:
- Revenue analysis: sales.total_amount, excluding order_status = 'Cancelled'
- Inventory levels: inventory joined with products and warehouses
- Product performance: products joined with sales
- Customer analysis: customers joined with sales"#;

// --- Query Generation Prompts ---

/// The system prompt for the query generation stage.
///
/// Placeholders: `{dialect}`
pub const QUERY_SYSTEM_PROMPT: &str = "You are a {dialect} expert for a business inventory and sales database. Convert the user's business question into a single, read-only {dialect} query. Return ONLY the SQL query, starting directly with SELECT or WITH.";

/// The user prompt for the query generation stage.
///
/// Placeholders: `{dialect}`, `{schema}`, `{question}`
pub const QUERY_USER_PROMPT: &str = r#"{schema}

RULES:
1. Return ONLY the SQL query. No explanations, no comments.
2. Generate ONLY valid, read-only {dialect} (SELECT or WITH). Never modify data.
3. Use proper JOINs when accessing related tables.
4. Use aggregate functions (SUM, COUNT, AVG) when needed and alias every computed column.
5. Dates are stored as 'YYYY-MM-DD' text; use substr(sale_date, 1, 7) for the month and substr(sale_date, 1, 4) for the year.
6. Limit results to reasonable numbers (use LIMIT when listing rows).

QUESTION: {question}

SQL:"#;

// --- Result Interpretation Prompts ---

/// The system prompt for the result interpretation stage.
pub const INTERPRETATION_SYSTEM_PROMPT: &str = "You are a business analyst. Interpret query results for a manager: give a clear, concise summary, highlight key figures and trends, use business language rather than technical jargon, suggest an action when appropriate, and keep the response under 200 words.";

/// The user prompt for the result interpretation stage.
///
/// Placeholders: `{question}`, `{row_count}`, `{results}`
pub const INTERPRETATION_USER_PROMPT: &str = r#"ORIGINAL QUESTION: {question}

QUERY RESULTS ({row_count} records):
{results}

BUSINESS ANALYSIS:"#;

// --- Connectivity Check ---

pub const CHECK_SYSTEM_PROMPT: &str = "You are a helpful assistant. Answer in one short sentence.";
pub const CHECK_USER_PROMPT: &str = "Which model are you?";

/// Substitutes `{key}` placeholders in a template.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{key}}}"), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_replaces_every_occurrence() {
        let out = render(
            "{dialect} only. Write {dialect} for: {question}",
            &[("dialect", "SQLite"), ("question", "how many?")],
        );
        assert_eq!(out, "SQLite only. Write SQLite for: how many?");
    }

    #[test]
    fn render_leaves_unknown_placeholders() {
        assert_eq!(render("{a} {b}", &[("a", "1")]), "1 {b}");
    }
}

//! # SQLite Schema Definitions
//!
//! This module centralizes the DDL for the inventory and sales database.
//! Every statement uses `IF NOT EXISTS`, so running the whole list again is a no-op.

pub const CREATE_WAREHOUSES_TABLE: &str = "
CREATE TABLE IF NOT EXISTS warehouses (
    warehouse_id INTEGER PRIMARY KEY,
    warehouse_name TEXT NOT NULL,
    location TEXT,
    capacity INTEGER,
    manager_name TEXT
);";

pub const CREATE_CATEGORIES_TABLE: &str = "
CREATE TABLE IF NOT EXISTS categories (
    category_id INTEGER PRIMARY KEY,
    category_name TEXT NOT NULL UNIQUE,
    description TEXT
);";

pub const CREATE_SUPPLIERS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS suppliers (
    supplier_id INTEGER PRIMARY KEY,
    supplier_name TEXT NOT NULL,
    contact_email TEXT,
    country TEXT
);";

pub const CREATE_PRODUCTS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS products (
    product_id INTEGER PRIMARY KEY,
    product_name TEXT NOT NULL,
    product_code TEXT NOT NULL UNIQUE,
    category_id INTEGER REFERENCES categories(category_id),
    supplier_id INTEGER REFERENCES suppliers(supplier_id),
    unit_price REAL NOT NULL,
    cost_price REAL,
    reorder_level INTEGER NOT NULL DEFAULT 10,
    is_active INTEGER NOT NULL DEFAULT 1
);";

pub const CREATE_CUSTOMERS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS customers (
    customer_id INTEGER PRIMARY KEY,
    customer_name TEXT NOT NULL,
    customer_type TEXT NOT NULL DEFAULT 'Individual',
    email TEXT,
    phone TEXT,
    city TEXT,
    country TEXT,
    credit_limit REAL DEFAULT 0
);";

pub const CREATE_INVENTORY_TABLE: &str = "
CREATE TABLE IF NOT EXISTS inventory (
    inventory_id INTEGER PRIMARY KEY,
    product_id INTEGER NOT NULL REFERENCES products(product_id),
    warehouse_id INTEGER NOT NULL REFERENCES warehouses(warehouse_id),
    quantity_on_hand INTEGER NOT NULL DEFAULT 0,
    quantity_reserved INTEGER NOT NULL DEFAULT 0,
    max_stock_level INTEGER,
    UNIQUE(product_id, warehouse_id)
);";

pub const CREATE_SALES_TABLE: &str = "
CREATE TABLE IF NOT EXISTS sales (
    sale_id INTEGER PRIMARY KEY,
    sale_number TEXT NOT NULL UNIQUE,
    customer_id INTEGER NOT NULL REFERENCES customers(customer_id),
    product_id INTEGER NOT NULL REFERENCES products(product_id),
    warehouse_id INTEGER NOT NULL REFERENCES warehouses(warehouse_id),
    quantity INTEGER NOT NULL,
    unit_price REAL NOT NULL,
    discount_percentage REAL NOT NULL DEFAULT 0,
    total_amount REAL NOT NULL,
    sale_date TEXT NOT NULL,
    order_status TEXT NOT NULL DEFAULT 'Pending',
    payment_status TEXT NOT NULL DEFAULT 'Pending'
);";

pub const CREATE_INVENTORY_MOVEMENTS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS inventory_movements (
    movement_id INTEGER PRIMARY KEY,
    product_id INTEGER NOT NULL REFERENCES products(product_id),
    warehouse_id INTEGER NOT NULL REFERENCES warehouses(warehouse_id),
    movement_type TEXT NOT NULL,
    quantity INTEGER NOT NULL,
    reason TEXT,
    movement_date TEXT NOT NULL
);";

/// Tables in foreign-key dependency order.
pub const ALL_TABLE_CREATION_SQL: &[&str] = &[
    CREATE_WAREHOUSES_TABLE,
    CREATE_CATEGORIES_TABLE,
    CREATE_SUPPLIERS_TABLE,
    CREATE_PRODUCTS_TABLE,
    CREATE_CUSTOMERS_TABLE,
    CREATE_INVENTORY_TABLE,
    CREATE_SALES_TABLE,
    CREATE_INVENTORY_MOVEMENTS_TABLE,
];

pub const ALL_INDEX_CREATION_SQL: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_products_category ON products(category_id);",
    "CREATE INDEX IF NOT EXISTS idx_products_supplier ON products(supplier_id);",
    "CREATE INDEX IF NOT EXISTS idx_inventory_product ON inventory(product_id);",
    "CREATE INDEX IF NOT EXISTS idx_inventory_warehouse ON inventory(warehouse_id);",
    "CREATE INDEX IF NOT EXISTS idx_sales_customer ON sales(customer_id);",
    "CREATE INDEX IF NOT EXISTS idx_sales_product ON sales(product_id);",
    "CREATE INDEX IF NOT EXISTS idx_sales_date ON sales(sale_date);",
    "CREATE INDEX IF NOT EXISTS idx_movements_product ON inventory_movements(product_id);",
];

/// The tables this application owns, in the order they must be emptied.
pub const TABLES_IN_DELETE_ORDER: &[&str] = &[
    "inventory_movements",
    "sales",
    "inventory",
    "customers",
    "products",
    "suppliers",
    "categories",
    "warehouses",
];

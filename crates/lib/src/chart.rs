//! # Chart Suggestions
//!
//! Picks a simple bar chart for a result set when one makes sense: at least two
//! columns, at least one of them numeric, and a small number of rows. The dashboard
//! draws the returned points; nothing here knows about rendering.

use crate::types::Row;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result sets with more rows than this are shown as a table only.
pub const MAX_CHART_ROWS: usize = 20;

/// At most this many points are plotted.
pub const MAX_CHART_POINTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    /// The column used for labels.
    pub x: String,
    /// The numeric column plotted.
    pub y: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSpec {
    /// Suggests a bar chart of the first numeric column against the first other column.
    pub fn suggest(columns: &[String], rows: &[Row]) -> Option<Self> {
        if columns.len() < 2 || rows.is_empty() || rows.len() > MAX_CHART_ROWS {
            return None;
        }

        let y = columns.iter().find(|c| is_numeric_column(c, rows))?;
        let x = columns.iter().find(|c| *c != y)?;

        Some(Self::build(ChartKind::Bar, x, y, rows))
    }

    /// Builds a chart over fixed columns. Used by canned views, which know their layout.
    pub fn for_columns(kind: ChartKind, x: &str, y: &str, rows: &[Row]) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }
        Some(Self::build(kind, x, y, rows))
    }

    fn build(kind: ChartKind, x: &str, y: &str, rows: &[Row]) -> Self {
        let points = rows
            .iter()
            .take(MAX_CHART_POINTS)
            .filter_map(|row| {
                let value = row.get(y).and_then(Value::as_f64)?;
                let label = row.get(x).map(label_for).unwrap_or_default();
                Some(ChartPoint { label, value })
            })
            .collect();

        Self {
            kind,
            title: format!("{y} by {x}"),
            x: x.to_string(),
            y: y.to_string(),
            points,
        }
    }
}

/// A column is numeric when every non-null value in it is a number and at least one is present.
fn is_numeric_column(column: &str, rows: &[Row]) -> bool {
    let mut seen_number = false;
    for value in rows.iter().filter_map(|r| r.get(column)) {
        match value {
            Value::Number(_) => seen_number = true,
            Value::Null => {}
            _ => return false,
        }
    }
    seen_number
}

fn label_for(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

//! Plain-text tables for terminal output.

use serde_json::{Map, Value};

/// Cells longer than this are cut with an ellipsis.
const MAX_CELL_WIDTH: usize = 40;

fn cell(value: Option<&Value>) -> String {
    let text = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    if text.chars().count() > MAX_CELL_WIDTH {
        let cut: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
        format!("{cut}…")
    } else {
        text
    }
}

/// Renders rows as a left-aligned table with a header and a separator line.
pub fn render_table(columns: &[String], rows: &[Map<String, Value>]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|c| cell(row.get(c))).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |values: &[String]| {
        values
            .iter()
            .zip(&widths)
            .map(|(v, &w)| format!("{v:<w$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(columns)];
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.extend(cells.iter().map(|r| line(r.as_slice())));
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn aligns_columns_to_the_widest_value() {
        let columns = vec!["product_name".to_string(), "revenue".to_string()];
        let rows = vec![json!({"product_name": "Widget", "revenue": 29.97})
            .as_object()
            .cloned()
            .unwrap()];

        assert_eq!(
            render_table(&columns, &rows),
            "product_name | revenue\n-------------+--------\nWidget       | 29.97"
        );
    }

    #[test]
    fn nulls_are_blank_and_long_text_is_cut() {
        let columns = vec!["a".to_string(), "b".to_string()];
        let rows = vec![json!({"a": null, "b": "x".repeat(50)})
            .as_object()
            .cloned()
            .unwrap()];

        let out = render_table(&columns, &rows);
        let last = out.lines().last().unwrap();
        assert!(last.starts_with("  | "));
        assert!(last.ends_with('…'));
        assert_eq!(last.chars().count(), 4 + MAX_CELL_WIDTH);
    }
}

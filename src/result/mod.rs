//! Result classifier: decides what shape the backend's result payload has.

use serde_json::{Map, Value};

use crate::error::ClientError;

/// Chart-shaped data: labels and values paired by index.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Table-shaped data: column names in display order plus polymorphic rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// A table row is either keyed by column name or positional. Resolved once
/// here so the renderer never inspects cell types per-cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Object(Map<String, Value>),
    Array(Vec<Value>),
}

/// Outcome of classification. Consumers match exhaustively; there is no
/// "neither shape matched" fallthrough.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    Chart(ChartData),
    Table(TableData),
    ServerError(String),
    Unrecognized,
}

/// Classify a raw result payload. The decision order is the contract:
/// server error first, then chart shape (which wins over table shape even if
/// both sets of keys are present), then table shape with the two-column
/// numeric promotion, then unrecognized.
///
/// Absent fields fall through to the next check; a present field with the
/// wrong type is a format error.
pub fn classify(payload: &Value) -> Result<Classified, ClientError> {
    if let Some(err) = payload.get("error").and_then(Value::as_str) {
        if !err.is_empty() {
            return Ok(Classified::ServerError(err.to_string()));
        }
    }

    if let (Some(labels), Some(values)) = (payload.get("labels"), payload.get("values")) {
        return Ok(Classified::Chart(parse_chart(labels, values)?));
    }

    if let (Some(columns), Some(rows)) = (payload.get("columns"), payload.get("rows")) {
        let table = parse_table(columns, rows)?;
        if let Some(chart) = promote(&table) {
            return Ok(Classified::Chart(chart));
        }
        return Ok(Classified::Table(table));
    }

    Ok(Classified::Unrecognized)
}

fn parse_chart(labels: &Value, values: &Value) -> Result<ChartData, ClientError> {
    let labels = labels
        .as_array()
        .ok_or_else(|| ClientError::Format("chart labels must be an array".into()))?;
    let values = values
        .as_array()
        .ok_or_else(|| ClientError::Format("chart values must be an array".into()))?;

    let values = values
        .iter()
        .map(|v| {
            v.as_f64()
                .ok_or_else(|| ClientError::Format("chart values must be numeric".into()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ChartData {
        labels: labels.iter().map(cell_text).collect(),
        values,
    })
}

fn parse_table(columns: &Value, rows: &Value) -> Result<TableData, ClientError> {
    let columns = columns
        .as_array()
        .ok_or_else(|| ClientError::Format("table columns must be an array".into()))?
        .iter()
        .map(|c| {
            c.as_str()
                .map(str::to_string)
                .ok_or_else(|| ClientError::Format("table columns must be strings".into()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let rows = rows
        .as_array()
        .ok_or_else(|| ClientError::Format("table rows must be an array".into()))?
        .iter()
        .map(|r| match r {
            Value::Object(map) => Ok(Row::Object(map.clone())),
            Value::Array(cells) => Ok(Row::Array(cells.clone())),
            _ => Err(ClientError::Format(
                "table rows must be objects or arrays".into(),
            )),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TableData { columns, rows })
}

/// Two-column promotion: a "count by category" style table becomes chart
/// data when the first row's second-column cell is a number. This spares the
/// backend from pre-aggregating into chart form.
fn promote(table: &TableData) -> Option<ChartData> {
    if table.columns.len() != 2 || table.rows.is_empty() {
        return None;
    }
    let probe = cell_at(&table.rows[0], &table.columns[1], 1)?;
    if !probe.is_number() {
        return None;
    }

    let labels = table
        .rows
        .iter()
        .map(|row| {
            cell_at(row, &table.columns[0], 0)
                .map(cell_text)
                .unwrap_or_default()
        })
        .collect();
    let values = table
        .rows
        .iter()
        .map(|row| cell_at(row, &table.columns[1], 1).map(coerce_number).unwrap_or(0.0))
        .collect();

    Some(ChartData { labels, values })
}

fn cell_at<'a>(row: &'a Row, column: &str, index: usize) -> Option<&'a Value> {
    match row {
        Row::Object(map) => map.get(column),
        Row::Array(cells) => cells.get(index),
    }
}

/// Display text for a single cell. Missing keys and nulls become the empty
/// string; nested structures print as compact JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n
            .as_f64()
            .map(fmt_number)
            .unwrap_or_else(|| n.to_string()),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Lenient numeric coercion for promoted columns: numeric strings parse,
/// bools map to 1/0, everything else is 0.
fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

/// Format a value without a trailing fraction when it is whole.
pub fn fmt_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn server_error_wins_over_everything() {
        let payload = json!({
            "error": "no such table",
            "labels": ["A"],
            "values": [1],
            "columns": ["a"],
            "rows": []
        });
        assert_eq!(
            classify(&payload).unwrap(),
            Classified::ServerError("no such table".into())
        );
    }

    #[test]
    fn empty_error_string_falls_through() {
        let payload = json!({ "error": "", "labels": ["A"], "values": [1] });
        match classify(&payload).unwrap() {
            Classified::Chart(c) => assert_eq!(c.labels, vec!["A"]),
            other => panic!("expected chart, got {:?}", other),
        }
    }

    #[test]
    fn chart_shape_wins_over_table_shape() {
        let payload = json!({
            "labels": ["A", "B"],
            "values": [1, 2],
            "columns": ["x", "y"],
            "rows": [{"x": "A", "y": 1}]
        });
        match classify(&payload).unwrap() {
            Classified::Chart(c) => {
                assert_eq!(c.labels, vec!["A", "B"]);
                assert_eq!(c.values, vec![1.0, 2.0]);
            }
            other => panic!("expected chart, got {:?}", other),
        }
    }

    #[test]
    fn labels_not_an_array_is_a_format_error() {
        let payload = json!({ "labels": "A,B", "values": [1, 2] });
        let err = classify(&payload).unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().contains("labels"));
    }

    #[test]
    fn non_numeric_chart_values_are_a_format_error() {
        let payload = json!({ "labels": ["A"], "values": ["lots"] });
        assert!(classify(&payload).unwrap_err().is_format());
    }

    #[test]
    fn two_column_numeric_table_promotes_to_chart() {
        let payload = json!({
            "columns": ["cat", "n"],
            "rows": [{"cat": "x", "n": 5}, {"cat": "y", "n": 3}]
        });
        match classify(&payload).unwrap() {
            Classified::Chart(c) => {
                assert_eq!(c.labels, vec!["x", "y"]);
                assert_eq!(c.values, vec![5.0, 3.0]);
            }
            other => panic!("expected promoted chart, got {:?}", other),
        }
    }

    #[test]
    fn promotion_applies_to_array_rows_too() {
        let payload = json!({
            "columns": ["cat", "n"],
            "rows": [["x", 5], ["y", 3]]
        });
        match classify(&payload).unwrap() {
            Classified::Chart(c) => {
                assert_eq!(c.labels, vec!["x", "y"]);
                assert_eq!(c.values, vec![5.0, 3.0]);
            }
            other => panic!("expected promoted chart, got {:?}", other),
        }
    }

    #[test]
    fn non_numeric_second_column_stays_a_table() {
        let payload = json!({
            "columns": ["cat", "n"],
            "rows": [{"cat": "x", "n": "five"}]
        });
        assert!(matches!(classify(&payload).unwrap(), Classified::Table(_)));
    }

    #[test]
    fn three_column_table_is_not_promoted() {
        let payload = json!({
            "columns": ["a", "b", "c"],
            "rows": [{"a": 1, "b": 2, "c": 3}]
        });
        assert!(matches!(classify(&payload).unwrap(), Classified::Table(_)));
    }

    #[test]
    fn empty_rows_table_is_not_promoted() {
        let payload = json!({ "columns": ["cat", "n"], "rows": [] });
        match classify(&payload).unwrap() {
            Classified::Table(t) => assert!(t.rows.is_empty()),
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn promoted_labels_stringify_numbers() {
        let payload = json!({
            "columns": ["year", "total"],
            "rows": [{"year": 2023, "total": 10}, {"year": 2024, "total": 12}]
        });
        match classify(&payload).unwrap() {
            Classified::Chart(c) => assert_eq!(c.labels, vec!["2023", "2024"]),
            other => panic!("expected chart, got {:?}", other),
        }
    }

    #[test]
    fn promoted_values_coerce_numeric_strings() {
        let payload = json!({
            "columns": ["cat", "n"],
            "rows": [{"cat": "x", "n": 5}, {"cat": "y", "n": "3.5"}]
        });
        match classify(&payload).unwrap() {
            Classified::Chart(c) => assert_eq!(c.values, vec![5.0, 3.5]),
            other => panic!("expected chart, got {:?}", other),
        }
    }

    #[test]
    fn unknown_shapes_are_unrecognized() {
        assert_eq!(classify(&json!({"data": [1, 2]})).unwrap(), Classified::Unrecognized);
        assert_eq!(classify(&json!({})).unwrap(), Classified::Unrecognized);
        assert_eq!(classify(&json!(null)).unwrap(), Classified::Unrecognized);
        // one half of a shape is not enough
        assert_eq!(classify(&json!({"labels": ["A"]})).unwrap(), Classified::Unrecognized);
        assert_eq!(classify(&json!({"rows": []})).unwrap(), Classified::Unrecognized);
    }

    #[test]
    fn mixed_row_kinds_are_preserved() {
        let payload = json!({
            "columns": ["a", "b", "c"],
            "rows": [{"a": 1, "b": 2, "c": 3}, [4, 5, 6]]
        });
        match classify(&payload).unwrap() {
            Classified::Table(t) => {
                assert!(matches!(t.rows[0], Row::Object(_)));
                assert!(matches!(t.rows[1], Row::Array(_)));
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn fmt_number_drops_whole_fractions() {
        assert_eq!(fmt_number(5.0), "5");
        assert_eq!(fmt_number(3.5), "3.5");
        assert_eq!(fmt_number(-2.0), "-2");
    }
}

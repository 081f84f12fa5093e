use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Decimal places shown for fractional numbers in table cells.
const TABLE_PRECISION: usize = 3;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Columns that lead a listing, in this order; the rest follow alphabetically.
const COLUMN_PRIORITY: &[&str] = &[
    "stream",
    "name",
    "trait",
    "id",
    "category",
    "overall",
    "personality_match",
    "academic_match",
    "confidence",
    "text",
];

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => {
            let mut table = table::Table::new(["key", "value", "bar"]);
            for (key, value) in flatten_scores(map) {
                let bar = fraction(&value).map_or_else(String::new, table::score_bar);
                table.push(vec![key, value_to_cell(&value), bar]);
            }
            Ok(table.render(table_options()))
        }
        scalar => {
            let mut table = table::Table::new(["value"]);
            table.push(vec![value_to_cell(&scalar)]);
            Ok(table.render(table_options()))
        }
    }
}

/// Expand child objects whose values are all numbers (trait scores, work
/// preferences) into `parent.child` rows.
fn flatten_scores(map: Map<String, Value>) -> Vec<(String, Value)> {
    let mut entries = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Object(children)
                if !children.is_empty() && children.values().all(Value::is_number) =>
            {
                entries.extend(
                    children
                        .into_iter()
                        .map(|(child, score)| (format!("{key}.{child}"), score)),
                );
            }
            other => entries.push((key, other)),
        }
    }
    entries
}

/// A fractional number in `[0, 1]`, the range every score uses.
fn fraction(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .filter(|_| value.is_f64())
        .filter(|v| (0.0..=1.0).contains(v))
}

fn column_rank(header: &str) -> usize {
    COLUMN_PRIORITY
        .iter()
        .position(|column| *column == header)
        .unwrap_or(COLUMN_PRIORITY.len())
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    let all_objects = items.iter().all(Value::is_object);
    if !all_objects {
        let mut table = table::Table::new(["value"]);
        for item in items {
            table.push(vec![value_to_cell(item)]);
        }
        return table.render(table_options());
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    if headers.is_empty() {
        return String::from("(no columns)");
    }

    headers.sort_by(|a, b| column_rank(a).cmp(&column_rank(b)).then_with(|| a.cmp(b)));

    let mut table = table::Table::new(headers.iter().map(String::as_str));
    for map in items.iter().filter_map(Value::as_object) {
        table.push(
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect(),
        );
    }
    table.render(table_options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => match (v.is_f64(), v.as_f64()) {
            (true, Some(f)) => format!("{f:.TABLE_PRECISION$}"),
            _ => v.to_string(),
        },
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;
    use serde_json::json;

    use super::{flatten_scores, render, value_to_cell};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        stream: &'static str,
        overall: f64,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example {
            stream: "Physics",
            overall: 0.75,
        };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["stream"], "Physics");
        assert_eq!(parsed["overall"], 0.75);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example {
            stream: "Physics",
            overall: 0.75,
        };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["stream"], "Physics");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn object_rows_carry_score_bars() {
        let value = Example {
            stream: "Physics",
            overall: 0.75,
        };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("key"));
        assert!(lines[2].starts_with("overall"));
        assert!(lines[2].contains("0.750"));
        assert!(lines[2].contains("████████░░"));
        assert!(lines[3].starts_with("stream"));
        assert!(!lines[3].contains('█'));
    }

    #[test]
    fn match_listing_leads_with_the_stream() {
        let value = vec![
            Example {
                stream: "Physics",
                overall: 0.75,
            },
            Example {
                stream: "Nursing",
                overall: 0.625,
            },
        ];
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().expect("header line");
        assert!(header.find("stream") < header.find("overall"));
        assert!(out.contains("0.750"));
    }

    #[test]
    fn trait_scores_flatten_into_dotted_rows() {
        let profile = json!({
            "learning_style": "visual",
            "trait_scores": {"analytical": 0.8, "creativity": 0.35},
            "interests": ["science"],
        });
        let serde_json::Value::Object(map) = profile else {
            panic!("object literal");
        };
        let keys: Vec<String> = flatten_scores(map).into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "interests",
                "learning_style",
                "trait_scores.analytical",
                "trait_scores.creativity",
            ]
        );
    }

    #[test]
    fn empty_array_renders_placeholder() {
        let value: Vec<Example> = Vec::new();
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert_eq!(out, "(no rows)");
    }

    #[test]
    fn cells_round_fractions_and_join_string_lists() {
        assert_eq!(value_to_cell(&json!(0.123_456)), "0.123");
        assert_eq!(value_to_cell(&json!(5)), "5");
        assert_eq!(value_to_cell(&json!(["a", "b"])), "a, b");
        assert_eq!(value_to_cell(&json!(null)), "-");
        assert_eq!(value_to_cell(&json!({"x": 1})), r#"{"x":1}"#);
    }
}

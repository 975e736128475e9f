use std::io;

use serde_json::Value;

use super::format::{Column, format_kg, key_value_rows, render_table_or_blocks, terminal_width};

const FORECAST_COLUMNS: [Column<'static>; 6] = [
    Column::left("Food"),
    Column::right("Surplus (kg)"),
    Column::left("Nearest expiry"),
    Column::right("Purchase (kg)"),
    Column::right("Consumption (kg)"),
    Column::right("Expiring (kg)"),
];

pub fn render_forecast(data: &Value) -> io::Result<String> {
    render_forecast_with_width(data, terminal_width())
}

fn render_forecast_with_width(data: &Value, width: usize) -> io::Result<String> {
    let as_of = text_field(data, "as_of");
    let status = data
        .get("status")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("forecast output requires status"))?;
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("forecast output requires rows"))?;

    let mut lines = vec![format!("Surplus forecast for {as_of}:"), String::new()];

    match status {
        "no_data" => {
            lines.push("No purchase or consumption history yet.".to_string());
            lines.push(String::new());
            lines.push("Record some data first:".to_string());
            lines.push("  1. foodtrack purchase add <food> <kg> --expiry <YYYY-MM-DD>".to_string());
            lines.push("  2. foodtrack consumption add <food> <kg>".to_string());
        }
        "no_overlap" => {
            lines.push("No food appears in both purchase and consumption history.".to_string());
            lines.push(
                "A surplus is only forecast for foods that were both bought and eaten.".to_string(),
            );
            lines.push(
                "Run `foodtrack history` to compare names, or retry with --normalize-keys."
                    .to_string(),
            );
        }
        _ => {
            let table_rows = rows.iter().map(forecast_row).collect::<Vec<Vec<String>>>();
            lines.extend(render_table_or_blocks(
                &FORECAST_COLUMNS,
                &table_rows,
                width,
                "Food",
            ));
        }
    }

    let options = options_summary(data);
    if !options.is_empty() {
        lines.push(String::new());
        lines.push("Options:".to_string());
        lines.extend(key_value_rows(&options, 2));
    }

    let skipped = skipped_summary(data);
    if !skipped.is_empty() {
        lines.push(String::new());
        lines.push("Records left out:".to_string());
        lines.extend(key_value_rows(&skipped, 2));
    }

    Ok(lines.join("\n"))
}

fn forecast_row(row: &Value) -> Vec<String> {
    vec![
        text_field(row, "food"),
        kg_field(row, "surplus_kg"),
        text_field(row, "nearest_expiry"),
        with_method(kg_field(row, "predicted_purchase_kg"), row, "purchase_method"),
        with_method(
            kg_field(row, "predicted_consumption_kg"),
            row,
            "consumption_method",
        ),
        kg_field(row, "soon_expiring_kg"),
    ]
}

// Fallback estimates are marked so a reader knows no trend was fitted.
fn with_method(value: String, row: &Value, key: &str) -> String {
    match row.get(key).and_then(Value::as_str) {
        Some("fallback") => format!("{value}*"),
        _ => value,
    }
}

fn options_summary(data: &Value) -> Vec<(&'static str, String)> {
    let options = data.get("options").cloned().unwrap_or(Value::Null);
    let mut entries = Vec::new();

    if let Some(days) = options.get("expiry_boost_days").and_then(Value::as_i64) {
        entries.push(("Expiry boost:", format!("stock expiring within {days} days")));
    }
    if options.get("exclude_expired").and_then(Value::as_bool) == Some(true) {
        entries.push(("Expired lots:", "excluded".to_string()));
    }
    if options.get("key_normalization").and_then(Value::as_str) == Some("trim_case_fold") {
        entries.push(("Food names:", "case and whitespace ignored".to_string()));
    }

    entries
}

fn skipped_summary(data: &Value) -> Vec<(&'static str, String)> {
    let skipped = data.get("skipped").cloned().unwrap_or(Value::Null);
    [
        ("Purchases without a date:", "undated_purchases"),
        ("Consumption without a date:", "undated_consumption"),
        ("Expired purchases:", "expired_purchases"),
        ("Unreadable purchase rows:", "unreadable_purchase_rows"),
        ("Unreadable consumption rows:", "unreadable_consumption_rows"),
    ]
    .into_iter()
    .filter_map(|(label, key)| {
        let count = skipped.get(key).and_then(Value::as_i64).unwrap_or(0);
        (count > 0).then(|| (label, count.to_string()))
    })
    .collect()
}

fn text_field(row: &Value, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

fn kg_field(row: &Value, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_f64)
        .map(format_kg)
        .unwrap_or_default()
}

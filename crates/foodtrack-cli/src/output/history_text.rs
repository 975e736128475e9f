use std::io;

use serde_json::Value;

use super::format::{Column, format_kg, key_value_rows, render_table_or_blocks, terminal_width};

pub fn render_record(data: &Value) -> io::Result<String> {
    let kind = data
        .get("kind")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("record output requires kind"))?;

    let mut entries = vec![
        ("Food:", string_or(data, "food", "")),
        (
            "Quantity (kg):",
            data.get("quantity_kg")
                .and_then(Value::as_f64)
                .map(format_kg)
                .unwrap_or_default(),
        ),
        ("Date:", string_or(data, "date", "")),
    ];
    if let Some(expiry) = data.get("expiry").and_then(Value::as_str) {
        entries.push(("Expiry:", expiry.to_string()));
    }
    entries.push(("Saved to:", string_or(data, "path", "")));

    let mut lines = vec![format!("Recorded {kind}:"), String::new()];
    lines.extend(key_value_rows(&entries, 2));
    Ok(lines.join("\n"))
}

pub fn render_history(data: &Value) -> io::Result<String> {
    render_history_with_width(data, terminal_width())
}

fn render_history_with_width(data: &Value, width: usize) -> io::Result<String> {
    let purchases = rows_of(data, "purchases")?;
    let consumption = rows_of(data, "consumption")?;

    let mut lines = vec![format!("Purchases ({}):", purchases.len())];
    if purchases.is_empty() {
        lines.push("  None recorded.".to_string());
    } else {
        let table = purchases
            .iter()
            .map(|row| {
                vec![
                    string_or(row, "food", ""),
                    kg_or_blank(row, "quantity_kg"),
                    string_or(row, "purchase_date", "-"),
                    string_or(row, "expiry_date", "-"),
                ]
            })
            .collect::<Vec<Vec<String>>>();
        lines.extend(render_table_or_blocks(
            &[
                Column::left("Food"),
                Column::right("Quantity (kg)"),
                Column::left("Purchased"),
                Column::left("Expires"),
            ],
            &table,
            width,
            "Purchase",
        ));
    }

    lines.push(String::new());
    lines.push(format!("Consumption ({}):", consumption.len()));
    if consumption.is_empty() {
        lines.push("  None recorded.".to_string());
    } else {
        let table = consumption
            .iter()
            .map(|row| {
                vec![
                    string_or(row, "food", ""),
                    kg_or_blank(row, "quantity_kg"),
                    string_or(row, "consumption_date", "-"),
                ]
            })
            .collect::<Vec<Vec<String>>>();
        lines.extend(render_table_or_blocks(
            &[
                Column::left("Food"),
                Column::right("Quantity (kg)"),
                Column::left("Consumed"),
            ],
            &table,
            width,
            "Consumption",
        ));
    }

    let unreadable = data
        .get("unreadable_purchase_rows")
        .and_then(Value::as_i64)
        .unwrap_or(0)
        + data
            .get("unreadable_consumption_rows")
            .and_then(Value::as_i64)
            .unwrap_or(0);
    if unreadable > 0 {
        lines.push(String::new());
        lines.push(format!("{unreadable} unreadable row(s) were skipped."));
    }

    if let Some(home) = data.pointer("/store/home").and_then(Value::as_str) {
        lines.push(String::new());
        lines.push(format!("Store: {home}"));
    }

    Ok(lines.join("\n"))
}

pub fn render_totals(data: &Value) -> io::Result<String> {
    let rows = rows_of(data, "rows")?;
    if rows.is_empty() {
        return Ok("No food has more purchased than consumed.".to_string());
    }

    let table = rows
        .iter()
        .map(|row| {
            vec![
                string_or(row, "food", ""),
                kg_or_blank(row, "purchased_kg"),
                kg_or_blank(row, "consumed_kg"),
                kg_or_blank(row, "balance_kg"),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec!["Stock on hand (purchased minus consumed):".to_string()];
    lines.extend(render_table_or_blocks(
        &[
            Column::left("Food"),
            Column::right("Purchased (kg)"),
            Column::right("Consumed (kg)"),
            Column::right("Balance (kg)"),
        ],
        &table,
        terminal_width(),
        "Food",
    ));
    Ok(lines.join("\n"))
}

fn rows_of<'a>(data: &'a Value, key: &str) -> io::Result<&'a Vec<Value>> {
    data.get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other(format!("output requires `{key}`")))
}

fn string_or(row: &Value, key: &str, missing: &str) -> String {
    row.get(key)
        .and_then(Value::as_str)
        .unwrap_or(missing)
        .to_string()
}

fn kg_or_blank(row: &Value, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_f64)
        .map(format_kg)
        .unwrap_or_default()
}

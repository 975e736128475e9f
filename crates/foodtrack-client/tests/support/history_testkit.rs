#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use foodtrack_client::commands::forecast::{self, ForecastRunOptions};
use foodtrack_client::commands::record::{
    self, ConsumptionAddOptions, PurchaseAddOptions,
};
use serde_json::Value;
use tempfile::{Builder, TempDir};

pub fn temp_home_in_tmp(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir()?;
    let home = dir.path().join("foodtrack-home");
    fs::create_dir_all(&home)?;
    Ok((dir, home))
}

pub fn write_history(home: &Path, purchases: &str, consumption: &str) {
    assert!(fs::write(home.join("purchases.csv"), purchases).is_ok());
    assert!(fs::write(home.join("consumption.csv"), consumption).is_ok());
}

pub fn add_purchase(home: &Path, food: &str, quantity: f64, date: &str, expiry: Option<&str>) {
    let result = record::add_purchase_with_options(PurchaseAddOptions {
        food: food.to_string(),
        quantity,
        purchase_date: date.to_string(),
        expiry_date: expiry.map(std::string::ToString::to_string),
        home_override: Some(home),
    });
    assert!(result.is_ok());
}

pub fn add_consumption(home: &Path, food: &str, quantity: f64, date: &str) {
    let result = record::add_consumption_with_options(ConsumptionAddOptions {
        food: food.to_string(),
        quantity,
        consumption_date: date.to_string(),
        home_override: Some(home),
    });
    assert!(result.is_ok());
}

pub fn forecast_payload(home: &Path, options: ForecastRunOptions<'_>) -> Value {
    let result = forecast::run_with_options(ForecastRunOptions {
        home_override: Some(home),
        ..options
    });
    assert!(result.is_ok());
    if let Ok(success) = result {
        let payload = serde_json::to_value(success);
        assert!(payload.is_ok());
        if let Ok(value) = payload {
            return value;
        }
    }
    Value::Null
}

pub fn forecast_at(home: &Path, as_of: &str) -> Value {
    forecast_payload(
        home,
        ForecastRunOptions {
            as_of: as_of.to_string(),
            ..ForecastRunOptions::default()
        },
    )
}

pub fn rows(payload: &Value) -> Vec<Value> {
    payload["data"]["rows"].as_array().cloned().unwrap_or_default()
}

pub fn row_for<'a>(rows: &'a [Value], food: &str) -> Option<&'a Value> {
    rows.iter().find(|row| row["food"] == Value::String(food.to_string()))
}

pub fn foods(rows: &[Value]) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row["food"].as_str().map(std::string::ToString::to_string))
        .collect()
}

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::forecast::date::format_iso_date;
use crate::history::parse::{ParsedRows, parse_consumption_rows, parse_purchase_rows};
use crate::history::records::{ConsumptionRecord, PurchaseRecord};
use crate::state::{StorePaths, ensure_data_home};
use crate::{ClientError, ClientResult};

/// Everything the store could read from both history files.
#[derive(Debug, Clone, Default)]
pub struct HistorySnapshot {
    pub purchases: Vec<PurchaseRecord>,
    pub consumption: Vec<ConsumptionRecord>,
    pub dropped_purchase_rows: usize,
    pub dropped_consumption_rows: usize,
}

impl HistorySnapshot {
    pub fn is_empty(&self) -> bool {
        self.purchases.is_empty() && self.consumption.is_empty()
    }
}

/// Reads both history files. A missing file is an empty history; any
/// other read failure means the source is unavailable.
pub fn load_history(paths: &StorePaths) -> ClientResult<HistorySnapshot> {
    let purchases = match read_source(&paths.purchases)? {
        Some(content) => parse_purchase_rows(&content),
        None => ParsedRows::default(),
    };
    let consumption = match read_source(&paths.consumption)? {
        Some(content) => parse_consumption_rows(&content),
        None => ParsedRows::default(),
    };

    debug!(
        purchases = purchases.records.len(),
        consumption = consumption.records.len(),
        dropped_purchase_rows = purchases.dropped_rows,
        dropped_consumption_rows = consumption.dropped_rows,
        "loaded history"
    );

    Ok(HistorySnapshot {
        purchases: purchases.records,
        consumption: consumption.records,
        dropped_purchase_rows: purchases.dropped_rows,
        dropped_consumption_rows: consumption.dropped_rows,
    })
}

pub fn append_purchase(paths: &StorePaths, record: &PurchaseRecord) -> ClientResult<()> {
    let row = [
        record.food.clone(),
        record.quantity.to_string(),
        optional_date(record.purchase_date.as_ref()),
        optional_date(record.expiry_date.as_ref()),
    ];
    append_row(paths, &paths.purchases, &row)?;
    info!(food = %record.food, quantity = record.quantity, "appended purchase");
    Ok(())
}

pub fn append_consumption(paths: &StorePaths, record: &ConsumptionRecord) -> ClientResult<()> {
    let row = [
        record.food.clone(),
        record.quantity.to_string(),
        optional_date(record.consumption_date.as_ref()),
    ];
    append_row(paths, &paths.consumption, &row)?;
    info!(food = %record.food, quantity = record.quantity, "appended consumption");
    Ok(())
}

fn read_source(path: &Path) -> ClientResult<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(content) => Ok(Some(content)),
        Err(error) if error.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "history file not found, treating as empty");
            Ok(None)
        }
        Err(error) => Err(ClientError::history_unavailable(path, &error.to_string())),
    }
}

fn append_row(paths: &StorePaths, path: &Path, row: &[String]) -> ClientResult<()> {
    ensure_data_home(&paths.home)?;
    let needs_leading_newline = missing_trailing_newline(path)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| ClientError::history_write_failed(path, &error.to_string()))?;
    if needs_leading_newline {
        file.write_all(b"\n")
            .map_err(|error| ClientError::history_write_failed(path, &error.to_string()))?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer
        .write_record(row)
        .map_err(|error| ClientError::history_write_failed(path, &error.to_string()))?;
    writer
        .flush()
        .map_err(|error| ClientError::history_write_failed(path, &error.to_string()))
}

fn missing_trailing_newline(path: &Path) -> ClientResult<bool> {
    match fs::read(path) {
        Ok(content) => Ok(content.last().is_some_and(|byte| *byte != b'\n')),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(false),
        Err(error) => Err(ClientError::history_write_failed(path, &error.to_string())),
    }
}

fn optional_date(date: Option<&chrono::NaiveDate>) -> String {
    date.map(format_iso_date).unwrap_or_default()
}

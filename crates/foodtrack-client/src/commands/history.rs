use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{count, load_paths, store_location};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ConsumptionRow, HistoryData, PurchaseRow};
use crate::forecast::date::format_iso_date;
use crate::history::store::load_history;

#[derive(Debug, Default)]
pub struct HistoryListOptions<'a> {
    pub home_override: Option<&'a Path>,
}

pub fn list() -> ClientResult<SuccessEnvelope> {
    list_with_options(HistoryListOptions::default())
}

#[doc(hidden)]
pub fn list_with_options(options: HistoryListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let paths = load_paths(options.home_override)?;
    let history = load_history(&paths)?;

    let purchases = history
        .purchases
        .iter()
        .map(|record| PurchaseRow {
            food: record.food.clone(),
            quantity_kg: record.quantity,
            purchase_date: record.purchase_date.as_ref().map(format_iso_date),
            expiry_date: record.expiry_date.as_ref().map(format_iso_date),
        })
        .collect::<Vec<PurchaseRow>>();
    let consumption = history
        .consumption
        .iter()
        .map(|record| ConsumptionRow {
            food: record.food.clone(),
            quantity_kg: record.quantity,
            consumption_date: record.consumption_date.as_ref().map(format_iso_date),
        })
        .collect::<Vec<ConsumptionRow>>();

    let data = HistoryData {
        store: store_location(&paths),
        purchases,
        consumption,
        unreadable_purchase_rows: count(history.dropped_purchase_rows),
        unreadable_consumption_rows: count(history.dropped_consumption_rows),
    };
    success("history", data)
}

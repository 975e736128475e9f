use std::path::Path;

use crate::ClientResult;
use crate::commands::common::load_paths;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::RecordData;
use crate::forecast::date::format_iso_date;
use crate::history::store::{append_consumption, append_purchase};
use crate::history::validate::{
    CONSUMPTION_COMMAND, NewConsumption, NewPurchase, PURCHASE_COMMAND, validate_consumption,
    validate_purchase,
};

#[derive(Debug, Default)]
pub struct PurchaseAddOptions<'a> {
    pub food: String,
    pub quantity: f64,
    pub purchase_date: String,
    pub expiry_date: Option<String>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct ConsumptionAddOptions<'a> {
    pub food: String,
    pub quantity: f64,
    pub consumption_date: String,
    pub home_override: Option<&'a Path>,
}

pub fn add_purchase(
    food: &str,
    quantity: f64,
    purchase_date: &str,
    expiry_date: Option<&str>,
) -> ClientResult<SuccessEnvelope> {
    add_purchase_with_options(PurchaseAddOptions {
        food: food.to_string(),
        quantity,
        purchase_date: purchase_date.to_string(),
        expiry_date: expiry_date.map(std::string::ToString::to_string),
        home_override: None,
    })
}

#[doc(hidden)]
pub fn add_purchase_with_options(options: PurchaseAddOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let record = validate_purchase(&NewPurchase {
        food: &options.food,
        quantity: options.quantity,
        purchase_date: &options.purchase_date,
        expiry_date: options.expiry_date.as_deref(),
    })?;
    let paths = load_paths(options.home_override)?;
    append_purchase(&paths, &record)?;

    let data = RecordData {
        kind: "purchase".to_string(),
        food: record.food.clone(),
        quantity_kg: record.quantity,
        date: record
            .purchase_date
            .as_ref()
            .map(format_iso_date)
            .unwrap_or_default(),
        expiry: record.expiry_date.as_ref().map(format_iso_date),
        path: paths.purchases.display().to_string(),
    };
    success(PURCHASE_COMMAND, data)
}

pub fn add_consumption(
    food: &str,
    quantity: f64,
    consumption_date: &str,
) -> ClientResult<SuccessEnvelope> {
    add_consumption_with_options(ConsumptionAddOptions {
        food: food.to_string(),
        quantity,
        consumption_date: consumption_date.to_string(),
        home_override: None,
    })
}

#[doc(hidden)]
pub fn add_consumption_with_options(
    options: ConsumptionAddOptions<'_>,
) -> ClientResult<SuccessEnvelope> {
    let record = validate_consumption(&NewConsumption {
        food: &options.food,
        quantity: options.quantity,
        consumption_date: &options.consumption_date,
    })?;
    let paths = load_paths(options.home_override)?;
    append_consumption(&paths, &record)?;

    let data = RecordData {
        kind: "consumption".to_string(),
        food: record.food.clone(),
        quantity_kg: record.quantity,
        date: record
            .consumption_date
            .as_ref()
            .map(format_iso_date)
            .unwrap_or_default(),
        expiry: None,
        path: paths.consumption.display().to_string(),
    };
    success(CONSUMPTION_COMMAND, data)
}

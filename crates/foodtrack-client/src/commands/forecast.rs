use std::path::Path;

use crate::commands::common::{count, load_paths, round_to, store_location};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ForecastData, ForecastOptionsData, ForecastRow, SkippedCounts};
use crate::forecast::date::{format_iso_date, parse_iso_date_strict};
use crate::forecast::policy::{FORECAST_POLICY_VERSION, ForecastOptions, KeyNormalization};
use crate::forecast::surplus::forecast_surplus;
use crate::history::store::load_history;
use crate::{ClientError, ClientResult};

const COMMAND: &str = "forecast";

#[derive(Debug, Default)]
pub struct ForecastRunOptions<'a> {
    /// Reference date (`YYYY-MM-DD`) the trend is evaluated at.
    pub as_of: String,
    pub expiry_boost_days: Option<i64>,
    pub exclude_expired: bool,
    pub normalize_keys: bool,
    pub home_override: Option<&'a Path>,
}

pub fn run_with_options(options: ForecastRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let as_of = parse_iso_date_strict(&options.as_of, "as_of", COMMAND)?;
    let forecast_options = build_forecast_options(&options)?;

    let paths = load_paths(options.home_override)?;
    let history = load_history(&paths)?;
    let forecast = forecast_surplus(
        &history.purchases,
        &history.consumption,
        as_of,
        &forecast_options,
    );

    let rows = forecast
        .predictions
        .iter()
        .map(|prediction| ForecastRow {
            food: prediction.food.clone(),
            surplus_kg: round_to(prediction.predicted_surplus_kg, 2),
            nearest_expiry: prediction.nearest_expiry_display(),
            predicted_purchase_kg: round_to(prediction.predicted_purchase_kg, 2),
            predicted_consumption_kg: round_to(prediction.predicted_consumption_kg, 2),
            purchase_method: prediction.purchase_method.as_str().to_string(),
            consumption_method: prediction.consumption_method.as_str().to_string(),
            soon_expiring_kg: round_to(prediction.soon_expiring_kg, 2),
        })
        .collect::<Vec<ForecastRow>>();

    let data = ForecastData {
        policy_version: FORECAST_POLICY_VERSION.to_string(),
        as_of: format_iso_date(&forecast.as_of),
        status: forecast.status.as_str().to_string(),
        options: ForecastOptionsData {
            expiry_boost_days: forecast_options.expiry_boost_days,
            exclude_expired: forecast_options.exclude_expired,
            key_normalization: forecast_options.key_normalization.as_str().to_string(),
        },
        rows,
        skipped: SkippedCounts {
            undated_purchases: count(forecast.skipped_purchases),
            undated_consumption: count(forecast.skipped_consumption),
            expired_purchases: count(forecast.expired_purchases),
            unreadable_purchase_rows: count(history.dropped_purchase_rows),
            unreadable_consumption_rows: count(history.dropped_consumption_rows),
        },
        store: store_location(&paths),
    };

    success(COMMAND, data)
}

fn build_forecast_options(options: &ForecastRunOptions<'_>) -> ClientResult<ForecastOptions> {
    if let Some(days) = options.expiry_boost_days
        && days < 0
    {
        return Err(ClientError::invalid_argument_for_command(
            "`expiry_boost_days` must be zero or a positive number of days.",
            Some(COMMAND),
        ));
    }

    let key_normalization = if options.normalize_keys {
        KeyNormalization::TrimCaseFold
    } else {
        KeyNormalization::Exact
    };

    Ok(ForecastOptions {
        expiry_boost_days: options.expiry_boost_days,
        exclude_expired: options.exclude_expired,
        key_normalization,
    })
}

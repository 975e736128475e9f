use std::path::Path;

use crate::ClientResult;
use crate::contracts::types::StoreLocation;
use crate::state::{StorePaths, resolve_store_paths};

pub(crate) fn load_paths(home_override: Option<&Path>) -> ClientResult<StorePaths> {
    resolve_store_paths(home_override)
}

pub(crate) fn store_location(paths: &StorePaths) -> StoreLocation {
    StoreLocation {
        home: paths.home.display().to_string(),
        purchases_path: paths.purchases.display().to_string(),
        consumption_path: paths.consumption.display().to_string(),
    }
}

pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let exponent = i32::try_from(decimals).unwrap_or(2);
    let factor = 10_f64.powi(exponent);
    (value * factor).round() / factor
}

pub(crate) fn count(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::forecast::date::days_between;
use crate::forecast::policy::ForecastOptions;
use crate::history::records::{ConsumptionRecord, PurchaseRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct PurchasePoint {
    pub days_ago: i64,
    pub quantity: f64,
    pub days_to_expiry: Option<i64>,
    pub expiry_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsumptionPoint {
    pub days_ago: i64,
    pub quantity: f64,
}

#[derive(Debug, Clone, Default)]
pub struct AggregatedHistory {
    pub purchases: BTreeMap<String, Vec<PurchasePoint>>,
    pub consumption: BTreeMap<String, Vec<ConsumptionPoint>>,
    /// First spelling seen for each key, used for display.
    pub labels: BTreeMap<String, String>,
    pub skipped_purchases: usize,
    pub skipped_consumption: usize,
    pub expired_purchases: usize,
}

impl AggregatedHistory {
    /// Food keys with at least one dated record in both histories.
    pub fn candidates(&self) -> BTreeSet<String> {
        self.purchases
            .keys()
            .filter(|key| self.consumption.contains_key(*key))
            .cloned()
            .collect()
    }

    pub fn label_for(&self, key: &str) -> String {
        self.labels
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    fn key_for(&mut self, food: &str, options: &ForecastOptions) -> String {
        let key = options.key_normalization.key_for(food);
        self.labels
            .entry(key.clone())
            .or_insert_with(|| options.key_normalization.label_for(food));
        key
    }
}

pub fn aggregate(
    purchases: &[PurchaseRecord],
    consumption: &[ConsumptionRecord],
    as_of: NaiveDate,
    options: &ForecastOptions,
) -> AggregatedHistory {
    let mut aggregated = AggregatedHistory::default();

    for record in purchases {
        let Some(purchase_date) = record.purchase_date else {
            aggregated.skipped_purchases += 1;
            continue;
        };
        let days_to_expiry = record
            .expiry_date
            .map(|expiry| days_between(as_of, expiry));
        if options.exclude_expired && days_to_expiry.is_some_and(|days| days < 0) {
            aggregated.expired_purchases += 1;
            continue;
        }

        let key = aggregated.key_for(&record.food, options);
        aggregated
            .purchases
            .entry(key)
            .or_default()
            .push(PurchasePoint {
                days_ago: days_between(purchase_date, as_of),
                quantity: record.quantity,
                days_to_expiry,
                expiry_date: record.expiry_date,
            });
    }

    for record in consumption {
        let Some(consumption_date) = record.consumption_date else {
            aggregated.skipped_consumption += 1;
            continue;
        };

        let key = aggregated.key_for(&record.food, options);
        aggregated
            .consumption
            .entry(key)
            .or_default()
            .push(ConsumptionPoint {
                days_ago: days_between(consumption_date, as_of),
                quantity: record.quantity,
            });
    }

    aggregated
}

use chrono::NaiveDate;

use crate::forecast::date::parse_record_date;

#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseRecord {
    pub food: String,
    pub quantity: f64,
    pub purchase_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsumptionRecord {
    pub food: String,
    pub quantity: f64,
    pub consumption_date: Option<NaiveDate>,
}

impl PurchaseRecord {
    pub fn new(
        food: &str,
        quantity: f64,
        purchase_date: Option<NaiveDate>,
        expiry_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            food: food.to_string(),
            quantity,
            purchase_date,
            expiry_date,
        }
    }

    /// Builds a record from raw row fields, coercing instead of failing.
    pub fn from_raw(food: &str, quantity: &str, purchase_date: &str, expiry_date: &str) -> Self {
        Self {
            food: food.to_string(),
            quantity: coerce_quantity(quantity),
            purchase_date: parse_record_date(purchase_date),
            expiry_date: parse_record_date(expiry_date),
        }
    }
}

impl ConsumptionRecord {
    pub fn new(food: &str, quantity: f64, consumption_date: Option<NaiveDate>) -> Self {
        Self {
            food: food.to_string(),
            quantity,
            consumption_date,
        }
    }

    pub fn from_raw(food: &str, quantity: &str, consumption_date: &str) -> Self {
        Self {
            food: food.to_string(),
            quantity: coerce_quantity(quantity),
            consumption_date: parse_record_date(consumption_date),
        }
    }
}

/// Unparseable, non-finite or negative quantities read as zero.
pub fn coerce_quantity(value: &str) -> f64 {
    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() && parsed > 0.0 => parsed,
        _ => 0.0,
    }
}

use chrono::NaiveDate;

use crate::forecast::date::parse_iso_date_strict;
use crate::history::records::{ConsumptionRecord, PurchaseRecord};
use crate::{ClientError, ClientResult};

pub const PURCHASE_COMMAND: &str = "purchase add";
pub const CONSUMPTION_COMMAND: &str = "consumption add";

#[derive(Debug, Clone)]
pub struct NewPurchase<'a> {
    pub food: &'a str,
    pub quantity: f64,
    pub purchase_date: &'a str,
    pub expiry_date: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct NewConsumption<'a> {
    pub food: &'a str,
    pub quantity: f64,
    pub consumption_date: &'a str,
}

pub fn validate_purchase(input: &NewPurchase<'_>) -> ClientResult<PurchaseRecord> {
    let food = validate_food(input.food, PURCHASE_COMMAND)?;
    let quantity = validate_quantity(input.quantity, PURCHASE_COMMAND)?;
    let purchase_date = parse_iso_date_strict(input.purchase_date, "date", PURCHASE_COMMAND)?;
    let expiry_date = match input.expiry_date {
        Some(value) => Some(parse_iso_date_strict(value, "expiry", PURCHASE_COMMAND)?),
        None => None,
    };

    Ok(PurchaseRecord::new(
        food,
        quantity,
        Some(purchase_date),
        expiry_date,
    ))
}

pub fn validate_consumption(input: &NewConsumption<'_>) -> ClientResult<ConsumptionRecord> {
    let food = validate_food(input.food, CONSUMPTION_COMMAND)?;
    let quantity = validate_quantity(input.quantity, CONSUMPTION_COMMAND)?;
    let consumption_date: NaiveDate =
        parse_iso_date_strict(input.consumption_date, "date", CONSUMPTION_COMMAND)?;

    Ok(ConsumptionRecord::new(
        food,
        quantity,
        Some(consumption_date),
    ))
}

fn validate_food<'a>(food: &'a str, command: &str) -> ClientResult<&'a str> {
    if food.trim().is_empty() {
        return Err(ClientError::invalid_record(
            "Food name must not be blank.",
            command,
        ));
    }
    if food.contains(['\n', '\r']) {
        return Err(ClientError::invalid_record(
            "Food name must be a single line.",
            command,
        ));
    }
    Ok(food)
}

fn validate_quantity(quantity: f64, command: &str) -> ClientResult<f64> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(ClientError::invalid_record(
            "Quantity must be a number of kilograms greater than 0 (e.g. 1.5).",
            command,
        ));
    }
    Ok(quantity)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{NewConsumption, NewPurchase, validate_consumption, validate_purchase};

    fn purchase<'a>(food: &'a str, quantity: f64, expiry: Option<&'a str>) -> NewPurchase<'a> {
        NewPurchase {
            food,
            quantity,
            purchase_date: "2024-01-05",
            expiry_date: expiry,
        }
    }

    #[test]
    fn accepts_purchase_with_and_without_expiry() {
        let with_expiry = validate_purchase(&purchase("Apple", 1.5, Some("2024-01-15")));
        assert!(with_expiry.is_ok());
        if let Ok(record) = with_expiry {
            assert_eq!(record.expiry_date, NaiveDate::from_ymd_opt(2024, 1, 15));
        }

        let without_expiry = validate_purchase(&purchase("Apple", 1.5, None));
        assert!(without_expiry.is_ok());
    }

    #[test]
    fn rejects_non_positive_quantities() {
        for quantity in [0.0, -2.0, f64::NAN] {
            let result = validate_purchase(&purchase("Apple", quantity, None));
            assert!(result.is_err());
            if let Err(error) = result {
                assert_eq!(error.code, "invalid_record");
            }
        }
    }

    #[test]
    fn rejects_blank_food_and_bad_dates() {
        assert!(validate_purchase(&purchase("   ", 1.0, None)).is_err());
        assert!(validate_purchase(&purchase("Apple", 1.0, Some("2024-02-30"))).is_err());

        let result = validate_consumption(&NewConsumption {
            food: "Apple",
            quantity: 1.0,
            consumption_date: "yesterday",
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.message.contains("date"));
        }
    }
}

use std::collections::BTreeMap;

use crate::forecast::policy::KeyNormalization;
use crate::history::records::{ConsumptionRecord, PurchaseRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct FoodBalance {
    pub food: String,
    pub purchased_kg: f64,
    pub consumed_kg: f64,
    pub balance_kg: f64,
}

/// Purchased minus consumed per food over the whole history, keeping only
/// foods with stock left. Dates play no part here.
pub fn positive_balances(
    purchases: &[PurchaseRecord],
    consumption: &[ConsumptionRecord],
    key_normalization: KeyNormalization,
) -> Vec<FoodBalance> {
    let mut totals: BTreeMap<String, (String, f64, f64)> = BTreeMap::new();
    for record in purchases {
        entry_for(&mut totals, &record.food, key_normalization).1 += record.quantity;
    }
    for record in consumption {
        entry_for(&mut totals, &record.food, key_normalization).2 += record.quantity;
    }

    totals
        .into_values()
        .filter_map(|(food, purchased_kg, consumed_kg)| {
            let balance_kg = purchased_kg - consumed_kg;
            if balance_kg <= 0.0 {
                return None;
            }
            Some(FoodBalance {
                food,
                purchased_kg,
                consumed_kg,
                balance_kg,
            })
        })
        .collect()
}

fn entry_for<'a>(
    totals: &'a mut BTreeMap<String, (String, f64, f64)>,
    food: &str,
    key_normalization: KeyNormalization,
) -> &'a mut (String, f64, f64) {
    totals
        .entry(key_normalization.key_for(food))
        .or_insert_with(|| (key_normalization.label_for(food), 0.0, 0.0))
}

use chrono::NaiveDate;
use tracing::debug;

use crate::forecast::aggregate::{ConsumptionPoint, PurchasePoint, aggregate};
use crate::forecast::policy::ForecastOptions;
use crate::forecast::trend::{estimate_today, floor_at_zero};
use crate::forecast::types::{ForecastStatus, SurplusForecast, SurplusPrediction};
use crate::history::records::{ConsumptionRecord, PurchaseRecord};

/// Predicts today's surplus for every food present in both histories.
///
/// Pure: the result depends only on the records, `as_of` and `options`.
/// Predictions are sorted by food key and labelled with the first spelling
/// seen for that key.
pub fn forecast_surplus(
    purchases: &[PurchaseRecord],
    consumption: &[ConsumptionRecord],
    as_of: NaiveDate,
    options: &ForecastOptions,
) -> SurplusForecast {
    let aggregated = aggregate(purchases, consumption, as_of, options);

    let mut predictions = Vec::new();
    for food in aggregated.candidates() {
        let (Some(purchase_points), Some(consumption_points)) = (
            aggregated.purchases.get(&food),
            aggregated.consumption.get(&food),
        ) else {
            continue;
        };
        predictions.push(predict_item(
            aggregated.label_for(&food),
            purchase_points,
            consumption_points,
            options,
        ));
    }

    let status = if aggregated.purchases.is_empty() || aggregated.consumption.is_empty() {
        ForecastStatus::NoData
    } else if predictions.is_empty() {
        ForecastStatus::NoOverlap
    } else {
        ForecastStatus::Computed
    };

    debug!(
        as_of = %as_of,
        status = status.as_str(),
        items = predictions.len(),
        skipped_purchases = aggregated.skipped_purchases,
        skipped_consumption = aggregated.skipped_consumption,
        "surplus forecast computed"
    );

    SurplusForecast {
        as_of,
        status,
        predictions,
        skipped_purchases: aggregated.skipped_purchases,
        skipped_consumption: aggregated.skipped_consumption,
        expired_purchases: aggregated.expired_purchases,
    }
}

fn predict_item(
    food: String,
    purchase_points: &[PurchasePoint],
    consumption_points: &[ConsumptionPoint],
    options: &ForecastOptions,
) -> SurplusPrediction {
    let purchase_series = purchase_points
        .iter()
        .map(|point| (point.days_ago as f64, point.quantity))
        .collect::<Vec<(f64, f64)>>();
    let consumption_series = consumption_points
        .iter()
        .map(|point| (point.days_ago as f64, point.quantity))
        .collect::<Vec<(f64, f64)>>();

    let purchase = estimate_today(&purchase_series);
    let consumption = estimate_today(&consumption_series);

    let soon_expiring_kg = purchase_points
        .iter()
        .filter(|point| options.counts_as_soon_expiring(point.days_to_expiry))
        .map(|point| point.quantity)
        .sum::<f64>();

    let predicted_surplus_kg =
        floor_at_zero(purchase.value - consumption.value + soon_expiring_kg);
    let nearest_expiry = purchase_points
        .iter()
        .filter_map(|point| point.expiry_date)
        .min();

    SurplusPrediction {
        food,
        predicted_purchase_kg: purchase.value,
        predicted_consumption_kg: consumption.value,
        purchase_method: purchase.method,
        consumption_method: consumption.method,
        soon_expiring_kg,
        predicted_surplus_kg,
        nearest_expiry,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::forecast_surplus;
    use crate::forecast::policy::ForecastOptions;
    use crate::forecast::types::{ForecastStatus, TrendMethod};
    use crate::history::records::{ConsumptionRecord, PurchaseRecord};

    fn date(value: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
    }

    fn day(value: &str) -> NaiveDate {
        date(value).unwrap_or(NaiveDate::MIN)
    }

    fn purchase(food: &str, quantity: f64, on: &str, expiry: Option<&str>) -> PurchaseRecord {
        PurchaseRecord::new(food, quantity, date(on), expiry.and_then(date))
    }

    fn consumed(food: &str, quantity: f64, on: &str) -> ConsumptionRecord {
        ConsumptionRecord::new(food, quantity, date(on))
    }

    fn apple_scenario() -> (Vec<PurchaseRecord>, Vec<ConsumptionRecord>) {
        (
            vec![
                purchase("Apple", 10.0, "2024-01-01", Some("2024-01-10")),
                purchase("Apple", 12.0, "2024-01-05", Some("2024-01-15")),
            ],
            vec![
                consumed("Apple", 5.0, "2024-01-02"),
                consumed("Apple", 6.0, "2024-01-06"),
            ],
        )
    }

    #[test]
    fn two_point_series_are_fit_and_subtracted() {
        let (purchases, consumption) = apple_scenario();
        let forecast = forecast_surplus(
            &purchases,
            &consumption,
            day("2024-01-10"),
            &ForecastOptions::default(),
        );

        assert_eq!(forecast.status, ForecastStatus::Computed);
        assert_eq!(forecast.predictions.len(), 1);
        let apple = &forecast.predictions[0];
        assert_eq!(apple.purchase_method, TrendMethod::Fit);
        assert_eq!(apple.consumption_method, TrendMethod::Fit);
        // purchases (9, 10), (5, 12) -> 14.5; consumption (8, 5), (4, 6) -> 7.0
        assert!((apple.predicted_purchase_kg - 14.5).abs() < 1e-9);
        assert!((apple.predicted_consumption_kg - 7.0).abs() < 1e-9);
        assert!((apple.predicted_surplus_kg - 7.5).abs() < 1e-9);
        assert_eq!(apple.surplus_display(), "7.50");
        assert_eq!(apple.nearest_expiry_display(), "2024-01-10");
    }

    #[test]
    fn expiry_boost_adds_only_stock_inside_the_horizon() {
        let (purchases, consumption) = apple_scenario();
        let options = ForecastOptions::default().with_default_expiry_boost();
        let forecast = forecast_surplus(&purchases, &consumption, day("2024-01-10"), &options);

        let apple = &forecast.predictions[0];
        assert_eq!(apple.soon_expiring_kg, 10.0);
        assert!((apple.predicted_surplus_kg - 17.5).abs() < 1e-9);
    }

    #[test]
    fn expiry_boost_can_flag_stock_when_trend_predicts_nothing() {
        let purchases = vec![purchase("Milk", 4.0, "2024-01-09", Some("2024-01-11"))];
        let consumption = vec![consumed("Milk", 9.0, "2024-01-09")];
        let as_of = day("2024-01-10");

        let plain = forecast_surplus(&purchases, &consumption, as_of, &ForecastOptions::default());
        assert_eq!(plain.predictions[0].predicted_surplus_kg, 0.0);

        let boosted = forecast_surplus(
            &purchases,
            &consumption,
            as_of,
            &ForecastOptions::default().with_default_expiry_boost(),
        );
        assert_eq!(boosted.predictions[0].predicted_surplus_kg, 0.0);

        let fresh_purchases = vec![
            purchase("Milk", 4.0, "2024-01-09", Some("2024-01-11")),
            purchase("Milk", 8.0, "2024-01-08", Some("2024-01-12")),
        ];
        let boosted = forecast_surplus(
            &fresh_purchases,
            &consumption,
            as_of,
            &ForecastOptions::default().with_default_expiry_boost(),
        );
        // trend: (1, 4), (2, 8) -> 0 today; soon expiring 12; consumed 9
        assert!((boosted.predictions[0].predicted_surplus_kg - 3.0).abs() < 1e-9);
    }

    #[test]
    fn single_purchase_uses_its_quantity() {
        let purchases = vec![purchase("Rice", 25.0, "2024-01-03", None)];
        let consumption = vec![
            consumed("Rice", 2.0, "2024-01-04"),
            consumed("Rice", 3.0, "2024-01-06"),
            consumed("Rice", 4.0, "2024-01-08"),
        ];
        let forecast = forecast_surplus(
            &purchases,
            &consumption,
            day("2024-01-10"),
            &ForecastOptions::default(),
        );

        let rice = &forecast.predictions[0];
        assert_eq!(rice.purchase_method, TrendMethod::Fallback);
        assert_eq!(rice.predicted_purchase_kg, 25.0);
        assert_eq!(rice.consumption_method, TrendMethod::Fit);
        assert_eq!(rice.nearest_expiry, None);
        assert_eq!(rice.nearest_expiry_display(), "none");
    }

    #[test]
    fn surplus_never_goes_negative() {
        let purchases = vec![purchase("Bread", 1.0, "2024-01-09", None)];
        let consumption = vec![consumed("Bread", 30.0, "2024-01-09")];
        let forecast = forecast_surplus(
            &purchases,
            &consumption,
            day("2024-01-10"),
            &ForecastOptions::default(),
        );
        assert_eq!(forecast.predictions[0].predicted_surplus_kg, 0.0);
        assert_eq!(forecast.status, ForecastStatus::Computed);
    }

    #[test]
    fn status_distinguishes_missing_data_from_missing_overlap() {
        let as_of = day("2024-01-10");
        let options = ForecastOptions::default();

        let empty = forecast_surplus(&[], &[], as_of, &options);
        assert_eq!(empty.status, ForecastStatus::NoData);

        let purchases = vec![purchase("Apple", 1.0, "2024-01-01", None)];
        let only_purchases = forecast_surplus(&purchases, &[], as_of, &options);
        assert_eq!(only_purchases.status, ForecastStatus::NoData);

        let consumption = vec![consumed("Pear", 1.0, "2024-01-02")];
        let disjoint = forecast_surplus(&purchases, &consumption, as_of, &options);
        assert_eq!(disjoint.status, ForecastStatus::NoOverlap);
        assert!(disjoint.predictions.is_empty());
    }

    #[test]
    fn nearest_expiry_ignores_missing_dates() {
        let purchases = vec![
            purchase("Beans", 1.0, "2024-01-01", Some("2025-03-01")),
            purchase("Beans", 1.0, "2024-01-02", Some("2025-01-01")),
            purchase("Beans", 1.0, "2024-01-03", None),
        ];
        let consumption = vec![consumed("Beans", 1.0, "2024-01-04")];
        let forecast = forecast_surplus(
            &purchases,
            &consumption,
            day("2024-01-10"),
            &ForecastOptions::default(),
        );
        assert_eq!(forecast.predictions[0].nearest_expiry_display(), "2025-01-01");
    }

    #[test]
    fn repeated_runs_are_identical() {
        let (purchases, consumption) = apple_scenario();
        let as_of = day("2024-01-10");
        let options = ForecastOptions::default().with_default_expiry_boost();
        let first = forecast_surplus(&purchases, &consumption, as_of, &options);
        let second = forecast_surplus(&purchases, &consumption, as_of, &options);
        assert_eq!(first, second);
        assert_eq!(
            first.predictions[0].predicted_surplus_kg.to_bits(),
            second.predictions[0].predicted_surplus_kg.to_bits()
        );
    }
}

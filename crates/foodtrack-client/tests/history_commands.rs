mod support;

use std::fs;

use foodtrack_client::commands::history::{self, HistoryListOptions};
use foodtrack_client::commands::record::{self, ConsumptionAddOptions, PurchaseAddOptions};
use foodtrack_client::commands::totals::{self, TotalsRunOptions};
use serde_json::Value;
use support::history_testkit::{add_consumption, add_purchase, temp_home_in_tmp, write_history};

#[test]
fn purchase_add_appends_a_row_and_echoes_it() {
    let temp = temp_home_in_tmp("foodtrack-record-purchase");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let result = record::add_purchase_with_options(PurchaseAddOptions {
            food: "Carrots".to_string(),
            quantity: 3.5,
            purchase_date: "2024-04-01".to_string(),
            expiry_date: Some("2024-04-12".to_string()),
            home_override: Some(&home),
        });
        assert!(result.is_ok());
        if let Ok(success) = result {
            assert_eq!(success.command, "purchase add");
            assert_eq!(success.data["food"], Value::String("Carrots".to_string()));
            assert_eq!(success.data["quantity_kg"].as_f64(), Some(3.5));
            assert_eq!(success.data["expiry"], Value::String("2024-04-12".to_string()));
        }

        let raw = fs::read_to_string(home.join("purchases.csv")).unwrap_or_default();
        assert_eq!(raw, "Carrots,3.5,2024-04-01,2024-04-12\n");
    }
}

#[test]
fn consumption_add_rejects_invalid_input_without_writing() {
    let temp = temp_home_in_tmp("foodtrack-record-invalid");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        let result = record::add_consumption_with_options(ConsumptionAddOptions {
            food: "Carrots".to_string(),
            quantity: 0.0,
            consumption_date: "2024-04-01".to_string(),
            home_override: Some(&home),
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_record");
        }
        assert!(!home.join("consumption.csv").exists());
    }
}

#[test]
fn history_lists_coerced_records_in_file_order() {
    let temp = temp_home_in_tmp("foodtrack-history-list");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        write_history(&home, "Apple,2,2024-04-01,2024-04-09\nApple,x,bad,\n", "");
        add_consumption(&home, "Apple", 1.25, "2024-04-02");

        let result = history::list_with_options(HistoryListOptions {
            home_override: Some(&home),
        });
        assert!(result.is_ok());
        if let Ok(success) = result {
            let purchases = success.data["purchases"].as_array().cloned().unwrap_or_default();
            assert_eq!(purchases.len(), 2);
            assert_eq!(
                purchases[0]["expiry_date"],
                Value::String("2024-04-09".to_string())
            );
            assert_eq!(purchases[1]["quantity_kg"].as_f64(), Some(0.0));
            assert!(purchases[1]["purchase_date"].is_null());

            let consumption = success.data["consumption"].as_array().cloned().unwrap_or_default();
            assert_eq!(consumption.len(), 1);
            assert_eq!(consumption[0]["quantity_kg"].as_f64(), Some(1.25));
        }
    }
}

#[test]
fn totals_show_only_positive_balances() {
    let temp = temp_home_in_tmp("foodtrack-totals");
    assert!(temp.is_ok());
    if let Ok((_dir, home)) = temp {
        add_purchase(&home, "Apple", 10.0, "2024-04-01", None);
        add_purchase(&home, "Bread", 1.0, "2024-04-01", None);
        add_consumption(&home, "Apple", 2.5, "2024-04-02");
        add_consumption(&home, "Bread", 3.0, "2024-04-02");

        let result = totals::run_with_options(TotalsRunOptions {
            normalize_keys: false,
            home_override: Some(&home),
        });
        assert!(result.is_ok());
        if let Ok(success) = result {
            let rows = success.data["rows"].as_array().cloned().unwrap_or_default();
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0]["food"], Value::String("Apple".to_string()));
            assert_eq!(rows[0]["balance_kg"].as_f64(), Some(7.5));
        }
    }
}

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct StoreLocation {
    pub home: String,
    pub purchases_path: String,
    pub consumption_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastData {
    pub policy_version: String,
    pub as_of: String,
    pub status: String,
    pub options: ForecastOptionsData,
    pub rows: Vec<ForecastRow>,
    pub skipped: SkippedCounts,
    pub store: StoreLocation,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastOptionsData {
    pub expiry_boost_days: Option<i64>,
    pub exclude_expired: bool,
    pub key_normalization: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastRow {
    pub food: String,
    pub surplus_kg: f64,
    pub nearest_expiry: String,
    pub predicted_purchase_kg: f64,
    pub predicted_consumption_kg: f64,
    pub purchase_method: String,
    pub consumption_method: String,
    pub soon_expiring_kg: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedCounts {
    pub undated_purchases: i64,
    pub undated_consumption: i64,
    pub expired_purchases: i64,
    pub unreadable_purchase_rows: i64,
    pub unreadable_consumption_rows: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordData {
    pub kind: String,
    pub food: String,
    pub quantity_kg: f64,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryData {
    pub store: StoreLocation,
    pub purchases: Vec<PurchaseRow>,
    pub consumption: Vec<ConsumptionRow>,
    pub unreadable_purchase_rows: i64,
    pub unreadable_consumption_rows: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseRow {
    pub food: String,
    pub quantity_kg: f64,
    pub purchase_date: Option<String>,
    pub expiry_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsumptionRow {
    pub food: String,
    pub quantity_kg: f64,
    pub consumption_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TotalsData {
    pub rows: Vec<TotalsRow>,
    pub store: StoreLocation,
}

#[derive(Debug, Clone, Serialize)]
pub struct TotalsRow {
    pub food: String,
    pub purchased_kg: f64,
    pub consumed_kg: f64,
    pub balance_kg: f64,
}

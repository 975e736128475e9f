use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendMethod {
    /// Least-squares line evaluated at `days_ago = 0`.
    Fit,
    /// Sum of the series quantities.
    Fallback,
}

impl TrendMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub value: f64,
    pub method: TrendMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastStatus {
    /// Either history is empty, so nothing can be compared.
    NoData,
    /// Both histories have rows but share no food key.
    NoOverlap,
    /// At least one food key was forecast; surplus may still be zero.
    Computed,
}

impl ForecastStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoData => "no_data",
            Self::NoOverlap => "no_overlap",
            Self::Computed => "computed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurplusPrediction {
    pub food: String,
    pub predicted_purchase_kg: f64,
    pub predicted_consumption_kg: f64,
    pub purchase_method: TrendMethod,
    pub consumption_method: TrendMethod,
    pub soon_expiring_kg: f64,
    pub predicted_surplus_kg: f64,
    pub nearest_expiry: Option<NaiveDate>,
}

impl SurplusPrediction {
    pub fn surplus_display(&self) -> String {
        format!("{:.2}", self.predicted_surplus_kg)
    }

    pub fn nearest_expiry_display(&self) -> String {
        match self.nearest_expiry {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => "none".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurplusForecast {
    pub as_of: NaiveDate,
    pub status: ForecastStatus,
    pub predictions: Vec<SurplusPrediction>,
    pub skipped_purchases: usize,
    pub skipped_consumption: usize,
    pub expired_purchases: usize,
}

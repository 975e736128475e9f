pub mod aggregate;
pub mod date;
pub mod policy;
pub mod surplus;
pub mod totals;
pub mod trend;
pub mod types;

pub use policy::{FORECAST_POLICY_VERSION, ForecastOptions, KeyNormalization};
pub use surplus::forecast_surplus;
pub use types::{ForecastStatus, SurplusForecast, SurplusPrediction, TrendMethod};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate(pub String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    if value.len() != 10 {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return Err("date must use YYYY-MM-DD format".to_string());
        }
    }

    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err("date must use valid calendar values".to_string());
    }

    Ok(IsoDate(value.to_string()))
}

/// Accepts any finite number of kilograms. Positivity is checked when the
/// record is validated, so the failure carries the record error contract.
pub fn parse_quantity(value: &str) -> Result<f64, String> {
    match value.trim().parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err("quantity must be a number of kilograms, e.g. 2.5".to_string()),
    }
}

pub const FORECAST_AFTER_HELP: &str = "\
How the forecast works:
  For every food that appears in both purchase and consumption history,
  today's purchase and consumption are estimated from a straight-line trend
  over (days ago, kg). Foods with a single record use that record's amount.
  Surplus = predicted purchase - predicted consumption, never below zero.

Options in short:
  --expiry-boost [DAYS]   Add stock expiring within DAYS (default 3) to the surplus
  --exclude-expired       Ignore purchase lots that have already expired
  --normalize-keys        Match food names ignoring case and surrounding spaces

Data files (under $FOODTRACK_HOME, default ~/.foodtrack):
  purchases.csv     food,quantity_kg,purchase_date[,expiry_date]
  consumption.csv   food,quantity_kg,consumption_date
";

#[derive(Debug, Parser)]
#[command(
    name = "foodtrack",
    version,
    about = "school food surplus forecasting",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Forecast today's surplus per food from purchase and consumption history
    #[command(after_long_help = FORECAST_AFTER_HELP)]
    Forecast {
        /// Reference date (YYYY-MM-DD); defaults to today
        #[arg(long, value_parser = parse_iso_date)]
        as_of: Option<IsoDate>,
        /// Add stock expiring within DAYS to the surplus (DAYS defaults to 3)
        #[arg(
            long,
            value_name = "DAYS",
            num_args = 0..=1,
            default_missing_value = "3",
            value_parser = clap::value_parser!(i64).range(0..)
        )]
        expiry_boost: Option<i64>,
        /// Drop purchase lots whose expiry date has already passed
        #[arg(long)]
        exclude_expired: bool,
        /// Match food names ignoring case and surrounding whitespace
        #[arg(long)]
        normalize_keys: bool,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Record purchased food
    #[command(arg_required_else_help = true)]
    Purchase {
        #[command(subcommand)]
        command: PurchaseCommand,
    },
    /// Record consumed food
    #[command(arg_required_else_help = true)]
    Consumption {
        #[command(subcommand)]
        command: ConsumptionCommand,
    },
    /// List every purchase and consumption record as stored
    History {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show purchased minus consumed totals for foods with stock left
    Totals {
        /// Match food names ignoring case and surrounding whitespace
        #[arg(long)]
        normalize_keys: bool,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum PurchaseCommand {
    /// Append one purchase record
    Add {
        /// Food name (e.g. Apple)
        food: String,
        /// Quantity purchased in kilograms
        #[arg(value_parser = parse_quantity, allow_negative_numbers = true)]
        quantity: f64,
        /// Purchase date (YYYY-MM-DD); defaults to today
        #[arg(long, value_parser = parse_iso_date)]
        date: Option<IsoDate>,
        /// Expiry date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        expiry: Option<IsoDate>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ConsumptionCommand {
    /// Append one consumption record
    Add {
        /// Food name (e.g. Apple)
        food: String,
        /// Quantity consumed in kilograms
        #[arg(value_parser = parse_quantity, allow_negative_numbers = true)]
        quantity: f64,
        /// Consumption date (YYYY-MM-DD); defaults to today
        #[arg(long, value_parser = parse_iso_date)]
        date: Option<IsoDate>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}

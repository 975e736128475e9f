use chrono::NaiveDate;
use foodtrack_client::commands;
use foodtrack_client::commands::forecast::ForecastRunOptions;
use foodtrack_client::commands::totals::TotalsRunOptions;
use foodtrack_client::forecast::date::format_iso_date;
use foodtrack_client::{ClientResult, SuccessEnvelope};
use tracing::debug;

use crate::cli::{Cli, Commands, ConsumptionCommand, IsoDate, PurchaseCommand};

/// Runs the parsed command. `today` fills in every omitted date so the
/// client never reads the clock itself.
pub fn dispatch(cli: &Cli, today: NaiveDate) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Forecast {
            as_of,
            expiry_boost,
            exclude_expired,
            normalize_keys,
            ..
        } => {
            let as_of = date_or_today(as_of.as_ref(), today);
            debug!(%as_of, ?expiry_boost, exclude_expired, normalize_keys, "running forecast");
            commands::forecast::run_with_options(ForecastRunOptions {
                as_of,
                expiry_boost_days: *expiry_boost,
                exclude_expired: *exclude_expired,
                normalize_keys: *normalize_keys,
                home_override: None,
            })
        }
        Commands::Purchase { command } => match command {
            PurchaseCommand::Add {
                food,
                quantity,
                date,
                expiry,
                ..
            } => commands::record::add_purchase(
                food,
                *quantity,
                &date_or_today(date.as_ref(), today),
                expiry.as_ref().map(IsoDate::as_str),
            ),
        },
        Commands::Consumption { command } => match command {
            ConsumptionCommand::Add {
                food,
                quantity,
                date,
                ..
            } => commands::record::add_consumption(
                food,
                *quantity,
                &date_or_today(date.as_ref(), today),
            ),
        },
        Commands::History { .. } => commands::history::list(),
        Commands::Totals { normalize_keys, .. } => {
            commands::totals::run_with_options(TotalsRunOptions {
                normalize_keys: *normalize_keys,
                home_override: None,
            })
        }
    }
}

fn date_or_today(date: Option<&IsoDate>, today: NaiveDate) -> String {
    match date {
        Some(value) => value.as_str().to_string(),
        None => format_iso_date(&today),
    }
}

use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{load_paths, round_to, store_location};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{TotalsData, TotalsRow};
use crate::forecast::policy::KeyNormalization;
use crate::forecast::totals::positive_balances;
use crate::history::store::load_history;

#[derive(Debug, Default)]
pub struct TotalsRunOptions<'a> {
    pub normalize_keys: bool,
    pub home_override: Option<&'a Path>,
}

pub fn run_with_options(options: TotalsRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let paths = load_paths(options.home_override)?;
    let history = load_history(&paths)?;
    let key_normalization = if options.normalize_keys {
        KeyNormalization::TrimCaseFold
    } else {
        KeyNormalization::Exact
    };

    let rows = positive_balances(&history.purchases, &history.consumption, key_normalization)
        .into_iter()
        .map(|balance| TotalsRow {
            food: balance.food,
            purchased_kg: round_to(balance.purchased_kg, 2),
            consumed_kg: round_to(balance.consumed_kg, 2),
            balance_kg: round_to(balance.balance_kg, 2),
        })
        .collect::<Vec<TotalsRow>>();

    success(
        "totals",
        TotalsData {
            rows,
            store: store_location(&paths),
        },
    )
}

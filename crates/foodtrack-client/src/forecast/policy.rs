/// Deterministic surplus-forecast policy identifier.
///
/// Emitted with every forecast so model changes stay auditable when results
/// are compared across runs.
pub const FORECAST_POLICY_VERSION: &str = "surplus/v1";

/// Series with at least this many points get a least-squares fit; shorter
/// series use the summed-quantity fallback.
pub const MIN_FIT_POINTS: usize = 2;

/// Horizon used when the expiry boost is requested without an explicit value.
pub const DEFAULT_EXPIRY_BOOST_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyNormalization {
    /// Food names join exactly as written.
    #[default]
    Exact,
    /// Trim surrounding whitespace and lowercase before joining.
    TrimCaseFold,
}

impl KeyNormalization {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::TrimCaseFold => "trim_case_fold",
        }
    }

    pub fn key_for(self, food: &str) -> String {
        match self {
            Self::Exact => food.to_string(),
            Self::TrimCaseFold => food.trim().to_lowercase(),
        }
    }

    /// How `food` is shown when it is the first spelling seen for its key.
    pub fn label_for(self, food: &str) -> String {
        match self {
            Self::Exact => food.to_string(),
            Self::TrimCaseFold => food.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ForecastOptions {
    /// When set, stock expiring within this many days (and not yet expired)
    /// is added to the trend surplus. Off by default.
    pub expiry_boost_days: Option<i64>,
    /// Drop purchase records whose expiry is already in the past.
    pub exclude_expired: bool,
    pub key_normalization: KeyNormalization,
}

impl ForecastOptions {
    pub fn with_default_expiry_boost(mut self) -> Self {
        self.expiry_boost_days = Some(DEFAULT_EXPIRY_BOOST_DAYS);
        self
    }

    /// Whether a purchase `days_to_expiry` away counts toward the boost.
    pub fn counts_as_soon_expiring(self, days_to_expiry: Option<i64>) -> bool {
        match (self.expiry_boost_days, days_to_expiry) {
            (Some(horizon), Some(days)) => (0..=horizon).contains(&days),
            _ => false,
        }
    }
}

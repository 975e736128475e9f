use crate::forecast::policy::MIN_FIT_POINTS;
use crate::forecast::types::{Estimate, TrendMethod};

/// `quantity = intercept + slope * days_ago`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(self, days_ago: f64) -> f64 {
        self.intercept + self.slope * days_ago
    }
}

/// Ordinary least squares over `(days_ago, quantity)` pairs.
///
/// Returns `None` for an empty series. When every point shares one
/// `days_ago` the slope is zero and the line passes through the mean.
pub fn fit_least_squares(points: &[(f64, f64)]) -> Option<LinearFit> {
    if points.is_empty() {
        return None;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (x, y) in points {
        let dx = x - mean_x;
        sxx += dx * dx;
        sxy += dx * (y - mean_y);
    }

    if sxx <= f64::EPSILON {
        return Some(LinearFit {
            slope: 0.0,
            intercept: mean_y,
        });
    }

    let slope = sxy / sxx;
    Some(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// Today's rate for one series, floored at zero.
pub fn estimate_today(points: &[(f64, f64)]) -> Estimate {
    if points.len() >= MIN_FIT_POINTS
        && let Some(fit) = fit_least_squares(points)
    {
        return Estimate {
            value: floor_at_zero(fit.predict(0.0)),
            method: TrendMethod::Fit,
        };
    }

    let total = points.iter().map(|(_, quantity)| quantity).sum::<f64>();
    Estimate {
        value: floor_at_zero(total),
        method: TrendMethod::Fallback,
    }
}

/// Clamps negatives, NaN and `-0.0` to `0.0`.
pub fn floor_at_zero(value: f64) -> f64 {
    if value > 0.0 { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::{estimate_today, fit_least_squares, floor_at_zero};
    use crate::forecast::types::TrendMethod;

    #[test]
    fn perfect_line_extrapolates_exactly() {
        let estimate = estimate_today(&[(10.0, 5.0), (0.0, 15.0)]);
        assert_eq!(estimate.method, TrendMethod::Fit);
        assert!((estimate.value - 15.0).abs() < 1e-9);
    }

    #[test]
    fn negative_extrapolation_is_floored() {
        // Quantities climb with age, so the line hits zero before today.
        let estimate = estimate_today(&[(10.0, 20.0), (8.0, 10.0), (6.0, 1.0)]);
        assert_eq!(estimate.method, TrendMethod::Fit);
        assert_eq!(estimate.value, 0.0);
    }

    #[test]
    fn single_point_uses_sum_fallback() {
        let estimate = estimate_today(&[(4.0, 7.5)]);
        assert_eq!(estimate.method, TrendMethod::Fallback);
        assert_eq!(estimate.value, 7.5);
    }

    #[test]
    fn empty_series_falls_back_to_zero() {
        let estimate = estimate_today(&[]);
        assert_eq!(estimate.method, TrendMethod::Fallback);
        assert_eq!(estimate.value, 0.0);
    }

    #[test]
    fn repeated_days_are_weighted_not_deduplicated() {
        let fit = fit_least_squares(&[(2.0, 4.0), (2.0, 4.0), (0.0, 10.0)]);
        assert!(fit.is_some());
        if let Some(line) = fit {
            // mean_x = 4/3, mean_y = 6; sxx = 8/3, sxy = -8 -> slope -3
            assert!((line.slope + 3.0).abs() < 1e-9);
            assert!((line.intercept - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn same_day_points_predict_their_mean() {
        let estimate = estimate_today(&[(3.0, 2.0), (3.0, 6.0)]);
        assert_eq!(estimate.method, TrendMethod::Fit);
        assert!((estimate.value - 4.0).abs() < 1e-9);
    }

    #[test]
    fn floor_never_yields_negative_zero() {
        assert_eq!(floor_at_zero(-0.0).to_bits(), 0.0_f64.to_bits());
        assert_eq!(floor_at_zero(f64::NAN), 0.0);
        assert_eq!(floor_at_zero(-2.5), 0.0);
        assert_eq!(floor_at_zero(1.25), 1.25);
    }
}

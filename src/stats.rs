use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::ComputationError;

/// Standard deviations below this are treated as no spread at all.
const STDEV_EPSILON: f64 = 1e-9;

/// Mean and sample standard deviation of one column across the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub count: usize,
    pub mean: f64,
    pub stdev: f64,
}

/// Uses the n - 1 denominator, so a single value has no defined spread.
pub fn population_stats(values: &[f64]) -> Result<PopulationStats, ComputationError> {
    let count = values.len();
    if count < 2 {
        return Err(ComputationError::InsufficientPopulation { count });
    }
    let n = count as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let stdev = var.sqrt();
    if !stdev.is_finite() || stdev < STDEV_EPSILON {
        return Err(ComputationError::ZeroSpread { count, stdev });
    }
    Ok(PopulationStats { count, mean, stdev })
}

pub fn z_score(value: f64, stats: &PopulationStats) -> f64 {
    (value - stats.mean) / stats.stdev
}

/// Standard normal for the significance tests.
pub fn standard_normal() -> Result<Normal, ComputationError> {
    Normal::new(0.0, 1.0).map_err(|e| ComputationError::Distribution(e.to_string()))
}

/// Two-tailed p-value of `z` under the standard normal.
pub fn two_tailed_p_value(normal: &Normal, z: f64) -> f64 {
    (2.0 * (1.0 - normal.cdf(z.abs()))).clamp(0.0, 1.0)
}

/// Round half away from zero to `dp` decimal places.
pub fn round_dp(v: f64, dp: i32) -> f64 {
    let scale = 10f64.powi(dp);
    (v * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_stdev_matches_hand_calculation() {
        let s = population_stats(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(s.count, 8);
        assert!((s.mean - 5.0).abs() < 1e-12);
        // Sum of squares 32 over 7.
        assert!((s.stdev - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn single_value_has_no_population() {
        let err = population_stats(&[3.0]).unwrap_err();
        assert_eq!(err, ComputationError::InsufficientPopulation { count: 1 });
    }

    #[test]
    fn identical_values_have_no_spread() {
        let err = population_stats(&[1.5, 1.5, 1.5]).unwrap_err();
        assert!(matches!(err, ComputationError::ZeroSpread { count: 3, .. }));
    }

    #[test]
    fn p_values_follow_the_normal_table() {
        let n = standard_normal().unwrap();
        assert!((two_tailed_p_value(&n, 0.0) - 1.0).abs() < 1e-12);
        assert!((two_tailed_p_value(&n, 1.959964) - 0.05).abs() < 1e-5);
        assert!((two_tailed_p_value(&n, -1.959964) - 0.05).abs() < 1e-5);
        assert!(two_tailed_p_value(&n, 3.5) < 0.001);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_dp(1.005_000_1, 2), 1.01);
        assert_eq!(round_dp(-2.5, 0), -3.0);
        assert_eq!(round_dp(0.33333, 3), 0.333);
    }
}

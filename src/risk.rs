use crate::records::{PerformanceStatus, RiskCategory};
use crate::stats::round_dp;

/// Points above or below xPTS beyond which a team counts as over/underperforming.
pub const PERFORMANCE_THRESHOLD: f64 = 3.0;

pub const CRITICAL_SCORE: u8 = 90;
pub const HIGH_SCORE: u8 = 70;
pub const MODERATE_SCORE: u8 = 40;

/// Regression risk on a 0..=100 scale, piecewise linear in `variance`.
///
/// Each band's upper bound is inclusive (`3 < v <= 5` and so on), so an exact
/// breakpoint always lands in the lower band.
pub fn risk_score(variance: f64) -> u8 {
    let v = variance;
    let score = if v > 5.0 {
        (90.0 + (v - 5.0) * 2.0).min(100.0)
    } else if v > 3.0 {
        70.0 + ((v - 3.0) / 2.0) * 19.0
    } else if v > 1.0 {
        40.0 + ((v - 1.0) / 2.0) * 29.0
    } else if v > 0.0 {
        20.0 + v * 19.0
    } else if v > -3.0 {
        10.0 + ((v + 3.0) / 3.0) * 9.0
    } else {
        (10.0 + v).max(0.0)
    };
    score.round().clamp(0.0, 100.0) as u8
}

pub fn risk_category(score: u8) -> RiskCategory {
    if score >= CRITICAL_SCORE {
        RiskCategory::Critical
    } else if score >= HIGH_SCORE {
        RiskCategory::High
    } else if score >= MODERATE_SCORE {
        RiskCategory::Moderate
    } else {
        RiskCategory::Low
    }
}

/// Heuristic chance that the gap to xPTS closes. The constants are not fitted to
/// historical outcomes.
///
/// Teams at or below xPTS get a flat 0.1 base. Low `|z|` discounts the base toward
/// 70% of itself, never below.
pub fn regression_probability(variance: f64, z_score: f64) -> f64 {
    let base = if variance <= 0.0 {
        0.1
    } else {
        (0.3 + variance / 10.0).min(0.9)
    };
    let significance = (z_score.abs() / 2.0).min(1.0);
    round_dp(base * (0.7 + 0.3 * significance), 3)
}

pub fn performance_status(variance: f64) -> PerformanceStatus {
    if variance > PERFORMANCE_THRESHOLD {
        PerformanceStatus::Overperforming
    } else if variance < -PERFORMANCE_THRESHOLD {
        PerformanceStatus::Underperforming
    } else {
        PerformanceStatus::AsExpected
    }
}

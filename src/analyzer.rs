use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use crate::error::ComputationError;
use crate::records::{AnalysisRow, ExpectedPerformanceRecord, RiskAssessment, RiskCategory};
use crate::risk::{
    self, CRITICAL_SCORE, HIGH_SCORE, PERFORMANCE_THRESHOLD, performance_status, risk_category,
};
use crate::stats::{PopulationStats, population_stats, standard_normal, two_tailed_p_value, z_score};

/// Two-tailed p-values below this flag the variance as significant.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Named subsets of the analysed table. Rows are copies of the table rows.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegressionCandidates {
    /// Variance above +3, largest first.
    pub overperforming: Vec<AnalysisRow>,
    /// Variance below -3, most negative first.
    pub underperforming: Vec<AnalysisRow>,
    pub critical_risk: Vec<AnalysisRow>,
    pub high_risk: Vec<AnalysisRow>,
    pub significant_variance: Vec<AnalysisRow>,
}

impl RegressionCandidates {
    pub fn sets(&self) -> [(&'static str, &[AnalysisRow]); 5] {
        [
            ("overperforming", &self.overperforming),
            ("underperforming", &self.underperforming),
            ("critical_risk", &self.critical_risk),
            ("high_risk", &self.high_risk),
            ("significant_variance", &self.significant_variance),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// One row per team, ordered by actual league position.
    pub rows: Vec<AnalysisRow>,
    pub candidates: RegressionCandidates,
    /// Mean and spread of `Variance` across the table.
    pub population: PopulationStats,
}

/// Score every record against the variance distribution of the whole table.
///
/// The z-test is self-referential: the reference distribution is this league's own
/// variances, not a fixed one.
pub fn assess_risk(
    records: &[ExpectedPerformanceRecord],
) -> Result<(Vec<RiskAssessment>, PopulationStats), ComputationError> {
    let variances: Vec<f64> = records.iter().map(|r| r.variance).collect();
    let population = population_stats(&variances)?;
    let normal = standard_normal()?;

    let assessments = records
        .iter()
        .map(|r| {
            let z = z_score(r.variance, &population);
            let p = two_tailed_p_value(&normal, z);
            let score = risk::risk_score(r.variance);
            RiskAssessment {
                z_score: z,
                p_value: p,
                significant: p < SIGNIFICANCE_LEVEL,
                risk_score: score,
                risk_category: risk_category(score),
                regression_probability: risk::regression_probability(r.variance, z),
                performance_status: performance_status(r.variance),
            }
        })
        .collect();

    info!(
        mean = population.mean,
        stdev = population.stdev,
        "calculated variance z-scores"
    );
    Ok((assessments, population))
}

pub fn analyze(records: &[ExpectedPerformanceRecord]) -> Result<AnalysisReport, ComputationError> {
    let (assessments, population) = assess_risk(records)?;

    let mut rows: Vec<AnalysisRow> = records
        .iter()
        .zip(&assessments)
        .map(|(r, a)| AnalysisRow::new(r, a))
        .collect();
    rows.sort_by_key(|r| r.position_actual);

    let candidates = identify_regression_candidates(&rows);
    info!(
        overperforming = candidates.overperforming.len(),
        underperforming = candidates.underperforming.len(),
        critical = candidates.critical_risk.len(),
        significant = candidates.significant_variance.len(),
        "identified regression candidates"
    );

    Ok(AnalysisReport {
        rows,
        candidates,
        population,
    })
}

pub fn identify_regression_candidates(rows: &[AnalysisRow]) -> RegressionCandidates {
    let mut overperforming = filtered(rows, |r| r.variance > PERFORMANCE_THRESHOLD);
    overperforming.sort_by(|a, b| b.variance.total_cmp(&a.variance));

    let mut underperforming = filtered(rows, |r| r.variance < -PERFORMANCE_THRESHOLD);
    underperforming.sort_by(|a, b| a.variance.total_cmp(&b.variance));

    let mut critical_risk = filtered(rows, |r| r.risk_score >= CRITICAL_SCORE);
    critical_risk.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));

    let mut high_risk = filtered(rows, |r| {
        r.risk_score >= HIGH_SCORE && r.risk_score < CRITICAL_SCORE
    });
    high_risk.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));

    let mut significant_variance = filtered(rows, |r| r.significant);
    significant_variance.sort_by(|a, b| b.variance.total_cmp(&a.variance));

    RegressionCandidates {
        overperforming,
        underperforming,
        critical_risk,
        high_risk,
        significant_variance,
    }
}

fn filtered(rows: &[AnalysisRow], keep: impl Fn(&AnalysisRow) -> bool) -> Vec<AnalysisRow> {
    rows.iter().filter(|r| keep(r)).cloned().collect()
}

/// Team count per risk category; every category is present, possibly with zero.
pub fn category_counts(rows: &[AnalysisRow]) -> BTreeMap<RiskCategory, usize> {
    let mut out: BTreeMap<RiskCategory, usize> =
        RiskCategory::ALL.iter().map(|c| (*c, 0)).collect();
    for r in rows {
        *out.entry(r.risk_category).or_insert(0) += 1;
    }
    out
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Input columns, in the order the acquisition side writes them.
pub const INPUT_COLUMNS: [&str; 8] = [
    "Team",
    "Matches",
    "Actual_Points",
    "Goals_For",
    "Goals_Against",
    "xG_For",
    "xG_Against",
    "Position",
];

/// Output columns. Reporting code keys off these names, so keep them stable.
pub const OUTPUT_COLUMNS: [&str; 18] = [
    "Team",
    "Matches",
    "Actual_Points",
    "Goals_For",
    "Goals_Against",
    "xG_For",
    "xG_Against",
    "xPTS",
    "Variance",
    "Position_Actual",
    "Position_Expected",
    "Z_Score",
    "P_Value",
    "Significant",
    "Risk_Score",
    "Risk_Category",
    "Regression_Probability",
    "Performance_Status",
];

/// One team's season aggregates. xG values are season totals, not per-match rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSeasonRecord {
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Matches")]
    pub matches: u32,
    #[serde(rename = "Actual_Points")]
    pub actual_points: u32,
    #[serde(rename = "Goals_For")]
    pub goals_for: u32,
    #[serde(rename = "Goals_Against")]
    pub goals_against: u32,
    #[serde(rename = "xG_For")]
    pub xg_for: f64,
    #[serde(rename = "xG_Against")]
    pub xg_against: f64,
    #[serde(rename = "Position")]
    pub position: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedPerformanceRecord {
    pub season: TeamSeasonRecord,
    pub xpts: f64,
    /// `actual_points - xpts`; positive means the team is ahead of its chances.
    pub variance: f64,
    pub position_expected: u32,
}

impl ExpectedPerformanceRecord {
    pub fn position_actual(&self) -> u32 {
        self.season.position
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 4] = [
        RiskCategory::Critical,
        RiskCategory::High,
        RiskCategory::Moderate,
        RiskCategory::Low,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RiskCategory::Critical => "Critical",
            RiskCategory::High => "High",
            RiskCategory::Moderate => "Moderate",
            RiskCategory::Low => "Low",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceStatus {
    Overperforming,
    Underperforming,
    #[serde(rename = "As Expected")]
    AsExpected,
}

impl PerformanceStatus {
    pub fn label(self) -> &'static str {
        match self {
            PerformanceStatus::Overperforming => "Overperforming",
            PerformanceStatus::Underperforming => "Underperforming",
            PerformanceStatus::AsExpected => "As Expected",
        }
    }
}

impl fmt::Display for PerformanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskAssessment {
    pub z_score: f64,
    pub p_value: f64,
    pub significant: bool,
    pub risk_score: u8,
    pub risk_category: RiskCategory,
    pub regression_probability: f64,
    pub performance_status: PerformanceStatus,
}

/// Flattened output row: expected performance plus its risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRow {
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Matches")]
    pub matches: u32,
    #[serde(rename = "Actual_Points")]
    pub actual_points: u32,
    #[serde(rename = "Goals_For")]
    pub goals_for: u32,
    #[serde(rename = "Goals_Against")]
    pub goals_against: u32,
    #[serde(rename = "xG_For")]
    pub xg_for: f64,
    #[serde(rename = "xG_Against")]
    pub xg_against: f64,
    #[serde(rename = "xPTS")]
    pub xpts: f64,
    #[serde(rename = "Variance")]
    pub variance: f64,
    #[serde(rename = "Position_Actual")]
    pub position_actual: u32,
    #[serde(rename = "Position_Expected")]
    pub position_expected: u32,
    #[serde(rename = "Z_Score")]
    pub z_score: f64,
    #[serde(rename = "P_Value")]
    pub p_value: f64,
    #[serde(rename = "Significant")]
    pub significant: bool,
    #[serde(rename = "Risk_Score")]
    pub risk_score: u8,
    #[serde(rename = "Risk_Category")]
    pub risk_category: RiskCategory,
    #[serde(rename = "Regression_Probability")]
    pub regression_probability: f64,
    #[serde(rename = "Performance_Status")]
    pub performance_status: PerformanceStatus,
}

impl AnalysisRow {
    pub fn new(expected: &ExpectedPerformanceRecord, risk: &RiskAssessment) -> Self {
        let s = &expected.season;
        Self {
            team: s.team.clone(),
            matches: s.matches,
            actual_points: s.actual_points,
            goals_for: s.goals_for,
            goals_against: s.goals_against,
            xg_for: s.xg_for,
            xg_against: s.xg_against,
            xpts: expected.xpts,
            variance: expected.variance,
            position_actual: expected.position_actual(),
            position_expected: expected.position_expected,
            z_score: risk.z_score,
            p_value: risk.p_value,
            significant: risk.significant,
            risk_score: risk.risk_score,
            risk_category: risk.risk_category,
            regression_probability: risk.regression_probability,
            performance_status: risk.performance_status,
        }
    }
}

use std::fmt::Write as _;

use crate::analyzer::AnalysisReport;
use crate::records::AnalysisRow;

const TOP_N: usize = 5;
const RULE: &str = "----------------------------------------------------------------------";
const BANNER: &str = "======================================================================";

/// Console-facing digest of one analysis run.
#[derive(Debug, Clone)]
pub struct LeagueSummary {
    pub teams: usize,
    pub mean_variance: f64,
    pub stdev_variance: f64,
    pub top_over: Vec<AnalysisRow>,
    pub top_under: Vec<AnalysisRow>,
    pub critical: Vec<AnalysisRow>,
    pub high_risk_count: usize,
    pub underperforming_count: usize,
    pub significant_count: usize,
    pub recommendations: Vec<String>,
}

impl LeagueSummary {
    pub fn from_report(report: &AnalysisReport) -> Self {
        let mut by_variance = report.rows.clone();
        by_variance.sort_by(|a, b| b.variance.total_cmp(&a.variance));
        let top_over: Vec<AnalysisRow> = by_variance.iter().take(TOP_N).cloned().collect();
        by_variance.sort_by(|a, b| a.variance.total_cmp(&b.variance));
        let top_under: Vec<AnalysisRow> = by_variance.iter().take(TOP_N).cloned().collect();

        let c = &report.candidates;
        let high_risk_count = c.high_risk.len() + c.critical_risk.len();
        let underperforming_count = c.underperforming.len();

        Self {
            teams: report.rows.len(),
            mean_variance: report.population.mean,
            stdev_variance: report.population.stdev,
            top_over,
            top_under,
            critical: c.critical_risk.clone(),
            high_risk_count,
            underperforming_count,
            significant_count: report.rows.iter().filter(|r| r.significant).count(),
            recommendations: recommendations(high_risk_count, underperforming_count),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{BANNER}");
        let _ = writeln!(out, "LEAGUE PERFORMANCE ANALYSIS - SUMMARY");
        let _ = writeln!(out, "{BANNER}");
        let _ = writeln!(out);
        let _ = writeln!(out, "Total Teams Analyzed: {}", self.teams);
        let _ = writeln!(out, "Average Variance: {:.2} points", self.mean_variance);
        let _ = writeln!(out, "Variance Std Dev: {:.2} points", self.stdev_variance);

        let _ = writeln!(out, "\n{RULE}");
        let _ = writeln!(out, "TOP {TOP_N} OVERPERFORMING TEAMS (Highest Regression Risk)");
        let _ = writeln!(out, "{RULE}");
        for (i, r) in self.top_over.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. {:20} | Actual: {:2} pts | xPTS: {:5.1} | Variance: {:+.1} | Risk: {} ({})",
                i + 1,
                r.team,
                r.actual_points,
                r.xpts,
                r.variance,
                r.risk_score,
                r.risk_category
            );
        }

        let _ = writeln!(out, "\n{RULE}");
        let _ = writeln!(out, "TOP {TOP_N} UNDERPERFORMING TEAMS (Potential to Improve)");
        let _ = writeln!(out, "{RULE}");
        for (i, r) in self.top_under.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. {:20} | Actual: {:2} pts | xPTS: {:5.1} | Variance: {:+.1}",
                i + 1,
                r.team,
                r.actual_points,
                r.xpts,
                r.variance
            );
        }

        if !self.critical.is_empty() {
            let _ = writeln!(out, "\n{RULE}");
            let _ = writeln!(out, "CRITICAL RISK TEAMS");
            let _ = writeln!(out, "{RULE}");
            for r in &self.critical {
                let _ = writeln!(
                    out,
                    "* {:20} | Regression Probability: {:.1}% | Risk Score: {}",
                    r.team,
                    r.regression_probability * 100.0,
                    r.risk_score
                );
            }
        }

        if self.significant_count > 0 {
            let _ = writeln!(
                out,
                "\n{} teams show statistically significant variance (p < 0.05)",
                self.significant_count
            );
        }

        let _ = writeln!(out, "\n{BANNER}");
        let _ = writeln!(out, "KEY RECOMMENDATIONS:");
        let _ = writeln!(out, "{BANNER}");
        for (i, rec) in self.recommendations.iter().enumerate() {
            let _ = writeln!(out, "\n{}. {rec}", i + 1);
        }
        out
    }
}

fn recommendations(high_risk_count: usize, underperforming_count: usize) -> Vec<String> {
    let mut out = Vec::new();
    if high_risk_count > 0 {
        out.push(format!(
            "MONITOR HIGH-RISK TEAMS: {high_risk_count} teams are overperforming their xG \
             metrics\n   \
             -> Avoid reactive transfers or managerial changes if results normalize\n   \
             -> Judge these sides on underlying xG rather than points alone"
        ));
    }
    if underperforming_count > 0 {
        out.push(format!(
            "UNDERPERFORMING TEAMS: {underperforming_count} teams are underperforming xG\n   \
             -> These teams may improve without major changes\n   \
             -> Review finishing efficiency and luck factors"
        ));
    }
    out.push(
        "STRATEGIC PLANNING:\n   \
         -> Use xPTS for season projections instead of the current table"
            .to_string(),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_planning_note_when_nothing_stands_out() {
        let recs = recommendations(0, 0);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].starts_with("STRATEGIC PLANNING"));
    }

    #[test]
    fn risk_and_underperformance_add_notes() {
        let recs = recommendations(2, 3);
        assert_eq!(recs.len(), 3);
        assert!(recs[0].contains("2 teams are overperforming"));
        assert!(recs[1].contains("3 teams are underperforming"));
    }
}

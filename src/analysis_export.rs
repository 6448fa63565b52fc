use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::analyzer::{AnalysisReport, category_counts};
use crate::dataset;
use crate::persist::StagedFiles;
use crate::records::{AnalysisRow, OUTPUT_COLUMNS};

pub struct ExportReport {
    pub rows: usize,
    pub candidate_rows: usize,
    pub summary_rows: usize,
}

/// Write the analysed table plus candidate sets and population figures to an xlsx workbook.
pub fn export_workbook(path: &Path, report: &AnalysisReport) -> Result<ExportReport> {
    let mut analysis_rows = vec![OUTPUT_COLUMNS.iter().map(|c| c.to_string()).collect::<Vec<_>>()];
    analysis_rows.extend(report.rows.iter().map(analysis_row));

    let mut candidate_rows = vec![vec![
        "Set".to_string(),
        "Team".to_string(),
        "Variance".to_string(),
        "Risk Score".to_string(),
        "Risk Category".to_string(),
        "Regression Probability".to_string(),
    ]];
    for (name, rows) in report.candidates.sets() {
        for r in rows {
            candidate_rows.push(vec![
                name.to_string(),
                r.team.clone(),
                format!("{:.2}", r.variance),
                r.risk_score.to_string(),
                r.risk_category.to_string(),
                format!("{:.3}", r.regression_probability),
            ]);
        }
    }

    let mut summary_rows = vec![
        vec!["Metric".to_string(), "Value".to_string()],
        vec![
            "Generated".to_string(),
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ],
        vec!["Teams".to_string(), report.rows.len().to_string()],
        vec![
            "Mean Variance".to_string(),
            format!("{:.2}", report.population.mean),
        ],
        vec![
            "Variance Std Dev".to_string(),
            format!("{:.2}", report.population.stdev),
        ],
    ];
    for (category, count) in category_counts(&report.rows).iter().rev() {
        summary_rows.push(vec![format!("{category} risk"), count.to_string()]);
    }
    summary_rows.push(vec![
        "Significant (p < 0.05)".to_string(),
        report.candidates.significant_variance.len().to_string(),
    ]);

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("RiskAnalysis")?;
        write_rows(sheet, &analysis_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Candidates")?;
        write_rows(sheet, &candidate_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Summary")?;
        write_rows(sheet, &summary_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        rows: analysis_rows.len().saturating_sub(1),
        candidate_rows: candidate_rows.len().saturating_sub(1),
        summary_rows: summary_rows.len().saturating_sub(1),
    })
}

/// Pretty-printed JSON of the full report (rows, candidate sets, population).
pub fn write_json(path: &Path, report: &AnalysisReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize analysis report")?;
    let mut staged = StagedFiles::new();
    let tmp = staged.stage(path)?;
    fs::write(&tmp, json).context("write analysis report")?;
    staged.commit()
}

/// Destinations for one run. The CSV table is always written.
#[derive(Debug, Clone, Copy)]
pub struct OutputTargets<'a> {
    pub csv: &'a Path,
    pub json: Option<&'a Path>,
    pub xlsx: Option<&'a Path>,
}

/// Write every requested artifact, or none of them.
///
/// Everything is rendered to temp files first; destinations are only touched once all
/// of them have been written.
pub fn write_outputs(
    targets: OutputTargets<'_>,
    report: &AnalysisReport,
) -> Result<Option<ExportReport>> {
    let mut staged = StagedFiles::new();
    let csv_tmp = staged.stage(targets.csv)?;
    let json_tmp = targets.json.map(|p| staged.stage(p)).transpose()?;
    let xlsx_tmp = targets.xlsx.map(|p| staged.stage(p)).transpose()?;

    let file = File::create(&csv_tmp).with_context(|| format!("create {}", csv_tmp.display()))?;
    dataset::write_analysis(file, &report.rows)?;
    if let Some(tmp) = &json_tmp {
        let json = serde_json::to_string_pretty(report).context("serialize analysis report")?;
        fs::write(tmp, json).context("write analysis report")?;
    }
    let workbook = match &xlsx_tmp {
        Some(tmp) => Some(export_workbook(tmp, report)?),
        None => None,
    };

    staged.commit()?;
    Ok(workbook)
}

fn analysis_row(r: &AnalysisRow) -> Vec<String> {
    vec![
        r.team.clone(),
        r.matches.to_string(),
        r.actual_points.to_string(),
        r.goals_for.to_string(),
        r.goals_against.to_string(),
        r.xg_for.to_string(),
        r.xg_against.to_string(),
        format!("{:.2}", r.xpts),
        format!("{:.2}", r.variance),
        r.position_actual.to_string(),
        r.position_expected.to_string(),
        format!("{:.4}", r.z_score),
        format!("{:.4}", r.p_value),
        r.significant.to_string(),
        r.risk_score.to_string(),
        r.risk_category.to_string(),
        format!("{:.3}", r.regression_probability),
        r.performance_status.to_string(),
    ]
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}

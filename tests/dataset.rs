use std::fs;
use std::path::PathBuf;

use xpts_radar::AnalysisReport;
use xpts_radar::analysis_export::{self, OutputTargets};
use xpts_radar::dataset::{load_team_records, save_analysis};
use xpts_radar::persist::staging_path;
use xpts_radar::pipeline;
use xpts_radar::records::{AnalysisRow, OUTPUT_COLUMNS};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn fixture_report() -> AnalysisReport {
    pipeline::run(&load_team_records(&fixture_path("league_table.csv")).unwrap()).unwrap()
}

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("xpts_radar_{tag}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn saved_table_reads_back_row_for_row() {
    let records = load_team_records(&fixture_path("league_table.csv")).unwrap();
    let report = pipeline::run(&records).unwrap();

    let dir = scratch_dir("csv");
    let out = dir.join("nested").join("risk_analysis.csv");
    save_analysis(&out, &report.rows).unwrap();
    assert!(!out.with_extension("csv.tmp").exists());

    let mut reader = csv::Reader::from_path(&out).unwrap();
    let header: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(header, OUTPUT_COLUMNS);

    let back: Vec<AnalysisRow> = reader.deserialize().collect::<Result<_, _>>().unwrap();
    assert_eq!(back.len(), report.rows.len());
    for (a, b) in back.iter().zip(&report.rows) {
        assert_eq!(a.team, b.team);
        assert_eq!(a.position_actual, b.position_actual);
        assert_eq!(a.position_expected, b.position_expected);
        assert_eq!(a.risk_category, b.risk_category);
        assert_eq!(a.performance_status, b.performance_status);
        assert!((a.xpts - b.xpts).abs() < 1e-9);
        assert!((a.variance - b.variance).abs() < 1e-9);
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn json_report_carries_rows_and_candidates() {
    let records = load_team_records(&fixture_path("league_table.csv")).unwrap();
    let report = pipeline::run(&records).unwrap();

    let dir = scratch_dir("json");
    let out = dir.join("report.json");
    analysis_export::write_json(&out, &report).unwrap();

    let text = fs::read_to_string(&out).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["rows"].as_array().unwrap().len(), 20);
    assert_eq!(value["candidates"]["high_risk"][0]["Team"], "Redcliffe Town");
    assert_eq!(value["population"]["count"], 20);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_input_reports_the_path() {
    let err = load_team_records(&fixture_path("no_such_table.csv")).unwrap_err();
    assert!(format!("{err:#}").contains("no_such_table.csv"));
}

#[test]
fn failed_json_target_leaves_no_table_behind() {
    let report = fixture_report();

    let dir = scratch_dir("bad_json");
    fs::create_dir_all(&dir).unwrap();
    // A regular file where the JSON report's directory should be.
    let blocker = dir.join("blocker");
    fs::write(&blocker, "").unwrap();
    let csv = dir.join("out").join("risk_analysis.csv");
    let json = blocker.join("report.json");

    let targets = OutputTargets {
        csv: &csv,
        json: Some(&json),
        xlsx: None,
    };
    assert!(analysis_export::write_outputs(targets, &report).is_err());
    assert!(!csv.exists());
    assert!(!staging_path(&csv).exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn failed_workbook_removes_already_written_temp_files() {
    let report = fixture_report();

    let dir = scratch_dir("bad_xlsx");
    let csv = dir.join("risk_analysis.csv");
    let json = dir.join("report.json");
    let xlsx = dir.join("report.xlsx");
    // The workbook cannot be saved over a directory.
    fs::create_dir_all(staging_path(&xlsx)).unwrap();

    let targets = OutputTargets {
        csv: &csv,
        json: Some(&json),
        xlsx: Some(&xlsx),
    };
    assert!(analysis_export::write_outputs(targets, &report).is_err());
    for path in [&csv, &json, &xlsx] {
        assert!(!path.exists(), "{} was written", path.display());
    }
    assert!(!staging_path(&csv).exists());
    assert!(!staging_path(&json).exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn successful_run_writes_every_target() {
    let report = fixture_report();

    let dir = scratch_dir("all_outputs");
    let csv = dir.join("risk_analysis.csv");
    let json = dir.join("report.json");
    let targets = OutputTargets {
        csv: &csv,
        json: Some(&json),
        xlsx: None,
    };
    let workbook = analysis_export::write_outputs(targets, &report).unwrap();
    assert!(workbook.is_none());
    assert!(csv.exists() && json.exists());
    assert!(!staging_path(&csv).exists());
    assert!(!staging_path(&json).exists());

    let _ = fs::remove_dir_all(&dir);
}

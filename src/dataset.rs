use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::error::ValidationError;
use crate::persist::StagedFiles;
use crate::records::{AnalysisRow, INPUT_COLUMNS, TeamSeasonRecord};

/// Parse a team-season table. The header must name exactly the input columns, in any
/// order; every cell must parse into its column type.
pub fn read_team_records<R: Read>(
    rdr: R,
) -> std::result::Result<Vec<TeamSeasonRecord>, ValidationError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let headers = reader
        .headers()
        .map_err(|e| ValidationError::MalformedRow {
            row: 0,
            message: e.to_string(),
        })?
        .clone();

    for column in INPUT_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ValidationError::MissingColumn { column });
        }
    }
    if let Some(extra) = headers.iter().find(|h| !INPUT_COLUMNS.contains(h)) {
        return Err(ValidationError::UnexpectedColumn {
            column: extra.to_string(),
        });
    }

    let mut out = Vec::new();
    for (idx, result) in reader.deserialize::<TeamSeasonRecord>().enumerate() {
        let record = result.map_err(|e| ValidationError::MalformedRow {
            row: idx + 1,
            message: describe_csv_error(&headers, &e),
        })?;
        out.push(record);
    }
    Ok(out)
}

pub fn load_team_records(path: &Path) -> Result<Vec<TeamSeasonRecord>> {
    let file = File::open(path).with_context(|| format!("open input table {}", path.display()))?;
    let records = read_team_records(file)
        .with_context(|| format!("read input table {}", path.display()))?;
    info!(path = %path.display(), teams = records.len(), "loaded team records");
    Ok(records)
}

pub fn write_analysis<W: Write>(wtr: W, rows: &[AnalysisRow]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(wtr);
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("serialize row for {}", row.team))?;
    }
    writer.flush().context("flush analysis table")?;
    Ok(())
}

/// Write through a temp file and rename, so a failed write never leaves a half table.
pub fn save_analysis(path: &Path, rows: &[AnalysisRow]) -> Result<()> {
    let mut staged = StagedFiles::new();
    let tmp = staged.stage(path)?;
    let file = File::create(&tmp).with_context(|| format!("create {}", tmp.display()))?;
    write_analysis(file, rows)?;
    staged.commit()?;
    info!(path = %path.display(), rows = rows.len(), "saved risk analysis");
    Ok(())
}

fn describe_csv_error(headers: &csv::StringRecord, err: &csv::Error) -> String {
    match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => match err.field() {
            Some(field) => {
                let column = headers.get(field as usize).unwrap_or("?");
                format!("column {field} ({column}): {err}")
            }
            None => err.to_string(),
        },
        _ => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
Team,Matches,Actual_Points,Goals_For,Goals_Against,xG_For,xG_Against,Position
Arsenal,10,24,20,7,19.4,8.1,1
Chelsea, 10 ,17,18,12,20.2,11.9,2
";

    #[test]
    fn reads_a_well_formed_table() {
        let rows = read_team_records(TABLE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].team, "Arsenal");
        assert_eq!(rows[1].matches, 10);
        assert!((rows[1].xg_for - 20.2).abs() < 1e-12);
        assert_eq!(rows[1].position, 2);
    }

    #[test]
    fn missing_column_is_named() {
        let raw = "Team,Matches,Actual_Points,Goals_For,Goals_Against,xG_For,Position\n\
                   A,1,1,1,1,1.0,1\n";
        let err = read_team_records(raw.as_bytes()).unwrap_err();
        assert_eq!(err, ValidationError::MissingColumn { column: "xG_Against" });
    }

    #[test]
    fn unexpected_column_is_rejected() {
        let raw = format!("{},Form\n", INPUT_COLUMNS.join(","));
        let err = read_team_records(raw.as_bytes()).unwrap_err();
        assert_eq!(err, ValidationError::UnexpectedColumn { column: "Form".to_string() });
    }

    #[test]
    fn non_numeric_and_negative_cells_are_rejected() {
        let raw = format!("{TABLE}Everton,10,abc,9,14,10.0,14.2,3\n");
        let err = read_team_records(raw.as_bytes()).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedRow { row: 3, .. }));

        let raw = format!("{TABLE}Everton,10,-2,9,14,10.0,14.2,3\n");
        let err = read_team_records(raw.as_bytes()).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedRow { row: 3, .. }));

        let raw = format!("{TABLE}Everton,10,12,9,14,,14.2,3\n");
        assert!(read_team_records(raw.as_bytes()).is_err());
    }

    #[test]
    fn output_header_matches_the_column_contract() {
        let report = crate::pipeline::run(&read_team_records(TABLE.as_bytes()).unwrap()).unwrap();
        let mut buf = Vec::new();
        write_analysis(&mut buf, &report.rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, crate::records::OUTPUT_COLUMNS.join(","));
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("Arsenal,10,24,20,7,19.4,8.1,"));
    }
}

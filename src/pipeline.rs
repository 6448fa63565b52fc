use tracing::info;

use crate::analyzer::{self, AnalysisReport};
use crate::error::Result;
use crate::expected_points::compute_expected_performance;
use crate::records::TeamSeasonRecord;
use crate::validation::validate_records;

/// Validate, compute xPTS for every team, then score the whole table.
///
/// Either the full report comes back or an error does; there is no partial result.
pub fn run(records: &[TeamSeasonRecord]) -> Result<AnalysisReport> {
    validate_records(records)?;
    info!(teams = records.len(), "input validated");

    let expected = compute_expected_performance(records)?;
    let report = analyzer::analyze(&expected)?;
    Ok(report)
}

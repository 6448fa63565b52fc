use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::ComputationError;
use crate::records::{ExpectedPerformanceRecord, TeamSeasonRecord};
use crate::stats::round_dp;
use crate::win_prob::{Venue, calculate_xpts};

/// Season xPTS from season-total xG.
///
/// Only aggregates are available, so the team is treated as playing every match at its
/// average rate, half of them at home and half away. Schedule and opponent strength are
/// ignored; fixture-level data would sum per-match `calculate_xpts` instead.
pub fn season_xpts(record: &TeamSeasonRecord) -> Result<f64, ComputationError> {
    if record.matches == 0 {
        return Err(ComputationError::ZeroMatches {
            team: record.team.clone(),
        });
    }
    let matches = record.matches as f64;
    let avg_for = record.xg_for / matches;
    let avg_against = record.xg_against / matches;

    let home = calculate_xpts(avg_for, avg_against, Venue::Home);
    let away = calculate_xpts(avg_for, avg_against, Venue::Away);

    Ok(home * (matches / 2.0) + away * (matches / 2.0))
}

/// One expected-performance record per input row, in input order.
pub fn compute_expected_performance(
    records: &[TeamSeasonRecord],
) -> Result<Vec<ExpectedPerformanceRecord>, ComputationError> {
    let mut out = records
        .par_iter()
        .map(|r| -> Result<ExpectedPerformanceRecord, ComputationError> {
            let total = season_xpts(r)?;
            let variance = r.actual_points as f64 - total;
            debug!(
                team = %r.team,
                actual = r.actual_points,
                xpts = round_dp(total, 2),
                variance = round_dp(variance, 2),
                "expected points"
            );
            Ok(ExpectedPerformanceRecord {
                season: r.clone(),
                xpts: round_dp(total, 2),
                variance: round_dp(variance, 2),
                position_expected: 0,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    assign_expected_positions(&mut out);
    info!(teams = out.len(), "calculated xPTS");
    Ok(out)
}

/// Rank by xPTS, best first. Equal xPTS keep their input order.
fn assign_expected_positions(rows: &mut [ExpectedPerformanceRecord]) {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| rows[b].xpts.total_cmp(&rows[a].xpts));
    for (rank, idx) in order.into_iter().enumerate() {
        rows[idx].position_expected = rank as u32 + 1;
    }
}

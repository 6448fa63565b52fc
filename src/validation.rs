use std::collections::HashMap;

use crate::error::ValidationError;
use crate::records::TeamSeasonRecord;

pub const MIN_TEAMS: usize = 2;

/// Reject anything that does not fit the season-table schema before any maths runs.
///
/// Zero matches is left to the xPTS stage, which reports it as a computation error.
pub fn validate_records(records: &[TeamSeasonRecord]) -> Result<(), ValidationError> {
    if records.len() < MIN_TEAMS {
        return Err(ValidationError::TooFewTeams {
            count: records.len(),
        });
    }

    let mut seen_teams: HashMap<&str, usize> = HashMap::new();
    let mut seen_positions: HashMap<u32, &str> = HashMap::new();

    for (idx, r) in records.iter().enumerate() {
        let team = r.team.trim();
        if team.is_empty() {
            return Err(ValidationError::EmptyTeamName { row: idx + 1 });
        }
        if seen_teams.insert(team, idx).is_some() {
            return Err(ValidationError::DuplicateTeam {
                team: team.to_string(),
            });
        }

        validate_xg(team, "xG_For", r.xg_for)?;
        validate_xg(team, "xG_Against", r.xg_against)?;

        if r.position == 0 {
            return Err(ValidationError::InvalidPosition {
                team: team.to_string(),
            });
        }
        if let Some(first) = seen_positions.insert(r.position, team) {
            return Err(ValidationError::DuplicatePosition {
                position: r.position,
                first: first.to_string(),
                second: team.to_string(),
            });
        }
    }

    Ok(())
}

fn validate_xg(team: &str, field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        return Ok(());
    }
    Err(ValidationError::InvalidExpectedGoals {
        team: team.to_string(),
        field,
        value,
    })
}

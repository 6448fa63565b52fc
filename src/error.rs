use thiserror::Error;

/// Input that does not conform to the team-season table schema.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("need at least 2 teams to analyze, got {count}")]
    TooFewTeams { count: usize },

    #[error("row {row}: team name is empty")]
    EmptyTeamName { row: usize },

    #[error("duplicate team `{team}`")]
    DuplicateTeam { team: String },

    #[error("team `{team}`: league position must be >= 1")]
    InvalidPosition { team: String },

    #[error("league position {position} is used by both `{first}` and `{second}`")]
    DuplicatePosition {
        position: u32,
        first: String,
        second: String,
    },

    #[error("team `{team}`: {field} must be finite and non-negative, got {value}")]
    InvalidExpectedGoals {
        team: String,
        field: &'static str,
        value: f64,
    },

    #[error("missing required column `{column}`")]
    MissingColumn { column: &'static str },

    #[error("unexpected column `{column}`")]
    UnexpectedColumn { column: String },

    #[error("row {row}: {message}")]
    MalformedRow { row: usize, message: String },
}

/// Numeric failures that would otherwise surface as NaN or infinity.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ComputationError {
    #[error("team `{team}` has zero matches played")]
    ZeroMatches { team: String },

    #[error("z-score needs at least 2 values, got {count}")]
    InsufficientPopulation { count: usize },

    #[error("variance has no spread across {count} teams (stdev {stdev})")]
    ZeroSpread { count: usize, stdev: f64 },

    #[error("normal distribution unavailable: {0}")]
    Distribution(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("computation failed: {0}")]
    Computation(#[from] ComputationError),
}

pub type Result<T> = std::result::Result<T, EngineError>;

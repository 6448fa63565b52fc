//! Expected points (xPTS) from season xG, and regression-to-the-mean risk scoring
//! for every team in a league table.

pub mod analysis_export;
pub mod analyzer;
pub mod config;
pub mod dataset;
pub mod error;
pub mod expected_points;
pub mod persist;
pub mod pipeline;
pub mod records;
pub mod risk;
pub mod stats;
pub mod summary;
pub mod validation;
pub mod win_prob;

pub use analyzer::{AnalysisReport, RegressionCandidates};
pub use error::{ComputationError, EngineError, ValidationError};
pub use records::{AnalysisRow, TeamSeasonRecord};

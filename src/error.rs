use thiserror::Error;

use crate::chart::ChartKind;
use crate::scene::SceneError;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("scene collaborator failed: {0}")]
    Collaborator(#[from] SceneError),

    #[error("failed to mount {chart:?} chart: {reason}")]
    Render { chart: ChartKind, reason: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

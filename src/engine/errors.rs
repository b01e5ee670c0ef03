use std::path::PathBuf;

use thiserror::Error;
use tokio::task::JoinError;

use crate::storage::WriteError;

/// Faults that terminate a run. Record-level problems never show up here;
/// they become rows in the rejected artifact instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Source not found: [{}]", path.display())]
    SourceNotFound {
        path: PathBuf
    },
    #[error("Source [{}] could not be read: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        source: csv::Error
    },
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error("Pipeline worker did not complete: {0}")]
    Worker(#[from] JoinError)
}

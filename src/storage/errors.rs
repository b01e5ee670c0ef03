use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Could not create partition directory [{}]: {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error
    },
    #[error("Could not write artifact [{}]: {source}", path.display())]
    Csv {
        path: PathBuf,
        source: csv::Error
    },
    #[error("I/O failure on artifact [{}]: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error
    }
}

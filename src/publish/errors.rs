use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Publishing is enabled but no destination bucket is configured")]
    MissingBucket,
    #[error("Publishing is enabled but no destination endpoint is configured")]
    MissingEndpoint,
    #[error("Could not read partition artifact [{}]: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error
    },
    #[error("Partition [{}] is not inside output root [{}]", partition.display(), output_root.display())]
    OutsideOutputRoot {
        partition: PathBuf,
        output_root: PathBuf
    },
    #[error("Transfer of [{key}] failed: {source}")]
    Transport {
        key: String,
        source: reqwest::Error
    },
    #[error("Store refused [{key}] with status {status}: {body}")]
    Refused {
        key: String,
        status: u16,
        body: String
    },
    #[error("Could not store [{key}] at [{}]: {source}", path.display())]
    Store {
        key: String,
        path: PathBuf,
        source: std::io::Error
    }
}

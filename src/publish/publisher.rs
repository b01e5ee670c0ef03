use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};

use crate::publish::errors::PublishError;
use crate::publish::ObjectStore;
use crate::storage::STAGING_EXTENSION;

/// One artifact that reached the remote store.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PublishedObject {
    pub bucket: String,
    pub key: String,
    pub bytes: usize
}

/// Uploads every file under `partition_root`, keyed by its path relative to
/// `output_root` beneath `prefix`.
///
/// Files go up in sorted path order, one request each. The first failure
/// stops the publish; nothing is rolled back locally or remotely.
pub async fn publish_partition<S: ObjectStore>(
    store: &S,
    output_root: &Path,
    partition_root: &Path,
    bucket: &str,
    prefix: &str
) -> Result<Vec<PublishedObject>, PublishError> {
    let files = collect_files(partition_root).await?;
    let mut published = Vec::with_capacity(files.len());

    for path in files {
        let relative = path.strip_prefix(output_root).map_err(|_| PublishError::OutsideOutputRoot {
            partition: partition_root.to_path_buf(),
            output_root: output_root.to_path_buf()
        })?;

        let key = object_key(prefix, relative);
        let body = fs::read(&path).await.map_err(|source| PublishError::Read { path: path.clone(), source })?;
        let bytes = body.len();

        store.put_object(bucket, &key, body).await?;
        debug!("Uploaded {} ({bytes} bytes) to [{bucket}]:[{key}]", path.display());

        published.push(PublishedObject {
            bucket: bucket.to_string(),
            key,
            bytes
        });
    }

    info!("Published {} artifacts to bucket [{bucket}]", published.len());

    Ok(published)
}

/// Joins `prefix` and a relative path into an object key with `/` separators.
pub fn object_key(prefix: &str, relative: &Path) -> String {
    let relative = relative.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().replace('\\', "/")),
            _ => None
        })
        .collect::<Vec<_>>()
        .join("/");

    let prefix = prefix.trim_matches('/');

    if prefix.is_empty() {
        relative
    } else {
        format!("{prefix}/{relative}")
    }
}

async fn collect_files(root: &Path) -> Result<Vec<PathBuf>, PublishError> {
    let read_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| PublishError::Read { path, source }
    };

    let mut pending = vec![root.to_path_buf()];
    let mut files = Vec::new();

    while let Some(directory) = pending.pop() {
        let mut entries = fs::read_dir(&directory).await.map_err(read_error(&directory))?;

        while let Some(entry) = entries.next_entry().await.map_err(read_error(&directory))? {
            let file_type = entry.file_type().await.map_err(read_error(&entry.path()))?;

            if file_type.is_dir() {
                pending.push(entry.path());
            } else if file_type.is_file() && !is_staging(&entry.path()) {
                files.push(entry.path());
            }
        }
    }

    files.sort();

    Ok(files)
}

/// Leftover of an interrupted artifact write; never part of a partition.
fn is_staging(path: &Path) -> bool {
    path.extension().is_some_and(|extension| extension == STAGING_EXTENSION)
}

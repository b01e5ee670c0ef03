use std::path::PathBuf;

use tokio::fs;

use crate::publish::errors::PublishError;
use crate::publish::ObjectStore;

/// Mirrors objects into `<root>/<bucket>/<key>` on a local or mounted filesystem.
#[derive(Debug, Clone)]
pub struct DirectoryObjectStore {
    root: PathBuf
}

impl DirectoryObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into()
        }
    }

    pub fn object_path(&self, bucket: &str, key: &str) -> PathBuf {
        key.split('/')
            .filter(|part| !part.is_empty() && *part != "." && *part != "..")
            .fold(self.root.join(bucket), |path, part| path.join(part))
    }
}

impl ObjectStore for DirectoryObjectStore {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), PublishError> {
        let path = self.object_path(bucket, key);
        let store_error = |source: std::io::Error| PublishError::Store { key: key.to_string(), path: path.clone(), source };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(store_error)?;
        }

        fs::write(&path, body).await.map_err(store_error)
    }
}

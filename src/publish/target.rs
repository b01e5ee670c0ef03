use crate::publish::errors::PublishError;
use crate::publish::{DirectoryObjectStore, HttpObjectStore, ObjectStore};

/// The store the binary publishes to, picked from a single endpoint string:
/// `http(s)://...` talks to a remote store, anything else (optionally
/// `file://`-prefixed) is treated as a local mirror directory.
#[derive(Debug, Clone)]
pub enum StoreTarget {
    Http(HttpObjectStore),
    Directory(DirectoryObjectStore),
    Unconfigured
}

impl StoreTarget {
    pub fn from_endpoint(endpoint: Option<&str>, token: Option<String>) -> Self {
        match endpoint.map(str::trim) {
            None | Some("") => StoreTarget::Unconfigured,
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
                StoreTarget::Http(HttpObjectStore::new(url, token))
            }
            Some(path) => {
                StoreTarget::Directory(DirectoryObjectStore::new(path.strip_prefix("file://").unwrap_or(path)))
            }
        }
    }
}

impl ObjectStore for StoreTarget {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), PublishError> {
        match self {
            StoreTarget::Http(store) => store.put_object(bucket, key, body).await,
            StoreTarget::Directory(store) => store.put_object(bucket, key, body).await,
            StoreTarget::Unconfigured => Err(PublishError::MissingEndpoint)
        }
    }
}

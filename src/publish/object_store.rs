use std::future::Future;

use crate::publish::errors::PublishError;

/// The narrow capability the pipeline needs from a remote store: put one
/// object under a bucket and key. Retries and auth belong to implementations.
pub trait ObjectStore: Send + Sync {
    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> impl Future<Output = Result<(), PublishError>> + Send;
}

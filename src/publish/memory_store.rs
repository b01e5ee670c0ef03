use std::sync::Arc;

use dashmap::DashMap;

use crate::publish::errors::PublishError;
use crate::publish::ObjectStore;

/// In-memory store for tests. Optionally refuses one key to simulate a
/// remote failure part way through a publish.
#[derive(Debug, Clone, Default)]
pub struct MemoryObjectStore {
    objects: Arc<DashMap<String, Vec<u8>>>,
    refuse_key: Option<String>
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refusing(key: &str) -> Self {
        Self {
            objects: Arc::new(DashMap::new()),
            refuse_key: Some(key.to_string())
        }
    }

    pub fn get(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects.get(&format!("{bucket}/{key}")).map(|entry| entry.value().clone())
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.iter().map(|entry| entry.key().clone()).collect();
        keys.sort();
        keys
    }
}

impl ObjectStore for MemoryObjectStore {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), PublishError> {
        if self.refuse_key.as_deref().is_some_and(|refused| key.ends_with(refused)) {
            return Err(PublishError::Refused { key: key.to_string(), status: 503, body: "unavailable".to_string() })
        }

        self.objects.insert(format!("{bucket}/{key}"), body);

        Ok(())
    }
}

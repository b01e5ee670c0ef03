use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::publish::errors::PublishError;
use crate::publish::ObjectStore;

/// Uploads objects with `PUT <endpoint>/<bucket>/<key>`.
///
/// Works against any store that accepts plain HTTP puts (S3-compatible
/// gateways with presigned or token auth, Supabase storage, MinIO).
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    client: Client,
    endpoint: String,
    token: Option<String>
}

impl HttpObjectStore {
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            token
        }
    }

    pub fn object_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint.trim_end_matches('/'), bucket, key)
    }
}

impl ObjectStore for HttpObjectStore {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), PublishError> {
        let mut request = self.client
            .put(self.object_url(bucket, key))
            .header(CONTENT_TYPE, "text/csv")
            .body(body);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await
            .map_err(|source| PublishError::Transport { key: key.to_string(), source })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Refused { key: key.to_string(), status: status.as_u16(), body })
        }

        Ok(())
    }
}

//! REST adapter for one entity type: list/create/update/delete plus the
//! dependent attachment upload. Every call carries the session's bearer
//! token; there are no retries and no caching.

use std::marker::PhantomData;
use std::time::Duration;

use admin_core::{EndpointSet, Record, Session, StoreError};
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub struct RestStore<R> {
    endpoints: EndpointSet,
    session: Session,
    client: reqwest::Client,
    _entity: PhantomData<R>,
}

impl<R> Clone for RestStore<R> {
    fn clone(&self) -> Self {
        Self {
            endpoints: self.endpoints.clone(),
            session: self.session.clone(),
            client: self.client.clone(),
            _entity: PhantomData,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    image_url: String,
}

impl<R: Record> RestStore<R> {
    pub fn new(endpoints: EndpointSet, session: Session) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            endpoints,
            session,
            client,
            _entity: PhantomData,
        }
    }

    pub async fn list_all(&self) -> Result<Vec<R>, StoreError> {
        log::debug!("GET {} ({})", self.endpoints.list, R::KIND);
        let response = self
            .client
            .get(&self.endpoints.list)
            .bearer_auth(self.session.token())
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("GET {} failed: {}", self.endpoints.list, e)))?;
        decode(response).await
    }

    /// Returns the persisted entity including its new id and timestamps.
    pub async fn create(&self, record: &R) -> Result<R, StoreError> {
        log::debug!("POST {} ({})", self.endpoints.create, R::KIND);
        let response = self
            .client
            .post(&self.endpoints.create)
            .bearer_auth(self.session.token())
            .json(&record.create_payload())
            .send()
            .await
            .map_err(|e| {
                StoreError::Transport(format!("POST {} failed: {}", self.endpoints.create, e))
            })?;
        decode(response).await
    }

    /// Returns the persisted entity reflecting the server-side merge.
    pub async fn update(&self, id: i64, record: &R) -> Result<R, StoreError> {
        let url = self.endpoints.update_url(id);
        log::debug!("PUT {} ({})", url, R::KIND);
        let response = self
            .client
            .put(&url)
            .bearer_auth(self.session.token())
            .json(record)
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("PUT {} failed: {}", url, e)))?;
        decode(response).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let url = self.endpoints.delete_url(id);
        log::debug!("DELETE {} ({})", url, R::KIND);
        let response = self
            .client
            .delete(&url)
            .bearer_auth(self.session.token())
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("DELETE {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(rejection(status, response).await);
        }
        Ok(())
    }

    /// Multipart upload of the staged image, keyed by the owning record's
    /// id. Only called after a successful create/update.
    pub async fn upload_attachment(
        &self,
        owner_id: i64,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<String, StoreError> {
        let base = self.endpoints.upload.as_deref().ok_or_else(|| {
            StoreError::Transport(format!("{} has no upload endpoint", R::KIND))
        })?;
        let url = format!("{}/{}", base, owner_id);
        log::debug!("POST {} ({} attachment)", url, R::KIND);

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("image", part);
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.session.token())
            .multipart(form)
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("POST {} failed: {}", url, e)))?;

        let body: UploadResponse = decode(response).await?;
        Ok(body.image_url)
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StoreError> {
    let status = response.status();
    if !status.is_success() {
        return Err(rejection(status, response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| StoreError::Transport(format!("failed to decode response: {}", e)))
}

async fn rejection(status: reqwest::StatusCode, response: reqwest::Response) -> StoreError {
    if status == reqwest::StatusCode::BAD_REQUEST
        || status == reqwest::StatusCode::UNPROCESSABLE_ENTITY
    {
        let message = response.text().await.unwrap_or_default();
        StoreError::Validation {
            status: status.as_u16(),
            message,
        }
    } else {
        StoreError::Transport(format!("request failed with status {}", status))
    }
}

use launchpad_client::{ApplicationId, BackendClient, ForwardedHeaders, RequestBody};
use tracing::info;

use crate::error::Result;
use crate::relay::{finish, Relayed};

/// Read, update and delete operations on a single application
#[derive(Debug, Clone)]
pub struct ItemProxy {
    client: BackendClient,
}

impl ItemProxy {
    /// Create a new `ItemProxy`
    #[must_use]
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Get application by ID
    pub async fn get(&self, id: &ApplicationId, headers: &ForwardedHeaders) -> Result<Relayed> {
        info!(%id, request_id = ?headers.request_id, "Fetching application");

        finish("get", self.client.applications().get(id, headers).await)
    }

    /// Update an application
    ///
    /// Always relays the backend's status and body (empty when the backend sends
    /// none), including rejections.
    pub async fn update(
        &self,
        id: &ApplicationId,
        headers: &ForwardedHeaders,
        body: RequestBody,
    ) -> Result<Relayed> {
        info!(%id, request_id = ?headers.request_id, "Updating application");

        finish(
            "update",
            self.client.applications().update(id, headers, body).await,
        )
    }

    /// Delete application by ID
    pub async fn delete(&self, id: &ApplicationId, headers: &ForwardedHeaders) -> Result<Relayed> {
        info!(%id, request_id = ?headers.request_id, "Deleting application");

        finish("delete", self.client.applications().delete(id, headers).await)
    }
}

use launchpad_client::{Application, BackendClient, ForwardedHeaders, RequestBody};
use tracing::info;

use crate::error::Result;
use crate::relay::{finish, Relayed};

/// List and create operations on the whole applications collection
///
/// Stateless: every call is one backend request, nothing is cached or retried.
#[derive(Debug, Clone)]
pub struct CollectionProxy {
    client: BackendClient,
}

impl CollectionProxy {
    /// Create a new `CollectionProxy`
    #[must_use]
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// List all applications
    ///
    /// # Returns
    /// * `Ok(Relayed)` - Backend status and JSON payload, verbatim
    /// * `Err(ProxyError)` - Classified failure; never a silent empty success
    pub async fn list(&self, headers: &ForwardedHeaders) -> Result<Relayed> {
        info!(request_id = ?headers.request_id, "Listing applications");

        finish("list", self.client.applications().list(headers).await)
    }

    /// Create an application
    ///
    /// The body is forwarded untouched; the backend alone decides whether it is valid.
    pub async fn create(&self, headers: &ForwardedHeaders, body: RequestBody) -> Result<Relayed> {
        info!(request_id = ?headers.request_id, "Creating application");

        let relayed = finish("create", self.client.applications().create(headers, body).await)?;
        if let Some(app) = relayed.body.as_ref().and_then(Application::from_json) {
            info!("Created application '{}' with ID {}", app.name, app.id);
        }
        Ok(relayed)
    }
}

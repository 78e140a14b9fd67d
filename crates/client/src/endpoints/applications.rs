use reqwest::{Method, Url};

use crate::error::{ClientError, Result};
use crate::models::ApplicationId;
use crate::options::{CachePolicy, ForwardedHeaders, RequestBody, RequestOptions};
use crate::response::BackendResponse;
use crate::BackendClient;

const COLLECTION: &str = "applications";

/// Backend endpoints for the applications resource
pub struct ApplicationsEndpoint<'a> {
    client: &'a BackendClient,
}

impl<'a> ApplicationsEndpoint<'a> {
    /// Create a new `ApplicationsEndpoint`
    pub(crate) fn new(client: &'a BackendClient) -> Self {
        Self { client }
    }

    /// `{base}/applications`
    #[must_use]
    pub fn collection_url(&self) -> Url {
        self.client.url_for(&[COLLECTION])
    }

    /// `{base}/applications/{id}`, with the id encoded as a single path segment
    ///
    /// `.` and `..` are refused: URL normalization would resolve them instead of
    /// sending them, so they would address a different backend path.
    pub fn item_url(&self, id: &ApplicationId) -> Result<Url> {
        let segment = id.to_string();
        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(ClientError::InvalidId(segment));
        }
        Ok(self.client.url_for(&[COLLECTION, &segment]))
    }

    /// List all applications
    pub async fn list(&self, headers: &ForwardedHeaders) -> Result<BackendResponse> {
        let options = RequestOptions::new(Method::GET)
            .headers(headers.clone())
            .cache(CachePolicy::NoStore);
        self.client.send(self.collection_url(), options).await
    }

    /// Create an application from a serialized payload
    pub async fn create(
        &self,
        headers: &ForwardedHeaders,
        body: RequestBody,
    ) -> Result<BackendResponse> {
        let options = with_body(Method::POST, headers, body);
        self.client.send(self.collection_url(), options).await
    }

    /// Get application by ID
    pub async fn get(
        &self,
        id: &ApplicationId,
        headers: &ForwardedHeaders,
    ) -> Result<BackendResponse> {
        let options = RequestOptions::new(Method::GET)
            .headers(headers.clone())
            .cache(CachePolicy::NoCache);
        self.client.send(self.item_url(id)?, options).await
    }

    /// Replace an application's fields
    pub async fn update(
        &self,
        id: &ApplicationId,
        headers: &ForwardedHeaders,
        body: RequestBody,
    ) -> Result<BackendResponse> {
        let options = with_body(Method::PUT, headers, body);
        self.client.send(self.item_url(id)?, options).await
    }

    /// Delete application by ID
    pub async fn delete(
        &self,
        id: &ApplicationId,
        headers: &ForwardedHeaders,
    ) -> Result<BackendResponse> {
        let options = RequestOptions::new(Method::DELETE)
            .headers(headers.clone())
            .cache(CachePolicy::NoStore);
        self.client.send(self.item_url(id)?, options).await
    }
}

fn with_body(method: Method, headers: &ForwardedHeaders, body: RequestBody) -> RequestOptions {
    let duplex = body.duplex();
    RequestOptions::new(method)
        .headers(headers.clone())
        .cache(CachePolicy::NoStore)
        .duplex(duplex)
        .body(body)
}

//! Credentialed HTTP client used for backend writes.
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{resolve_url, ApiResponse};
use crate::error::AppResult;

/// An HTTP client that attaches credentials to every request on its own.
///
/// Any HTTP status is returned as a response; only transport failures are
/// errors, so callers decide what counts as success.
#[async_trait]
pub trait CredentialedClient: Send + Sync {
    async fn post(&self, path: &str, body: &Value) -> AppResult<ApiResponse>;
}

#[derive(Clone)]
pub struct SecureHttpClient {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl SecureHttpClient {
    pub fn new(base_url: impl Into<String>, access_token: Option<String>) -> Self {
        SecureHttpClient { client: Client::new(), base_url: base_url.into(), access_token }
    }
}

#[async_trait]
impl CredentialedClient for SecureHttpClient {
    async fn post(&self, path: &str, body: &Value) -> AppResult<ApiResponse> {
        let url = resolve_url(&self.base_url, path)?;
        tracing::debug!(%url, "secure post");

        let mut builder = self.client.post(&url).json(body);
        match &self.access_token {
            Some(token) => builder = builder.bearer_auth(token),
            None => tracing::warn!(%url, "no access token configured, sending unauthenticated"),
        }

        ApiResponse::read(builder.send().await?).await
    }
}

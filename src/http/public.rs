//! Non-credentialed HTTP client bound to the public backend base URL.
//!
//! - Relative paths are joined to the base URL.
//! - Absolute `http(s)://` targets bypass the base URL (used for the image host).
//! - Non-2xx responses come back as `AppError::Status`; nothing is retried.
use reqwest::header::HeaderMap;
use reqwest::multipart::Form;
use reqwest::{Client, Method};
use serde_json::Value;

use super::{resolve_url, ApiResponse};
use crate::error::AppResult;

/// Request payload accepted by [`PublicHttpClient::request`].
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Form),
}

#[derive(Clone)]
pub struct PublicHttpClient {
    client: Client,
    base_url: String,
}

impl PublicHttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        PublicHttpClient { client: Client::new(), base_url: base_url.into() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue `method` against `target`, which is either a path relative to the
    /// base URL or a full URL.
    pub async fn request(
        &self,
        method: Method,
        target: &str,
        body: RequestBody,
        headers: HeaderMap,
    ) -> AppResult<ApiResponse> {
        self.request_with_query(method, target, &[], body, headers).await
    }

    /// Like [`request`](Self::request), with query pairs appended by reqwest.
    /// Query values stay out of the logged URL, so credentials go here.
    pub async fn request_with_query(
        &self,
        method: Method,
        target: &str,
        query: &[(&str, &str)],
        body: RequestBody,
        headers: HeaderMap,
    ) -> AppResult<ApiResponse> {
        let url = resolve_url(&self.base_url, target)?;
        tracing::debug!(%method, %url, "public request");

        let builder = self.client.request(method.clone(), &url).headers(headers).query(query);
        let builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let response = ApiResponse::read(builder.send().await?).await?;
        if !response.is_success() {
            tracing::error!(%method, %url, status = %response.status, "public request failed");
        }
        response.error_for_status()
    }

    pub async fn get(&self, target: &str) -> AppResult<ApiResponse> {
        self.request(Method::GET, target, RequestBody::Empty, HeaderMap::new()).await
    }
}

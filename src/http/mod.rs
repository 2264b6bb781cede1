//! HTTP plumbing shared by the image host and the menu backend.
pub mod public;
pub mod secure;

use bytes::Bytes;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

pub use public::{PublicHttpClient, RequestBody};
pub use secure::{CredentialedClient, SecureHttpClient};

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl ApiResponse {
    pub(crate) async fn read(response: reqwest::Response) -> AppResult<Self> {
        let status = response.status();
        let body = response.bytes().await?;
        Ok(ApiResponse { status, body })
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn json<T: DeserializeOwned>(&self) -> AppResult<T> {
        serde_json::from_slice(&self.body).map_err(AppError::Json)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Turn a non-2xx response into `AppError::Status`.
    pub fn error_for_status(self) -> AppResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(AppError::Status { status: self.status, body: self.text() })
        }
    }
}

/// Join `path` onto `base`, unless `path` is already an absolute http(s) URL.
pub(crate) fn resolve_url(base: &str, path: &str) -> AppResult<String> {
    let url = if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
    };
    reqwest::Url::parse(&url).map_err(|_| AppError::InvalidUrl(url.clone()))?;
    Ok(url)
}

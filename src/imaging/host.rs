//! Client for the third-party image hosting API.
//!
//! Uploads go to `POST <host>/1/upload?key=<apiKey>` as multipart field `image`
//! and answer with `{ success, data: { display_url, ... } }`. The API key never
//! appears in logs.
use reqwest::header::HeaderMap;
use reqwest::multipart::Form;
use reqwest::{Method, Url};
use serde::Deserialize;

use super::ImageFile;
use crate::error::{AppError, AppResult};
use crate::http::{PublicHttpClient, RequestBody};

#[derive(Debug, Clone, Deserialize)]
pub struct HostedImageResult {
    pub success: bool,
    #[serde(default)]
    pub data: Option<HostedImageData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HostedImageData {
    pub display_url: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub delete_url: Option<String>,
}

/// A successfully hosted image.
#[derive(Debug, Clone, PartialEq)]
pub struct HostedImage {
    pub display_url: String,
    pub delete_url: Option<String>,
}

#[derive(Clone)]
pub struct ImageHostClient {
    http: PublicHttpClient,
    base_url: String,
    api_key: String,
}

impl ImageHostClient {
    pub fn new(http: PublicHttpClient, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        ImageHostClient { http, base_url: base_url.into(), api_key: api_key.into() }
    }

    /// Upload endpoint without the key; the key is attached as a query pair.
    fn upload_url(&self) -> AppResult<Url> {
        let raw = format!("{}/1/upload", self.base_url.trim_end_matches('/'));
        Url::parse(&raw).map_err(|_| AppError::InvalidUrl(raw.clone()))
    }

    /// Upload `image` and return its public display URL.
    pub async fn upload(&self, image: &ImageFile) -> AppResult<HostedImage> {
        let url = self.upload_url()?;
        let form = Form::new().part("image", image.to_part()?);

        tracing::info!(
            host = %self.base_url,
            file = %image.file_name,
            size = image.bytes.len(),
            "Uploading image to hosting provider"
        );

        let response = self
            .http
            .request_with_query(
                Method::POST,
                url.as_str(),
                &[("key", self.api_key.as_str())],
                RequestBody::Multipart(form),
                HeaderMap::new(),
            )
            .await
            .map_err(strip_url)?;
        let result: HostedImageResult = response.json()?;

        if !result.success {
            return Err(AppError::ImageHost("hosting provider reported failure".to_string()));
        }
        let data = result
            .data
            .ok_or_else(|| AppError::ImageHost("hosting response carried no image data".to_string()))?;

        tracing::info!(display_url = %data.display_url, "Image hosted");
        Ok(HostedImage { display_url: data.display_url, delete_url: data.delete_url })
    }
}

/// reqwest errors carry the request URL, key included.
fn strip_url(err: AppError) -> AppError {
    match err {
        AppError::HttpClient(e) => AppError::HttpClient(e.without_url()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn host_for(server: &MockServer) -> ImageHostClient {
        ImageHostClient::new(PublicHttpClient::new("http://127.0.0.1:1/"), server.uri(), "k3y")
    }

    #[tokio::test]
    async fn upload_returns_display_url() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/1/upload"))
            .and(query_param("key", "k3y"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"display_url": "https://img/x.png", "delete_url": "https://img/del/x"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let hosted = host_for(&mock_server)
            .upload(&ImageFile::new("x.png", vec![1u8, 2, 3]))
            .await
            .unwrap();
        assert_eq!(hosted.display_url, "https://img/x.png");
        assert_eq!(hosted.delete_url.as_deref(), Some("https://img/del/x"));

        let requests = mock_server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"image\""));
        assert!(body.contains("filename=\"x.png\""));
        assert!(requests[0].body.windows(3).any(|w| w == [1u8, 2, 3]));
        assert!(requests[0].headers.get("content-length").is_some());
    }

    #[tokio::test]
    async fn success_false_is_an_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
            .mount(&mock_server)
            .await;

        let err = host_for(&mock_server)
            .upload(&ImageFile::new("x.png", vec![1u8]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ImageHost(_)));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"success": false})))
            .mount(&mock_server)
            .await;

        let err = host_for(&mock_server)
            .upload(&ImageFile::new("x.png", vec![1u8]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Status { .. }));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[tokio::test]
    async fn api_key_stays_out_of_logs_and_errors() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(query_param("key", "SECRETKEY"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let image = ImageFile::new("x.png", vec![1u8]);
        let rejected = ImageHostClient::new(PublicHttpClient::new("http://127.0.0.1:1/"), mock_server.uri(), "SECRETKEY")
            .upload(&image)
            .await
            .unwrap_err();
        let unreachable = ImageHostClient::new(PublicHttpClient::new("http://127.0.0.1:1/"), "http://127.0.0.1:1", "SECRETKEY")
            .upload(&image)
            .await
            .unwrap_err();

        assert!(matches!(rejected, AppError::Status { .. }));
        assert!(matches!(unreachable, AppError::HttpClient(_)));
        assert!(!rejected.to_string().contains("SECRETKEY"));
        assert!(!unreachable.to_string().contains("SECRETKEY"));

        let captured = logs.text();
        assert!(captured.contains("public request failed"));
        assert!(captured.contains("/1/upload"));
        assert!(!captured.contains("SECRETKEY"), "key in logs: {captured}");
    }
}

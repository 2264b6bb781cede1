//! Image files selected by the admin and the hosting provider they go to.
pub mod host;

use std::path::Path;

use bytes::Bytes;
use reqwest::multipart::Part;

use crate::error::AppResult;

pub use host::{HostedImage, HostedImageResult, ImageHostClient};

/// A single binary file picked for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name).first_or_octet_stream().to_string();
        ImageFile { file_name, content_type, bytes: bytes.into() }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Ok(ImageFile::new(file_name, bytes))
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn to_part(&self) -> AppResult<Part> {
        let part = Part::stream_with_length(self.bytes.clone(), self.bytes.len() as u64)
            .file_name(self.file_name.clone())
            .mime_str(&self.content_type)?;
        Ok(part)
    }
}

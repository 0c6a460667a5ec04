//! Detection backend seam
//!
//! `DetectionBackend` is what the detector needs from the outside world:
//! submit an image, get a raw detection back. `HttpDetectionBackend` talks
//! to `POST /detect-disease`; tests substitute in-process stubs.

use crate::config::DetectorConfig;
use crate::error::DetectionError;
use crate::normalizer::RawDetection;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use std::path::Path;

/// Image submitted for analysis
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub mime_type: Option<String>,
}

impl ImagePayload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let mime_type = guess_mime_type(&filename).map(str::to_string);
        Self {
            filename,
            bytes,
            mime_type,
        }
    }

    /// Read an image file from disk
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(filename, bytes))
    }
}

fn guess_mime_type(filename: &str) -> Option<&'static str> {
    let extension = filename.rsplit_once('.')?.1.to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// Source of raw disease detections
pub trait DetectionBackend: Send + Sync {
    fn detect(
        &self,
        image: &ImagePayload,
    ) -> impl Future<Output = Result<RawDetection, DetectionError>> + Send;
}

/// Join a base URL and an endpoint path with exactly one slash
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Build the shared reqwest client from configuration
pub(crate) fn build_client(config: &DetectorConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Extract a human-readable message from a JSON error body
///
/// Looks at `detail`, `error` and `message` in that order. Returns None for
/// bodies that are not JSON or carry none of these as a string.
pub(crate) fn error_body_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["detail", "error", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

/// reqwest implementation of `POST /detect-disease`
#[derive(Debug, Clone)]
pub struct HttpDetectionBackend {
    client: Client,
    detect_url: String,
}

impl HttpDetectionBackend {
    pub fn new(config: &DetectorConfig) -> Result<Self, DetectionError> {
        Ok(Self {
            client: build_client(config)?,
            detect_url: endpoint(&config.api_base_url, "detect-disease"),
        })
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            detect_url: endpoint(base_url, "detect-disease"),
        }
    }
}

impl DetectionBackend for HttpDetectionBackend {
    async fn detect(&self, image: &ImagePayload) -> Result<RawDetection, DetectionError> {
        let mut part = Part::bytes(image.bytes.clone()).file_name(image.filename.clone());
        if let Some(mime) = &image.mime_type {
            part = part.mime_str(mime)?;
        }
        let form = Form::new().part("image", part);

        tracing::debug!("POST {} ({} bytes)", self.detect_url, image.bytes.len());
        let response = self.client.post(&self.detect_url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_body_message(&body)
                .unwrap_or_else(|| format!("API request failed: {}", status.as_u16()));
            return Err(DetectionError::from_api(status.as_u16(), message));
        }

        let body = response.bytes().await?;
        serde_json::from_slice::<RawDetection>(&body)
            .map_err(|e| DetectionError::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_join() {
        assert_eq!(endpoint("http://api/", "/detect-disease"), "http://api/detect-disease");
        assert_eq!(endpoint("http://api", "community/posts"), "http://api/community/posts");
    }

    #[test]
    fn test_error_body_message() {
        assert_eq!(
            error_body_message(r#"{"detail": "Image is not a plant"}"#),
            Some("Image is not a plant".to_string())
        );
        assert_eq!(
            error_body_message(r#"{"error": "bad upload"}"#),
            Some("bad upload".to_string())
        );
        assert_eq!(error_body_message("<html>502</html>"), None);
        assert_eq!(error_body_message(r#"{"detail": [{"loc": "image"}]}"#), None);
    }

    #[test]
    fn test_mime_guess() {
        let payload = ImagePayload::new("Leaf.JPG", vec![1, 2, 3]);
        assert_eq!(payload.mime_type.as_deref(), Some("image/jpeg"));
        assert_eq!(ImagePayload::new("scan", vec![]).mime_type, None);
    }
}

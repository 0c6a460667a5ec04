//! REST client for the community, voice and profile endpoints
//!
//! These surfaces sit next to the detector: they poll or call the same
//! backend but take no part in scoring. Errors surface as [`ClientError`].

pub mod community;
pub mod poller;
pub mod profile;
pub mod voice;

pub use community::{
    ChatMessage, ChatSession, Comment, CommunityFeed, NewChatMessage, NewComment, NewPost,
    Notification, PollIntervals, Post,
};
pub use poller::Poller;
pub use voice::{VoiceAnswer, VoiceQuery};

use crate::backend::{build_client, endpoint, error_body_message};
use crate::config::DetectorConfig;
use crate::error::ClientError;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Shared HTTP client for the non-detection endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &DetectorConfig) -> Result<Self, ClientError> {
        let base_url = config.api_base_url.trim().to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(base_url));
        }
        Ok(Self {
            client: build_client(config)?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let request = self.client.get(self.url(path)).query(query);
        Self::send_json(request).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let request = self.client.post(self.url(path)).json(body);
        Self::send_json(request).await
    }

    /// POST and discard the response body
    pub(crate) async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ClientError> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    pub(crate) async fn delete(&self, path: &str, query: &[(&str, &str)]) -> Result<(), ClientError> {
        let response = self.client.delete(self.url(path)).query(query).send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = Self::check_status(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = error_body_message(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_base_url() {
        let config = DetectorConfig {
            api_base_url: "ftp://example.org".to_string(),
            ..DetectorConfig::default()
        };
        assert!(matches!(ApiClient::new(&config), Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_url_building() {
        let config = DetectorConfig {
            api_base_url: "http://localhost:8000/".to_string(),
            ..DetectorConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.url("/community/posts"), "http://localhost:8000/community/posts");
    }
}

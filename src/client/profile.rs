//! Farmer profile sync

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::storage::UserProfile;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ProfileAck {
    #[serde(default)]
    message: Option<String>,
}

impl ApiClient {
    /// Push the locally stored profile to `POST /user/profile`
    ///
    /// Returns the server's acknowledgement message, if it sent one.
    pub async fn update_profile(&self, profile: &UserProfile) -> Result<Option<String>, ClientError> {
        let ack: ProfileAck = self.post_json("user/profile", profile).await?;
        tracing::info!("Profile updated for {}", profile.username);
        Ok(ack.message)
    }
}

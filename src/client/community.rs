//! Community forum and chat endpoints
//!
//! Thin typed wrappers over `/community/*` plus the polling sessions the
//! forum and chat views run.

use crate::client::poller::Poller;
use crate::client::ApiClient;
use crate::error::ClientError;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub id: Option<String>,
    pub author: String,
    pub content: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author: String,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPost {
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewComment {
    pub author: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender: String,
    #[serde(default)]
    pub receiver: Option<String>,
    pub message: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewChatMessage {
    pub sender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default)]
    pub id: Option<String>,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Naive timestamp layouts the backend emits; read as UTC
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse RFC 3339, falling back to a naive ISO timestamp taken as UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// A bad timestamp drops to None instead of failing the whole record
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let parsed = value.as_ref().and_then(Value::as_str).and_then(parse_timestamp);
    if parsed.is_none() && value.as_ref().is_some_and(|v| !v.is_null()) {
        tracing::debug!("Ignoring unparseable timestamp: {:?}", value);
    }
    Ok(parsed)
}

/// `/community/online` answers either a bare list or `{"users": [...]}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OnlineUsers {
    List(Vec<String>),
    Wrapped { users: Vec<String> },
}

impl From<OnlineUsers> for Vec<String> {
    fn from(value: OnlineUsers) -> Self {
        match value {
            OnlineUsers::List(users) | OnlineUsers::Wrapped { users } => users,
        }
    }
}

#[derive(Debug, Serialize)]
struct Heartbeat<'a> {
    username: &'a str,
}

impl ApiClient {
    pub async fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
        self.get_json("community/posts", &[]).await
    }

    pub async fn create_post(&self, post: &NewPost) -> Result<Post, ClientError> {
        self.post_json("community/posts", post).await
    }

    pub async fn add_comment(&self, post_id: &str, comment: &NewComment) -> Result<Post, ClientError> {
        self.post_json(&format!("community/posts/{}/comments", post_id), comment)
            .await
    }

    /// Chat history; with `between` set, only the conversation of that pair
    pub async fn chat_messages(
        &self,
        between: Option<(&str, &str)>,
    ) -> Result<Vec<ChatMessage>, ClientError> {
        match between {
            Some((user1, user2)) => {
                self.get_json("community/chat", &[("user1", user1), ("user2", user2)])
                    .await
            }
            None => self.get_json("community/chat", &[]).await,
        }
    }

    pub async fn send_chat(&self, message: &NewChatMessage) -> Result<ChatMessage, ClientError> {
        self.post_json("community/chat", message).await
    }

    /// Delete a chat message; the backend only lets its sender do this
    pub async fn delete_chat(&self, message_id: &str, username: &str) -> Result<(), ClientError> {
        self.delete(
            &format!("community/chat/{}", message_id),
            &[("username", username)],
        )
        .await
    }

    pub async fn online_users(&self) -> Result<Vec<String>, ClientError> {
        let users: OnlineUsers = self.get_json("community/online", &[]).await?;
        Ok(users.into())
    }

    pub async fn heartbeat(&self, username: &str) -> Result<(), ClientError> {
        self.post_unit("community/heartbeat", &Heartbeat { username })
            .await
    }

    pub async fn notifications(&self, username: &str) -> Result<Vec<Notification>, ClientError> {
        self.get_json("community/notifications", &[("username", username)])
            .await
    }
}

/// Polling intervals used by the forum and chat views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollIntervals {
    pub posts: Duration,
    pub chat: Duration,
    pub presence: Duration,
    pub notifications: Duration,
    pub heartbeat: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            posts: Duration::from_secs(10),
            chat: Duration::from_secs(3),
            presence: Duration::from_secs(3),
            notifications: Duration::from_secs(3),
            heartbeat: Duration::from_secs(10),
        }
    }
}

/// Forum polling: the post list plus the presence heartbeat
pub struct CommunityFeed {
    pub posts: Poller<Vec<Post>>,
    pub heartbeat: Poller<()>,
}

impl CommunityFeed {
    pub fn start(client: Arc<ApiClient>, username: String, intervals: &PollIntervals) -> Self {
        let posts_client = client.clone();
        let posts = Poller::spawn("posts", intervals.posts, move || {
            let client = posts_client.clone();
            async move { client.list_posts().await }
        });

        let heartbeat = Poller::spawn("heartbeat", intervals.heartbeat, move || {
            let client = client.clone();
            let username = username.clone();
            async move { client.heartbeat(&username).await }
        });

        Self { posts, heartbeat }
    }
}

/// Chat-tab polling; drop it when the tab is closed
pub struct ChatSession {
    pub messages: Poller<Vec<ChatMessage>>,
    pub online: Poller<Vec<String>>,
    pub notifications: Poller<Vec<Notification>>,
}

impl ChatSession {
    /// Start chat polling for `username`, optionally scoped to one peer
    pub fn start(
        client: Arc<ApiClient>,
        username: String,
        peer: Option<String>,
        intervals: &PollIntervals,
    ) -> Self {
        let chat_client = client.clone();
        let chat_user = username.clone();
        let messages = Poller::spawn("chat", intervals.chat, move || {
            let client = chat_client.clone();
            let user = chat_user.clone();
            let peer = peer.clone();
            async move {
                let between = peer.as_deref().map(|p| (user.as_str(), p));
                client.chat_messages(between).await
            }
        });

        let online_client = client.clone();
        let online = Poller::spawn("presence", intervals.presence, move || {
            let client = online_client.clone();
            async move { client.online_users().await }
        });

        let notifications = Poller::spawn("notifications", intervals.notifications, move || {
            let client = client.clone();
            let username = username.clone();
            async move { client.notifications(&username).await }
        });

        Self {
            messages,
            online,
            notifications,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_intervals() {
        let intervals = PollIntervals::default();
        assert_eq!(intervals.posts, Duration::from_secs(10));
        assert_eq!(intervals.chat, Duration::from_secs(3));
        assert_eq!(intervals.heartbeat, Duration::from_secs(10));
    }

    #[test]
    fn test_online_users_shapes() {
        let list: OnlineUsers = serde_json::from_str(r#"["ravi", "meena"]"#).unwrap();
        let wrapped: OnlineUsers = serde_json::from_str(r#"{"users": ["ravi"]}"#).unwrap();
        assert_eq!(Vec::<String>::from(list), vec!["ravi", "meena"]);
        assert_eq!(Vec::<String>::from(wrapped), vec!["ravi"]);
    }

    #[test]
    fn test_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-05-01T10:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T15:30:00+05:30"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T10:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01 10:00:00.000"), Some(expected));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_naive_or_bad_timestamps_do_not_fail_the_feed() {
        let posts: Vec<Post> = serde_json::from_str(
            r#"[
                {"id": "p1", "author": "ravi", "content": "a", "timestamp": "2024-05-01T10:00:00.123456"},
                {"id": "p2", "author": "meena", "content": "b", "timestamp": "last week",
                 "comments": [{"author": "arjun", "content": "c", "timestamp": 1714557600}]},
                {"id": "p3", "author": "arjun", "content": "d", "timestamp": null}
            ]"#,
        )
        .unwrap();
        assert_eq!(posts.len(), 3);
        assert!(posts[0].timestamp.is_some());
        assert!(posts[1].timestamp.is_none());
        assert!(posts[1].comments[0].timestamp.is_none());
        assert!(posts[2].timestamp.is_none());
    }

    #[test]
    fn test_post_tolerates_missing_optionals() {
        let post: Post = serde_json::from_str(
            r#"{"id": "p1", "author": "ravi", "content": "Wheat rust near Ludhiana?"}"#,
        )
        .unwrap();
        assert_eq!(post.likes, 0);
        assert!(post.comments.is_empty());
        assert!(post.timestamp.is_none());
    }
}

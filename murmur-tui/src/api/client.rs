use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::{ApiError, ApiResult};
use murmur_types::*;

/// Collaborator contract for everything the client reads or submits:
/// message storage, aggregate counters, user lookup, wallet session, and
/// the submission endpoints. The app only talks to this trait, so tests
/// can inject an in-memory fake.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn get_session(&self) -> ApiResult<SessionResponse>;
    async fn get_feed(&self, limit: Option<i32>) -> ApiResult<Vec<MessageId>>;
    async fn get_message(&self, id: &str) -> ApiResult<Message>;
    async fn get_meta(&self, id: &str) -> ApiResult<Meta>;
    async fn get_replies(&self, id: &str) -> ApiResult<Vec<Message>>;
    async fn get_user(&self, address: &str) -> ApiResult<User>;
    /// Submit a reply (or a top-level post when `reference` is None).
    async fn submit_post(&self, reference: Option<&str>, content: String) -> ApiResult<Message>;
    async fn submit_repost(&self, reference: &str) -> ApiResult<Message>;
    /// Submit a moderation message (like, block) against a reference and
    /// return the reference's updated meta.
    async fn submit_moderation(
        &self,
        reference: &str,
        subtype: ModerationSubtype,
    ) -> ApiResult<Meta>;
}

/// HTTP gateway for communicating with a Murmur relay server
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session_token: Option<String>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            session_token: None,
        }
    }

    /// Set the session token for authenticated requests
    pub fn set_session_token(&mut self, token: Option<String>) {
        self.session_token = token;
    }

    /// Helper to add session token to request if available
    fn add_auth_header(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.session_token {
            req.header("X-Session-Token", token)
        } else {
            req
        }
    }

    /// Helper to handle API responses
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            // Clean up HTML error messages (e.g., from nginx 404 pages)
            let clean_error = if error_text.contains("<html>") || error_text.contains("<!DOCTYPE") {
                format!(
                    "Server returned {} error. Please check the server URL.",
                    status.as_u16()
                )
            } else {
                error_text
            };

            match status.as_u16() {
                404 => Err(ApiError::NotFound(clean_error)),
                401 => Err(ApiError::Unauthorized(clean_error)),
                400 => Err(ApiError::BadRequest(clean_error)),
                _ => Err(ApiError::Api(clean_error)),
            }
        }
    }
}

#[async_trait]
impl Gateway for ApiClient {
    /// Look up the connected wallet session
    async fn get_session(&self) -> ApiResult<SessionResponse> {
        let url = format!("{}/v1/session", self.base_url);
        let req = self.add_auth_header(self.client.get(&url));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Get the ordered feed snapshot (top-level message ids)
    async fn get_feed(&self, limit: Option<i32>) -> ApiResult<Vec<MessageId>> {
        let mut url = format!("{}/v1/feed", self.base_url);
        if let Some(l) = limit {
            url.push_str(&format!("?limit={}", l));
        }
        let req = self.add_auth_header(self.client.get(&url));
        let response = req.send().await?;
        let feed: FeedResponse = self.handle_response(response).await?;
        Ok(feed.messages)
    }

    /// Get a single message by content-addressed id
    async fn get_message(&self, id: &str) -> ApiResult<Message> {
        let url = format!("{}/v1/messages/{}", self.base_url, id);
        let req = self.add_auth_header(self.client.get(&url));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Get aggregate counters and viewer flags for a message
    async fn get_meta(&self, id: &str) -> ApiResult<Meta> {
        let url = format!("{}/v1/messages/{}/meta", self.base_url, id);
        let req = self.add_auth_header(self.client.get(&url));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Get replies for a message
    async fn get_replies(&self, id: &str) -> ApiResult<Vec<Message>> {
        let url = format!("{}/v1/messages/{}/replies", self.base_url, id);
        let req = self.add_auth_header(self.client.get(&url));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// Look up a user by wallet address
    async fn get_user(&self, address: &str) -> ApiResult<User> {
        let url = format!("{}/v1/users/{}", self.base_url, address);
        let req = self.add_auth_header(self.client.get(&url));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn submit_post(&self, reference: Option<&str>, content: String) -> ApiResult<Message> {
        let url = format!("{}/v1/messages", self.base_url);
        let request = SubmitPostRequest {
            reference: reference.map(str::to_string),
            content,
        };
        let req = self.add_auth_header(self.client.post(&url).json(&request));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn submit_repost(&self, reference: &str) -> ApiResult<Message> {
        let url = format!("{}/v1/messages/{}/repost", self.base_url, reference);
        let request = SubmitRepostRequest {
            reference: reference.to_string(),
        };
        let req = self.add_auth_header(self.client.post(&url).json(&request));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn submit_moderation(
        &self,
        reference: &str,
        subtype: ModerationSubtype,
    ) -> ApiResult<Meta> {
        let url = format!("{}/v1/messages/{}/moderation", self.base_url, reference);
        let request = SubmitModerationRequest {
            reference: reference.to_string(),
            subtype,
        };
        let req = self.add_auth_header(self.client.post(&url).json(&request));
        let response = req.send().await?;
        self.handle_response(response).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

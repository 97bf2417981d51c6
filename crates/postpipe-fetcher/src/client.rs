//! HTTP client for the upstream posts API.
//!
//! One GET per call, bounded by the client's request timeout. Non-2xx
//! responses, timeouts and undecodable bodies surface as [`FetchError`];
//! nothing is retried.

use std::time::Duration;

use postpipe_core::AppConfig;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::FetchError;
use crate::types::PostItem;

/// Client for the posts collection endpoint.
///
/// Built once and reused so repeated pipeline runs share the connection pool.
pub struct PostsClient {
    client: Client,
    url: Url,
    timeout: Duration,
    limit: usize,
}

impl PostsClient {
    /// Creates a client for `posts_url` that keeps the first `limit` posts.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if `posts_url` does not parse, or
    /// [`FetchError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(
        posts_url: &str,
        timeout: Duration,
        user_agent: &str,
        limit: usize,
    ) -> Result<Self, FetchError> {
        let url = Url::parse(posts_url).map_err(|e| FetchError::InvalidUrl {
            url: posts_url.to_owned(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            url,
            timeout,
            limit,
        })
    }

    /// Creates a client from the `POSTPIPE_POSTS_URL`, `POSTPIPE_FETCH_*` and
    /// `POSTPIPE_USER_AGENT` settings.
    ///
    /// # Errors
    ///
    /// See [`PostsClient::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, FetchError> {
        Self::new(
            &config.posts_url,
            Duration::from_secs(config.fetch_timeout_secs),
            &config.user_agent,
            config.fetch_limit,
        )
    }

    #[must_use]
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Fetches the posts collection and returns its first `limit` entries.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Timeout`] if the request exceeds the configured timeout.
    /// - [`FetchError::UnexpectedStatus`] on any non-2xx response.
    /// - [`FetchError::Http`] on network or TLS failure.
    /// - [`FetchError::Deserialize`] if the body is not a JSON array.
    pub async fn fetch_posts(&self) -> Result<Vec<PostItem>, FetchError> {
        let response = self
            .client
            .get(self.url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.url.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let posts = parse_posts(&bytes, self.limit)?;
        tracing::debug!(url = %self.url, count = posts.len(), "fetched posts");
        Ok(posts)
    }

    fn map_request_error(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                url: self.url.to_string(),
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            FetchError::Http(error)
        }
    }
}

/// Decodes a posts array and keeps the first `limit` entries.
///
/// Only the outer array is checked here. Individual entries are passed
/// through as raw JSON.
pub(crate) fn parse_posts(bytes: &[u8], limit: usize) -> Result<Vec<PostItem>, FetchError> {
    let mut raw: Vec<Value> =
        serde_json::from_slice(bytes).map_err(|source| FetchError::Deserialize {
            context: "posts collection".to_string(),
            source,
        })?;
    raw.truncate(limit);

    Ok(raw.into_iter().map(PostItem::new).collect())
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

//! Completion notifications.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use postpipe_core::AppConfig;
use serde::Serialize;

const WEBHOOK_TIMEOUT_SECS: u64 = 10;

/// Signals that a pipeline run finished.
///
/// Returns whether the notification was delivered. Implementations never
/// error; a failed delivery is reported as `false`.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, address: Option<&str>) -> bool;
}

/// Writes a log line and reports success. The address is not validated.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, address: Option<&str>) -> bool {
        tracing::info!(address = address.unwrap_or("<none>"), "notification sent");
        true
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WebhookPayload<'a> {
    email: Option<&'a str>,
    sent_at: String,
}

/// POSTs a JSON payload to a fixed URL. One attempt, no retries.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    /// # Errors
    ///
    /// Returns [`reqwest::Error`] if the HTTP client cannot be built.
    pub fn new(url: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(WEBHOOK_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, address: Option<&str>) -> bool {
        let payload = WebhookPayload {
            email: address,
            sent_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        };

        match self.client.post(&self.url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!(address = address.unwrap_or("<none>"), "webhook notification sent");
                true
            }
            Ok(response) => {
                tracing::warn!(status = %response.status(), "webhook notification rejected");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "webhook notification failed");
                false
            }
        }
    }
}

/// Build the notifier selected in configuration: a webhook when
/// `POSTPIPE_NOTIFY_WEBHOOK_URL` is set, otherwise the log notifier.
///
/// # Errors
///
/// Returns [`reqwest::Error`] if the webhook HTTP client cannot be built.
pub fn build_notifier(config: &AppConfig) -> Result<Arc<dyn Notifier>, reqwest::Error> {
    match config.notify_webhook_url.as_deref() {
        Some(url) => Ok(Arc::new(WebhookNotifier::new(url)?)),
        None => Ok(Arc::new(LogNotifier)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn log_notifier_always_succeeds() {
        assert!(LogNotifier.notify(Some("ops@example.com")).await);
        assert!(LogNotifier.notify(None).await);
        assert!(LogNotifier.notify(Some("not an address")).await);
    }

    #[tokio::test]
    async fn webhook_notifier_posts_email() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .and(body_partial_json(serde_json::json!({ "email": "ops@example.com" })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = WebhookNotifier::new(&format!("{}/hook", server.uri())).unwrap();
        assert!(notifier.notify(Some("ops@example.com")).await);
    }

    #[tokio::test]
    async fn webhook_notifier_reports_rejection_as_false() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let notifier = WebhookNotifier::new(&server.uri()).unwrap();
        assert!(!notifier.notify(None).await);
    }
}

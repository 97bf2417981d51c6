//! Pipeline orchestration: fetch, analyze, store, notify.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use postpipe_core::AppConfig;
use postpipe_fetcher::{FetchError, PostItem, PostsClient};
use postpipe_sentiment::{build_analyzer, Analyzer};
use serde_json::Value;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::error::ItemError;
use crate::notify::{build_notifier, Notifier};
use crate::types::{PipelineItem, PipelineRequest, PipelineResponse};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to build posts client: {0}")]
    Fetcher(#[from] FetchError),

    #[error("failed to build notifier: {0}")]
    Notifier(#[from] reqwest::Error),
}

/// One configured pipeline. Holds no per-run state, so a single instance
/// is shared by every request.
pub struct Pipeline {
    posts: PostsClient,
    analyzer: Arc<dyn Analyzer>,
    pool: SqlitePool,
    notifier: Arc<dyn Notifier>,
}

impl Pipeline {
    #[must_use]
    pub fn new(
        posts: PostsClient,
        analyzer: Arc<dyn Analyzer>,
        pool: SqlitePool,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            posts,
            analyzer,
            pool,
            notifier,
        }
    }

    /// Wire the fetcher, analyzer and notifier selected in `config` around
    /// an existing pool.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if the posts URL is invalid or an HTTP client
    /// cannot be built.
    pub fn from_app_config(config: &AppConfig, pool: SqlitePool) -> Result<Self, SetupError> {
        let posts = PostsClient::from_app_config(config)?;
        let analyzer = build_analyzer(config.analyzer);
        let notifier = build_notifier(config)?;
        Ok(Self::new(posts, analyzer, pool, notifier))
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run one pass of the pipeline.
    ///
    /// A fetch failure ends the run immediately with a single error and no
    /// notification. Per-post failures are collected in `errors` and the
    /// remaining posts are still processed; the notifier is then called
    /// with the request's email whether or not it was provided.
    pub async fn run(&self, request: &PipelineRequest) -> PipelineResponse {
        let email = request.email.as_deref();

        let posts = match self.posts.fetch_posts().await {
            Ok(posts) => posts,
            Err(e) => {
                tracing::warn!(url = self.posts.url(), error = %e, "post fetch failed");
                return PipelineResponse {
                    items: Vec::new(),
                    notification_sent: false,
                    processed_at: now_rfc3339(),
                    errors: vec![e.to_string()],
                };
            }
        };

        tracing::info!(
            count = posts.len(),
            analyzer = self.analyzer.name(),
            "processing posts"
        );

        let mut items = Vec::with_capacity(posts.len());
        let mut errors = Vec::new();

        for (index, post) in posts.iter().enumerate() {
            match self.process_post(post).await {
                Ok(item) => items.push(item),
                Err(e) => {
                    tracing::warn!(index, post_id = ?post.id(), error = %e, "post failed");
                    errors.push(e.to_string());
                }
            }
        }

        let notification_sent = self.notifier.notify(email).await;

        tracing::info!(
            stored = items.len(),
            failed = errors.len(),
            notification_sent,
            "pipeline run complete"
        );

        PipelineResponse {
            items,
            notification_sent,
            processed_at: now_rfc3339(),
            errors,
        }
    }

    async fn process_post(&self, post: &PostItem) -> Result<PipelineItem, ItemError> {
        let original = body_text(post)?;
        let result = self.analyzer.analyze(original).await?;

        let timestamp = postpipe_db::persist_result(
            &self.pool,
            original,
            &result.analysis,
            result.sentiment.as_str(),
        )
        .await?;

        Ok(PipelineItem {
            original: original.to_owned(),
            analysis: result.analysis,
            sentiment: result.sentiment,
            stored: true,
            timestamp,
        })
    }
}

fn body_text(post: &PostItem) -> Result<&str, ItemError> {
    if !post.is_object() {
        return Err(ItemError::NotAnObject {
            kind: json_kind(post.as_value()),
        });
    }
    match post.body() {
        None => Err(ItemError::MissingBody),
        Some(Value::String(text)) => Ok(text),
        Some(other) => Err(ItemError::InvalidBody {
            kind: json_kind(other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

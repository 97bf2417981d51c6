use postpipe_sentiment::Sentiment;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /pipeline`. Both fields are optional and unvalidated.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PipelineRequest {
    #[serde(default)]
    pub email: Option<String>,
    /// Accepted for compatibility and never read, so any JSON value is allowed.
    #[serde(default)]
    pub source: Option<Value>,
}

/// One successfully analyzed and stored post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineItem {
    pub original: String,
    pub analysis: String,
    pub sentiment: Sentiment,
    pub stored: bool,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResponse {
    pub items: Vec<PipelineItem>,
    pub notification_sent: bool,
    pub processed_at: String,
    pub errors: Vec<String>,
}

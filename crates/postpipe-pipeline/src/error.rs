use postpipe_db::DbError;
use postpipe_sentiment::SentimentError;
use thiserror::Error;

/// Failure processing a single post. Recorded in the response; the run
/// continues with the next post.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("post must be a JSON object, got {kind}")]
    NotAnObject { kind: &'static str },

    #[error("post is missing `body` field")]
    MissingBody,

    #[error("post `body` must be a string, got {kind}")]
    InvalidBody { kind: &'static str },

    #[error(transparent)]
    Analysis(#[from] SentimentError),

    #[error(transparent)]
    Store(#[from] DbError),
}

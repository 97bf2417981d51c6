use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    /// The analysis backend could not produce a result for the text.
    #[error("analysis backend error: {0}")]
    Backend(String),
}

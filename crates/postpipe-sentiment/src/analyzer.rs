//! Analyzer strategies.

use std::sync::Arc;

use async_trait::async_trait;
use postpipe_core::AnalyzerKind;

use crate::error::SentimentError;
use crate::scorer::lexicon_score;
use crate::types::{AnalysisResult, Sentiment};

/// A text classification backend.
///
/// Implementations must be safe to share across concurrent pipeline runs.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Classify one post body.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError`] if the backend cannot produce a result.
    /// The rule-based analyzers in this crate never fail.
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, SentimentError>;
}

/// Keyword rules, checked in order: `love` → enthusiastic, `bad` → critical,
/// otherwise objective. Matching is a case-insensitive substring test, so
/// "glove" counts as `love`.
#[must_use]
pub fn classify(text: &str) -> AnalysisResult {
    let lowered = text.to_lowercase();

    let sentiment = if lowered.contains("love") {
        Sentiment::Enthusiastic
    } else if lowered.contains("bad") {
        Sentiment::Critical
    } else {
        Sentiment::Objective
    };

    AnalysisResult::new(sentiment)
}

/// Default strategy backed by [`classify`].
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordAnalyzer;

#[async_trait]
impl Analyzer for KeywordAnalyzer {
    fn name(&self) -> &'static str {
        "keyword"
    }

    async fn analyze(&self, text: &str) -> Result<AnalysisResult, SentimentError> {
        Ok(classify(text))
    }
}

/// Strategy backed by [`lexicon_score`]: a positive score is enthusiastic,
/// a negative one critical, exactly zero objective.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconAnalyzer;

#[async_trait]
impl Analyzer for LexiconAnalyzer {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    async fn analyze(&self, text: &str) -> Result<AnalysisResult, SentimentError> {
        let score = lexicon_score(text);
        tracing::debug!(score, "lexicon score");

        let sentiment = if score > 0.0 {
            Sentiment::Enthusiastic
        } else if score < 0.0 {
            Sentiment::Critical
        } else {
            Sentiment::Objective
        };

        Ok(AnalysisResult::new(sentiment))
    }
}

/// Build the analyzer selected in configuration.
#[must_use]
pub fn build_analyzer(kind: AnalyzerKind) -> Arc<dyn Analyzer> {
    match kind {
        AnalyzerKind::Keyword => Arc::new(KeywordAnalyzer),
        AnalyzerKind::Lexicon => Arc::new(LexiconAnalyzer),
    }
}

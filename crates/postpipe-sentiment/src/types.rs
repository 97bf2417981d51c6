use serde::{Deserialize, Serialize};

/// Descriptive text attached to every analyzed post, independent of content.
pub const ANALYSIS_TEXT: &str = "This post discusses a topic in an informative and neutral tone. \
The content appears to describe ideas or opinions.";

/// Three-way sentiment tag produced by an [`Analyzer`](crate::Analyzer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Enthusiastic,
    Critical,
    Objective,
}

impl Sentiment {
    /// Lowercase label as stored in the `results` table.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Enthusiastic => "enthusiastic",
            Sentiment::Critical => "critical",
            Sentiment::Objective => "objective",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one analyzer call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub analysis: String,
    pub sentiment: Sentiment,
}

impl AnalysisResult {
    #[must_use]
    pub fn new(sentiment: Sentiment) -> Self {
        Self {
            analysis: ANALYSIS_TEXT.to_string(),
            sentiment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_serializes_lowercase() {
        let json = serde_json::to_string(&Sentiment::Enthusiastic).expect("serialize");
        assert_eq!(json, "\"enthusiastic\"");
    }

    #[test]
    fn sentiment_display_matches_stored_label() {
        assert_eq!(Sentiment::Critical.to_string(), "critical");
        assert_eq!(Sentiment::Objective.as_str(), "objective");
    }

    #[test]
    fn analysis_text_is_single_spaced() {
        assert!(ANALYSIS_TEXT.starts_with("This post discusses a topic"));
        assert!(ANALYSIS_TEXT.contains("tone. The content"));
    }
}

//! Text classification for the post pipeline.
//!
//! Every strategy implements [`Analyzer`] so the orchestrator can swap the
//! keyword rules for another backend without changing its own flow. The
//! `analysis` text is a fixed description shared by all strategies.

pub mod analyzer;
pub mod error;
pub mod scorer;
pub mod types;

pub use analyzer::{build_analyzer, classify, Analyzer, KeywordAnalyzer, LexiconAnalyzer};
pub use error::SentimentError;
pub use scorer::lexicon_score;
pub use types::{AnalysisResult, Sentiment, ANALYSIS_TEXT};

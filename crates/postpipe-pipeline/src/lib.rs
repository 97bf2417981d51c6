//! Post pipeline orchestration.
//!
//! Fetches posts, classifies each body, stores the results and sends a
//! completion notification. Failures become data in [`PipelineResponse`]
//! rather than errors returned to the caller.

pub mod error;
pub mod notify;
pub mod pipeline;
pub mod types;

pub use error::ItemError;
pub use notify::{build_notifier, LogNotifier, Notifier, WebhookNotifier};
pub use pipeline::{Pipeline, SetupError};
pub use types::{PipelineItem, PipelineRequest, PipelineResponse};

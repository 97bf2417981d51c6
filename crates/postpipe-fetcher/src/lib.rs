pub mod client;
pub mod error;
pub mod types;

pub use client::PostsClient;
pub use error::FetchError;
pub use types::PostItem;

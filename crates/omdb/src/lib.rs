mod client;
mod error;
pub mod models;
mod search;

pub use client::{ApiKey, OmdbClient};
pub use error::OmdbError;
pub use models::{SearchItem, SearchResponse};
pub use search::PAGE_SIZE;

pub type Result<T> = std::result::Result<T, OmdbError>;

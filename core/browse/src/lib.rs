//! Search browsing session
//!
//! Drives a catalog search as the user types and scrolls:
//!
//! - a debounced query with stale-response suppression
//! - infinite-scroll (append) or explicit pagination (replace)
//! - a bounded per-session page cache keyed by query, mode and page
//! - client-side filters over what has been loaded
//!
//! # Example
//!
//! ```ignore
//! use browse::{create_browse_session, Settings};
//!
//! let handle = create_browse_session(&Settings::default())?;
//! handle.set_query("dune").await?;
//! let mut snapshots = handle.subscribe();
//! snapshots.changed().await?;
//! ```

mod actor;
mod cache;
mod collection;
mod config;
mod error;
mod filter;
mod models;
mod state;

use std::sync::Arc;

pub use actor::{create_browse_actor, create_browse_actor_with_cache, BrowseHandle, BrowseMessage};
pub use cache::{CacheKey, QueryCache};
pub use collection::{
    add_to_collection, AddOutcome, Collection, CollectionError, CollectionStore, JsonFileStore,
    MemoryStore,
};
pub use config::{
    build_http_client, HttpSettings, OmdbSettings, SearchSettings, Settings, SettingsError,
};
pub use error::BrowseError;
pub use filter::ResultFilter;
pub use models::{BrowseMode, BrowseSnapshot, Phase};
pub use state::{BrowseState, FetchTicket};

/// Build the default catalog chain from settings and start a session on it.
///
/// Must be called from within a tokio runtime.
pub fn create_browse_session(settings: &Settings) -> Result<BrowseHandle, reqwest::Error> {
    let http_client = build_http_client(&settings.http)?;
    let aggregator = catalog::Aggregator::from_http_client(http_client, settings.omdb.shared_key());
    Ok(create_browse_actor(Arc::new(aggregator), &settings.search))
}

use catalog::{MediaType, SearchEnvelope, Source};
use std::sync::Arc;
use tokio::sync::oneshot;

use crate::state::FetchTicket;
use crate::{BrowseMode, BrowseSnapshot};

/// Browse actor message types
pub enum BrowseMessage {
    /// Search text edited; applied after the debounce delay
    SetQuery { query: String },

    /// Switch browsing model (resets and re-fetches)
    SetMode { mode: BrowseMode },

    ToggleMode,

    /// Infinite-scroll sentinel entered the viewport
    SentinelVisible,

    NextPage,

    PrevPage,

    GoToPage { page: u32 },

    SetMediaFilter { media_type: Option<MediaType> },

    SetSourceFilter { source: Option<Source> },

    ClearFilters,

    /// Clear the query, results and cache
    Reset,

    GetSnapshot { reply: oneshot::Sender<BrowseSnapshot> },

    /// Stop the actor
    Shutdown,
}

/// A finished fetch, reported back to the actor by the task that ran it
pub(crate) struct FetchCompletion {
    pub ticket: FetchTicket,
    pub envelope: Arc<SearchEnvelope>,
}

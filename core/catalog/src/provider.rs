//! Catalog provider trait definition

use async_trait::async_trait;

use crate::{ProviderError, SearchEnvelope, SearchQuery};

/// Unified catalog provider trait
///
/// Each upstream catalog implements `try_search`; callers use `search`, which
/// never fails.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch one page, reporting upstream failures as errors.
    async fn try_search(&self, query: &SearchQuery) -> Result<SearchEnvelope, ProviderError>;

    /// Fetch one page, degrading every failure to an empty envelope.
    ///
    /// A missing credential yields `total_results = Some(0)`; any other failure
    /// yields an unknown total.
    async fn search(&self, query: &SearchQuery) -> SearchEnvelope {
        match self.try_search(query).await {
            Ok(envelope) => envelope,
            Err(e) if e.is_misconfigured() => {
                tracing::debug!("{} skipped: {}", self.name(), e);
                SearchEnvelope::empty(self.page_size(), Some(0))
            }
            Err(e) => {
                tracing::warn!(
                    provider = self.name(),
                    keyword = %query.keyword,
                    page = query.page,
                    "Search failed, treating as no results: {}",
                    e
                );
                SearchEnvelope::empty(self.page_size(), None)
            }
        }
    }

    /// Number of results the upstream returns per page
    fn page_size(&self) -> u32;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

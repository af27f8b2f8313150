//! Source selection across catalog providers

use std::sync::Arc;

use async_trait::async_trait;
use omdb::ApiKey;

use crate::{
    CatalogProvider, CodeType, GoogleBooksProvider, OmdbProvider, OpenLibraryProvider,
    SearchEnvelope, SearchQuery,
};

/// Anything that can answer a paged media search
#[async_trait]
pub trait MediaSearch: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> SearchEnvelope;
}

/// Strict fallback chain over the catalog providers
///
/// Only one provider's page is ever returned; which provider answers may
/// change from one page of the same query to the next.
pub struct Aggregator {
    identifier: Arc<dyn CatalogProvider>,
    primary: Arc<dyn CatalogProvider>,
    secondary: Arc<dyn CatalogProvider>,
}

impl Aggregator {
    pub fn new(
        identifier: Arc<dyn CatalogProvider>,
        primary: Arc<dyn CatalogProvider>,
        secondary: Arc<dyn CatalogProvider>,
    ) -> Self {
        Self {
            identifier,
            primary,
            secondary,
        }
    }

    /// Build the default chain (Open Library, Google Books, OMDb) on one HTTP client.
    pub fn from_http_client(http_client: reqwest::Client, omdb_api_key: ApiKey) -> Self {
        Self::new(
            Arc::new(OpenLibraryProvider::with_http_client(http_client.clone())),
            Arc::new(GoogleBooksProvider::with_http_client(http_client.clone())),
            Arc::new(OmdbProvider::with_http_client(http_client, omdb_api_key)),
        )
    }
}

#[async_trait]
impl MediaSearch for Aggregator {
    async fn search(&self, query: &SearchQuery) -> SearchEnvelope {
        if CodeType::detect(&query.keyword) == CodeType::Isbn {
            let envelope = self.identifier.search(query).await;
            if let Some(record) = envelope.results.into_iter().next() {
                tracing::debug!(keyword = %query.keyword, "Identifier lookup matched");
                return SearchEnvelope::single(record);
            }
        }

        for provider in [&self.primary, &self.secondary] {
            let envelope = provider.search(query).await;
            if !envelope.is_empty() {
                tracing::debug!(
                    keyword = %query.keyword,
                    page = query.page,
                    provider = provider.name(),
                    count = envelope.results.len(),
                    "Search answered"
                );
                return envelope;
            }
        }

        SearchEnvelope::none_found()
    }
}

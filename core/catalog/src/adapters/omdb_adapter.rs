//! OMDb catalog provider adapter

use std::sync::Arc;

use async_trait::async_trait;
use omdb::{ApiKey, OmdbClient, SearchItem, SearchResponse, PAGE_SIZE};

use crate::{
    CatalogProvider, MediaType, NormalizedRecord, ProviderError, SearchEnvelope, SearchQuery,
    Source,
};

/// Secondary free-text provider
///
/// Inert while no API key is configured.
pub struct OmdbProvider {
    client: Arc<OmdbClient>,
}

impl OmdbProvider {
    pub fn new(client: Arc<OmdbClient>) -> Self {
        Self { client }
    }

    /// Create a new OmdbProvider with a reqwest Client
    pub fn with_http_client(http_client: reqwest::Client, api_key: ApiKey) -> Self {
        Self {
            client: Arc::new(OmdbClient::with_client(http_client, api_key)),
        }
    }
}

#[async_trait]
impl CatalogProvider for OmdbProvider {
    async fn try_search(&self, query: &SearchQuery) -> Result<SearchEnvelope, ProviderError> {
        if !self.client.is_configured() {
            return Err(ProviderError::Misconfigured("omdb api key"));
        }

        let response = self.client.search(&query.keyword, query.page).await?;
        Ok(envelope_from_search(response, &query.keyword, query.page))
    }

    fn page_size(&self) -> u32 {
        PAGE_SIZE
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}

fn envelope_from_search(response: SearchResponse, keyword: &str, page: u32) -> SearchEnvelope {
    if !response.is_success() {
        tracing::debug!(
            keyword,
            "OMDb reported no results: {}",
            response.error.as_deref().unwrap_or("unknown")
        );
        return SearchEnvelope::empty(PAGE_SIZE, Some(0));
    }

    let total_results = response.total();
    let returned = response.search.len();
    let has_more = match total_results {
        Some(total) => u64::from(page) < total.div_ceil(u64::from(PAGE_SIZE)),
        None => returned == PAGE_SIZE as usize,
    };

    SearchEnvelope {
        results: response
            .search
            .into_iter()
            .map(|item| record_from_item(item, keyword))
            .collect(),
        has_more,
        total_results,
        page_size: PAGE_SIZE,
    }
}

fn record_from_item(item: SearchItem, keyword: &str) -> NormalizedRecord {
    NormalizedRecord {
        cover: item.poster_url().unwrap_or_default().to_string(),
        id: item.imdb_id,
        title: item.title,
        creators: Vec::new(),
        year: item.year,
        media_type: MediaType::Movie,
        source: Source::Omdb,
        code: keyword.to_string(),
    }
}

//! Google Books catalog provider adapter

use std::sync::Arc;

use async_trait::async_trait;
use googlebooks::{GoogleBooksClient, OrderBy, Volume, VolumesParams, VolumesResponse, MAX_RESULTS};

use crate::{
    CatalogProvider, MediaType, NormalizedRecord, ProviderError, SearchEnvelope, SearchQuery,
    SortOrder, Source,
};

/// Primary free-text provider
///
/// Pages are fixed windows of twenty volumes addressed by zero-based offset.
pub struct GoogleBooksProvider {
    client: Arc<GoogleBooksClient>,
}

impl GoogleBooksProvider {
    pub fn new(client: Arc<GoogleBooksClient>) -> Self {
        Self { client }
    }

    /// Create a new GoogleBooksProvider with a reqwest Client
    pub fn with_http_client(http_client: reqwest::Client) -> Self {
        Self {
            client: Arc::new(GoogleBooksClient::with_client(http_client)),
        }
    }
}

#[async_trait]
impl CatalogProvider for GoogleBooksProvider {
    async fn try_search(&self, query: &SearchQuery) -> Result<SearchEnvelope, ProviderError> {
        let offset = window_offset(query.page);
        let params = VolumesParams {
            query: query.keyword.clone(),
            start_index: offset,
            max_results: MAX_RESULTS,
            order_by: match query.sort {
                SortOrder::Relevance => OrderBy::Relevance,
                SortOrder::Newest => OrderBy::Newest,
            },
        };

        let response = self.client.search_volumes(&params).await?;
        Ok(envelope_from_volumes(response, &query.keyword, offset))
    }

    fn page_size(&self) -> u32 {
        MAX_RESULTS
    }

    fn name(&self) -> &'static str {
        "googlebooks"
    }
}

fn window_offset(page: u32) -> u32 {
    page.saturating_sub(1).saturating_mul(MAX_RESULTS)
}

/// Build an envelope for the window starting at `offset`.
///
/// Without a reported total, a full window is taken to mean more may follow.
fn envelope_from_volumes(response: VolumesResponse, keyword: &str, offset: u32) -> SearchEnvelope {
    let returned = response.items.len() as u64;
    let has_more = match response.total_items {
        Some(total) => u64::from(offset) + returned < total,
        None => returned == u64::from(MAX_RESULTS),
    };

    SearchEnvelope {
        results: response
            .items
            .into_iter()
            .map(|volume| record_from_volume(volume, keyword))
            .collect(),
        has_more,
        total_results: response.total_items,
        page_size: MAX_RESULTS,
    }
}

fn record_from_volume(volume: Volume, keyword: &str) -> NormalizedRecord {
    let info = volume.volume_info;
    NormalizedRecord {
        id: volume.id,
        title: info.title.unwrap_or_default(),
        creators: info.authors,
        year: info.published_date.unwrap_or_default(),
        cover: info
            .image_links
            .and_then(|links| links.thumbnail)
            .unwrap_or_default(),
        media_type: MediaType::Book,
        source: Source::GoogleBooks,
        code: keyword.to_string(),
    }
}

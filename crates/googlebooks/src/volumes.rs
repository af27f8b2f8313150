use crate::models::VolumesResponse;
use crate::GoogleBooksClient;

/// Largest window the volumes endpoint accepts per request.
pub const MAX_RESULTS: u32 = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderBy {
    #[default]
    Relevance,
    Newest,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Newest => "newest",
        }
    }
}

#[derive(Debug, Clone)]
pub struct VolumesParams {
    pub query: String,
    /// Zero-based offset of the first result.
    pub start_index: u32,
    pub max_results: u32,
    pub order_by: OrderBy,
}

impl VolumesParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            start_index: 0,
            max_results: MAX_RESULTS,
            order_by: OrderBy::default(),
        }
    }
}

impl GoogleBooksClient {
    /// Full-text volume search
    /// GET /volumes?q={query}&maxResults={n}&startIndex={offset}&orderBy={order}
    pub async fn search_volumes(&self, params: &VolumesParams) -> crate::Result<VolumesResponse> {
        let url = self.url("/volumes");
        let max_results = params.max_results.min(MAX_RESULTS).to_string();
        let start_index = params.start_index.to_string();

        tracing::debug!(
            query = %params.query,
            start_index = params.start_index,
            "Searching Google Books volumes"
        );

        let response = self
            .client()
            .get(&url)
            .query(&[
                ("q", params.query.as_str()),
                ("maxResults", max_results.as_str()),
                ("startIndex", start_index.as_str()),
                ("orderBy", params.order_by.as_str()),
            ])
            .send()
            .await?;

        self.handle_response(response).await
    }
}

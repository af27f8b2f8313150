use crate::models::SearchResponse;
use crate::OmdbClient;

/// OMDb always returns at most ten items per page.
pub const PAGE_SIZE: u32 = 10;

impl OmdbClient {
    /// Title search
    /// GET /?s={query}&page={page}&apikey={key}
    ///
    /// `page` is 1-based. Fails with `MissingApiKey` before any request is
    /// made when no key is configured.
    pub async fn search(&self, query: &str, page: u32) -> crate::Result<SearchResponse> {
        let api_key = self.api_key()?;
        let url = self.url("/");
        let page = page.max(1).to_string();

        tracing::debug!(query, page = %page, "Searching OMDb");

        let response = self
            .client()
            .get(&url)
            .query(&[
                ("s", query),
                ("page", page.as_str()),
                ("apikey", api_key.as_str()),
            ])
            .send()
            .await?;

        self.handle_response(response).await
    }
}

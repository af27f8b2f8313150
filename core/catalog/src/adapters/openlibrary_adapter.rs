//! Open Library identifier provider adapter

use std::sync::Arc;

use async_trait::async_trait;
use openlibrary::{BookData, OpenLibraryClient};

use crate::{
    clean_code, CatalogProvider, CodeType, MediaType, NormalizedRecord, ProviderError,
    SearchEnvelope, SearchQuery, Source, DEFAULT_PAGE_SIZE,
};

/// ISBN lookup provider
///
/// Returns at most one record. Input that does not clean to a 10 or 13
/// character ISBN is answered with an empty envelope without a request.
pub struct OpenLibraryProvider {
    client: Arc<OpenLibraryClient>,
}

impl OpenLibraryProvider {
    pub fn new(client: Arc<OpenLibraryClient>) -> Self {
        Self { client }
    }

    /// Create a new OpenLibraryProvider with a reqwest Client
    pub fn with_http_client(http_client: reqwest::Client) -> Self {
        Self {
            client: Arc::new(OpenLibraryClient::with_client(http_client)),
        }
    }
}

#[async_trait]
impl CatalogProvider for OpenLibraryProvider {
    async fn try_search(&self, query: &SearchQuery) -> Result<SearchEnvelope, ProviderError> {
        let isbn = clean_code(&query.keyword);
        if CodeType::detect(&isbn) != CodeType::Isbn {
            return Ok(SearchEnvelope::empty(DEFAULT_PAGE_SIZE, Some(0)));
        }

        let book = self.client.get_by_isbn(&isbn).await?;
        Ok(envelope_from_book(&isbn, book))
    }

    fn page_size(&self) -> u32 {
        DEFAULT_PAGE_SIZE
    }

    fn name(&self) -> &'static str {
        "openlibrary"
    }
}

/// A missing bibkey means the upstream has no edition for this ISBN.
fn envelope_from_book(isbn: &str, book: Option<BookData>) -> SearchEnvelope {
    match book {
        Some(book) => SearchEnvelope::single(record_from_book(isbn, book)),
        None => SearchEnvelope::empty(DEFAULT_PAGE_SIZE, Some(0)),
    }
}

fn record_from_book(isbn: &str, book: BookData) -> NormalizedRecord {
    NormalizedRecord {
        id: isbn.to_string(),
        title: book.title.unwrap_or_default(),
        creators: book
            .authors
            .into_iter()
            .map(|a| a.name)
            .filter(|name| !name.trim().is_empty())
            .collect(),
        year: book.publish_date.unwrap_or_default(),
        cover: book.cover.and_then(|c| c.medium).unwrap_or_default(),
        media_type: MediaType::Book,
        source: Source::OpenLibrary,
        code: isbn.to_string(),
    }
}

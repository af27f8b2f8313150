use serde::{Deserialize, Serialize};

/// Page size assumed when an envelope does not come from a paged upstream.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Kind of media a record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MediaType {
    Book,
    Movie,
}

/// Upstream catalog a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// ISBN-keyed edition lookup
    OpenLibrary,
    /// Free-text book catalog with offset paging
    GoogleBooks,
    /// Free-text movie catalog with ten results per page
    #[serde(rename = "OMDb")]
    Omdb,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenLibrary => "OpenLibrary",
            Self::GoogleBooks => "GoogleBooks",
            Self::Omdb => "OMDb",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A search hit in the shape shared by every source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    /// Upstream identifier, unique only within `source`
    pub id: String,
    pub title: String,
    pub creators: Vec<String>,
    /// Free-form release date or year, as the upstream reports it
    pub year: String,
    /// Cover image URL, empty when unavailable
    pub cover: String,
    pub media_type: MediaType,
    pub source: Source,
    /// ISBN or raw query that produced this record
    pub code: String,
}

impl NormalizedRecord {
    /// Identity of the record across sources.
    pub fn key(&self) -> (Source, &str) {
        (self.source, self.id.as_str())
    }
}

/// Result of one page fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEnvelope {
    pub results: Vec<NormalizedRecord>,
    pub has_more: bool,
    /// Upstream-reported total; `None` when unknown
    pub total_results: Option<u64>,
    /// Page size actually used for `results`
    pub page_size: u32,
}

impl SearchEnvelope {
    pub fn empty(page_size: u32, total_results: Option<u64>) -> Self {
        Self {
            results: Vec::new(),
            has_more: false,
            total_results,
            page_size,
        }
    }

    /// Canonical "nothing matched anywhere" envelope.
    pub fn none_found() -> Self {
        Self::empty(DEFAULT_PAGE_SIZE, Some(0))
    }

    /// Exact identifier hit: one record, no further pages.
    pub fn single(record: NormalizedRecord) -> Self {
        Self {
            results: vec![record],
            has_more: false,
            total_results: Some(1),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Result ordering hint; only honored by sources that support it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Relevance,
    Newest,
}

/// Search request passed to providers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    /// 1-based page number
    pub page: u32,
    pub sort: SortOrder,
}

impl SearchQuery {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            page: 1,
            sort: SortOrder::default(),
        }
    }

    /// Set the page, clamped to at least 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }
}

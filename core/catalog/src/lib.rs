//! Unified catalog search layer
//!
//! This crate maps three heterogeneous upstream catalogs onto one record
//! shape and decides which of them answers a given query.
//!
//! # Architecture
//!
//! ```text
//!                ┌──────────────────────────────┐
//!                │          Aggregator          │
//!                │ isbn? → identifier, else     │
//!                │ primary → secondary → empty  │
//!                └──────────────────────────────┘
//!                               │
//!             ┌─────────────────┼─────────────────┐
//!             ▼                 ▼                 ▼
//!   ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────┐
//!   │ OpenLibrary      │ │ GoogleBooks      │ │ Omdb             │
//!   │ (ISBN lookup)    │ │ (offset, 20/pg)  │ │ (1-based, 10/pg) │
//!   └──────────────────┘ └──────────────────┘ └──────────────────┘
//!             └──────── CatalogProvider trait ────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use catalog::{Aggregator, MediaSearch, SearchQuery};
//!
//! let aggregator = Aggregator::from_http_client(client, omdb_key);
//! let envelope = aggregator.search(&SearchQuery::new("dune").with_page(2)).await;
//! ```

mod adapters;
mod aggregator;
mod code;
mod error;
mod models;
mod provider;

pub use adapters::{GoogleBooksProvider, OmdbProvider, OpenLibraryProvider};
pub use aggregator::{Aggregator, MediaSearch};
pub use code::{clean_code, CodeType};
pub use error::ProviderError;
pub use models::{
    MediaType, NormalizedRecord, SearchEnvelope, SearchQuery, SortOrder, Source, DEFAULT_PAGE_SIZE,
};
pub use provider::CatalogProvider;

pub use omdb::ApiKey;

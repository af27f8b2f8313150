//! Catalog provider adapters for the upstream sources

mod googlebooks_adapter;
mod omdb_adapter;
mod openlibrary_adapter;

pub use googlebooks_adapter::GoogleBooksProvider;
pub use omdb_adapter::OmdbProvider;
pub use openlibrary_adapter::OpenLibraryProvider;

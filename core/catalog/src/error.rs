//! Error types for catalog provider operations

/// Errors that can occur inside a catalog provider
///
/// These never cross `CatalogProvider::search`; they are logged and folded
/// into an empty envelope there.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Provider is not configured: {0}")]
    Misconfigured(&'static str),

    #[error("Open Library error: {0}")]
    OpenLibrary(#[from] openlibrary::OpenLibraryError),

    #[error("Google Books error: {0}")]
    GoogleBooks(#[from] googlebooks::GoogleBooksError),

    #[error("OMDb error: {0}")]
    Omdb(#[from] omdb::OmdbError),
}

impl ProviderError {
    /// Whether the upstream was never contacted because a credential is missing.
    pub fn is_misconfigured(&self) -> bool {
        matches!(
            self,
            Self::Misconfigured(_) | Self::Omdb(omdb::OmdbError::MissingApiKey)
        )
    }
}

mod books;
mod client;
mod error;
pub mod models;

pub use client::OpenLibraryClient;
pub use error::OpenLibraryError;
pub use models::{Author, BookData, Cover};

pub type Result<T> = std::result::Result<T, OpenLibraryError>;

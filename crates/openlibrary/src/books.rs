use crate::models::{BookData, BooksResponse};
use crate::OpenLibraryClient;

impl OpenLibraryClient {
    /// Look up a single edition by ISBN
    /// GET /api/books?bibkeys=ISBN:{isbn}&format=json&jscmd=data
    ///
    /// Returns `None` when the response does not contain the requested bibkey.
    pub async fn get_by_isbn(&self, isbn: &str) -> crate::Result<Option<BookData>> {
        let bibkey = bibkey(isbn);
        let url = self.url("/api/books");

        tracing::debug!(isbn, "Looking up Open Library edition");

        let response = self
            .client()
            .get(&url)
            .query(&[
                ("bibkeys", bibkey.as_str()),
                ("format", "json"),
                ("jscmd", "data"),
            ])
            .send()
            .await?;

        let mut books: BooksResponse = self.handle_response(response).await?;
        Ok(books.remove(&bibkey))
    }
}

fn bibkey(isbn: &str) -> String {
    format!("ISBN:{}", isbn)
}

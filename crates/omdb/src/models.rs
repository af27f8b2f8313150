use serde::{Deserialize, Serialize};

/// Response of `GET /?s=`.
///
/// OMDb reports "nothing found" as a successful HTTP response with
/// `"Response": "False"` and an `Error` message instead of an empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "Response", default)]
    pub response: String,
    #[serde(rename = "Search", default)]
    pub search: Vec<SearchItem>,
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl SearchResponse {
    pub fn is_success(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }

    /// Parsed `totalResults`, if present and numeric.
    pub fn total(&self) -> Option<u64> {
        self.total_results
            .as_deref()
            .and_then(|s| s.trim().parse().ok())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchItem {
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
}

impl SearchItem {
    /// Poster URL, with OMDb's `"N/A"` placeholder treated as absent.
    pub fn poster_url(&self) -> Option<&str> {
        match self.poster.as_str() {
            "" | "N/A" => None,
            url => Some(url),
        }
    }
}

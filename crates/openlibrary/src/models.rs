use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Response of `GET /api/books?jscmd=data`, keyed by bibkey (`ISBN:<code>`).
///
/// Unknown bibkeys are simply absent from the map.
pub type BooksResponse = HashMap<String, BookData>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub cover: Option<Cover>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cover {
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

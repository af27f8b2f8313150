use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::Client;

use crate::error::OmdbError;

const BASE_URL: &str = "https://www.omdbapi.com";

/// Shared API key that can be updated at runtime.
pub type ApiKey = Arc<RwLock<String>>;

pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: ApiKey,
}

impl OmdbClient {
    pub fn with_client(client: Client, api_key: ApiKey) -> Self {
        Self {
            client,
            base_url: BASE_URL.to_string(),
            api_key,
        }
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>, api_key: ApiKey) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Whether a non-blank API key is currently set.
    pub fn is_configured(&self) -> bool {
        !self.api_key.read().trim().is_empty()
    }

    /// Get the current API key
    pub(crate) fn api_key(&self) -> crate::Result<String> {
        let key = self.api_key.read().trim().to_string();
        if key.is_empty() {
            return Err(OmdbError::MissingApiKey);
        }
        Ok(key)
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> crate::Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(OmdbError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }
        decode(&body)
    }
}

pub(crate) fn decode<T: serde::de::DeserializeOwned>(body: &str) -> crate::Result<T> {
    let deserializer = &mut serde_json::Deserializer::from_str(body);
    serde_path_to_error::deserialize(deserializer).map_err(|e| OmdbError::Json {
        path: e.path().to_string(),
        source: e.into_inner(),
    })
}

use crate::internal::filters::FilterState;
use crate::internal::models::{Article, BookmarkRequest};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";

/// Failure modes of a backend request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, body read).
    #[error("network failure for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP error {status} for {url}")]
    Http { url: String, status: StatusCode },
    /// The body was not the JSON list the endpoint promises.
    #[error("invalid response format from {url}: {detail}")]
    Format { url: String, detail: String },
}

/// HTTP client for the news backend.
///
/// All calls are async and return [`ApiError`] so callers can log the
/// precise failure while treating every kind the same way in the UI.
#[derive(Clone)]
pub struct ApiService {
    client: Client,
    base_url: String,
}

impl ApiService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a URL and require a JSON array of `T` in the body.
    async fn get_list<T>(&self, url: &str, query: &[(&str, String)]) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| ApiError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        tracing::debug!(%url, %status, "response received");
        if !status.is_success() {
            return Err(ApiError::Http {
                url: url.to_string(),
                status,
            });
        }

        let bytes = resp.bytes().await.map_err(|source| ApiError::Network {
            url: url.to_string(),
            source,
        })?;

        let body: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| ApiError::Format {
                url: url.to_string(),
                detail: e.to_string(),
            })?;

        if !body.is_array() {
            tracing::error!(%url, body = %body, "expected a JSON list");
            return Err(ApiError::Format {
                url: url.to_string(),
                detail: "expected a JSON list".to_string(),
            });
        }

        serde_json::from_value(body).map_err(|e| ApiError::Format {
            url: url.to_string(),
            detail: e.to_string(),
        })
    }

    /// Search articles with the given filters.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_articles(&self, filters: &FilterState) -> Result<Vec<Article>, ApiError> {
        let url = self.endpoint("/api/articles");
        let articles: Vec<Article> = self.get_list(&url, &filters.query_pairs()).await?;
        tracing::info!(count = articles.len(), "fetched articles");
        Ok(articles)
    }

    /// Fetch the bookmarked subset. Filters do not apply here.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_bookmarks(&self) -> Result<Vec<Article>, ApiError> {
        let url = self.endpoint("/api/bookmarks");
        let articles: Vec<Article> = self.get_list(&url, &[]).await?;
        tracing::info!(count = articles.len(), "fetched bookmarks");
        Ok(articles)
    }

    /// Load the article list for the current mode.
    pub async fn load_articles(
        &self,
        filters: &FilterState,
        bookmarks_mode: bool,
    ) -> Result<Vec<Article>, ApiError> {
        if bookmarks_mode {
            self.fetch_bookmarks().await
        } else {
            self.fetch_articles(filters).await
        }
    }

    pub async fn fetch_categories(&self) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint("/api/categories");
        self.get_list(&url, &[]).await
    }

    pub async fn fetch_sources(&self) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint("/api/sources");
        self.get_list(&url, &[]).await
    }

    /// Remove the bookmark if `currently_bookmarked`, create it otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_bookmark(
        &self,
        article_id: u32,
        currently_bookmarked: bool,
    ) -> Result<(), ApiError> {
        let url = self.endpoint("/api/bookmarks");
        let method = if currently_bookmarked {
            Method::DELETE
        } else {
            Method::POST
        };

        let resp = self
            .client
            .request(method, &url)
            .json(&BookmarkRequest { article_id })
            .send()
            .await
            .map_err(|source| ApiError::Network {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Http { url, status });
        }
        Ok(())
    }
}

impl Default for ApiService {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

//! HTTP implementation of [`UserDirectory`] against the SkillSwap REST API.
//!
//! Routes:
//! - `GET /users/browse?page=&page_size=[&skill_filter=][&location_filter=]`
//! - `GET /users/search?q=&limit=`
//! - `GET /skills/popular`

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{Result, ScoutError};
use crate::model::{BrowsePage, PopularSkills, SearchResults};
use crate::service::{BrowseRequest, UserDirectory, validate_search_limit};

/// Directory client over HTTP.
pub struct HttpDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDirectory {
    /// Create a client for the directory at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("skillscout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| ScoutError::Service(format!("build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T> {
        let url = format!("{}{path_and_query}", self.base_url);
        tracing::debug!(%url, "directory request");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScoutError::Service(format!(
                "{url} returned {status}"
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| ScoutError::Decode(format!("{url}: {err}")))
    }
}

#[async_trait]
impl UserDirectory for HttpDirectory {
    async fn browse_users(&self, request: &BrowseRequest) -> Result<BrowsePage> {
        request.validate()?;

        let mut query = format!(
            "/users/browse?page={}&page_size={}",
            request.page, request.page_size
        );
        if let Some(skill) = request.skill_filter.as_deref() {
            query.push_str("&skill_filter=");
            query.push_str(&urlencoding::encode(skill));
        }
        if let Some(location) = request.location_filter.as_deref() {
            query.push_str("&location_filter=");
            query.push_str(&urlencoding::encode(location));
        }

        self.get_json(&query).await
    }

    async fn search_users(&self, query: &str, limit: u32) -> Result<SearchResults> {
        validate_search_limit(limit)?;

        let path = format!(
            "/users/search?q={}&limit={limit}",
            urlencoding::encode(query)
        );
        self.get_json(&path).await
    }

    async fn popular_skills(&self) -> Result<PopularSkills> {
        self.get_json("/skills/popular").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_browse_rejects_bad_page_before_io() {
        // Unroutable base URL: a validation failure must short-circuit
        // before any connection attempt.
        let dir = HttpDirectory::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        let err = dir.browse_users(&BrowseRequest::page(0)).await.unwrap_err();
        assert!(matches!(err, ScoutError::Validation(_)));
    }

    #[tokio::test]
    async fn test_search_rejects_bad_limit_before_io() {
        let dir = HttpDirectory::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        let err = dir.search_users("rust", 0).await.unwrap_err();
        assert!(matches!(err, ScoutError::Validation(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let dir = HttpDirectory::new("http://example.test/", Duration::from_secs(1)).unwrap();
        assert_eq!(dir.base_url, "http://example.test");
    }
}

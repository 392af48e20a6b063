//! Data service boundary.
//!
//! [`UserDirectory`] abstracts the remote directory from the discovery
//! controller: paginated browse, free-text search, and popular-skill stats.
//! Implementations validate their arguments before touching the network;
//! the controller clamps intents so validation never fires in normal use.

pub mod http;

use async_trait::async_trait;

use crate::error::{Result, ScoutError};
use crate::model::{BrowsePage, PopularSkills, SearchResults};

/// Smallest page size the service accepts.
pub const MIN_PAGE_SIZE: u32 = 1;
/// Largest page size the service accepts.
pub const MAX_PAGE_SIZE: u32 = 50;
/// Default browse page size.
pub const DEFAULT_PAGE_SIZE: u32 = 12;
/// Largest search result limit the service accepts.
pub const MAX_SEARCH_LIMIT: u32 = 100;
/// Default search result limit.
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// Parameters for one browse fetch. Filters are `None` when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseRequest {
    pub page: u32,
    pub page_size: u32,
    pub skill_filter: Option<String>,
    pub location_filter: Option<String>,
}

impl BrowseRequest {
    /// Build a request for `page` with the default page size.
    #[must_use]
    pub fn page(page: u32) -> Self {
        Self {
            page,
            page_size: DEFAULT_PAGE_SIZE,
            ..Self::default()
        }
    }

    /// Check range constraints. Out-of-range values are a caller bug; the
    /// controller clamps before dispatch so this never fails in normal use.
    pub fn validate(&self) -> Result<()> {
        if self.page < 1 {
            return Err(ScoutError::Validation(format!(
                "page must be >= 1, got {}",
                self.page
            )));
        }
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(ScoutError::Validation(format!(
                "page_size must be in [{MIN_PAGE_SIZE}, {MAX_PAGE_SIZE}], got {}",
                self.page_size
            )));
        }
        Ok(())
    }
}

/// Check the search limit range.
pub fn validate_search_limit(limit: u32) -> Result<()> {
    if !(1..=MAX_SEARCH_LIMIT).contains(&limit) {
        return Err(ScoutError::Validation(format!(
            "limit must be in [1, {MAX_SEARCH_LIMIT}], got {limit}"
        )));
    }
    Ok(())
}

/// Remote user directory consumed by the discovery controller.
///
/// Ranking and query decomposition are the service's job; the controller
/// passes the full query string through untouched.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch one page of public profiles, optionally filtered by skill
    /// and/or location.
    async fn browse_users(&self, request: &BrowseRequest) -> Result<BrowsePage>;

    /// Fetch the top `limit` matches for a free-text query. The service
    /// fuses names, locations, and skills server-side.
    async fn search_users(&self, query: &str, limit: u32) -> Result<SearchResults>;

    /// Fetch popular and trending skill statistics.
    async fn popular_skills(&self) -> Result<PopularSkills>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browse_request_validate() {
        assert!(BrowseRequest::page(1).validate().is_ok());
        assert!(BrowseRequest::page(9999).validate().is_ok());

        let mut req = BrowseRequest::page(0);
        assert!(matches!(
            req.validate(),
            Err(ScoutError::Validation(_))
        ));

        req = BrowseRequest::page(1);
        req.page_size = 0;
        assert!(req.validate().is_err());
        req.page_size = 51;
        assert!(req.validate().is_err());
        req.page_size = 50;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_search_limit_bounds() {
        assert!(validate_search_limit(1).is_ok());
        assert!(validate_search_limit(100).is_ok());
        assert!(validate_search_limit(0).is_err());
        assert!(validate_search_limit(101).is_err());
    }
}

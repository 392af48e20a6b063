//! Retrieval mode derivation.

use serde::Serialize;

/// Active retrieval mode. Always derived from the query string, never set
/// directly: a non-blank query means search, anything else means browse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Browse,
    Search,
}

impl Mode {
    /// Derive the mode for a query string. Whitespace-only queries count
    /// as empty.
    #[must_use]
    pub fn for_query(query: &str) -> Self {
        if query.trim().is_empty() {
            Self::Browse
        } else {
            Self::Search
        }
    }

    #[must_use]
    pub const fn is_search(self) -> bool {
        matches!(self, Self::Search)
    }
}

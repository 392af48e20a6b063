//! User intent state.

use crate::discovery::mode::Mode;

/// What the user currently wants to see. Mutated only by the controller's
/// intent methods; has no lifecycle of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub query: String,
    pub skill_filter: String,
    pub location_filter: String,
    pub requested_page: u32,
}

impl Default for Intent {
    fn default() -> Self {
        Self {
            query: String::new(),
            skill_filter: String::new(),
            location_filter: String::new(),
            requested_page: 1,
        }
    }
}

impl Intent {
    /// Mode implied by the current query.
    #[must_use]
    pub fn mode(&self) -> Mode {
        Mode::for_query(&self.query)
    }

    /// Skill filter as the service expects it: `None` when blank.
    #[must_use]
    pub fn skill_filter(&self) -> Option<&str> {
        non_blank(&self.skill_filter)
    }

    /// Location filter as the service expects it: `None` when blank.
    #[must_use]
    pub fn location_filter(&self) -> Option<&str> {
        non_blank(&self.location_filter)
    }

    /// Whether any filter is active.
    #[must_use]
    pub fn has_filters(&self) -> bool {
        self.skill_filter().is_some() || self.location_filter().is_some()
    }
}

/// Clamp a requested page number into the valid range.
#[must_use]
pub const fn clamp_page(page: u32) -> u32 {
    if page < 1 { 1 } else { page }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

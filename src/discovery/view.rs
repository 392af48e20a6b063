//! View-model projection.
//!
//! The [`ViewModel`] is the only externally observable artifact of the
//! discovery controller. It is rebuilt wholesale on every accepted response
//! and published through a watch channel; the UI never patches it.

use serde::Serialize;

use crate::model::{SkillStat, UserPreview};

use super::mode::Mode;

/// Pagination metadata as displayed.
///
/// Browse results carry the service's own numbers; search results project
/// the fixed single-page form so browse pagination is never shown next to
/// search results.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl Pagination {
    /// Empty pagination shown before the first response arrives.
    #[must_use]
    pub const fn empty(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size,
            total_count: 0,
            total_pages: 0,
            has_next: false,
            has_previous: false,
        }
    }

    /// The fixed form projected for search results.
    #[must_use]
    pub fn single(total_count: u64) -> Self {
        Self {
            page: 1,
            page_size: u32::try_from(total_count).unwrap_or(u32::MAX),
            total_count,
            total_pages: 1,
            has_next: false,
            has_previous: false,
        }
    }

    /// Page buttons for display, windowed with ellipses.
    #[must_use]
    pub fn window(&self) -> Vec<PageItem> {
        page_window(self.page, self.total_pages)
    }
}

/// One element of the pagination strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Classic windowed page numbering.
///
/// Five or fewer pages are all shown. Otherwise the first and last page are
/// always present, up to three pages sit centered on the current one, and an
/// ellipsis marks every gap.
#[must_use]
pub fn page_window(current: u32, total: u32) -> Vec<PageItem> {
    use PageItem::{Ellipsis, Page};

    if total == 0 {
        return Vec::new();
    }
    if total <= 5 {
        return (1..=total).map(Page).collect();
    }

    let mut items = Vec::with_capacity(7);
    if current <= 3 {
        items.extend((1..=4).map(Page));
        items.push(Ellipsis);
        items.push(Page(total));
    } else if current >= total - 2 {
        items.push(Page(1));
        items.push(Ellipsis);
        items.extend((total - 3..=total).map(Page));
    } else {
        items.push(Page(1));
        items.push(Ellipsis);
        items.extend((current - 1..=current + 1).map(Page));
        items.push(Ellipsis);
        items.push(Page(total));
    }
    items
}

/// Read-only snapshot of the discovery state.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ViewModel {
    /// Mode implied by the current query (updates on every keystroke).
    pub mode: Mode,
    /// Mode of the last accepted result set. Stays with the results until
    /// a newer response replaces them.
    pub results_mode: Mode,
    pub users: Vec<UserPreview>,
    pub pagination: Pagination,
    /// Quick-filter chip data; empty until loaded.
    pub popular_skills: Vec<SkillStat>,
    pub skill_filter: Option<String>,
    pub location_filter: Option<String>,
    /// A browse fetch is in flight.
    pub loading: bool,
    /// A search fetch is in flight.
    pub search_loading: bool,
    /// Transient notice from the most recent failed fetch.
    pub error: Option<String>,
}

impl ViewModel {
    #[must_use]
    pub const fn initial(page_size: u32) -> Self {
        Self {
            mode: Mode::Browse,
            results_mode: Mode::Browse,
            users: Vec::new(),
            pagination: Pagination::empty(page_size),
            popular_skills: Vec::new(),
            skill_filter: None,
            location_filter: None,
            loading: false,
            search_loading: false,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PageItem::{Ellipsis, Page};
    use super::*;

    #[test]
    fn test_window_small_totals_show_everything() {
        assert_eq!(page_window(1, 3), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(
            page_window(3, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
    }

    #[test]
    fn test_window_near_start() {
        assert_eq!(
            page_window(1, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]
        );
        assert_eq!(
            page_window(3, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_window_middle() {
        assert_eq!(
            page_window(5, 10),
            vec![
                Page(1),
                Ellipsis,
                Page(4),
                Page(5),
                Page(6),
                Ellipsis,
                Page(10)
            ]
        );
    }

    #[test]
    fn test_window_near_end() {
        assert_eq!(
            page_window(10, 10),
            vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)]
        );
        assert_eq!(
            page_window(8, 10),
            vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn test_window_no_pages() {
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn test_window_six_pages_keeps_gap_marker() {
        assert_eq!(
            page_window(1, 6),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(6)]
        );
        assert_eq!(
            page_window(6, 6),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Page(6)]
        );
    }

    #[test]
    fn test_search_pagination_is_fixed() {
        let pagination = Pagination::single(17);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.total_pages, 1);
        assert!(!pagination.has_next);
        assert!(!pagination.has_previous);
    }
}

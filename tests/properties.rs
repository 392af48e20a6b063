//! Property tests for mode selection and pagination windowing.

use proptest::prelude::*;

use skillscout::discovery::view::{PageItem, page_window};
use skillscout::discovery::Mode;

proptest! {
    #[test]
    fn mode_is_search_iff_trimmed_query_nonempty(query in ".{0,40}") {
        let expected = if query.trim().is_empty() {
            Mode::Browse
        } else {
            Mode::Search
        };
        prop_assert_eq!(Mode::for_query(&query), expected);
    }

    #[test]
    fn window_always_contains_current_first_and_last(
        total in 1u32..200,
        seed in 0u32..200,
    ) {
        let current = seed % total + 1;
        let items = page_window(current, total);

        prop_assert!(!items.is_empty());
        prop_assert_eq!(items[0], PageItem::Page(1));
        prop_assert_eq!(*items.last().unwrap(), PageItem::Page(total));
        prop_assert!(items.contains(&PageItem::Page(current)));
        prop_assert!(items.len() <= 7);
    }

    #[test]
    fn window_pages_increase_and_ellipses_mark_real_gaps(
        total in 1u32..200,
        seed in 0u32..200,
    ) {
        let current = seed % total + 1;
        let items = page_window(current, total);

        for pair in items.windows(2) {
            match (pair[0], pair[1]) {
                (PageItem::Page(a), PageItem::Page(b)) => {
                    // Adjacent buttons are consecutive pages.
                    prop_assert_eq!(b, a + 1);
                }
                (PageItem::Ellipsis, PageItem::Ellipsis) => {
                    prop_assert!(false, "adjacent ellipses");
                }
                _ => {}
            }
        }

        // An ellipsis only ever stands between two pages with a gap.
        for window in items.windows(3) {
            if let (PageItem::Page(a), PageItem::Ellipsis, PageItem::Page(b)) =
                (window[0], window[1], window[2])
            {
                prop_assert!(b > a + 1, "ellipsis between consecutive pages {a} and {b}");
            }
        }
    }

    #[test]
    fn small_totals_show_every_page(total in 1u32..=5, seed in 0u32..5) {
        let current = seed % total + 1;
        let items = page_window(current, total);
        let expected: Vec<PageItem> = (1..=total).map(PageItem::Page).collect();
        prop_assert_eq!(items, expected);
    }
}

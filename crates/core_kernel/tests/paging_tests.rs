//! Tests for the paged result set
//!
//! # Test Organization
//!
//! - `page_slicing` - which items land on which page
//! - `page_navigation` - first/last/next/previous flags
//! - `paging_properties` - proptest invariants over arbitrary inputs

use core_kernel::{CoreError, PagedList};
use proptest::prelude::*;

mod page_slicing {
    use super::*;

    #[test]
    fn test_exact_multiple_of_page_size() {
        let page = PagedList::new(1..=9, 2, 3).unwrap();
        assert_eq!(page.items(), &[7, 8, 9]);
        assert_eq!(page.page_count(), 3);
    }

    #[test]
    fn test_page_past_end_is_empty_but_counts_all() {
        let page = PagedList::new(1..=5, 4, 5).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_count(), 5);
        assert_eq!(page.page_index(), 4);
    }

    #[test]
    fn test_empty_source() {
        let page: PagedList<u8> = PagedList::empty(10).unwrap();
        assert_eq!(page.total_count(), 0);
        assert_eq!(page.page_count(), 0);
        assert!(page.is_first_page());
        assert!(page.is_last_page());
        assert!(!page.has_next_page());
    }

    #[test]
    fn test_zero_page_size_is_a_validation_error() {
        let error = PagedList::new(vec!["a"], 0, 0).unwrap_err();
        assert!(matches!(error, CoreError::Validation(_)));
    }

    #[test]
    fn test_huge_page_index_does_not_overflow() {
        let page = PagedList::new(0..3, usize::MAX, 2).unwrap();
        assert!(page.is_empty());
        assert!(page.has_previous_page());
        assert!(!page.has_next_page());
    }

    #[test]
    fn test_into_iterator_yields_page_items() {
        let page = PagedList::new(vec!['a', 'b', 'c', 'd'], 1, 2).unwrap();
        let collected: String = page.into_iter().collect();
        assert_eq!(collected, "cd");
    }
}

mod page_navigation {
    use super::*;

    #[test]
    fn test_middle_page_has_both_neighbours() {
        let page = PagedList::new(0..30, 1, 10).unwrap();
        assert!(page.has_previous_page());
        assert!(page.has_next_page());
        assert!(!page.is_first_page());
        assert!(!page.is_last_page());
    }

    #[test]
    fn test_single_page() {
        let page = PagedList::new(0..4, 0, 10).unwrap();
        assert!(page.is_first_page());
        assert!(page.is_last_page());
        assert_eq!(page.page_count(), 1);
    }
}

mod paging_properties {
    use super::*;

    proptest! {
        #[test]
        fn prop_pages_partition_the_source(len in 0usize..200, page_size in 1usize..25) {
            let source: Vec<usize> = (0..len).collect();
            let first = PagedList::new(source.clone(), 0, page_size).unwrap();
            let mut rebuilt = Vec::new();
            for index in 0..first.page_count() {
                let page = PagedList::new(source.clone(), index, page_size).unwrap();
                prop_assert!(page.len() <= page_size);
                rebuilt.extend(page.into_items());
            }
            prop_assert_eq!(rebuilt, source);
        }

        #[test]
        fn prop_total_count_ignores_page(len in 0usize..200, index in 0usize..50, page_size in 1usize..25) {
            let page = PagedList::new(0..len, index, page_size).unwrap();
            prop_assert_eq!(page.total_count(), len);
            prop_assert_eq!(page.has_next_page(), !page.is_last_page());
        }
    }
}

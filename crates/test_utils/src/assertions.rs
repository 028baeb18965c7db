//! Custom Test Assertions
//!
//! Provides assertion helpers that give more meaningful failure messages
//! than comparing whole structs.

use std::fmt::Debug;

use core_kernel::{Entity, PagedList};

/// Asserts that `stored` equals `original` apart from the assigned id
///
/// # Panics
///
/// Panics if the stored entity is still unsaved or differs in any other field
pub fn assert_stored_as<E>(stored: &E, original: &E)
where
    E: Entity + PartialEq + Debug,
{
    assert!(
        !stored.id().is_unsaved(),
        "Expected a stored entity, got unsaved {} {:?}",
        E::KIND,
        stored
    );

    let mut expected = original.clone();
    expected.set_id(stored.id());
    assert_eq!(stored, &expected, "{} differs from the original", E::KIND);
}

/// Asserts the metadata of a page
pub fn assert_page<T: Debug>(page: &PagedList<T>, page_index: usize, len: usize, total: usize) {
    assert_eq!(page.page_index(), page_index, "Unexpected page index in {:?}", page);
    assert_eq!(page.len(), len, "Unexpected page length in {:?}", page);
    assert_eq!(page.total_count(), total, "Unexpected total count in {:?}", page);
}

/// Asserts that entities are sorted by ascending id without duplicates
pub fn assert_ordered_by_id<E: Entity + Debug>(entities: &[E]) {
    for pair in entities.windows(2) {
        assert!(
            pair[0].id() < pair[1].id(),
            "Entities out of id order: {:?} before {:?}",
            pair[0].id(),
            pair[1].id()
        );
    }
}

//! Paged result sets
//!
//! A [`PagedList`] holds one page of an ordered collection together with the
//! bookkeeping a caller needs to navigate the rest of it. Page indexes are
//! zero-based.

use serde::Serialize;
use std::ops::Deref;

use crate::error::CoreError;

/// One page of a larger ordered collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagedList<T> {
    items: Vec<T>,
    page_index: usize,
    page_size: usize,
    total_count: usize,
}

impl<T> PagedList<T> {
    /// Cuts the requested page out of `source`
    ///
    /// The whole source is consumed so that `total_count` reflects every
    /// element, even when the page itself is past the end and comes back
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `page_size` is zero
    ///
    /// # Example
    ///
    /// ```rust
    /// use core_kernel::PagedList;
    ///
    /// let page = PagedList::new(1..=7, 1, 3).unwrap();
    /// assert_eq!(&*page, &[4, 5, 6]);
    /// assert_eq!(page.total_count(), 7);
    /// assert_eq!(page.page_count(), 3);
    /// assert!(page.has_next_page());
    /// ```
    pub fn new<I>(source: I, page_index: usize, page_size: usize) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = T>,
    {
        if page_size == 0 {
            return Err(CoreError::validation("page_size must be greater than zero"));
        }

        let start = page_index.saturating_mul(page_size);
        let mut total_count = 0;
        let mut items = Vec::new();
        for (position, item) in source.into_iter().enumerate() {
            total_count += 1;
            if position >= start && items.len() < page_size {
                items.push(item);
            }
        }

        Ok(Self {
            items,
            page_index,
            page_size,
            total_count,
        })
    }

    /// An empty first page
    pub fn empty(page_size: usize) -> Result<Self, CoreError> {
        Self::new(std::iter::empty(), 0, page_size)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of elements across all pages
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Number of pages needed to hold `total_count` elements
    pub fn page_count(&self) -> usize {
        self.total_count.div_ceil(self.page_size)
    }

    pub fn has_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next_page(&self) -> bool {
        self.page_index.saturating_add(1) < self.page_count()
    }

    pub fn is_first_page(&self) -> bool {
        self.page_index == 0
    }

    pub fn is_last_page(&self) -> bool {
        self.page_index.saturating_add(1) >= self.page_count()
    }

    /// Converts the items of this page, keeping the paging metadata
    pub fn map<U, F>(self, f: F) -> PagedList<U>
    where
        F: FnMut(T) -> U,
    {
        PagedList {
            items: self.items.into_iter().map(f).collect(),
            page_index: self.page_index,
            page_size: self.page_size,
            total_count: self.total_count,
        }
    }
}

impl<T> Deref for PagedList<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T> IntoIterator for PagedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PagedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

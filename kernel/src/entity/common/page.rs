//! Page windows over sorted collections.
//!
//! A [`PageRequest`] describes which bounded window of a filtered collection
//! the caller wants; a store answers it with the window contents and the size
//! of the unpaginated collection, and [`Page::new`] derives the remaining
//! metadata from those two numbers alone.

use std::cmp::Ordering;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

pub const DEFAULT_PAGE_INDEX: u32 = 0;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Orders present values by direction and puts absent values after them
    /// whichever way the collection is sorted.
    pub fn nulls_last<T: Ord>(&self, a: Option<&T>, b: Option<&T>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => self.apply(a.cmp(b)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Sort<K> {
    key: K,
    direction: SortDirection,
}

impl<K> Sort<K> {
    pub fn new(key: K, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

/// Which window of a collection to return. Without a sort the store's
/// primary key order is used; with one, ties are broken by primary key.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct PageRequest<K> {
    index: u32,
    size: u32,
    sort: Option<Sort<K>>,
}

impl<K> PageRequest<K> {
    pub fn new(index: i64, size: i64) -> error_stack::Result<Self, KernelError> {
        let index = u32::try_from(index).map_err(|_| {
            Report::new(KernelError::Validation)
                .attach_printable(format!("Page index must be between 0 and {}: {index}", u32::MAX))
        })?;
        let size = u32::try_from(size)
            .ok()
            .filter(|size| *size >= 1)
            .ok_or_else(|| {
                Report::new(KernelError::Validation)
                    .attach_printable(format!("Page size must be at least 1: {size}"))
            })?;
        Ok(Self {
            index,
            size,
            sort: None,
        })
    }

    pub fn sorted_by(self, sort: Sort<K>) -> Self {
        Self {
            sort: Some(sort),
            ..self
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> Option<&Sort<K>> {
        self.sort.as_ref()
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.index) * i64::from(self.size)
    }
}

impl<K> Default for PageRequest<K> {
    fn default() -> Self {
        Self {
            index: DEFAULT_PAGE_INDEX,
            size: DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Page<T> {
    content: Vec<T>,
    total_elements: u64,
    total_pages: u64,
    number: u32,
    size: u32,
    has_next: bool,
    has_previous: bool,
}

impl<T> Page<T> {
    /// Builds the page for `request` from its window and the number of
    /// elements in the whole filtered collection.
    pub fn new<K>(content: Vec<T>, total_elements: u64, request: &PageRequest<K>) -> Self {
        let size = request.size();
        let number = request.index();
        let total_pages = total_elements.div_ceil(u64::from(size));
        Self {
            content,
            total_elements,
            total_pages,
            number,
            size,
            has_next: u64::from(number) + 1 < total_pages,
            has_previous: number > 0,
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut [T] {
        &mut self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn has_previous(&self) -> bool {
        self.has_previous
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

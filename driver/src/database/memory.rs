//! Entity store held in process memory.
//!
//! A transaction holds the store lock from `transact` until it is committed or
//! dropped, so transactions run one after another. Writes go to a working copy
//! that replaces the stored state on commit and is discarded otherwise.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnAuthorQuery, DependOnBookQuery};
use kernel::interface::update::{DependOnAuthorModifier, DependOnBookModifier};
use kernel::prelude::entity::{Author, AuthorId, Book, BookId, Page, PageRequest};
use kernel::KernelError;

pub use self::{author::*, book::*};

mod author;
mod book;

#[derive(Debug, Default, Clone)]
struct MemoryState {
    authors: BTreeMap<AuthorId, Author>,
    books: BTreeMap<BookId, Book>,
    authorships: BTreeSet<(BookId, AuthorId)>,
}

#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct MemoryTransaction {
    stored: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

#[async_trait::async_trait]
impl Transaction for MemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let MemoryTransaction {
            mut stored,
            working,
        } = self;
        *stored = working;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = MemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let stored = Arc::clone(&self.state).lock_owned().await;
        let working = stored.clone();
        Ok(MemoryTransaction { stored, working })
    }
}

impl DependOnAuthorQuery for InMemoryDatabase {
    type AuthorQuery = MemoryAuthorRepository;
    fn author_query(&self) -> &Self::AuthorQuery {
        &MemoryAuthorRepository
    }
}

impl DependOnAuthorModifier for InMemoryDatabase {
    type AuthorModifier = MemoryAuthorRepository;
    fn author_modifier(&self) -> &Self::AuthorModifier {
        &MemoryAuthorRepository
    }
}

impl DependOnBookQuery for InMemoryDatabase {
    type BookQuery = MemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &MemoryBookRepository
    }
}

impl DependOnBookModifier for InMemoryDatabase {
    type BookModifier = MemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &MemoryBookRepository
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn paginate<T, K>(
    mut items: Vec<T>,
    page: &PageRequest<K>,
    compare: impl FnMut(&T, &T) -> Ordering,
) -> Page<T> {
    items.sort_by(compare);
    let total = items.len() as u64;
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
    let content = items.into_iter().skip(offset).take(limit).collect();
    Page::new(content, total, page)
}

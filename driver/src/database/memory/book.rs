use std::collections::BTreeSet;

use uuid::Uuid;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{
    AuthorId, Book, BookDraft, BookId, BookSortKey, Page, PageRequest,
};
use kernel::KernelError;

use crate::database::memory::{contains_ignore_case, paginate, MemoryTransaction};

pub struct MemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery for MemoryBookRepository {
    type Transaction = MemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con.working.books.get(id).cloned())
    }

    async fn find_page(
        &self,
        con: &mut MemoryTransaction,
        title: Option<&str>,
        page: &PageRequest<BookSortKey>,
    ) -> error_stack::Result<Page<Book>, KernelError> {
        let matched = con
            .working
            .books
            .values()
            .filter(|book| match title {
                Some(title) => {
                    contains_ignore_case(AsRef::<String>::as_ref(book.title()), title)
                }
                None => true,
            })
            .cloned()
            .collect::<Vec<_>>();
        Ok(paginate(matched, page, |a, b| match page.sort() {
            Some(sort) => sort
                .key()
                .compare(a, b, sort.direction())
                .then_with(|| a.id().cmp(b.id())),
            None => a.id().cmp(b.id()),
        }))
    }

    async fn find_by_author(
        &self,
        con: &mut MemoryTransaction,
        author_id: &AuthorId,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let state = &con.working;
        Ok(state
            .authorships
            .iter()
            .filter(|(_, author)| author == author_id)
            .filter_map(|(book, _)| state.books.get(book))
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl BookModifier for MemoryBookRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        draft: BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        let (book, authors) = draft.into_book(BookId::new(Uuid::new_v4()));
        let state = &mut con.working;
        state.books.insert(book.id().clone(), book.clone());
        state.authorships.extend(
            authors
                .into_iter()
                .map(|author| (book.id().clone(), author)),
        );
        Ok(book)
    }

    async fn update(
        &self,
        con: &mut MemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        if let Some(stored) = con.working.books.get_mut(book.id()) {
            *stored = book.clone();
        }
        Ok(())
    }

    async fn replace_authors(
        &self,
        con: &mut MemoryTransaction,
        book_id: &BookId,
        authors: &BTreeSet<AuthorId>,
    ) -> error_stack::Result<(), KernelError> {
        let state = &mut con.working;
        state.authorships.retain(|(book, _)| book != book_id);
        state.authorships.extend(
            authors
                .iter()
                .map(|author| (book_id.clone(), author.clone())),
        );
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut MemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<bool, KernelError> {
        let state = &mut con.working;
        state.authorships.retain(|(book, _)| book != book_id);
        Ok(state.books.remove(book_id).is_some())
    }
}

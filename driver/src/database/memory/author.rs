use uuid::Uuid;

use kernel::interface::query::AuthorQuery;
use kernel::interface::update::AuthorModifier;
use kernel::prelude::entity::{
    Author, AuthorDraft, AuthorId, AuthorSortKey, BookId, Page, PageRequest,
};
use kernel::KernelError;

use crate::database::memory::{contains_ignore_case, paginate, MemoryTransaction};

pub struct MemoryAuthorRepository;

#[async_trait::async_trait]
impl AuthorQuery for MemoryAuthorRepository {
    type Transaction = MemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &AuthorId,
    ) -> error_stack::Result<Option<Author>, KernelError> {
        Ok(con.working.authors.get(id).cloned())
    }

    async fn find_by_ids(
        &self,
        con: &mut MemoryTransaction,
        ids: &[AuthorId],
    ) -> error_stack::Result<Vec<Author>, KernelError> {
        let authors = &con.working.authors;
        Ok(ids
            .iter()
            .filter_map(|id| authors.get(id))
            .cloned()
            .collect())
    }

    async fn find_page(
        &self,
        con: &mut MemoryTransaction,
        name: Option<&str>,
        page: &PageRequest<AuthorSortKey>,
    ) -> error_stack::Result<Page<Author>, KernelError> {
        let matched = con
            .working
            .authors
            .values()
            .filter(|author| match name {
                Some(name) => {
                    contains_ignore_case(AsRef::<String>::as_ref(author.name()), name)
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

    async fn find_by_book(
        &self,
        con: &mut MemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Author>, KernelError> {
        let state = &con.working;
        Ok(state
            .authorships
            .iter()
            .filter(|(book, _)| book == book_id)
            .filter_map(|(_, author)| state.authors.get(author))
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl AuthorModifier for MemoryAuthorRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        draft: AuthorDraft,
    ) -> error_stack::Result<Author, KernelError> {
        let author = draft.into_author(AuthorId::new(Uuid::new_v4()));
        con.working
            .authors
            .insert(author.id().clone(), author.clone());
        Ok(author)
    }

    async fn update(
        &self,
        con: &mut MemoryTransaction,
        author: &Author,
    ) -> error_stack::Result<(), KernelError> {
        if let Some(stored) = con.working.authors.get_mut(author.id()) {
            *stored = author.clone();
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut MemoryTransaction,
        author_id: &AuthorId,
    ) -> error_stack::Result<bool, KernelError> {
        let state = &mut con.working;
        state.authorships.retain(|(_, author)| author != author_id);
        Ok(state.authors.remove(author_id).is_some())
    }
}

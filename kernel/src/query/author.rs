use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Author, AuthorId, AuthorSortKey, BookId, Page, PageRequest};
use crate::KernelError;

#[async_trait::async_trait]
pub trait AuthorQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &AuthorId,
    ) -> error_stack::Result<Option<Author>, KernelError>;

    /// Every author among `ids` that exists. Unknown ids are skipped.
    async fn find_by_ids(
        &self,
        con: &mut Self::Transaction,
        ids: &[AuthorId],
    ) -> error_stack::Result<Vec<Author>, KernelError>;

    async fn find_page(
        &self,
        con: &mut Self::Transaction,
        name: Option<&str>,
        page: &PageRequest<AuthorSortKey>,
    ) -> error_stack::Result<Page<Author>, KernelError>;

    async fn find_by_book(
        &self,
        con: &mut Self::Transaction,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Author>, KernelError>;
}

pub trait DependOnAuthorQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type AuthorQuery: AuthorQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn author_query(&self) -> &Self::AuthorQuery;
}

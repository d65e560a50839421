use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{AuthorId, Book, BookId, BookSortKey, Page, PageRequest};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError>;

    /// One window of the books whose title contains `title`, ignoring case.
    /// Without a filter the whole collection is paged.
    async fn find_page(
        &self,
        con: &mut Self::Transaction,
        title: Option<&str>,
        page: &PageRequest<BookSortKey>,
    ) -> error_stack::Result<Page<Book>, KernelError>;

    async fn find_by_author(
        &self,
        con: &mut Self::Transaction,
        author_id: &AuthorId,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
}

pub trait DependOnBookQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookQuery: BookQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn book_query(&self) -> &Self::BookQuery;
}

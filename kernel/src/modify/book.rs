use std::collections::BTreeSet;

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{AuthorId, Book, BookDraft, BookId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Stores the book under a newly assigned id together with its authors.
    async fn create(
        &self,
        con: &mut Self::Transaction,
        draft: BookDraft,
    ) -> error_stack::Result<Book, KernelError>;
    async fn update(
        &self,
        con: &mut Self::Transaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError>;
    async fn replace_authors(
        &self,
        con: &mut Self::Transaction,
        book_id: &BookId,
        authors: &BTreeSet<AuthorId>,
    ) -> error_stack::Result<(), KernelError>;
    /// Removes the book and its author links. Returns whether it existed.
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        book_id: &BookId,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnBookModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookModifier: BookModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn book_modifier(&self) -> &Self::BookModifier;
}

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Author, AuthorDraft, AuthorId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait AuthorModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        draft: AuthorDraft,
    ) -> error_stack::Result<Author, KernelError>;
    async fn update(
        &self,
        con: &mut Self::Transaction,
        author: &Author,
    ) -> error_stack::Result<(), KernelError>;
    /// Removes the author and every link to its books. Returns whether it existed.
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        author_id: &AuthorId,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnAuthorModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type AuthorModifier: AuthorModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn author_modifier(&self) -> &Self::AuthorModifier;
}

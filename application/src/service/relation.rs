//! Navigation across the book/author relationship.
//!
//! Related records are always re-read inside a fresh transaction, so an
//! expansion reflects the relation as stored at the time of the call rather
//! than whatever was loaded alongside the parent.

use std::collections::HashSet;

use error_stack::Report;
use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{AuthorQuery, BookQuery, DependOnAuthorQuery, DependOnBookQuery};
use kernel::prelude::entity::{Author, AuthorId, Book, BookId, Page};
use kernel::KernelError;
use uuid::Uuid;

use crate::transfer::{Expanded, ResolveAuthorsDto, ResolveBooksDto};

#[async_trait::async_trait]
pub trait ResolveBookAuthorsService:
    'static + Sync + Send + DependOnBookQuery + DependOnAuthorQuery
{
    #[tracing::instrument(skip_all, fields(book_id = %dto.book_id))]
    async fn resolve_authors(
        &self,
        dto: ResolveAuthorsDto,
    ) -> error_stack::Result<Vec<Author>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = BookId::new(dto.book_id);
        if self.book_query().find_by_id(&mut connection, &id).await?.is_none() {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("Book not found with id: {}", dto.book_id)));
        }
        let mut authors = self.author_query().find_by_book(&mut connection, &id).await?;
        let mut seen = HashSet::new();
        authors.retain(|author| seen.insert(author.id().clone()));
        Ok(authors)
    }

    async fn expand_book(
        &self,
        book: Book,
    ) -> error_stack::Result<Expanded<Book, Author>, KernelError> {
        let authors = self
            .resolve_authors(ResolveAuthorsDto {
                book_id: Uuid::from(book.id().clone()),
            })
            .await?;
        let mut expanded = Expanded::new(book);
        expanded.attach(authors);
        Ok(expanded)
    }

    async fn expand_books(
        &self,
        books: Page<Book>,
    ) -> error_stack::Result<Page<Expanded<Book, Author>>, KernelError> {
        let mut page = books.map(Expanded::new);
        for item in page.content_mut() {
            let authors = self
                .resolve_authors(ResolveAuthorsDto {
                    book_id: Uuid::from(item.entity().id().clone()),
                })
                .await?;
            item.attach(authors);
        }
        Ok(page)
    }
}

impl<T> ResolveBookAuthorsService for T where T: DependOnBookQuery + DependOnAuthorQuery {}

#[async_trait::async_trait]
pub trait ResolveAuthorBooksService:
    'static + Sync + Send + DependOnAuthorQuery + DependOnBookQuery
{
    #[tracing::instrument(skip_all, fields(author_id = %dto.author_id))]
    async fn resolve_books(
        &self,
        dto: ResolveBooksDto,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = AuthorId::new(dto.author_id);
        if self.author_query().find_by_id(&mut connection, &id).await?.is_none() {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("Author not found with id: {}", dto.author_id)));
        }
        let mut books = self.book_query().find_by_author(&mut connection, &id).await?;
        let mut seen = HashSet::new();
        books.retain(|book| seen.insert(book.id().clone()));
        Ok(books)
    }

    async fn expand_author(
        &self,
        author: Author,
    ) -> error_stack::Result<Expanded<Author, Book>, KernelError> {
        let books = self
            .resolve_books(ResolveBooksDto {
                author_id: Uuid::from(author.id().clone()),
            })
            .await?;
        let mut expanded = Expanded::new(author);
        expanded.attach(books);
        Ok(expanded)
    }

    async fn expand_authors(
        &self,
        authors: Page<Author>,
    ) -> error_stack::Result<Page<Expanded<Author, Book>>, KernelError> {
        let mut page = authors.map(Expanded::new);
        for item in page.content_mut() {
            let books = self
                .resolve_books(ResolveBooksDto {
                    author_id: Uuid::from(item.entity().id().clone()),
                })
                .await?;
            item.attach(books);
        }
        Ok(page)
    }
}

impl<T> ResolveAuthorBooksService for T where T: DependOnAuthorQuery + DependOnBookQuery {}

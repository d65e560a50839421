use std::collections::BTreeSet;

use error_stack::Report;
use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{AuthorQuery, BookQuery, DependOnAuthorQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{
    AuthorId, Book, BookDraft, BookId, BookIsbn, BookPrice, BookQuantity, BookSortKey, BookTitle,
    Page,
};
use kernel::KernelError;
use uuid::Uuid;

use crate::transfer::{CreateBookDto, DeleteBookDto, GetBookDto, GetBooksDto, UpdateBookDto};

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<Option<Book>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = BookId::new(dto.id);
        self.book_query().find_by_id(&mut connection, &id).await
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait GetBooksService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_books(&self, dto: GetBooksDto) -> error_stack::Result<Page<Book>, KernelError> {
        let page = dto.page.into_request::<BookSortKey>()?;
        let mut connection = self.database_connection().transact().await?;
        self.book_query()
            .find_page(&mut connection, dto.title.as_deref(), &page)
            .await
    }
}

impl<T> GetBooksService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService:
    'static + Sync + Send + DependOnBookModifier + DependOnAuthorQuery
{
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<Book, KernelError> {
        let title = BookTitle::parse(dto.title)?;
        if dto.author_ids.is_empty() {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("A book must have at least one author"));
        }
        let price = dto
            .price
            .map(BookPrice::try_from)
            .transpose()?
            .unwrap_or_default();

        let mut connection = self.database_connection().transact().await?;
        let authors = existing_authors(self.author_query(), &mut connection, dto.author_ids).await?;
        let draft = BookDraft::new(
            title,
            dto.isbn.map(BookIsbn::new),
            price,
            dto.quantity.map(BookQuantity::new),
            authors,
        );
        let book = self.book_modifier().create(&mut connection, draft).await?;
        connection.commit().await?;
        tracing::info!(id = %Uuid::from(book.id().clone()), "created book");
        Ok(book)
    }
}

impl<T> CreateBookService for T where T: DependOnBookModifier + DependOnAuthorQuery {}

#[async_trait::async_trait]
pub trait UpdateBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier + DependOnAuthorQuery
{
    async fn update_book(&self, dto: UpdateBookDto) -> error_stack::Result<Book, KernelError> {
        let title = dto.title.map(BookTitle::parse).transpose()?;
        let price = dto.price.map(BookPrice::try_from).transpose()?;

        let mut connection = self.database_connection().transact().await?;
        let id = BookId::new(dto.id);
        let mut book = self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("Book not found with id: {}", dto.id))
            })?;
        let authors = match dto.author_ids {
            Some(ids) => Some(existing_authors(self.author_query(), &mut connection, ids).await?),
            None => None,
        };

        book.substitute(|book| {
            if let Some(title) = title {
                *book.title = title;
            }
            if let Some(isbn) = dto.isbn {
                *book.isbn = Some(BookIsbn::new(isbn));
            }
            if let Some(price) = price {
                *book.price = price;
            }
            if let Some(quantity) = dto.quantity {
                *book.quantity = Some(BookQuantity::new(quantity));
            }
        });
        self.book_modifier().update(&mut connection, &book).await?;
        if let Some(authors) = authors {
            self.book_modifier()
                .replace_authors(&mut connection, &id, &authors)
                .await?;
        }
        connection.commit().await?;
        tracing::info!(id = %dto.id, "updated book");
        Ok(book)
    }
}

impl<T> UpdateBookService for T where
    T: DependOnBookQuery + DependOnBookModifier + DependOnAuthorQuery
{
}

#[async_trait::async_trait]
pub trait DeleteBookService: 'static + Sync + Send + DependOnBookModifier {
    /// Returns whether the book existed.
    async fn delete_book(&self, dto: DeleteBookDto) -> error_stack::Result<bool, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let existed = self
            .book_modifier()
            .delete(&mut connection, &BookId::new(dto.id))
            .await?;
        connection.commit().await?;
        tracing::info!(id = %dto.id, existed, "deleted book");
        Ok(existed)
    }
}

impl<T> DeleteBookService for T where T: DependOnBookModifier {}

/// Every requested author must exist; nothing is attached otherwise.
async fn existing_authors<Q: AuthorQuery>(
    query: &Q,
    con: &mut Q::Transaction,
    ids: Vec<Uuid>,
) -> error_stack::Result<BTreeSet<AuthorId>, KernelError> {
    let requested = ids.into_iter().map(AuthorId::new).collect::<BTreeSet<_>>();
    let lookup = requested.iter().cloned().collect::<Vec<_>>();
    let found = query
        .find_by_ids(con, &lookup)
        .await?
        .into_iter()
        .map(|author| author.id().clone())
        .collect::<BTreeSet<_>>();
    let missing = requested
        .difference(&found)
        .map(|id| Uuid::from(id.clone()).to_string())
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(Report::new(KernelError::NotFound)
            .attach_printable(format!("Author not found with id: {}", missing.join(", "))));
    }
    Ok(requested)
}

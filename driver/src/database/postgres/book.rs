use std::collections::BTreeSet;

use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{
    AuthorId, Book, BookDraft, BookId, BookIsbn, BookPrice, BookQuantity, BookSortKey, BookTitle,
    Page, PageRequest,
};
use kernel::KernelError;

use crate::database::postgres::{contains_pattern, order_by, total_count, PostgresTransaction};
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id).await
    }

    async fn find_page(
        &self,
        con: &mut PostgresTransaction,
        title: Option<&str>,
        page: &PageRequest<BookSortKey>,
    ) -> error_stack::Result<Page<Book>, KernelError> {
        PgBookInternal::find_page(con, title, page).await
    }

    async fn find_by_author(
        &self,
        con: &mut PostgresTransaction,
        author_id: &AuthorId,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_by_author(con, author_id).await
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        draft: BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        PgBookInternal::create(con, draft).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::update(con, book).await
    }

    async fn replace_authors(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
        authors: &BTreeSet<AuthorId>,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::replace_authors(con, book_id, authors).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<bool, KernelError> {
        PgBookInternal::delete(con, book_id).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: Uuid,
    title: String,
    isbn: Option<String>,
    price: Decimal,
    quantity: Option<i32>,
}

impl From<BookRow> for Book {
    fn from(value: BookRow) -> Self {
        Book::new(
            BookId::new(value.id),
            BookTitle::new(value.title),
            value.isbn.map(BookIsbn::new),
            BookPrice::new(value.price),
            value.quantity.map(BookQuantity::new),
        )
    }
}

fn sort_column(key: &BookSortKey) -> &'static str {
    match key {
        BookSortKey::Id => "id",
        BookSortKey::Title => "title",
        BookSortKey::Isbn => "isbn",
        BookSortKey::Price => "price",
        BookSortKey::Quantity => "quantity",
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, isbn, price, quantity
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Book::from))
    }

    async fn find_page(
        con: &mut PgConnection,
        title: Option<&str>,
        page: &PageRequest<BookSortKey>,
    ) -> error_stack::Result<Page<Book>, KernelError> {
        let pattern = title.map(contains_pattern);
        let count = sqlx::query_scalar::<_, i64>(
            // language=postgresql
            r#"
            SELECT COUNT(*)
            FROM books
            WHERE $1::TEXT IS NULL OR title ILIKE $1 ESCAPE '\'
            "#,
        )
        .bind(pattern.as_deref())
        .fetch_one(&mut *con)
        .await
        .convert_error()?;

        let order = order_by(page.sort().map(|sort| (sort_column(sort.key()), sort.direction())));
        let query = format!(
            // language=postgresql
            r#"
            SELECT id, title, isbn, price, quantity
            FROM books
            WHERE $1::TEXT IS NULL OR title ILIKE $1 ESCAPE '\'
            ORDER BY {order}
            LIMIT $2 OFFSET $3
            "#
        );
        let rows = sqlx::query_as::<_, BookRow>(&query)
            .bind(pattern.as_deref())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut *con)
            .await
            .convert_error()?;
        tracing::debug!(total = count, fetched = rows.len(), "paged books");

        let content = rows.into_iter().map(Book::from).collect();
        Ok(Page::new(content, total_count(count)?, page))
    }

    async fn find_by_author(
        con: &mut PgConnection,
        author_id: &AuthorId,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT b.id, b.title, b.isbn, b.price, b.quantity
            FROM books b
            INNER JOIN book_authors ba ON ba.book_id = b.id
            WHERE ba.author_id = $1
            ORDER BY b.id
            "#,
        )
        .bind(author_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn create(
        con: &mut PgConnection,
        draft: BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        let (book, authors) = draft.into_book(BookId::new(Uuid::new_v4()));
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO books (id, title, isbn, price, quantity)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.title().as_ref())
        .bind(book.isbn().as_ref().map(AsRef::<String>::as_ref))
        .bind(book.price().as_ref())
        .bind(book.quantity().as_ref().map(AsRef::<i32>::as_ref).copied())
        .execute(&mut *con)
        .await
        .convert_error()?;
        Self::insert_authors(con, book.id(), &authors).await?;
        Ok(book)
    }

    async fn update(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE books
            SET title = $2, isbn = $3, price = $4, quantity = $5
            WHERE id = $1
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.title().as_ref())
        .bind(book.isbn().as_ref().map(AsRef::<String>::as_ref))
        .bind(book.price().as_ref())
        .bind(book.quantity().as_ref().map(AsRef::<i32>::as_ref).copied())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn replace_authors(
        con: &mut PgConnection,
        book_id: &BookId,
        authors: &BTreeSet<AuthorId>,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM book_authors
            WHERE book_id = $1
            "#,
        )
        .bind(book_id.as_ref())
        .execute(&mut *con)
        .await
        .convert_error()?;
        Self::insert_authors(con, book_id, authors).await
    }

    async fn insert_authors(
        con: &mut PgConnection,
        book_id: &BookId,
        authors: &BTreeSet<AuthorId>,
    ) -> error_stack::Result<(), KernelError> {
        if authors.is_empty() {
            return Ok(());
        }
        let author_ids = authors.iter().cloned().map(Uuid::from).collect::<Vec<_>>();
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO book_authors (book_id, author_id)
            SELECT $1, UNNEST($2::UUID[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(book_id.as_ref())
        .bind(author_ids)
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(
        con: &mut PgConnection,
        book_id: &BookId,
    ) -> error_stack::Result<bool, KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM book_authors
            WHERE book_id = $1
            "#,
        )
        .bind(book_id.as_ref())
        .execute(&mut *con)
        .await
        .convert_error()?;
        let result = sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM books
            WHERE id = $1
            "#,
        )
        .bind(book_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod test {
    use std::collections::BTreeSet;

    use rust_decimal::Decimal;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::{AuthorQuery, BookQuery};
    use kernel::interface::update::{AuthorModifier, BookModifier};
    use kernel::prelude::entity::{
        AuthorDraft, AuthorName, BookDraft, BookPrice, BookQuantity, BookSortKey, BookTitle,
        PageRequest, Sort, SortDirection,
    };
    use kernel::KernelError;

    use crate::database::postgres::{
        PostgresAuthorRepository, PostgresBookRepository, PostgresDatabase,
    };

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        let author = PostgresAuthorRepository
            .create(&mut con, AuthorDraft::new(AuthorName::new("author"), None))
            .await?;
        let draft = BookDraft::new(
            BookTitle::new("test"),
            None,
            BookPrice::new(Decimal::new(1999, 2)),
            Some(BookQuantity::new(3)),
            BTreeSet::from([author.id().clone()]),
        );
        let book = PostgresBookRepository.create(&mut con, draft).await?;

        let found = PostgresBookRepository
            .find_by_id(&mut con, book.id())
            .await?
            .unwrap();
        assert_eq!(found.title(), &BookTitle::new("test"));
        assert_eq!(found.price(), &BookPrice::new(Decimal::new(1999, 2)));

        let authors = PostgresAuthorRepository
            .find_by_book(&mut con, book.id())
            .await?;
        assert_eq!(authors, vec![author.clone()]);

        let book = book.reconstruct(|b| b.title = BookTitle::new("test2"));
        PostgresBookRepository.update(&mut con, &book).await?;
        let found = PostgresBookRepository
            .find_by_id(&mut con, book.id())
            .await?
            .unwrap();
        assert_eq!(found.title(), &BookTitle::new("test2"));

        PostgresBookRepository
            .replace_authors(&mut con, book.id(), &BTreeSet::new())
            .await?;
        let books = PostgresBookRepository
            .find_by_author(&mut con, author.id())
            .await?;
        assert!(books.is_empty());

        assert!(PostgresBookRepository.delete(&mut con, book.id()).await?);
        assert!(!PostgresBookRepository.delete(&mut con, book.id()).await?);
        let found = PostgresBookRepository.find_by_id(&mut con, book.id()).await?;
        assert!(found.is_none());

        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn find_page() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let marker = uuid::Uuid::new_v4().simple().to_string();

        for n in 0..5 {
            let draft = BookDraft::new(
                BookTitle::new(format!("{marker} volume {n}")),
                None,
                BookPrice::default(),
                None,
                BTreeSet::new(),
            );
            PostgresBookRepository.create(&mut con, draft).await?;
        }

        let request = PageRequest::new(1, 2)?
            .sorted_by(Sort::new(BookSortKey::Title, SortDirection::Desc));
        let page = PostgresBookRepository
            .find_page(&mut con, Some(&marker.to_uppercase()), &request)
            .await?;
        assert_eq!(page.total_elements(), 5);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.content().len(), 2);
        assert_eq!(
            page.content()[0].title(),
            &BookTitle::new(format!("{marker} volume 2"))
        );
        assert!(page.has_next());
        assert!(page.has_previous());

        Ok(())
    }
}

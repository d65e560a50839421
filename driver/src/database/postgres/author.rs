use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::AuthorQuery;
use kernel::interface::update::AuthorModifier;
use kernel::prelude::entity::{
    Author, AuthorBiography, AuthorDraft, AuthorId, AuthorName, AuthorSortKey, BookId, Page,
    PageRequest,
};
use kernel::KernelError;

use crate::database::postgres::{contains_pattern, order_by, total_count, PostgresTransaction};
use crate::error::ConvertError;

pub struct PostgresAuthorRepository;

#[async_trait::async_trait]
impl AuthorQuery for PostgresAuthorRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &AuthorId,
    ) -> error_stack::Result<Option<Author>, KernelError> {
        PgAuthorInternal::find_by_id(con, id).await
    }

    async fn find_by_ids(
        &self,
        con: &mut PostgresTransaction,
        ids: &[AuthorId],
    ) -> error_stack::Result<Vec<Author>, KernelError> {
        PgAuthorInternal::find_by_ids(con, ids).await
    }

    async fn find_page(
        &self,
        con: &mut PostgresTransaction,
        name: Option<&str>,
        page: &PageRequest<AuthorSortKey>,
    ) -> error_stack::Result<Page<Author>, KernelError> {
        PgAuthorInternal::find_page(con, name, page).await
    }

    async fn find_by_book(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Author>, KernelError> {
        PgAuthorInternal::find_by_book(con, book_id).await
    }
}

#[async_trait::async_trait]
impl AuthorModifier for PostgresAuthorRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        draft: AuthorDraft,
    ) -> error_stack::Result<Author, KernelError> {
        PgAuthorInternal::create(con, draft).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        author: &Author,
    ) -> error_stack::Result<(), KernelError> {
        PgAuthorInternal::update(con, author).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        author_id: &AuthorId,
    ) -> error_stack::Result<bool, KernelError> {
        PgAuthorInternal::delete(con, author_id).await
    }
}

#[derive(sqlx::FromRow)]
struct AuthorRow {
    id: Uuid,
    name: String,
    biography: Option<String>,
}

impl From<AuthorRow> for Author {
    fn from(value: AuthorRow) -> Self {
        Author::new(
            AuthorId::new(value.id),
            AuthorName::new(value.name),
            value.biography.map(AuthorBiography::new),
        )
    }
}

fn sort_column(key: &AuthorSortKey) -> &'static str {
    match key {
        AuthorSortKey::Id => "id",
        AuthorSortKey::Name => "name",
        AuthorSortKey::Biography => "biography",
    }
}

pub(in crate::database) struct PgAuthorInternal;

impl PgAuthorInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &AuthorId,
    ) -> error_stack::Result<Option<Author>, KernelError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            // language=postgresql
            r#"
            SELECT id, name, biography
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Author::from))
    }

    async fn find_by_ids(
        con: &mut PgConnection,
        ids: &[AuthorId],
    ) -> error_stack::Result<Vec<Author>, KernelError> {
        let ids = ids.iter().cloned().map(Uuid::from).collect::<Vec<_>>();
        let rows = sqlx::query_as::<_, AuthorRow>(
            // language=postgresql
            r#"
            SELECT id, name, biography
            FROM authors
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Author::from).collect())
    }

    async fn find_page(
        con: &mut PgConnection,
        name: Option<&str>,
        page: &PageRequest<AuthorSortKey>,
    ) -> error_stack::Result<Page<Author>, KernelError> {
        let pattern = name.map(contains_pattern);
        let count = sqlx::query_scalar::<_, i64>(
            // language=postgresql
            r#"
            SELECT COUNT(*)
            FROM authors
            WHERE $1::TEXT IS NULL OR name ILIKE $1 ESCAPE '\'
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
            SELECT id, name, biography
            FROM authors
            WHERE $1::TEXT IS NULL OR name ILIKE $1 ESCAPE '\'
            ORDER BY {order}
            LIMIT $2 OFFSET $3
            "#
        );
        let rows = sqlx::query_as::<_, AuthorRow>(&query)
            .bind(pattern.as_deref())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut *con)
            .await
            .convert_error()?;
        tracing::debug!(total = count, fetched = rows.len(), "paged authors");

        let content = rows.into_iter().map(Author::from).collect();
        Ok(Page::new(content, total_count(count)?, page))
    }

    async fn find_by_book(
        con: &mut PgConnection,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Author>, KernelError> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            // language=postgresql
            r#"
            SELECT a.id, a.name, a.biography
            FROM authors a
            INNER JOIN book_authors ba ON ba.author_id = a.id
            WHERE ba.book_id = $1
            ORDER BY a.id
            "#,
        )
        .bind(book_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Author::from).collect())
    }

    async fn create(
        con: &mut PgConnection,
        draft: AuthorDraft,
    ) -> error_stack::Result<Author, KernelError> {
        let author = draft.into_author(AuthorId::new(Uuid::new_v4()));
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO authors (id, name, biography)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(author.id().as_ref())
        .bind(author.name().as_ref())
        .bind(author.biography().as_ref().map(AsRef::<String>::as_ref))
        .execute(con)
        .await
        .convert_error()?;
        Ok(author)
    }

    async fn update(
        con: &mut PgConnection,
        author: &Author,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE authors
            SET name = $2, biography = $3
            WHERE id = $1
            "#,
        )
        .bind(author.id().as_ref())
        .bind(author.name().as_ref())
        .bind(author.biography().as_ref().map(AsRef::<String>::as_ref))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(
        con: &mut PgConnection,
        author_id: &AuthorId,
    ) -> error_stack::Result<bool, KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM book_authors
            WHERE author_id = $1
            "#,
        )
        .bind(author_id.as_ref())
        .execute(&mut *con)
        .await
        .convert_error()?;
        let result = sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM authors
            WHERE id = $1
            "#,
        )
        .bind(author_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::AuthorQuery;
    use kernel::interface::update::AuthorModifier;
    use kernel::prelude::entity::{
        AuthorBiography, AuthorDraft, AuthorId, AuthorName, PageRequest,
    };
    use kernel::KernelError;

    use crate::database::postgres::{PostgresAuthorRepository, PostgresDatabase};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        let draft = AuthorDraft::new(
            AuthorName::new("test"),
            Some(AuthorBiography::new("biography")),
        );
        let author = PostgresAuthorRepository.create(&mut con, draft).await?;

        let found = PostgresAuthorRepository
            .find_by_id(&mut con, author.id())
            .await?
            .unwrap();
        assert_eq!(found.name(), &AuthorName::new("test"));
        assert_eq!(found.biography(), &Some(AuthorBiography::new("biography")));

        let author = author.reconstruct(|a| a.biography = None);
        PostgresAuthorRepository.update(&mut con, &author).await?;
        let found = PostgresAuthorRepository
            .find_by_id(&mut con, author.id())
            .await?
            .unwrap();
        assert!(found.biography().is_none());

        let unknown = AuthorId::new(Uuid::new_v4());
        let found = PostgresAuthorRepository
            .find_by_ids(&mut con, &[author.id().clone(), unknown])
            .await?;
        assert_eq!(found, vec![author.clone()]);

        assert!(PostgresAuthorRepository.delete(&mut con, author.id()).await?);
        assert!(!PostgresAuthorRepository.delete(&mut con, author.id()).await?);

        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn find_page_filters_by_name() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let marker = Uuid::new_v4().simple().to_string();

        let draft = AuthorDraft::new(AuthorName::new(format!("Leo {marker}")), None);
        PostgresAuthorRepository.create(&mut con, draft).await?;

        let page = PostgresAuthorRepository
            .find_page(&mut con, Some(&marker.to_uppercase()), &PageRequest::default())
            .await?;
        assert_eq!(page.total_elements(), 1);
        assert_eq!(page.content()[0].name(), &AuthorName::new(format!("Leo {marker}")));

        let page = PostgresAuthorRepository
            .find_page(&mut con, Some("%"), &PageRequest::default())
            .await?;
        assert!(page
            .content()
            .iter()
            .all(|author| AsRef::<String>::as_ref(author.name()).contains('%')));

        Ok(())
    }
}

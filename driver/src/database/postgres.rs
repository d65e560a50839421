use std::ops::{Deref, DerefMut};

use error_stack::Report;
use sqlx::{PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnAuthorQuery, DependOnBookQuery};
use kernel::interface::update::{DependOnAuthorModifier, DependOnBookModifier};
use kernel::prelude::entity::SortDirection;
use kernel::KernelError;

use crate::env;
use crate::error::{ConvertError, DriverError};

pub use self::{author::*, book::*};

mod author;
mod book;

static POSTGRES_URL: &str = "POSTGRES_URL";

/// Entity store backed by PostgreSQL. The expected tables are described in
/// `driver/schema.sql`.
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL).convert_error()?;
        let pool = Pool::connect(&url).await.convert_error()?;
        tracing::info!("connected to postgres");
        Ok(Self { pool })
    }
}

pub struct PostgresTransaction(sqlx::Transaction<'static, Postgres>);

impl Deref for PostgresTransaction {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[async_trait::async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let transaction = self.pool.begin().await.convert_error()?;
        Ok(PostgresTransaction(transaction))
    }
}

impl DependOnAuthorQuery for PostgresDatabase {
    type AuthorQuery = PostgresAuthorRepository;
    fn author_query(&self) -> &Self::AuthorQuery {
        &PostgresAuthorRepository
    }
}

impl DependOnAuthorModifier for PostgresDatabase {
    type AuthorModifier = PostgresAuthorRepository;
    fn author_modifier(&self) -> &Self::AuthorModifier {
        &PostgresAuthorRepository
    }
}

impl DependOnBookQuery for PostgresDatabase {
    type BookQuery = PostgresBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &PostgresBookRepository
    }
}

impl DependOnBookModifier for PostgresDatabase {
    type BookModifier = PostgresBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &PostgresBookRepository
    }
}

impl<T> ConvertError for Result<T, sqlx::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(DriverError::from).convert_error()
    }
}

/// `ILIKE` pattern matching `term` anywhere, with wildcards in `term` taken literally.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn order_by(column: Option<(&str, SortDirection)>) -> String {
    match column {
        None => String::from("id ASC"),
        Some((column, SortDirection::Asc)) => format!("{column} ASC NULLS LAST, id ASC"),
        Some((column, SortDirection::Desc)) => format!("{column} DESC NULLS LAST, id ASC"),
    }
}

fn total_count(count: i64) -> error_stack::Result<u64, KernelError> {
    u64::try_from(count).map_err(|_| {
        Report::new(KernelError::Internal).attach_printable(format!("Negative row count: {count}"))
    })
}

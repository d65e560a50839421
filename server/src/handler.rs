use driver::database::PostgresDatabase;
use kernel::KernelError;
use std::ops::Deref;
use std::sync::Arc;

/// Router state. Generic over the store so the routes can be driven against
/// the in-memory store as well as PostgreSQL.
pub struct AppModule<D = PostgresDatabase>(Arc<Handler<D>>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self::with_database(PostgresDatabase::new().await?))
    }
}

impl<D> AppModule<D> {
    pub fn with_database(database: D) -> Self {
        Self(Arc::new(Handler { database }))
    }
}

impl<D> Clone for AppModule<D> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<D> Deref for AppModule<D> {
    type Target = Handler<D>;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler<D> {
    database: D,
}

impl<D> Handler<D> {
    pub fn database(&self) -> &D {
        &self.database
    }
}

use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::error::TestError;

/// One test's isolated store: an in-memory SQLite opened on first use.
pub struct TestContext {
    pub db: Option<DatabaseConnection>,
}

impl TestContext {
    pub fn new() -> Self {
        Self { db: None }
    }

    /// Connection to the in-memory store, opened on the first call.
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        let db = match self.db.take() {
            Some(db) => db,
            None => Database::connect("sqlite::memory:").await?,
        };

        Ok(&*self.db.insert(db))
    }

    /// Runs the CREATE TABLE statements collected by `TestBuilder`, in order.
    pub async fn create_tables(
        &mut self,
        statements: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        let db = self.database().await?;

        for statement in statements {
            db.execute(&statement).await?;
        }

        Ok(())
    }
}

use entity::prelude::*;
use sea_orm::{
    sea_query::{Alias, Index, IndexCreateStatement, TableCreateStatement},
    EntityTrait, Schema,
};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Carrier, Mission};
///
/// let test = TestBuilder::new()
///     .with_table(Carrier)
///     .with_table(Mission)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// Vector of CREATE TABLE statements to execute during database setup.
    ///
    /// Each statement is generated from an entity model using SeaORM's schema builder.
    /// Statements are executed in the order they were added during `build()`.
    tables: Vec<TableCreateStatement>,
    /// Vector of CREATE INDEX statements to execute after the tables are created.
    ///
    /// Composite unique indexes cannot be expressed on a `DeriveEntityModel`, so they
    /// are declared here to mirror the schema produced by the migrations.
    indexes: Vec<IndexCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    ///
    /// # Returns
    /// - New `TestBuilder` instance with empty table configuration
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. The table will be created when `build()` is called. Chain multiple
    /// calls to add multiple tables.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity model implementing `EntityTrait` to create table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds all tables required for mission lifecycle operations.
    ///
    /// This convenience method adds the following tables:
    /// - Carrier
    /// - Mission
    /// - Webhook
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let test = TestBuilder::new()
    ///     .with_mission_tables()
    ///     .build()
    ///     .await?;
    /// ```
    pub fn with_mission_tables(mut self) -> Self {
        self = self
            .with_table(Carrier)
            .with_table(Mission)
            .with_table(Webhook);

        // Composite unique indexes for the webhook table, mirroring the
        // migration (`create_table_from_entity` only emits single-column
        // uniqueness, so these must be declared explicitly).
        self.indexes.push(
            Index::create()
                .name("idx_webhook_owner_url")
                .table(Alias::new("webhook"))
                .col(Alias::new("owner_id"))
                .col(Alias::new("url"))
                .unique()
                .to_owned(),
        );
        self.indexes.push(
            Index::create()
                .name("idx_webhook_owner_name")
                .table(Alias::new("webhook"))
                .col(Alias::new("owner_id"))
                .col(Alias::new("name"))
                .unique()
                .to_owned(),
        );

        self
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// Creates an in-memory SQLite database connection and executes all CREATE TABLE
    /// statements that were added via `with_table()`. Tables are created in the order
    /// they were added to the builder.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context with database and tables ready
    /// - `Err(TestError::Database)` - Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;
        setup.with_indexes(self.indexes).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

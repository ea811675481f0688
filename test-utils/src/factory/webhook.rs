//! Webhook factory for creating test webhook registrations.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test webhook registrations.
pub struct WebhookFactory<'a> {
    db: &'a DatabaseConnection,
    owner_id: String,
    url: String,
    name: String,
}

impl<'a> WebhookFactory<'a> {
    /// Creates a new WebhookFactory with default values.
    ///
    /// Defaults:
    /// - url: unique synthetic Discord webhook URL
    /// - name: `"hook{id}"`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `owner_id` - Discord ID of the owning user
    ///
    /// # Returns
    /// - `WebhookFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection, owner_id: impl Into<String>) -> Self {
        let id = next_id();
        Self {
            db,
            owner_id: owner_id.into(),
            url: format!("https://discord.com/api/webhooks/{}/token{}", id, id),
            name: format!("hook{}", id),
        }
    }

    /// Sets the webhook URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the webhook's human-readable name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builds and inserts the webhook entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::webhook::Model)` - Created webhook entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::webhook::Model, DbErr> {
        entity::webhook::ActiveModel {
            id: ActiveValue::NotSet,
            owner_id: ActiveValue::Set(self.owner_id),
            url: ActiveValue::Set(self.url),
            name: ActiveValue::Set(self.name),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a webhook registration with default values for the given owner.
///
/// # Arguments
/// - `db` - Database connection
/// - `owner_id` - Discord ID of the owning user
///
/// # Returns
/// - `Ok(entity::webhook::Model)` - Created webhook entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_webhook(
    db: &DatabaseConnection,
    owner_id: impl Into<String>,
) -> Result<entity::webhook::Model, DbErr> {
    WebhookFactory::new(db, owner_id).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_unique_webhooks_per_owner() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Webhook).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let one = create_webhook(db, "user1").await?;
        let two = create_webhook(db, "user1").await?;

        assert_ne!(one.url, two.url);
        assert_ne!(one.name, two.name);

        Ok(())
    }
}

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

pub struct WebhookRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WebhookRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all webhooks registered to a user, oldest first.
    ///
    /// # Arguments
    /// - `owner_id`: Discord ID of the owning user
    ///
    /// # Returns
    /// - `Ok(Vec<Model>)`: The user's webhook registrations
    /// - `Err(DbErr)`: Database error
    pub async fn for_owner(&self, owner_id: &str) -> Result<Vec<entity::webhook::Model>, DbErr> {
        entity::prelude::Webhook::find()
            .filter(entity::webhook::Column::OwnerId.eq(owner_id))
            .order_by_asc(entity::webhook::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Finds a user's webhook by its human-readable name.
    ///
    /// # Returns
    /// - `Ok(Some(Model))`: Webhook found
    /// - `Ok(None)`: No webhook with that name for this user
    /// - `Err(DbErr)`: Database error
    pub async fn find_by_name(
        &self,
        owner_id: &str,
        name: &str,
    ) -> Result<Option<entity::webhook::Model>, DbErr> {
        entity::prelude::Webhook::find()
            .filter(entity::webhook::Column::OwnerId.eq(owner_id))
            .filter(entity::webhook::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    /// Registers a new webhook for a user.
    ///
    /// URL and name are unique per owner; callers check for duplicates first
    /// to give a specific message, and the indexes back them up.
    ///
    /// # Arguments
    /// - `owner_id`: Discord ID of the owning user
    /// - `url`: The webhook URL
    /// - `name`: Short human-readable identifier
    ///
    /// # Returns
    /// - `Ok(Model)`: The created registration
    /// - `Err(DbErr)`: Database error, including unique violations
    pub async fn create(
        &self,
        owner_id: &str,
        url: &str,
        name: &str,
    ) -> Result<entity::webhook::Model, DbErr> {
        entity::webhook::ActiveModel {
            id: ActiveValue::NotSet,
            owner_id: ActiveValue::Set(owner_id.to_string()),
            url: ActiveValue::Set(url.to_string()),
            name: ActiveValue::Set(name.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }

    /// Deletes a user's webhook by name.
    ///
    /// # Returns
    /// - `Ok(u64)`: Number of rows deleted (0 or 1)
    /// - `Err(DbErr)`: Database error
    pub async fn delete_by_name(&self, owner_id: &str, name: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::Webhook::delete_many()
            .filter(entity::webhook::Column::OwnerId.eq(owner_id))
            .filter(entity::webhook::Column::Name.eq(name))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}

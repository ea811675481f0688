//! Carrier factory for creating test carrier entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test carriers with customizable fields.
///
/// Provides a builder pattern for creating carrier entities with default
/// values that can be overridden as needed for specific test scenarios.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::carrier::CarrierFactory;
///
/// let carrier = CarrierFactory::new(&db)
///     .long_name("BOOZE BARGE")
///     .owner_id("123456789")
///     .build()
///     .await?;
/// ```
pub struct CarrierFactory<'a> {
    db: &'a DatabaseConnection,
    short_name: String,
    long_name: String,
    identifier: String,
    owner_id: String,
    channel_name: String,
    market_api_enabled: bool,
}

impl<'a> CarrierFactory<'a> {
    /// Creates a new CarrierFactory with default values.
    ///
    /// Defaults:
    /// - short_name: `"carrier{id}"` where id is auto-incremented
    /// - long_name: `"TEST CARRIER {id}"`
    /// - identifier: `"T{id}-{id}"` style registration
    /// - owner_id: unique synthetic Discord user ID
    /// - channel_name: `"carrier{id}-trade"`
    /// - market_api_enabled: `false`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `CarrierFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            short_name: format!("carrier{}", id),
            long_name: format!("TEST CARRIER {}", id),
            identifier: format!("T{:02}-{:03}", id % 100, id % 1000),
            owner_id: format!("9000000000000{:05}", id),
            channel_name: format!("carrier{}-trade", id),
            market_api_enabled: false,
        }
    }

    /// Sets the carrier short name.
    ///
    /// # Arguments
    /// - `short_name` - Carrier short name (image file stem)
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = short_name.into();
        self
    }

    /// Sets the carrier long name.
    ///
    /// # Arguments
    /// - `long_name` - Full display name of the carrier
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn long_name(mut self, long_name: impl Into<String>) -> Self {
        self.long_name = long_name.into();
        self
    }

    /// Sets the carrier registration identifier.
    ///
    /// # Arguments
    /// - `identifier` - Registration in `XXX-XXX` format
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Sets the owning user's Discord ID.
    ///
    /// # Arguments
    /// - `owner_id` - Discord user ID of the carrier owner
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn owner_id(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = owner_id.into();
        self
    }

    /// Sets the dedicated mission channel name.
    ///
    /// # Arguments
    /// - `channel_name` - Channel name used for the carrier's missions
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn channel_name(mut self, channel_name: impl Into<String>) -> Self {
        self.channel_name = channel_name.into();
        self
    }

    /// Sets whether the carrier is reachable via the external market API.
    ///
    /// # Arguments
    /// - `enabled` - Whether the market API flag is set
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn market_api_enabled(mut self, enabled: bool) -> Self {
        self.market_api_enabled = enabled;
        self
    }

    /// Builds and inserts the carrier entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::carrier::Model)` - Created carrier entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::carrier::Model, DbErr> {
        entity::carrier::ActiveModel {
            id: ActiveValue::NotSet,
            short_name: ActiveValue::Set(self.short_name),
            long_name: ActiveValue::Set(self.long_name),
            identifier: ActiveValue::Set(self.identifier),
            owner_id: ActiveValue::Set(self.owner_id),
            channel_name: ActiveValue::Set(self.channel_name),
            last_trade: ActiveValue::Set(Utc::now()),
            market_api_enabled: ActiveValue::Set(self.market_api_enabled),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a carrier with default values.
///
/// Shorthand for `CarrierFactory::new(db).build().await`.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok(entity::carrier::Model)` - Created carrier entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_carrier(db: &DatabaseConnection) -> Result<entity::carrier::Model, DbErr> {
    CarrierFactory::new(db).build().await
}

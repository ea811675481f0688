//! Mission factory for creating test mission rows.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test missions with customizable fields.
///
/// Missions reference a carrier by name and identifier, matching how the
/// mission store keys rows in production.
pub struct MissionFactory<'a> {
    db: &'a DatabaseConnection,
    carrier_name: String,
    carrier_identifier: String,
    channel_id: String,
    commodity: String,
    mission_type: String,
    system: String,
    station: String,
    profit: f64,
    pads: String,
    demand: f64,
    message: Option<String>,
    params: String,
    created_at: chrono::DateTime<Utc>,
}

impl<'a> MissionFactory<'a> {
    /// Creates a new MissionFactory with default values.
    ///
    /// Defaults:
    /// - commodity: `"Gold"`
    /// - mission_type: `"load"`
    /// - system: `"HIP 57784"`, station: `"MACKENZIE RELAY"`
    /// - profit: `12.0`, pads: `"L"`, demand: `20.0`
    /// - params: empty JSON object
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `carrier` - Carrier the mission belongs to
    ///
    /// # Returns
    /// - `MissionFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection, carrier: &entity::carrier::Model) -> Self {
        let id = next_id();
        Self {
            db,
            carrier_name: carrier.long_name.clone(),
            carrier_identifier: carrier.identifier.clone(),
            channel_id: format!("80000000000{:05}", id),
            commodity: "Gold".to_string(),
            mission_type: "load".to_string(),
            system: "HIP 57784".to_string(),
            station: "MACKENZIE RELAY".to_string(),
            profit: 12.0,
            pads: "L".to_string(),
            demand: 20.0,
            message: None,
            params: "{}".to_string(),
            created_at: Utc::now(),
        }
    }

    /// Sets the commodity name.
    pub fn commodity(mut self, commodity: impl Into<String>) -> Self {
        self.commodity = commodity.into();
        self
    }

    /// Sets the mission type (`"load"` or `"unload"`).
    pub fn mission_type(mut self, mission_type: impl Into<String>) -> Self {
        self.mission_type = mission_type.into();
        self
    }

    /// Sets the profit per unit in thousands of credits.
    pub fn profit(mut self, profit: f64) -> Self {
        self.profit = profit;
        self
    }

    /// Sets the supply/demand quantity in thousands of tons.
    pub fn demand(mut self, demand: f64) -> Self {
        self.demand = demand;
        self
    }

    /// Sets the free-text mission message.
    pub fn message(mut self, message: Option<String>) -> Self {
        self.message = message;
        self
    }

    /// Sets the serialized parameter blob.
    pub fn params(mut self, params: impl Into<String>) -> Self {
        self.params = params.into();
        self
    }

    /// Sets the row creation timestamp (used by idle-sweep tests).
    pub fn created_at(mut self, created_at: chrono::DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the mission entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::mission::Model)` - Created mission entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::mission::Model, DbErr> {
        entity::mission::ActiveModel {
            id: ActiveValue::NotSet,
            carrier_name: ActiveValue::Set(self.carrier_name),
            carrier_identifier: ActiveValue::Set(self.carrier_identifier),
            channel_id: ActiveValue::Set(self.channel_id),
            commodity: ActiveValue::Set(self.commodity),
            mission_type: ActiveValue::Set(self.mission_type),
            system: ActiveValue::Set(self.system),
            station: ActiveValue::Set(self.station),
            profit: ActiveValue::Set(self.profit),
            pads: ActiveValue::Set(self.pads),
            demand: ActiveValue::Set(self.demand),
            message: ActiveValue::Set(self.message),
            forum_post_id: ActiveValue::Set(None),
            forum_post_url: ActiveValue::Set(None),
            forum_comment_id: ActiveValue::Set(None),
            forum_comment_url: ActiveValue::Set(None),
            alert_message_id: ActiveValue::Set(None),
            params: ActiveValue::Set(self.params),
            created_at: ActiveValue::Set(self.created_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a mission with default values for the given carrier.
///
/// Shorthand for `MissionFactory::new(db, carrier).build().await`.
///
/// # Arguments
/// - `db` - Database connection
/// - `carrier` - Carrier the mission belongs to
///
/// # Returns
/// - `Ok(entity::mission::Model)` - Created mission entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_mission(
    db: &DatabaseConnection,
    carrier: &entity::carrier::Model,
) -> Result<entity::mission::Model, DbErr> {
    MissionFactory::new(db, carrier).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use crate::factory::carrier::create_carrier;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_mission_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_mission_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let carrier = create_carrier(db).await?;
        let mission = create_mission(db, &carrier).await?;

        assert_eq!(mission.carrier_name, carrier.long_name);
        assert_eq!(mission.carrier_identifier, carrier.identifier);
        assert_eq!(mission.mission_type, "load");

        Ok(())
    }

    #[tokio::test]
    async fn rejects_second_mission_for_same_carrier() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_mission_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let carrier = create_carrier(db).await?;
        create_mission(db, &carrier).await?;
        let second = create_mission(db, &carrier).await;

        assert!(second.is_err(), "carrier_name must be unique");

        Ok(())
    }
}

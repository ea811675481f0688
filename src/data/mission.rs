use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::model::mission::MissionParams;

pub struct MissionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MissionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts the mission row for a fully-populated, post-send parameter set.
    ///
    /// Normalized columns are derived from the params; the entire object is
    /// additionally serialized into the `params` column so the exact
    /// generation-time state can be recovered later. The unique index on
    /// `carrier_name` turns a concurrent duplicate into a `DbErr` the caller
    /// maps with [`crate::data::is_unique_violation`].
    ///
    /// # Arguments
    /// - `params`: Mission parameters with carrier and commodity resolved
    ///
    /// # Returns
    /// - `Ok(Model)`: The inserted mission row
    /// - `Err(DbErr)`: Database error, including unique violations
    pub async fn insert(&self, params: &MissionParams) -> Result<entity::mission::Model, DbErr> {
        let carrier = params
            .carrier
            .as_ref()
            .ok_or_else(|| DbErr::Custom("mission insert without resolved carrier".to_string()))?;
        let commodity = params
            .commodity
            .as_ref()
            .ok_or_else(|| DbErr::Custom("mission insert without resolved commodity".to_string()))?;
        let blob = serde_json::to_string(params).map_err(|e| DbErr::Custom(e.to_string()))?;

        entity::mission::ActiveModel {
            id: ActiveValue::NotSet,
            carrier_name: ActiveValue::Set(carrier.long_name.clone()),
            carrier_identifier: ActiveValue::Set(carrier.identifier.clone()),
            channel_id: ActiveValue::Set(
                params
                    .mission_channel_id
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
            ),
            commodity: ActiveValue::Set(commodity.name.clone()),
            mission_type: ActiveValue::Set(params.mission_type.to_string()),
            system: ActiveValue::Set(params.system.clone()),
            station: ActiveValue::Set(params.station.clone()),
            profit: ActiveValue::Set(params.profit.unwrap_or_default()),
            pads: ActiveValue::Set(
                params
                    .pads
                    .map(|p| p.letter().to_string())
                    .unwrap_or_default(),
            ),
            demand: ActiveValue::Set(params.demand.unwrap_or_default()),
            message: ActiveValue::Set(params.message.clone()),
            forum_post_id: ActiveValue::Set(params.forum_post_id.clone()),
            forum_post_url: ActiveValue::Set(params.forum_post_url.clone()),
            forum_comment_id: ActiveValue::Set(params.forum_comment_id.clone()),
            forum_comment_url: ActiveValue::Set(params.forum_comment_url.clone()),
            alert_message_id: ActiveValue::Set(params.alert_message_id.map(|id| id.to_string())),
            params: ActiveValue::Set(blob),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }

    /// Finds the active mission for a carrier matched by name fragment.
    ///
    /// Matching is case-insensitive, mirroring carrier lookup, so completion
    /// commands accept the same search terms generation does.
    ///
    /// # Returns
    /// - `Ok(Some(Model))`: Active mission found
    /// - `Ok(None)`: Carrier has no active mission
    /// - `Err(DbErr)`: Database error
    pub async fn find_by_carrier(
        &self,
        fragment: &str,
    ) -> Result<Option<entity::mission::Model>, DbErr> {
        entity::prelude::Mission::find()
            .filter(entity::mission::Column::CarrierName.contains(fragment))
            .one(self.db)
            .await
    }

    /// Lists all active missions, oldest first.
    ///
    /// # Returns
    /// - `Ok(Vec<Model>)`: Active missions
    /// - `Err(DbErr)`: Database error
    pub async fn get_all(&self) -> Result<Vec<entity::mission::Model>, DbErr> {
        entity::prelude::Mission::find()
            .order_by_asc(entity::mission::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Finds missions created before the given cutoff.
    ///
    /// Used by the idle-timeout sweep.
    ///
    /// # Arguments
    /// - `cutoff`: Missions older than this instant are returned
    ///
    /// # Returns
    /// - `Ok(Vec<Model>)`: Stale missions
    /// - `Err(DbErr)`: Database error
    pub async fn find_older_than(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<entity::mission::Model>, DbErr> {
        entity::prelude::Mission::find()
            .filter(entity::mission::Column::CreatedAt.lt(cutoff))
            .order_by_asc(entity::mission::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Deletes the mission row for a carrier (exact long name).
    ///
    /// # Arguments
    /// - `carrier_name`: Exact carrier long name the mission is keyed by
    ///
    /// # Returns
    /// - `Ok(u64)`: Number of rows deleted (0 or 1)
    /// - `Err(DbErr)`: Database error
    pub async fn delete_by_carrier(&self, carrier_name: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::Mission::delete_many()
            .filter(entity::mission::Column::CarrierName.eq(carrier_name))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Rewrites a mission row from an edited parameter set.
    ///
    /// Updates the normalized columns and replaces the serialized blob.
    ///
    /// # Arguments
    /// - `id`: Mission primary key
    /// - `params`: The edited parameters
    ///
    /// # Returns
    /// - `Ok(Model)`: The updated mission row
    /// - `Err(DbErr)`: Database error or unknown mission id
    pub async fn update_from_params(
        &self,
        id: i32,
        params: &MissionParams,
    ) -> Result<entity::mission::Model, DbErr> {
        let mission = entity::prelude::Mission::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!("Mission {} not found", id)))?;

        let blob = serde_json::to_string(params).map_err(|e| DbErr::Custom(e.to_string()))?;

        let mut active_model: entity::mission::ActiveModel = mission.into();
        active_model.system = ActiveValue::Set(params.system.clone());
        active_model.station = ActiveValue::Set(params.station.clone());
        if let Some(commodity) = &params.commodity {
            active_model.commodity = ActiveValue::Set(commodity.name.clone());
        }
        if let Some(profit) = params.profit {
            active_model.profit = ActiveValue::Set(profit);
        }
        if let Some(pads) = params.pads {
            active_model.pads = ActiveValue::Set(pads.letter().to_string());
        }
        if let Some(demand) = params.demand {
            active_model.demand = ActiveValue::Set(demand);
        }
        active_model.message = ActiveValue::Set(params.message.clone());
        active_model.params = ActiveValue::Set(blob);

        active_model.update(self.db).await
    }
}

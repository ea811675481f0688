use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

pub struct CarrierRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CarrierRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds carriers whose long name contains the search fragment.
    ///
    /// Matching is case-insensitive (SQLite `LIKE` semantics for ASCII).
    /// Results are ordered by long name so disambiguation lists are stable.
    ///
    /// # Arguments
    /// - `fragment`: Partial carrier name to search for
    ///
    /// # Returns
    /// - `Ok(Vec<Model>)`: All matching carriers, possibly empty
    /// - `Err(DbErr)`: Database error
    pub async fn find_by_name_fragment(
        &self,
        fragment: &str,
    ) -> Result<Vec<entity::carrier::Model>, DbErr> {
        entity::prelude::Carrier::find()
            .filter(entity::carrier::Column::LongName.contains(fragment))
            .order_by_asc(entity::carrier::Column::LongName)
            .all(self.db)
            .await
    }

    /// Gets a carrier by its exact long name.
    ///
    /// # Returns
    /// - `Ok(Some(Model))`: Carrier found
    /// - `Ok(None)`: No carrier with that name
    /// - `Err(DbErr)`: Database error
    pub async fn find_by_long_name(
        &self,
        long_name: &str,
    ) -> Result<Option<entity::carrier::Model>, DbErr> {
        entity::prelude::Carrier::find()
            .filter(entity::carrier::Column::LongName.eq(long_name))
            .one(self.db)
            .await
    }

    /// Stamps the carrier's last-trade timestamp with the current time.
    ///
    /// Called when a mission for the carrier is committed.
    ///
    /// # Arguments
    /// - `id`: Carrier primary key
    ///
    /// # Returns
    /// - `Ok(())`: Timestamp updated
    /// - `Err(DbErr)`: Database error
    pub async fn update_last_trade(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Carrier::update_many()
            .col_expr(entity::carrier::Column::LastTrade, Expr::value(Utc::now()))
            .filter(entity::carrier::Column::Id.eq(id))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Flags whether the carrier is reachable via the external market API.
    ///
    /// # Arguments
    /// - `id`: Carrier primary key
    /// - `enabled`: New flag value
    ///
    /// # Returns
    /// - `Ok(())`: Flag updated
    /// - `Err(DbErr)`: Database error
    pub async fn set_market_api(&self, id: i32, enabled: bool) -> Result<(), DbErr> {
        entity::prelude::Carrier::update_many()
            .col_expr(
                entity::carrier::Column::MarketApiEnabled,
                Expr::value(enabled),
            )
            .filter(entity::carrier::Column::Id.eq(id))
            .exec(self.db)
            .await?;
        Ok(())
    }
}

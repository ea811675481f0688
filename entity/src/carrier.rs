use sea_orm::entity::prelude::*;

/// A registered Fleet Carrier owned by a Certified Carrier Owner.
///
/// `short_name` doubles as the carrier's image file stem and must be unique.
/// `channel_name` is the name of the carrier's dedicated mission channel.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "carrier")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub short_name: String,
    pub long_name: String,
    pub identifier: String,
    pub owner_id: String,
    pub channel_name: String,
    pub last_trade: DateTimeUtc,
    pub market_api_enabled: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

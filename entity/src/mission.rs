use sea_orm::entity::prelude::*;

/// An active trade mission.
///
/// Normalized columns serve the list/search commands; `params` holds the full
/// serialized mission parameters for full-fidelity retrieval. `carrier_name`
/// is unique so a carrier can never hold two active missions, even if two
/// generation flows pass validation concurrently.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "mission")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub carrier_name: String,
    pub carrier_identifier: String,
    pub channel_id: String,
    pub commodity: String,
    pub mission_type: String,
    pub system: String,
    pub station: String,
    pub profit: f64,
    pub pads: String,
    pub demand: f64,
    pub message: Option<String>,
    pub forum_post_id: Option<String>,
    pub forum_post_url: Option<String>,
    pub forum_comment_id: Option<String>,
    pub forum_comment_url: Option<String>,
    pub alert_message_id: Option<String>,
    pub params: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

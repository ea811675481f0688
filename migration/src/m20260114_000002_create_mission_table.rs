use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Mission::Table)
                    .if_not_exists()
                    .col(pk_auto(Mission::Id))
                    // unique: a carrier can hold at most one active mission
                    .col(string_uniq(Mission::CarrierName))
                    .col(string(Mission::CarrierIdentifier))
                    .col(string(Mission::ChannelId))
                    .col(string(Mission::Commodity))
                    .col(string(Mission::MissionType))
                    .col(string(Mission::System))
                    .col(string(Mission::Station))
                    .col(double(Mission::Profit))
                    .col(string(Mission::Pads))
                    .col(double(Mission::Demand))
                    .col(text_null(Mission::Message))
                    .col(string_null(Mission::ForumPostId))
                    .col(string_null(Mission::ForumPostUrl))
                    .col(string_null(Mission::ForumCommentId))
                    .col(string_null(Mission::ForumCommentUrl))
                    .col(string_null(Mission::AlertMessageId))
                    .col(text(Mission::Params))
                    .col(
                        timestamp(Mission::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Mission::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Mission {
    Table,
    Id,
    CarrierName,
    CarrierIdentifier,
    ChannelId,
    Commodity,
    MissionType,
    System,
    Station,
    Profit,
    Pads,
    Demand,
    Message,
    ForumPostId,
    ForumPostUrl,
    ForumCommentId,
    ForumCommentUrl,
    AlertMessageId,
    Params,
    CreatedAt,
}

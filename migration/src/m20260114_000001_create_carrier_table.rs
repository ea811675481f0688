use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Carrier::Table)
                    .if_not_exists()
                    .col(pk_auto(Carrier::Id))
                    .col(string_uniq(Carrier::ShortName))
                    .col(string(Carrier::LongName))
                    .col(string(Carrier::Identifier))
                    .col(string(Carrier::OwnerId))
                    .col(string(Carrier::ChannelName))
                    .col(
                        timestamp(Carrier::LastTrade)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(boolean(Carrier::MarketApiEnabled).default(false))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Carrier::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Carrier {
    Table,
    Id,
    ShortName,
    LongName,
    Identifier,
    OwnerId,
    ChannelName,
    LastTrade,
    MarketApiEnabled,
}

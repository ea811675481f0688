use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Webhook::Table)
                    .if_not_exists()
                    .col(pk_auto(Webhook::Id))
                    .col(string(Webhook::OwnerId))
                    .col(string(Webhook::Url))
                    .col(string(Webhook::Name))
                    .col(
                        timestamp(Webhook::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_webhook_owner_url")
                    .table(Webhook::Table)
                    .col(Webhook::OwnerId)
                    .col(Webhook::Url)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_webhook_owner_name")
                    .table(Webhook::Table)
                    .col(Webhook::OwnerId)
                    .col(Webhook::Name)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Webhook::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Webhook {
    Table,
    Id,
    OwnerId,
    Url,
    Name,
    CreatedAt,
}

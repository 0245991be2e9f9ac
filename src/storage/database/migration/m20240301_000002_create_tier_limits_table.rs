use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TierLimits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TierLimits::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TierLimits::SubscriptionId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TierLimits::Feature).string().not_null())
                    .col(
                        ColumnDef::new(TierLimits::CreateLimit)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TierLimits::CreateUsage)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TierLimits::UpdateLimit)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TierLimits::UpdateUsage)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TierLimits::DeleteLimit)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TierLimits::DeleteUsage)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tier_limits_subscription_id")
                            .from(TierLimits::Table, TierLimits::SubscriptionId)
                            .to(Subscriptions::Table, Subscriptions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tier_limits_subscription_feature")
                    .table(TierLimits::Table)
                    .col(TierLimits::SubscriptionId)
                    .col(TierLimits::Feature)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TierLimits::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TierLimits {
    Table,
    Id,
    SubscriptionId,
    Feature,
    CreateLimit,
    CreateUsage,
    UpdateLimit,
    UpdateUsage,
    DeleteLimit,
    DeleteUsage,
}

#[derive(DeriveIden)]
enum Subscriptions {
    Table,
    Id,
}

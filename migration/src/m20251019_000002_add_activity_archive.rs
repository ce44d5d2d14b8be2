use sea_orm_migration::prelude::*;

use crate::m20251019_000001_create_roulette_tables::RouletteConfigs;

/// 活动 (归档后的抽奖记录集合)
#[derive(DeriveIden)]
enum AwardLists {
    Table,
    Id,
    ActivityName,
    ConfigId,
    CreatedAt,
}

/// 活动获奖记录 (从 draw_histories 拷贝)
#[derive(DeriveIden)]
enum AwardHistories {
    Table,
    Id,
    ActivityId,
    Nickname,
    PrizeName,
    DrawnAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AwardLists::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AwardLists::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AwardLists::ActivityName)
                            .string_len(100)
                            .not_null(),
                    )
                    // 配置删除后活动仍保留
                    .col(ColumnDef::new(AwardLists::ConfigId).big_integer().null())
                    .col(
                        ColumnDef::new(AwardLists::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_award_lists_config")
                            .from(AwardLists::Table, AwardLists::ConfigId)
                            .to(RouletteConfigs::Table, RouletteConfigs::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 活动名称唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_award_lists_activity_name_unique")
                    .table(AwardLists::Table)
                    .col(AwardLists::ActivityName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AwardHistories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AwardHistories::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AwardHistories::ActivityId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AwardHistories::Nickname)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AwardHistories::PrizeName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AwardHistories::DrawnAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_award_histories_activity")
                            .from(AwardHistories::Table, AwardHistories::ActivityId)
                            .to(AwardLists::Table, AwardLists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_award_histories_activity")
                    .table(AwardHistories::Table)
                    .col(AwardHistories::ActivityId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(AwardHistories::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(AwardLists::Table).to_owned())
            .await?;

        Ok(())
    }
}

use sea_orm_migration::prelude::*;

/// 转盘配置
#[derive(DeriveIden)]
pub(crate) enum RouletteConfigs {
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

/// 转盘奖品 (按 sort_order, id 排序)
#[derive(DeriveIden)]
enum Prizes {
    Table,
    Id,
    ConfigId,
    Name,
    Probability,
    SortOrder,
}

/// 当前抽奖记录 (活动归档后清空)
#[derive(DeriveIden)]
enum DrawHistories {
    Table,
    Id,
    ConfigId,
    Nickname,
    PrizeName,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RouletteConfigs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RouletteConfigs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RouletteConfigs::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RouletteConfigs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(RouletteConfigs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Prizes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prizes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prizes::ConfigId).big_integer().not_null())
                    .col(ColumnDef::new(Prizes::Name).string_len(100).not_null())
                    // 概率为相对权重，<= 0 不上转盘
                    .col(ColumnDef::new(Prizes::Probability).double().not_null())
                    .col(
                        ColumnDef::new(Prizes::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_prizes_config")
                            .from(Prizes::Table, Prizes::ConfigId)
                            .to(RouletteConfigs::Table, RouletteConfigs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_prizes_config_order")
                    .table(Prizes::Table)
                    .col(Prizes::ConfigId)
                    .col(Prizes::SortOrder)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DrawHistories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DrawHistories::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DrawHistories::ConfigId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DrawHistories::Nickname)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DrawHistories::PrizeName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DrawHistories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_draw_histories_config")
                            .from(DrawHistories::Table, DrawHistories::ConfigId)
                            .to(RouletteConfigs::Table, RouletteConfigs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 最近记录查询
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_draw_histories_config_created")
                    .table(DrawHistories::Table)
                    .col(DrawHistories::ConfigId)
                    .col(DrawHistories::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除顺序：记录 -> 奖品 -> 配置
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(DrawHistories::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Prizes::Table).to_owned())
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(RouletteConfigs::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

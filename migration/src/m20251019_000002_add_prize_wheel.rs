use sea_orm_migration::prelude::*;

/// 转盘奖品 (固定 8 格)
#[derive(DeriveIden)]
enum Prizes {
    Table,
    Id,
    Position,
    Name,
    Description,
    Probability,
    Version,
    UpdatedBy,
    UpdatedAt,
}

/// 抽奖结果 (只追加)
#[derive(DeriveIden)]
enum SpinResults {
    Table,
    Id,
    TokenId,
    PrizePosition,
    PrizeName,
    SpinAngle,
    PrizeTableVersion,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 默认奖品配置，概率为百分比，合计 100
const DEFAULT_PRIZES: [(i32, &str, &str, f64); 8] = [
    (1, "Prize 1", "Grand prize", 5.0),
    (2, "Prize 2", "Second prize", 10.0),
    (3, "Prize 3", "Consolation prize", 15.0),
    (4, "Prize 4", "Small prize", 20.0),
    (5, "Prize 5", "Minor prize", 15.0),
    (6, "Prize 6", "Runner-up prize", 10.0),
    (7, "Prize 7", "New prize", 15.0),
    (8, "Prize 8", "Special prize", 10.0),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
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
                    .col(ColumnDef::new(Prizes::Position).integer().not_null())
                    .col(ColumnDef::new(Prizes::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Prizes::Description)
                            .string_len(1024)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Prizes::Probability).double().not_null())
                    .col(
                        ColumnDef::new(Prizes::Version)
                            .big_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Prizes::UpdatedBy).big_integer().null())
                    .col(
                        ColumnDef::new(Prizes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 每个格子只能有一条奖品
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_prizes_position_unique")
                    .table(Prizes::Table)
                    .col(Prizes::Position)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SpinResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SpinResults::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SpinResults::TokenId).string_len(32).not_null())
                    .col(ColumnDef::new(SpinResults::PrizePosition).integer().not_null())
                    .col(ColumnDef::new(SpinResults::PrizeName).string_len(255).not_null())
                    .col(ColumnDef::new(SpinResults::SpinAngle).double().not_null())
                    .col(
                        ColumnDef::new(SpinResults::PrizeTableVersion)
                            .big_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(SpinResults::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 后台按时间倒序查看
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_spin_results_created_at")
                    .table(SpinResults::Table)
                    .col(SpinResults::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // 一个 token 最多对应一条抽奖结果
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_spin_results_token_id_unique")
                    .table(SpinResults::Table)
                    .col(SpinResults::TokenId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 初始化 8 个默认奖品
        let mut insert = Query::insert();
        insert.into_table(Prizes::Table).columns([
            Prizes::Position,
            Prizes::Name,
            Prizes::Description,
            Prizes::Probability,
        ]);
        for (position, name, description, probability) in DEFAULT_PRIZES {
            insert.values_panic([
                position.into(),
                name.into(),
                description.into(),
                probability.into(),
            ]);
        }
        insert.on_conflict(OnConflict::column(Prizes::Position).do_nothing().to_owned());
        manager.exec_stmt(insert.to_owned()).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(SpinResults::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Prizes::Table).to_owned())
            .await?;

        Ok(())
    }
}

use sea_orm_migration::prelude::*;

/// 管理员账号 (superadmin / admin)
#[derive(DeriveIden)]
enum Admins {
    Table,
    Id,
    Username,
    PasswordHash,
    Role,
    CreatedBy,
    CreatedAt,
}

/// 一次性抽奖 Token
#[derive(DeriveIden)]
enum Tokens {
    Table,
    Id,
    TokenId,
    IsUsed,
    UsedAt,
    ExpiresAt,
    CreatedBy,
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
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Admins::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Admins::Username).string_len(64).not_null())
                    .col(ColumnDef::new(Admins::PasswordHash).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Admins::Role)
                            .string_len(16)
                            .not_null()
                            .default("admin"),
                    )
                    .col(ColumnDef::new(Admins::CreatedBy).big_integer().null())
                    .col(
                        ColumnDef::new(Admins::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_admins_username_unique")
                    .table(Admins::Table)
                    .col(Admins::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tokens::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tokens::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tokens::TokenId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Tokens::IsUsed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Tokens::UsedAt).timestamp_with_time_zone().null())
                    .col(
                        ColumnDef::new(Tokens::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Tokens::CreatedBy).big_integer().not_null())
                    .col(
                        ColumnDef::new(Tokens::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // token_id 全局唯一，兑换时按它查找
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tokens_token_id_unique")
                    .table(Tokens::Table)
                    .col(Tokens::TokenId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 过期清理任务按 expires_at 扫描
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tokens_expires_at")
                    .table(Tokens::Table)
                    .col(Tokens::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Tokens::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Admins::Table).to_owned())
            .await?;

        Ok(())
    }
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuthCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuthCodes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AuthCodes::TelegramUserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AuthCodes::Code).string().not_null())
                    .col(ColumnDef::new(AuthCodes::FirstName).string().not_null())
                    .col(ColumnDef::new(AuthCodes::LastName).string())
                    .col(ColumnDef::new(AuthCodes::Username).string())
                    .col(ColumnDef::new(AuthCodes::PhotoUrl).string())
                    .col(
                        ColumnDef::new(AuthCodes::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AuthCodes::UsedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(AuthCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Claim filters on code; issuance deletes by owner.
        manager
            .create_index(
                Index::create()
                    .table(AuthCodes::Table)
                    .col(AuthCodes::Code)
                    .name("idx_auth_codes_code")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(AuthCodes::Table)
                    .col(AuthCodes::TelegramUserId)
                    .name("idx_auth_codes_telegram_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuthCodes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AuthCodes {
    Table,
    Id,
    TelegramUserId,
    Code,
    FirstName,
    LastName,
    Username,
    PhotoUrl,
    ExpiresAt,
    UsedAt,
    CreatedAt,
}

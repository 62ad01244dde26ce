use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Append-only security audit log
        manager
            .create_table(
                Table::create()
                    .table(SecurityAuditLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SecurityAuditLogs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SecurityAuditLogs::Action).string().not_null())
                    .col(ColumnDef::new(SecurityAuditLogs::ResourceType).string().not_null())
                    .col(ColumnDef::new(SecurityAuditLogs::ResourceId).string().null())
                    .col(ColumnDef::new(SecurityAuditLogs::UserId).string().null())
                    .col(ColumnDef::new(SecurityAuditLogs::IpAddress).string().null())
                    .col(ColumnDef::new(SecurityAuditLogs::UserAgent).string().null())
                    .col(ColumnDef::new(SecurityAuditLogs::Details).text().not_null())
                    .col(ColumnDef::new(SecurityAuditLogs::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_security_audit_logs_action_created_at")
                    .table(SecurityAuditLogs::Table)
                    .col(SecurityAuditLogs::Action)
                    .col(SecurityAuditLogs::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Every client/admin login attempt
        manager
            .create_table(
                Table::create()
                    .table(AuthAttempts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuthAttempts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AuthAttempts::Identifier).string().not_null())
                    .col(ColumnDef::new(AuthAttempts::Email).string().null())
                    .col(ColumnDef::new(AuthAttempts::AttemptType).string().not_null())
                    .col(ColumnDef::new(AuthAttempts::Success).boolean().not_null())
                    .col(ColumnDef::new(AuthAttempts::IpAddress).string().null())
                    .col(ColumnDef::new(AuthAttempts::ErrorMessage).string().null())
                    .col(ColumnDef::new(AuthAttempts::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_auth_attempts_created_at")
                    .table(AuthAttempts::Table)
                    .col(AuthAttempts::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // One fixed-window counter per (ip, endpoint)
        manager
            .create_table(
                Table::create()
                    .table(ApiRateLimits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ApiRateLimits::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ApiRateLimits::IpAddress).string().not_null())
                    .col(ColumnDef::new(ApiRateLimits::Endpoint).string().not_null())
                    .col(ColumnDef::new(ApiRateLimits::RequestCount).integer().not_null().default(1))
                    .col(ColumnDef::new(ApiRateLimits::WindowStart).big_integer().not_null())
                    .col(ColumnDef::new(ApiRateLimits::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // The upsert conflict target
        manager
            .create_index(
                Index::create()
                    .name("idx_api_rate_limits_ip_endpoint")
                    .table(ApiRateLimits::Table)
                    .col(ApiRateLimits::IpAddress)
                    .col(ApiRateLimits::Endpoint)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ApiRateLimits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AuthAttempts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SecurityAuditLogs::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum SecurityAuditLogs {
    Table,
    Id,
    Action,
    ResourceType,
    ResourceId,
    UserId,
    IpAddress,
    UserAgent,
    Details,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AuthAttempts {
    Table,
    Id,
    Identifier,
    Email,
    AttemptType,
    Success,
    IpAddress,
    ErrorMessage,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ApiRateLimits {
    Table,
    Id,
    IpAddress,
    Endpoint,
    RequestCount,
    WindowStart,
    CreatedAt,
}

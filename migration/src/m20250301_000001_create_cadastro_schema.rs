use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Clients served by the back office
        manager
            .create_table(
                Table::create()
                    .table(Clientes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Clientes::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Clientes::Nome).string().not_null())
                    .col(ColumnDef::new(Clientes::Email).string().null().unique_key())
                    .col(ColumnDef::new(Clientes::Cpf).string().not_null().unique_key())
                    .col(ColumnDef::new(Clientes::Telefone).string().null())
                    .col(ColumnDef::new(Clientes::Endereco).string().null())
                    .col(ColumnDef::new(Clientes::PlacaVeiculo).string().null())
                    .col(ColumnDef::new(Clientes::AccountStatus).string().not_null().default("active"))
                    .col(ColumnDef::new(Clientes::LoginAttempts).integer().not_null().default(0))
                    .col(ColumnDef::new(Clientes::LastLoginAt).big_integer().null())
                    .col(ColumnDef::new(Clientes::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Clientes::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_clientes_placa_veiculo")
                    .table(Clientes::Table)
                    .col(Clientes::PlacaVeiculo)
                    .to_owned(),
            )
            .await?;

        // Documents attached to a client; removed with the client
        manager
            .create_table(
                Table::create()
                    .table(Documentos::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Documentos::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Documentos::ClienteId).string().not_null())
                    .col(ColumnDef::new(Documentos::TipoDocumento).string().not_null())
                    .col(ColumnDef::new(Documentos::NumeroDocumento).string().null())
                    .col(ColumnDef::new(Documentos::Status).string().not_null().default("pending"))
                    .col(ColumnDef::new(Documentos::ArquivoPath).string().null())
                    .col(ColumnDef::new(Documentos::Observacoes).string().null())
                    .col(ColumnDef::new(Documentos::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Documentos::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_documentos_cliente_id")
                            .from(Documentos::Table, Documentos::ClienteId)
                            .to(Clientes::Table, Clientes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_documentos_cliente_id")
                    .table(Documentos::Table)
                    .col(Documentos::ClienteId)
                    .to_owned(),
            )
            .await?;

        // Back-office profiles (administrators)
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Profiles::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Profiles::UserId).string().not_null().unique_key())
                    .col(ColumnDef::new(Profiles::Nome).string().not_null())
                    .col(ColumnDef::new(Profiles::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Profiles::Telefone).string().null())
                    .col(ColumnDef::new(Profiles::TipoUsuario).string().not_null().default("cliente"))
                    .col(ColumnDef::new(Profiles::PasswordHash).string().null())
                    .col(ColumnDef::new(Profiles::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Profiles::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Documentos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Clientes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Clientes {
    Table,
    Id,
    Nome,
    Email,
    Cpf,
    Telefone,
    Endereco,
    PlacaVeiculo,
    AccountStatus,
    LoginAttempts,
    LastLoginAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Documentos {
    Table,
    Id,
    ClienteId,
    TipoDocumento,
    NumeroDocumento,
    Status,
    ArquivoPath,
    Observacoes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
    UserId,
    Nome,
    Email,
    Telefone,
    TipoUsuario,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}

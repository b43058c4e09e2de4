use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::FirstName).string().not_null())
                    .col(ColumnDef::new(Employees::LastName).string().not_null())
                    .col(ColumnDef::new(Employees::Patronymic).string().not_null())
                    .col(ColumnDef::new(Employees::PassportInfo).string().not_null())
                    .col(
                        ColumnDef::new(Employees::Position)
                            .string_len(2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Employees::JoinDate).date().not_null())
                    .col(ColumnDef::new(Employees::EndDate).date())
                    .col(
                        ColumnDef::new(Employees::EndReason)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
    FirstName,
    LastName,
    Patronymic,
    PassportInfo,
    Position,
    JoinDate,
    EndDate,
    EndReason,
}

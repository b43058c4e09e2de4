use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WarehouseProviders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WarehouseProviders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WarehouseProviders::Name).string().not_null())
                    .col(
                        ColumnDef::new(WarehouseProviders::ContactInfo)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(WarehouseProviders::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WarehouseItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WarehouseItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WarehouseItems::Name).string().not_null())
                    .col(ColumnDef::new(WarehouseItems::ItemType).string().not_null())
                    .col(
                        ColumnDef::new(WarehouseItems::Price)
                            .decimal_len(7, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(WarehouseItems::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Restocks cascade with their item; the provider reference is
        // protected (the store refuses to purge a referenced provider).
        manager
            .create_table(
                Table::create()
                    .table(WarehouseRestocks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WarehouseRestocks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WarehouseRestocks::ItemId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WarehouseRestocks::ProviderId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WarehouseRestocks::Amount)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(WarehouseRestocks::Table, WarehouseRestocks::ItemId)
                            .to(WarehouseItems::Table, WarehouseItems::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(WarehouseRestocks::Table, WarehouseRestocks::ProviderId)
                            .to(WarehouseProviders::Table, WarehouseProviders::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_warehouse_restocks_item_id")
                    .table(WarehouseRestocks::Table)
                    .col(WarehouseRestocks::ItemId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WarehouseRestocks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WarehouseItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WarehouseProviders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum WarehouseProviders {
    Table,
    Id,
    Name,
    ContactInfo,
    DeletedAt,
}

#[derive(Iden)]
enum WarehouseItems {
    Table,
    Id,
    Name,
    ItemType,
    Price,
    DeletedAt,
}

#[derive(Iden)]
enum WarehouseRestocks {
    Table,
    Id,
    ItemId,
    ProviderId,
    Amount,
}

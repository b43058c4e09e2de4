use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceHistories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceHistories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ServiceHistories::RepairOrderId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServiceHistories::ServiceId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ServiceHistories::FinishDate).date())
                    .col(
                        ColumnDef::new(ServiceHistories::Comments)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ServiceHistories::Table, ServiceHistories::RepairOrderId)
                            .to(RepairOrders::Table, RepairOrders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ServiceHistories::Table, ServiceHistories::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WarehouseUses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WarehouseUses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WarehouseUses::RepairOrderId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WarehouseUses::ItemId).integer().not_null())
                    .col(ColumnDef::new(WarehouseUses::Amount).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(WarehouseUses::Table, WarehouseUses::RepairOrderId)
                            .to(RepairOrders::Table, RepairOrders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(WarehouseUses::Table, WarehouseUses::ItemId)
                            .to(WarehouseItems::Table, WarehouseItems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_service_histories_repair_order_id")
                    .table(ServiceHistories::Table)
                    .col(ServiceHistories::RepairOrderId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_warehouse_uses_repair_order_id")
                    .table(WarehouseUses::Table)
                    .col(WarehouseUses::RepairOrderId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_warehouse_uses_item_id")
                    .table(WarehouseUses::Table)
                    .col(WarehouseUses::ItemId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WarehouseUses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ServiceHistories::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ServiceHistories {
    Table,
    Id,
    RepairOrderId,
    ServiceId,
    FinishDate,
    Comments,
}

#[derive(Iden)]
enum WarehouseUses {
    Table,
    Id,
    RepairOrderId,
    ItemId,
    Amount,
}

#[derive(Iden)]
enum RepairOrders {
    Table,
    Id,
}

#[derive(Iden)]
enum Services {
    Table,
    Id,
}

#[derive(Iden)]
enum WarehouseItems {
    Table,
    Id,
}

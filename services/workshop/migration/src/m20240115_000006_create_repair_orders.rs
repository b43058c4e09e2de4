use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RepairOrders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RepairOrders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RepairOrders::MasterId).integer().not_null())
                    .col(ColumnDef::new(RepairOrders::ClientId).integer().not_null())
                    .col(ColumnDef::new(RepairOrders::VehicleId).integer().not_null())
                    .col(
                        ColumnDef::new(RepairOrders::VehicleMileage)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RepairOrders::StartDate).date().not_null())
                    .col(ColumnDef::new(RepairOrders::FinishUntil).date())
                    .col(ColumnDef::new(RepairOrders::FinishDate).date())
                    .col(
                        ColumnDef::new(RepairOrders::IsCancelled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(RepairOrders::Complaints)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(RepairOrders::DiagnosticResults)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(RepairOrders::Comments)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(RepairOrders::IsPaid)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(RepairOrders::IsWarranty)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(RepairOrders::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .from(RepairOrders::Table, RepairOrders::MasterId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RepairOrders::Table, RepairOrders::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RepairOrders::Table, RepairOrders::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_repair_orders_master_id")
                    .table(RepairOrders::Table)
                    .col(RepairOrders::MasterId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_repair_orders_client_id")
                    .table(RepairOrders::Table)
                    .col(RepairOrders::ClientId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_repair_orders_vehicle_id")
                    .table(RepairOrders::Table)
                    .col(RepairOrders::VehicleId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RepairOrders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RepairOrders {
    Table,
    Id,
    MasterId,
    ClientId,
    VehicleId,
    VehicleMileage,
    StartDate,
    FinishUntil,
    FinishDate,
    IsCancelled,
    Complaints,
    DiagnosticResults,
    Comments,
    IsPaid,
    IsWarranty,
    DeletedAt,
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
}

#[derive(Iden)]
enum Clients {
    Table,
    Id,
}

#[derive(Iden)]
enum Vehicles {
    Table,
    Id,
}

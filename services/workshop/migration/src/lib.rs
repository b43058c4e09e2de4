use sea_orm_migration::prelude::*;

mod m20240115_000001_create_employees;
mod m20240115_000002_create_services;
mod m20240115_000003_create_clients;
mod m20240115_000004_create_vehicles;
mod m20240115_000005_create_warehouse;
mod m20240115_000006_create_repair_orders;
mod m20240115_000007_create_order_lines;
mod m20240115_000008_create_search_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240115_000001_create_employees::Migration),
            Box::new(m20240115_000002_create_services::Migration),
            Box::new(m20240115_000003_create_clients::Migration),
            Box::new(m20240115_000004_create_vehicles::Migration),
            Box::new(m20240115_000005_create_warehouse::Migration),
            Box::new(m20240115_000006_create_repair_orders::Migration),
            Box::new(m20240115_000007_create_order_lines::Migration),
            Box::new(m20240115_000008_create_search_tables::Migration),
        ]
    }
}

use sea_orm_migration::prelude::*;

/// One FTS5 projection table per searchable entity. The first column is the
/// primary id of the base row; foreign text fields are flattened with a
/// `{fk}_{field}` prefix. Rows are maintained by the search synchronizer in
/// the same transaction as each base-table mutation.
const SEARCH_TABLES: &[(&str, &str)] = &[
    (
        "employees_search",
        "id, first_name, last_name, patronymic, passport_info",
    ),
    ("services_search", "id, name"),
    ("clients_search", "id, full_name, phone_number"),
    (
        "vehicles_search",
        "id, manufacturer, model, license_number, vin",
    ),
    ("warehouse_providers_search", "id, name, contact_info"),
    ("warehouse_items_search", "id, name, item_type"),
    (
        "repair_orders_search",
        "id, complaints, diagnostic_results, comments, \
         client_full_name, client_phone_number, \
         vehicle_manufacturer, vehicle_model, vehicle_license_number, vehicle_vin",
    ),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        for (table, columns) in SEARCH_TABLES {
            conn.execute_unprepared(&format!(
                "CREATE VIRTUAL TABLE IF NOT EXISTS {table} USING fts5({columns});"
            ))
            .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        for (table, _) in SEARCH_TABLES {
            conn.execute_unprepared(&format!("DROP TABLE IF EXISTS {table};"))
                .await?;
        }
        Ok(())
    }
}

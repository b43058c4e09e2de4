//! FTS5 search projection maintenance.
//!
//! Every searchable entity has a projection table whose first column is the
//! base row id; the remaining columns are its text fields, with joined
//! foreign fields flattened as `{fk}_{field}`. All maintenance functions are
//! generic over [`ConnectionTrait`] so repositories can call them inside the
//! transaction that mutates the base row.

use anyhow::Context as _;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement, Value};

use autofix_domain::access::EntityKind;

use crate::domain::repository::SearchPort;
use crate::domain::types::{
    Client, Employee, RepairOrder, Service, Vehicle, WarehouseItem, WarehouseProvider,
};
use crate::error::WorkshopError;

/// Projection table for a kind, `None` for kinds without one (the hard
/// child rows are only reachable through their parents).
pub fn search_table(kind: EntityKind) -> Option<&'static str> {
    match kind {
        EntityKind::Employee => Some("employees_search"),
        EntityKind::Service => Some("services_search"),
        EntityKind::Client => Some("clients_search"),
        EntityKind::Vehicle => Some("vehicles_search"),
        EntityKind::RepairOrder => Some("repair_orders_search"),
        EntityKind::WarehouseProvider => Some("warehouse_providers_search"),
        EntityKind::WarehouseItem => Some("warehouse_items_search"),
        EntityKind::WarehouseRestock | EntityKind::WarehouseUse | EntityKind::ServiceHistory => {
            None
        }
    }
}

async fn upsert_row<C: ConnectionTrait>(
    conn: &C,
    table: &str,
    columns: &[&str],
    id: i32,
    values: Vec<String>,
) -> Result<(), WorkshopError> {
    remove_raw(conn, table, id).await?;
    let placeholders = std::iter::repeat_n("?", columns.len() + 1)
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "INSERT INTO {table} (id, {}) VALUES ({placeholders})",
        columns.join(", ")
    );
    let mut params: Vec<Value> = vec![i64::from(id).into()];
    params.extend(values.into_iter().map(Value::from));
    conn.execute(Statement::from_sql_and_values(
        conn.get_database_backend(),
        sql,
        params,
    ))
    .await
    .with_context(|| format!("index row into {table}"))?;
    Ok(())
}

async fn remove_raw<C: ConnectionTrait>(
    conn: &C,
    table: &str,
    id: i32,
) -> Result<(), WorkshopError> {
    conn.execute(Statement::from_sql_and_values(
        conn.get_database_backend(),
        format!("DELETE FROM {table} WHERE id = ?"),
        [i64::from(id).into()],
    ))
    .await
    .with_context(|| format!("remove row from {table}"))?;
    Ok(())
}

/// Drop one row from a kind's projection. No-op for kinds without one.
pub async fn remove_row<C: ConnectionTrait>(
    conn: &C,
    kind: EntityKind,
    id: i32,
) -> Result<(), WorkshopError> {
    match search_table(kind) {
        Some(table) => remove_raw(conn, table, id).await,
        None => Ok(()),
    }
}

pub async fn reindex_employee<C: ConnectionTrait>(
    conn: &C,
    employee: &Employee,
) -> Result<(), WorkshopError> {
    upsert_row(
        conn,
        "employees_search",
        &["first_name", "last_name", "patronymic", "passport_info"],
        employee.id,
        vec![
            employee.first_name.clone(),
            employee.last_name.clone(),
            employee.patronymic.clone(),
            employee.passport_info.clone(),
        ],
    )
    .await
}

pub async fn reindex_service<C: ConnectionTrait>(
    conn: &C,
    service: &Service,
) -> Result<(), WorkshopError> {
    upsert_row(
        conn,
        "services_search",
        &["name"],
        service.id,
        vec![service.name.clone()],
    )
    .await
}

pub async fn reindex_client<C: ConnectionTrait>(
    conn: &C,
    client: &Client,
) -> Result<(), WorkshopError> {
    upsert_row(
        conn,
        "clients_search",
        &["full_name", "phone_number"],
        client.id,
        vec![client.full_name.clone(), client.phone_number.clone()],
    )
    .await
}

pub async fn reindex_vehicle<C: ConnectionTrait>(
    conn: &C,
    vehicle: &Vehicle,
) -> Result<(), WorkshopError> {
    upsert_row(
        conn,
        "vehicles_search",
        &["manufacturer", "model", "license_number", "vin"],
        vehicle.id,
        vec![
            vehicle.manufacturer.clone(),
            vehicle.model.clone(),
            vehicle.license_number.clone(),
            vehicle.vin.clone(),
        ],
    )
    .await
}

pub async fn reindex_provider<C: ConnectionTrait>(
    conn: &C,
    provider: &WarehouseProvider,
) -> Result<(), WorkshopError> {
    upsert_row(
        conn,
        "warehouse_providers_search",
        &["name", "contact_info"],
        provider.id,
        vec![provider.name.clone(), provider.contact_info.clone()],
    )
    .await
}

pub async fn reindex_item<C: ConnectionTrait>(
    conn: &C,
    item: &WarehouseItem,
) -> Result<(), WorkshopError> {
    upsert_row(
        conn,
        "warehouse_items_search",
        &["name", "item_type"],
        item.id,
        vec![item.name.clone(), item.item_type.clone()],
    )
    .await
}

/// Repair orders project their own text plus the joined client and vehicle
/// fields, so both referenced rows must be supplied.
pub async fn reindex_order<C: ConnectionTrait>(
    conn: &C,
    order: &RepairOrder,
    client: &Client,
    vehicle: &Vehicle,
) -> Result<(), WorkshopError> {
    upsert_row(
        conn,
        "repair_orders_search",
        &[
            "complaints",
            "diagnostic_results",
            "comments",
            "client_full_name",
            "client_phone_number",
            "vehicle_manufacturer",
            "vehicle_model",
            "vehicle_license_number",
            "vehicle_vin",
        ],
        order.id,
        vec![
            order.complaints.clone(),
            order.diagnostic_results.clone(),
            order.comments.clone(),
            client.full_name.clone(),
            client.phone_number.clone(),
            vehicle.manufacturer.clone(),
            vehicle.model.clone(),
            vehicle.license_number.clone(),
            vehicle.vin.clone(),
        ],
    )
    .await
}

/// Whitespace-tokenize a user query and quote every token for FTS5, so user
/// input can never change the match expression structure.
fn match_expression(query: &str) -> Option<String> {
    let tokens: Vec<String> = query
        .split_whitespace()
        .map(|token| format!("\"{}\"", token.replace('"', "\"\"")))
        .collect();
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

/// Run an FTS5 match over a kind's projection, returning matching base ids.
/// A blank query and a kind without a projection both match nothing.
pub async fn search<C: ConnectionTrait>(
    conn: &C,
    kind: EntityKind,
    query: &str,
) -> Result<Vec<i32>, WorkshopError> {
    let Some(table) = search_table(kind) else {
        return Ok(vec![]);
    };
    let Some(expression) = match_expression(query) else {
        return Ok(vec![]);
    };
    let rows = conn
        .query_all(Statement::from_sql_and_values(
            conn.get_database_backend(),
            format!("SELECT CAST(id AS INTEGER) AS id FROM {table} WHERE {table} MATCH ?"),
            [expression.into()],
        ))
        .await
        .with_context(|| format!("search {table}"))?;
    let mut ids = Vec::with_capacity(rows.len());
    for row in rows {
        let id: i64 = row.try_get("", "id").context("read search id")?;
        ids.push(id as i32);
    }
    Ok(ids)
}

/// [`SearchPort`] implementation backed by the live database.
#[derive(Clone)]
pub struct DbSearchIndex {
    pub db: DatabaseConnection,
}

impl SearchPort for DbSearchIndex {
    async fn search(&self, kind: EntityKind, query: &str) -> Result<Vec<i32>, WorkshopError> {
        search(&self.db, kind, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_quoted_and_joined() {
        assert_eq!(
            match_expression("Иванов lada"),
            Some("\"Иванов\" \"lada\"".to_owned())
        );
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        assert_eq!(
            match_expression("se\"ven"),
            Some("\"se\"\"ven\"".to_owned())
        );
    }

    #[test]
    fn blank_query_produces_no_expression() {
        assert_eq!(match_expression("   "), None);
    }

    #[test]
    fn child_rows_have_no_projection() {
        assert!(search_table(EntityKind::WarehouseRestock).is_none());
        assert!(search_table(EntityKind::WarehouseUse).is_none());
        assert!(search_table(EntityKind::ServiceHistory).is_none());
    }
}

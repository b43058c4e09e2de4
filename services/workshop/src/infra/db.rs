use anyhow::Context as _;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, EntityTrait, IntoActiveModel as _, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Statement, TransactionError, TransactionTrait,
};

use autofix_domain::access::EntityKind;
use autofix_domain::pagination::PageRequest;
use autofix_domain::position::Position;
use autofix_domain::validation::validate_adjustment;
use autofix_workshop_schema::{
    clients, employees, repair_orders, service_histories, services, vehicles, warehouse_items,
    warehouse_providers, warehouse_restocks, warehouse_uses,
};

use crate::domain::repository::{
    ClientRepository, EmployeeRepository, ItemRepository, ProviderRepository,
    RepairOrderRepository, RestockRepository, ServiceHistoryRepository, ServiceRepository,
    StockLedger, UseRepository, VehicleRepository,
};
use crate::domain::types::{
    Client, Employee, EmployeeFilter, RepairOrder, RepairOrderFilter, Service, ServiceHistory,
    Vehicle, WarehouseItem, WarehouseProvider, WarehouseRestock, WarehouseUse,
};
use crate::error::WorkshopError;
use crate::infra::search;

fn txn_err(err: TransactionError<WorkshopError>) -> WorkshopError {
    match err {
        TransactionError::Connection(e) => anyhow::Error::new(e).context("transaction").into(),
        TransactionError::Transaction(e) => e,
    }
}

// ── Model mapping ────────────────────────────────────────────────────────────

fn employee_from_model(model: employees::Model) -> Result<Employee, WorkshopError> {
    let position = Position::from_code(&model.position).ok_or_else(|| {
        WorkshopError::Internal(anyhow::anyhow!("unknown position code {:?}", model.position))
    })?;
    Ok(Employee {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        patronymic: model.patronymic,
        passport_info: model.passport_info,
        position,
        join_date: model.join_date,
        end_date: model.end_date,
        end_reason: model.end_reason,
    })
}

fn service_from_model(model: services::Model) -> Service {
    Service {
        id: model.id,
        name: model.name,
        price: model.price,
    }
}

fn client_from_model(model: clients::Model) -> Client {
    Client {
        id: model.id,
        full_name: model.full_name,
        phone_number: model.phone_number,
    }
}

fn vehicle_from_model(model: vehicles::Model) -> Vehicle {
    Vehicle {
        id: model.id,
        manufacturer: model.manufacturer,
        model: model.model,
        year: model.year,
        license_number: model.license_number,
        vin: model.vin,
    }
}

fn order_from_model(model: repair_orders::Model) -> RepairOrder {
    RepairOrder {
        id: model.id,
        master_id: model.master_id,
        client_id: model.client_id,
        vehicle_id: model.vehicle_id,
        vehicle_mileage: model.vehicle_mileage,
        start_date: model.start_date,
        finish_until: model.finish_until,
        finish_date: model.finish_date,
        is_cancelled: model.is_cancelled,
        complaints: model.complaints,
        diagnostic_results: model.diagnostic_results,
        comments: model.comments,
        is_paid: model.is_paid,
        is_warranty: model.is_warranty,
    }
}

fn provider_from_model(model: warehouse_providers::Model) -> WarehouseProvider {
    WarehouseProvider {
        id: model.id,
        name: model.name,
        contact_info: model.contact_info,
    }
}

fn item_from_model(model: warehouse_items::Model) -> WarehouseItem {
    WarehouseItem {
        id: model.id,
        name: model.name,
        item_type: model.item_type,
        price: model.price,
    }
}

fn restock_from_model(model: warehouse_restocks::Model) -> WarehouseRestock {
    WarehouseRestock {
        id: model.id,
        item_id: model.item_id,
        provider_id: model.provider_id,
        amount: model.amount,
    }
}

fn use_from_model(model: warehouse_uses::Model) -> WarehouseUse {
    WarehouseUse {
        id: model.id,
        repair_order_id: model.repair_order_id,
        item_id: model.item_id,
        amount: model.amount,
    }
}

fn history_from_model(model: service_histories::Model) -> ServiceHistory {
    ServiceHistory {
        id: model.id,
        repair_order_id: model.repair_order_id,
        service_id: model.service_id,
        finish_date: model.finish_date,
        comments: model.comments,
    }
}

// ── Shared helpers ───────────────────────────────────────────────────────────

/// `Σ restock amounts − Σ use amounts` for an item in one statement.
/// `id <> 0` is the no-exclusion case: 0 is never a real row id.
async fn quantity_of<C: ConnectionTrait>(
    conn: &C,
    item_id: i32,
    exclude_restock: Option<i32>,
    exclude_use: Option<i32>,
) -> Result<i64, WorkshopError> {
    let row = conn
        .query_one(Statement::from_sql_and_values(
            conn.get_database_backend(),
            "SELECT COALESCE((SELECT SUM(amount) FROM warehouse_restocks \
                              WHERE item_id = ? AND id <> ?), 0) \
                  - COALESCE((SELECT SUM(amount) FROM warehouse_uses \
                              WHERE item_id = ? AND id <> ?), 0) AS quantity",
            [
                item_id.into(),
                exclude_restock.unwrap_or(0).into(),
                item_id.into(),
                exclude_use.unwrap_or(0).into(),
            ],
        ))
        .await
        .context("compute item quantity")?;
    match row {
        Some(row) => Ok(row.try_get::<i64>("", "quantity").context("read quantity")?),
        None => Ok(0),
    }
}

/// Rebuild the search projection of every live order referencing a client.
async fn reindex_orders_of_client<C: ConnectionTrait>(
    conn: &C,
    client: &Client,
) -> Result<(), WorkshopError> {
    let orders = repair_orders::Entity::find()
        .filter(repair_orders::Column::ClientId.eq(client.id))
        .filter(repair_orders::Column::DeletedAt.is_null())
        .all(conn)
        .await
        .context("list orders of client")?;
    for model in orders {
        let vehicle = vehicles::Entity::find_by_id(model.vehicle_id)
            .one(conn)
            .await
            .context("find order vehicle")?
            .ok_or_else(|| WorkshopError::Internal(anyhow::anyhow!("order vehicle missing")))?;
        search::reindex_order(
            conn,
            &order_from_model(model),
            client,
            &vehicle_from_model(vehicle),
        )
        .await?;
    }
    Ok(())
}

/// Rebuild the search projection of every live order referencing a vehicle.
async fn reindex_orders_of_vehicle<C: ConnectionTrait>(
    conn: &C,
    vehicle: &Vehicle,
) -> Result<(), WorkshopError> {
    let orders = repair_orders::Entity::find()
        .filter(repair_orders::Column::VehicleId.eq(vehicle.id))
        .filter(repair_orders::Column::DeletedAt.is_null())
        .all(conn)
        .await
        .context("list orders of vehicle")?;
    for model in orders {
        let client = clients::Entity::find_by_id(model.client_id)
            .one(conn)
            .await
            .context("find order client")?
            .ok_or_else(|| WorkshopError::Internal(anyhow::anyhow!("order client missing")))?;
        search::reindex_order(
            conn,
            &order_from_model(model),
            &client_from_model(client),
            vehicle,
        )
        .await?;
    }
    Ok(())
}

async fn reindex_order_row<C: ConnectionTrait>(
    conn: &C,
    order: &RepairOrder,
) -> Result<(), WorkshopError> {
    let client = clients::Entity::find_by_id(order.client_id)
        .one(conn)
        .await
        .context("find order client")?
        .ok_or(WorkshopError::NotFound)?;
    let vehicle = vehicles::Entity::find_by_id(order.vehicle_id)
        .one(conn)
        .await
        .context("find order vehicle")?
        .ok_or(WorkshopError::NotFound)?;
    search::reindex_order(
        conn,
        order,
        &client_from_model(client),
        &vehicle_from_model(vehicle),
    )
    .await
}

// ── Employee repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEmployeeRepository {
    pub db: DatabaseConnection,
}

impl EmployeeRepository for DbEmployeeRepository {
    async fn list(
        &self,
        filter: EmployeeFilter,
        page: PageRequest,
    ) -> Result<Vec<Employee>, WorkshopError> {
        let page = page.clamped();
        let mut query = employees::Entity::find();
        if !filter.show_removed {
            query = query.filter(employees::Column::EndDate.is_null());
        }
        if let Some(ids) = filter.matching_ids {
            query = query.filter(employees::Column::Id.is_in(ids));
        }
        let models = query
            .order_by_asc(employees::Column::LastName)
            .order_by_asc(employees::Column::FirstName)
            .order_by_asc(employees::Column::Patronymic)
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&self.db)
            .await
            .context("list employees")?;
        models.into_iter().map(employee_from_model).collect()
    }

    async fn find(&self, id: i32) -> Result<Option<Employee>, WorkshopError> {
        let model = employees::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find employee")?;
        model.map(employee_from_model).transpose()
    }

    async fn create(&self, employee: &Employee) -> Result<Employee, WorkshopError> {
        let employee = employee.clone();
        self.db
            .transaction::<_, Employee, WorkshopError>(|txn| {
                Box::pin(async move {
                    let model = employees::ActiveModel {
                        first_name: Set(employee.first_name.clone()),
                        last_name: Set(employee.last_name.clone()),
                        patronymic: Set(employee.patronymic.clone()),
                        passport_info: Set(employee.passport_info.clone()),
                        position: Set(employee.position.code().to_owned()),
                        join_date: Set(employee.join_date),
                        end_date: Set(employee.end_date),
                        end_reason: Set(employee.end_reason.clone()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .context("create employee")?;
                    let created = employee_from_model(model)?;
                    search::reindex_employee(txn, &created).await?;
                    Ok(created)
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn update(&self, employee: &Employee) -> Result<(), WorkshopError> {
        let employee = employee.clone();
        self.db
            .transaction::<_, (), WorkshopError>(|txn| {
                Box::pin(async move {
                    employees::ActiveModel {
                        id: Set(employee.id),
                        first_name: Set(employee.first_name.clone()),
                        last_name: Set(employee.last_name.clone()),
                        patronymic: Set(employee.patronymic.clone()),
                        passport_info: Set(employee.passport_info.clone()),
                        position: Set(employee.position.code().to_owned()),
                        join_date: Set(employee.join_date),
                        end_date: Set(employee.end_date),
                        end_reason: Set(employee.end_reason.clone()),
                    }
                    .update(txn)
                    .await
                    .context("update employee")?;
                    search::reindex_employee(txn, &employee).await?;
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)
    }
}

// ── Service repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbServiceRepository {
    pub db: DatabaseConnection,
}

impl ServiceRepository for DbServiceRepository {
    async fn list(
        &self,
        matching_ids: Option<Vec<i32>>,
        page: PageRequest,
    ) -> Result<Vec<Service>, WorkshopError> {
        let page = page.clamped();
        let mut query = services::Entity::find().filter(services::Column::DeletedAt.is_null());
        if let Some(ids) = matching_ids {
            query = query.filter(services::Column::Id.is_in(ids));
        }
        let models = query
            .order_by_asc(services::Column::Name)
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&self.db)
            .await
            .context("list services")?;
        Ok(models.into_iter().map(service_from_model).collect())
    }

    async fn find(&self, id: i32) -> Result<Option<Service>, WorkshopError> {
        let model = services::Entity::find_by_id(id)
            .filter(services::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .context("find service")?;
        Ok(model.map(service_from_model))
    }

    async fn create(&self, service: &Service) -> Result<Service, WorkshopError> {
        let service = service.clone();
        self.db
            .transaction::<_, Service, WorkshopError>(|txn| {
                Box::pin(async move {
                    let model = services::ActiveModel {
                        name: Set(service.name.clone()),
                        price: Set(service.price),
                        deleted_at: Set(None),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .context("create service")?;
                    let created = service_from_model(model);
                    search::reindex_service(txn, &created).await?;
                    Ok(created)
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn update(&self, service: &Service) -> Result<(), WorkshopError> {
        let service = service.clone();
        self.db
            .transaction::<_, (), WorkshopError>(|txn| {
                Box::pin(async move {
                    let mut am = services::ActiveModel {
                        id: Set(service.id),
                        ..Default::default()
                    };
                    am.name = Set(service.name.clone());
                    am.price = Set(service.price);
                    am.update(txn).await.context("update service")?;
                    search::reindex_service(txn, &service).await?;
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn delete(&self, id: i32) -> Result<(), WorkshopError> {
        self.db
            .transaction::<_, (), WorkshopError>(move |txn| {
                Box::pin(async move {
                    let model = services::Entity::find_by_id(id)
                        .one(txn)
                        .await
                        .context("find service")?
                        .ok_or(WorkshopError::NotFound)?;
                    if model.deleted_at.is_none() {
                        let mut am = model.into_active_model();
                        am.deleted_at = Set(Some(Utc::now()));
                        am.update(txn).await.context("soft delete service")?;
                        search::remove_row(txn, EntityKind::Service, id).await?;
                    } else {
                        let referenced = service_histories::Entity::find()
                            .filter(service_histories::Column::ServiceId.eq(id))
                            .count(txn)
                            .await
                            .context("count service references")?
                            > 0;
                        if referenced {
                            return Err(WorkshopError::ReferentialBlock);
                        }
                        services::Entity::delete_by_id(id)
                            .exec(txn)
                            .await
                            .context("purge service")?;
                    }
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)
    }
}

// ── Client repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbClientRepository {
    pub db: DatabaseConnection,
}

impl ClientRepository for DbClientRepository {
    async fn list(
        &self,
        matching_ids: Option<Vec<i32>>,
        page: PageRequest,
    ) -> Result<Vec<Client>, WorkshopError> {
        let page = page.clamped();
        let mut query = clients::Entity::find().filter(clients::Column::DeletedAt.is_null());
        if let Some(ids) = matching_ids {
            query = query.filter(clients::Column::Id.is_in(ids));
        }
        let models = query
            .order_by_asc(clients::Column::FullName)
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&self.db)
            .await
            .context("list clients")?;
        Ok(models.into_iter().map(client_from_model).collect())
    }

    async fn find(&self, id: i32) -> Result<Option<Client>, WorkshopError> {
        let model = clients::Entity::find_by_id(id)
            .filter(clients::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .context("find client")?;
        Ok(model.map(client_from_model))
    }

    async fn create(&self, client: &Client) -> Result<Client, WorkshopError> {
        let client = client.clone();
        self.db
            .transaction::<_, Client, WorkshopError>(|txn| {
                Box::pin(async move {
                    let model = clients::ActiveModel {
                        full_name: Set(client.full_name.clone()),
                        phone_number: Set(client.phone_number.clone()),
                        deleted_at: Set(None),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .context("create client")?;
                    let created = client_from_model(model);
                    search::reindex_client(txn, &created).await?;
                    Ok(created)
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn update(&self, client: &Client) -> Result<(), WorkshopError> {
        let client = client.clone();
        self.db
            .transaction::<_, (), WorkshopError>(|txn| {
                Box::pin(async move {
                    let mut am = clients::ActiveModel {
                        id: Set(client.id),
                        ..Default::default()
                    };
                    am.full_name = Set(client.full_name.clone());
                    am.phone_number = Set(client.phone_number.clone());
                    am.update(txn).await.context("update client")?;
                    search::reindex_client(txn, &client).await?;
                    // Orders project the client's text fields; keep them fresh.
                    reindex_orders_of_client(txn, &client).await?;
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn delete(&self, id: i32) -> Result<(), WorkshopError> {
        self.db
            .transaction::<_, (), WorkshopError>(move |txn| {
                Box::pin(async move {
                    let model = clients::Entity::find_by_id(id)
                        .one(txn)
                        .await
                        .context("find client")?
                        .ok_or(WorkshopError::NotFound)?;
                    if model.deleted_at.is_none() {
                        let mut am = model.into_active_model();
                        am.deleted_at = Set(Some(Utc::now()));
                        am.update(txn).await.context("soft delete client")?;
                        search::remove_row(txn, EntityKind::Client, id).await?;
                    } else {
                        let referenced = repair_orders::Entity::find()
                            .filter(repair_orders::Column::ClientId.eq(id))
                            .count(txn)
                            .await
                            .context("count client references")?
                            > 0;
                        if referenced {
                            return Err(WorkshopError::ReferentialBlock);
                        }
                        clients::Entity::delete_by_id(id)
                            .exec(txn)
                            .await
                            .context("purge client")?;
                    }
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)
    }
}

// ── Vehicle repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVehicleRepository {
    pub db: DatabaseConnection,
}

impl VehicleRepository for DbVehicleRepository {
    async fn list(
        &self,
        matching_ids: Option<Vec<i32>>,
        page: PageRequest,
    ) -> Result<Vec<Vehicle>, WorkshopError> {
        let page = page.clamped();
        let mut query = vehicles::Entity::find().filter(vehicles::Column::DeletedAt.is_null());
        if let Some(ids) = matching_ids {
            query = query.filter(vehicles::Column::Id.is_in(ids));
        }
        let models = query
            .order_by_asc(vehicles::Column::Manufacturer)
            .order_by_asc(vehicles::Column::Model)
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&self.db)
            .await
            .context("list vehicles")?;
        Ok(models.into_iter().map(vehicle_from_model).collect())
    }

    async fn find(&self, id: i32) -> Result<Option<Vehicle>, WorkshopError> {
        let model = vehicles::Entity::find_by_id(id)
            .filter(vehicles::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .context("find vehicle")?;
        Ok(model.map(vehicle_from_model))
    }

    async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, WorkshopError> {
        let vehicle = vehicle.clone();
        self.db
            .transaction::<_, Vehicle, WorkshopError>(|txn| {
                Box::pin(async move {
                    let model = vehicles::ActiveModel {
                        manufacturer: Set(vehicle.manufacturer.clone()),
                        model: Set(vehicle.model.clone()),
                        year: Set(vehicle.year),
                        license_number: Set(vehicle.license_number.clone()),
                        vin: Set(vehicle.vin.clone()),
                        deleted_at: Set(None),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .context("create vehicle")?;
                    let created = vehicle_from_model(model);
                    search::reindex_vehicle(txn, &created).await?;
                    Ok(created)
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<(), WorkshopError> {
        let vehicle = vehicle.clone();
        self.db
            .transaction::<_, (), WorkshopError>(|txn| {
                Box::pin(async move {
                    let mut am = vehicles::ActiveModel {
                        id: Set(vehicle.id),
                        ..Default::default()
                    };
                    am.manufacturer = Set(vehicle.manufacturer.clone());
                    am.model = Set(vehicle.model.clone());
                    am.year = Set(vehicle.year);
                    am.license_number = Set(vehicle.license_number.clone());
                    am.vin = Set(vehicle.vin.clone());
                    am.update(txn).await.context("update vehicle")?;
                    search::reindex_vehicle(txn, &vehicle).await?;
                    reindex_orders_of_vehicle(txn, &vehicle).await?;
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn delete(&self, id: i32) -> Result<(), WorkshopError> {
        self.db
            .transaction::<_, (), WorkshopError>(move |txn| {
                Box::pin(async move {
                    let model = vehicles::Entity::find_by_id(id)
                        .one(txn)
                        .await
                        .context("find vehicle")?
                        .ok_or(WorkshopError::NotFound)?;
                    if model.deleted_at.is_none() {
                        let mut am = model.into_active_model();
                        am.deleted_at = Set(Some(Utc::now()));
                        am.update(txn).await.context("soft delete vehicle")?;
                        search::remove_row(txn, EntityKind::Vehicle, id).await?;
                    } else {
                        let referenced = repair_orders::Entity::find()
                            .filter(repair_orders::Column::VehicleId.eq(id))
                            .count(txn)
                            .await
                            .context("count vehicle references")?
                            > 0;
                        if referenced {
                            return Err(WorkshopError::ReferentialBlock);
                        }
                        vehicles::Entity::delete_by_id(id)
                            .exec(txn)
                            .await
                            .context("purge vehicle")?;
                    }
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)
    }
}

// ── Repair-order repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRepairOrderRepository {
    pub db: DatabaseConnection,
}

impl RepairOrderRepository for DbRepairOrderRepository {
    async fn list(
        &self,
        filter: RepairOrderFilter,
        page: PageRequest,
    ) -> Result<Vec<RepairOrder>, WorkshopError> {
        let page = page.clamped();
        let mut query =
            repair_orders::Entity::find().filter(repair_orders::Column::DeletedAt.is_null());
        if let Some(master) = filter.master {
            query = query.filter(repair_orders::Column::MasterId.eq(master));
        }
        if !filter.show_finished {
            // Default view: open work only. Finished-and-paid and cancelled
            // orders are archive material.
            query = query.filter(repair_orders::Column::IsCancelled.eq(false)).filter(
                Condition::any()
                    .add(repair_orders::Column::FinishDate.is_null())
                    .add(repair_orders::Column::IsPaid.eq(false)),
            );
        }
        if let Some(ids) = filter.matching_ids {
            query = query.filter(repair_orders::Column::Id.is_in(ids));
        }
        let models = query
            .order_by_asc(repair_orders::Column::FinishUntil)
            .order_by_asc(repair_orders::Column::Id)
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&self.db)
            .await
            .context("list repair orders")?;
        Ok(models.into_iter().map(order_from_model).collect())
    }

    async fn find(&self, id: i32) -> Result<Option<RepairOrder>, WorkshopError> {
        let model = repair_orders::Entity::find_by_id(id)
            .filter(repair_orders::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .context("find repair order")?;
        Ok(model.map(order_from_model))
    }

    async fn create(&self, order: &RepairOrder) -> Result<RepairOrder, WorkshopError> {
        let order = order.clone();
        self.db
            .transaction::<_, RepairOrder, WorkshopError>(|txn| {
                Box::pin(async move {
                    let model = repair_orders::ActiveModel {
                        master_id: Set(order.master_id),
                        client_id: Set(order.client_id),
                        vehicle_id: Set(order.vehicle_id),
                        vehicle_mileage: Set(order.vehicle_mileage),
                        start_date: Set(order.start_date),
                        finish_until: Set(order.finish_until),
                        finish_date: Set(order.finish_date),
                        is_cancelled: Set(order.is_cancelled),
                        complaints: Set(order.complaints.clone()),
                        diagnostic_results: Set(order.diagnostic_results.clone()),
                        comments: Set(order.comments.clone()),
                        is_paid: Set(order.is_paid),
                        is_warranty: Set(order.is_warranty),
                        deleted_at: Set(None),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .context("create repair order")?;
                    let created = order_from_model(model);
                    reindex_order_row(txn, &created).await?;
                    Ok(created)
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn update(&self, order: &RepairOrder) -> Result<(), WorkshopError> {
        let order = order.clone();
        self.db
            .transaction::<_, (), WorkshopError>(|txn| {
                Box::pin(async move {
                    let mut am = repair_orders::ActiveModel {
                        id: Set(order.id),
                        ..Default::default()
                    };
                    am.master_id = Set(order.master_id);
                    am.client_id = Set(order.client_id);
                    am.vehicle_id = Set(order.vehicle_id);
                    am.vehicle_mileage = Set(order.vehicle_mileage);
                    am.start_date = Set(order.start_date);
                    am.finish_until = Set(order.finish_until);
                    am.finish_date = Set(order.finish_date);
                    am.is_cancelled = Set(order.is_cancelled);
                    am.complaints = Set(order.complaints.clone());
                    am.diagnostic_results = Set(order.diagnostic_results.clone());
                    am.comments = Set(order.comments.clone());
                    am.is_paid = Set(order.is_paid);
                    am.is_warranty = Set(order.is_warranty);
                    am.update(txn).await.context("update repair order")?;
                    reindex_order_row(txn, &order).await?;
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn delete(&self, id: i32) -> Result<(), WorkshopError> {
        self.db
            .transaction::<_, (), WorkshopError>(move |txn| {
                Box::pin(async move {
                    let model = repair_orders::Entity::find_by_id(id)
                        .one(txn)
                        .await
                        .context("find repair order")?
                        .ok_or(WorkshopError::NotFound)?;
                    // The order owns its lines: they go with it either way.
                    service_histories::Entity::delete_many()
                        .filter(service_histories::Column::RepairOrderId.eq(id))
                        .exec(txn)
                        .await
                        .context("cascade service histories")?;
                    warehouse_uses::Entity::delete_many()
                        .filter(warehouse_uses::Column::RepairOrderId.eq(id))
                        .exec(txn)
                        .await
                        .context("cascade warehouse uses")?;
                    if model.deleted_at.is_none() {
                        let mut am = model.into_active_model();
                        am.deleted_at = Set(Some(Utc::now()));
                        am.update(txn).await.context("soft delete repair order")?;
                        search::remove_row(txn, EntityKind::RepairOrder, id).await?;
                    } else {
                        repair_orders::Entity::delete_by_id(id)
                            .exec(txn)
                            .await
                            .context("purge repair order")?;
                    }
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn total_cost(&self, order_id: i32) -> Result<Decimal, WorkshopError> {
        let lines = service_histories::Entity::find()
            .filter(service_histories::Column::RepairOrderId.eq(order_id))
            .find_also_related(services::Entity)
            .all(&self.db)
            .await
            .context("sum order service prices")?;
        Ok(lines
            .into_iter()
            .filter_map(|(_, service)| service)
            .map(|service| service.price)
            .sum())
    }
}

// ── Warehouse provider repository ────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProviderRepository {
    pub db: DatabaseConnection,
}

impl ProviderRepository for DbProviderRepository {
    async fn list(
        &self,
        matching_ids: Option<Vec<i32>>,
        page: PageRequest,
    ) -> Result<Vec<WarehouseProvider>, WorkshopError> {
        let page = page.clamped();
        let mut query = warehouse_providers::Entity::find()
            .filter(warehouse_providers::Column::DeletedAt.is_null());
        if let Some(ids) = matching_ids {
            query = query.filter(warehouse_providers::Column::Id.is_in(ids));
        }
        let models = query
            .order_by_asc(warehouse_providers::Column::Name)
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&self.db)
            .await
            .context("list providers")?;
        Ok(models.into_iter().map(provider_from_model).collect())
    }

    async fn find(&self, id: i32) -> Result<Option<WarehouseProvider>, WorkshopError> {
        let model = warehouse_providers::Entity::find_by_id(id)
            .filter(warehouse_providers::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .context("find provider")?;
        Ok(model.map(provider_from_model))
    }

    async fn create(
        &self,
        provider: &WarehouseProvider,
    ) -> Result<WarehouseProvider, WorkshopError> {
        let provider = provider.clone();
        self.db
            .transaction::<_, WarehouseProvider, WorkshopError>(|txn| {
                Box::pin(async move {
                    let model = warehouse_providers::ActiveModel {
                        name: Set(provider.name.clone()),
                        contact_info: Set(provider.contact_info.clone()),
                        deleted_at: Set(None),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .context("create provider")?;
                    let created = provider_from_model(model);
                    search::reindex_provider(txn, &created).await?;
                    Ok(created)
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn update(&self, provider: &WarehouseProvider) -> Result<(), WorkshopError> {
        let provider = provider.clone();
        self.db
            .transaction::<_, (), WorkshopError>(|txn| {
                Box::pin(async move {
                    let mut am = warehouse_providers::ActiveModel {
                        id: Set(provider.id),
                        ..Default::default()
                    };
                    am.name = Set(provider.name.clone());
                    am.contact_info = Set(provider.contact_info.clone());
                    am.update(txn).await.context("update provider")?;
                    search::reindex_provider(txn, &provider).await?;
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn delete(&self, id: i32) -> Result<(), WorkshopError> {
        self.db
            .transaction::<_, (), WorkshopError>(move |txn| {
                Box::pin(async move {
                    let model = warehouse_providers::Entity::find_by_id(id)
                        .one(txn)
                        .await
                        .context("find provider")?
                        .ok_or(WorkshopError::NotFound)?;
                    if model.deleted_at.is_none() {
                        let mut am = model.into_active_model();
                        am.deleted_at = Set(Some(Utc::now()));
                        am.update(txn).await.context("soft delete provider")?;
                        search::remove_row(txn, EntityKind::WarehouseProvider, id).await?;
                    } else {
                        let referenced = warehouse_restocks::Entity::find()
                            .filter(warehouse_restocks::Column::ProviderId.eq(id))
                            .count(txn)
                            .await
                            .context("count provider references")?
                            > 0;
                        if referenced {
                            return Err(WorkshopError::ReferentialBlock);
                        }
                        warehouse_providers::Entity::delete_by_id(id)
                            .exec(txn)
                            .await
                            .context("purge provider")?;
                    }
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)
    }
}

// ── Warehouse item / ledger / restock / use repository ───────────────────────

#[derive(Clone)]
pub struct DbWarehouseRepository {
    pub db: DatabaseConnection,
}

impl ItemRepository for DbWarehouseRepository {
    async fn list(
        &self,
        matching_ids: Option<Vec<i32>>,
        page: PageRequest,
    ) -> Result<Vec<WarehouseItem>, WorkshopError> {
        let page = page.clamped();
        let mut query =
            warehouse_items::Entity::find().filter(warehouse_items::Column::DeletedAt.is_null());
        if let Some(ids) = matching_ids {
            query = query.filter(warehouse_items::Column::Id.is_in(ids));
        }
        let models = query
            .order_by_asc(warehouse_items::Column::Name)
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&self.db)
            .await
            .context("list items")?;
        Ok(models.into_iter().map(item_from_model).collect())
    }

    async fn find(&self, id: i32) -> Result<Option<WarehouseItem>, WorkshopError> {
        let model = warehouse_items::Entity::find_by_id(id)
            .filter(warehouse_items::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .context("find item")?;
        Ok(model.map(item_from_model))
    }

    async fn create(&self, item: &WarehouseItem) -> Result<WarehouseItem, WorkshopError> {
        let item = item.clone();
        self.db
            .transaction::<_, WarehouseItem, WorkshopError>(|txn| {
                Box::pin(async move {
                    let model = warehouse_items::ActiveModel {
                        name: Set(item.name.clone()),
                        item_type: Set(item.item_type.clone()),
                        price: Set(item.price),
                        deleted_at: Set(None),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .context("create item")?;
                    let created = item_from_model(model);
                    search::reindex_item(txn, &created).await?;
                    Ok(created)
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn update(&self, item: &WarehouseItem) -> Result<(), WorkshopError> {
        let item = item.clone();
        self.db
            .transaction::<_, (), WorkshopError>(|txn| {
                Box::pin(async move {
                    let mut am = warehouse_items::ActiveModel {
                        id: Set(item.id),
                        ..Default::default()
                    };
                    am.name = Set(item.name.clone());
                    am.item_type = Set(item.item_type.clone());
                    am.price = Set(item.price);
                    am.update(txn).await.context("update item")?;
                    search::reindex_item(txn, &item).await?;
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn delete(&self, id: i32) -> Result<(), WorkshopError> {
        self.db
            .transaction::<_, (), WorkshopError>(move |txn| {
                Box::pin(async move {
                    let model = warehouse_items::Entity::find_by_id(id)
                        .one(txn)
                        .await
                        .context("find item")?
                        .ok_or(WorkshopError::NotFound)?;
                    // The item owns its restock rows.
                    warehouse_restocks::Entity::delete_many()
                        .filter(warehouse_restocks::Column::ItemId.eq(id))
                        .exec(txn)
                        .await
                        .context("cascade restocks")?;
                    if model.deleted_at.is_none() {
                        let mut am = model.into_active_model();
                        am.deleted_at = Set(Some(Utc::now()));
                        am.update(txn).await.context("soft delete item")?;
                        search::remove_row(txn, EntityKind::WarehouseItem, id).await?;
                    } else {
                        let referenced = warehouse_uses::Entity::find()
                            .filter(warehouse_uses::Column::ItemId.eq(id))
                            .count(txn)
                            .await
                            .context("count item references")?
                            > 0;
                        if referenced {
                            return Err(WorkshopError::ReferentialBlock);
                        }
                        warehouse_items::Entity::delete_by_id(id)
                            .exec(txn)
                            .await
                            .context("purge item")?;
                    }
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)
    }
}

impl StockLedger for DbWarehouseRepository {
    async fn current_quantity(
        &self,
        item_id: i32,
        exclude_restock: Option<i32>,
        exclude_use: Option<i32>,
    ) -> Result<i64, WorkshopError> {
        quantity_of(&self.db, item_id, exclude_restock, exclude_use).await
    }
}

impl RestockRepository for DbWarehouseRepository {
    async fn list_for_item(&self, item_id: i32) -> Result<Vec<WarehouseRestock>, WorkshopError> {
        let models = warehouse_restocks::Entity::find()
            .filter(warehouse_restocks::Column::ItemId.eq(item_id))
            .order_by_asc(warehouse_restocks::Column::Id)
            .all(&self.db)
            .await
            .context("list restocks")?;
        Ok(models.into_iter().map(restock_from_model).collect())
    }

    async fn find(&self, id: i32) -> Result<Option<WarehouseRestock>, WorkshopError> {
        let model = warehouse_restocks::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find restock")?;
        Ok(model.map(restock_from_model))
    }

    async fn create(
        &self,
        restock: &WarehouseRestock,
    ) -> Result<WarehouseRestock, WorkshopError> {
        let restock = restock.clone();
        self.db
            .transaction::<_, WarehouseRestock, WorkshopError>(|txn| {
                Box::pin(async move {
                    let current = quantity_of(txn, restock.item_id, None, None).await?;
                    validate_adjustment(current, restock.amount as i64, "amount")
                        .map_err(|e| WorkshopError::Validation(e.into()))?;
                    let model = warehouse_restocks::ActiveModel {
                        item_id: Set(restock.item_id),
                        provider_id: Set(restock.provider_id),
                        amount: Set(restock.amount),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .context("create restock")?;
                    Ok(restock_from_model(model))
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn update(&self, restock: &WarehouseRestock) -> Result<(), WorkshopError> {
        let restock = restock.clone();
        self.db
            .transaction::<_, (), WorkshopError>(|txn| {
                Box::pin(async move {
                    // Exclude this row's prior amount before re-applying it.
                    let current =
                        quantity_of(txn, restock.item_id, Some(restock.id), None).await?;
                    validate_adjustment(current, restock.amount as i64, "amount")
                        .map_err(|e| WorkshopError::Validation(e.into()))?;
                    let mut am = warehouse_restocks::ActiveModel {
                        id: Set(restock.id),
                        ..Default::default()
                    };
                    am.provider_id = Set(restock.provider_id);
                    am.amount = Set(restock.amount);
                    am.update(txn).await.context("update restock")?;
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn delete(&self, id: i32) -> Result<(), WorkshopError> {
        self.db
            .transaction::<_, (), WorkshopError>(move |txn| {
                Box::pin(async move {
                    let model = warehouse_restocks::Entity::find_by_id(id)
                        .one(txn)
                        .await
                        .context("find restock")?
                        .ok_or(WorkshopError::NotFound)?;
                    // Removing a delivery must not overdraw what was already used.
                    let remaining = quantity_of(txn, model.item_id, Some(id), None).await?;
                    validate_adjustment(remaining, 0, "amount")
                        .map_err(|e| WorkshopError::Validation(e.into()))?;
                    warehouse_restocks::Entity::delete_by_id(id)
                        .exec(txn)
                        .await
                        .context("delete restock")?;
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)
    }
}

impl UseRepository for DbWarehouseRepository {
    async fn list_for_order(&self, order_id: i32) -> Result<Vec<WarehouseUse>, WorkshopError> {
        let models = warehouse_uses::Entity::find()
            .filter(warehouse_uses::Column::RepairOrderId.eq(order_id))
            .order_by_asc(warehouse_uses::Column::Id)
            .all(&self.db)
            .await
            .context("list warehouse uses")?;
        Ok(models.into_iter().map(use_from_model).collect())
    }

    async fn find(&self, id: i32) -> Result<Option<WarehouseUse>, WorkshopError> {
        let model = warehouse_uses::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find warehouse use")?;
        Ok(model.map(use_from_model))
    }

    async fn create(&self, warehouse_use: &WarehouseUse) -> Result<WarehouseUse, WorkshopError> {
        let warehouse_use = warehouse_use.clone();
        self.db
            .transaction::<_, WarehouseUse, WorkshopError>(|txn| {
                Box::pin(async move {
                    let current = quantity_of(txn, warehouse_use.item_id, None, None).await?;
                    validate_adjustment(current, -(warehouse_use.amount as i64), "amount")
                        .map_err(|e| WorkshopError::Validation(e.into()))?;
                    let model = warehouse_uses::ActiveModel {
                        repair_order_id: Set(warehouse_use.repair_order_id),
                        item_id: Set(warehouse_use.item_id),
                        amount: Set(warehouse_use.amount),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .context("create warehouse use")?;
                    Ok(use_from_model(model))
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn update(&self, warehouse_use: &WarehouseUse) -> Result<(), WorkshopError> {
        let warehouse_use = warehouse_use.clone();
        self.db
            .transaction::<_, (), WorkshopError>(|txn| {
                Box::pin(async move {
                    let current =
                        quantity_of(txn, warehouse_use.item_id, None, Some(warehouse_use.id))
                            .await?;
                    validate_adjustment(current, -(warehouse_use.amount as i64), "amount")
                        .map_err(|e| WorkshopError::Validation(e.into()))?;
                    let mut am = warehouse_uses::ActiveModel {
                        id: Set(warehouse_use.id),
                        ..Default::default()
                    };
                    am.item_id = Set(warehouse_use.item_id);
                    am.amount = Set(warehouse_use.amount);
                    am.update(txn).await.context("update warehouse use")?;
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn delete(&self, id: i32) -> Result<(), WorkshopError> {
        let deleted = warehouse_uses::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete warehouse use")?;
        if deleted.rows_affected == 0 {
            return Err(WorkshopError::NotFound);
        }
        Ok(())
    }
}

// ── Service-history repository ───────────────────────────────────────────────

#[derive(Clone)]
pub struct DbServiceHistoryRepository {
    pub db: DatabaseConnection,
}

impl ServiceHistoryRepository for DbServiceHistoryRepository {
    async fn list_for_order(&self, order_id: i32) -> Result<Vec<ServiceHistory>, WorkshopError> {
        let models = service_histories::Entity::find()
            .filter(service_histories::Column::RepairOrderId.eq(order_id))
            .order_by_asc(service_histories::Column::Id)
            .all(&self.db)
            .await
            .context("list service histories")?;
        Ok(models.into_iter().map(history_from_model).collect())
    }

    async fn find(&self, id: i32) -> Result<Option<ServiceHistory>, WorkshopError> {
        let model = service_histories::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find service history")?;
        Ok(model.map(history_from_model))
    }

    async fn create(&self, history: &ServiceHistory) -> Result<ServiceHistory, WorkshopError> {
        let model = service_histories::ActiveModel {
            repair_order_id: Set(history.repair_order_id),
            service_id: Set(history.service_id),
            finish_date: Set(history.finish_date),
            comments: Set(history.comments.clone()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create service history")?;
        Ok(history_from_model(model))
    }

    async fn update(&self, history: &ServiceHistory) -> Result<(), WorkshopError> {
        let mut am = service_histories::ActiveModel {
            id: Set(history.id),
            ..Default::default()
        };
        am.service_id = Set(history.service_id);
        am.finish_date = Set(history.finish_date);
        am.comments = Set(history.comments.clone());
        am.update(&self.db).await.context("update service history")?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), WorkshopError> {
        let deleted = service_histories::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete service history")?;
        if deleted.rows_affected == 0 {
            return Err(WorkshopError::NotFound);
        }
        Ok(())
    }
}

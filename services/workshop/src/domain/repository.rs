#![allow(async_fn_in_trait)]

use rust_decimal::Decimal;

use autofix_domain::access::EntityKind;
use autofix_domain::pagination::PageRequest;

use crate::domain::types::{
    Client, Employee, EmployeeFilter, RepairOrder, RepairOrderFilter, Service, ServiceHistory,
    Vehicle, WarehouseItem, WarehouseProvider, WarehouseRestock, WarehouseUse,
};
use crate::error::WorkshopError;

/// Repository for employees. Employees are never deleted; ending an
/// employment is an update that sets `end_date`.
pub trait EmployeeRepository: Send + Sync {
    async fn list(
        &self,
        filter: EmployeeFilter,
        page: PageRequest,
    ) -> Result<Vec<Employee>, WorkshopError>;
    async fn find(&self, id: i32) -> Result<Option<Employee>, WorkshopError>;
    async fn create(&self, employee: &Employee) -> Result<Employee, WorkshopError>;
    async fn update(&self, employee: &Employee) -> Result<(), WorkshopError>;
}

/// Repository for the service catalog.
pub trait ServiceRepository: Send + Sync {
    async fn list(
        &self,
        matching_ids: Option<Vec<i32>>,
        page: PageRequest,
    ) -> Result<Vec<Service>, WorkshopError>;
    async fn find(&self, id: i32) -> Result<Option<Service>, WorkshopError>;
    async fn create(&self, service: &Service) -> Result<Service, WorkshopError>;
    async fn update(&self, service: &Service) -> Result<(), WorkshopError>;
    /// First call soft-deletes; a second call on the soft-deleted row purges
    /// it, failing with `ReferentialBlock` while service histories reference it.
    async fn delete(&self, id: i32) -> Result<(), WorkshopError>;
}

pub trait ClientRepository: Send + Sync {
    async fn list(
        &self,
        matching_ids: Option<Vec<i32>>,
        page: PageRequest,
    ) -> Result<Vec<Client>, WorkshopError>;
    async fn find(&self, id: i32) -> Result<Option<Client>, WorkshopError>;
    async fn create(&self, client: &Client) -> Result<Client, WorkshopError>;
    async fn update(&self, client: &Client) -> Result<(), WorkshopError>;
    async fn delete(&self, id: i32) -> Result<(), WorkshopError>;
}

pub trait VehicleRepository: Send + Sync {
    async fn list(
        &self,
        matching_ids: Option<Vec<i32>>,
        page: PageRequest,
    ) -> Result<Vec<Vehicle>, WorkshopError>;
    async fn find(&self, id: i32) -> Result<Option<Vehicle>, WorkshopError>;
    async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, WorkshopError>;
    async fn update(&self, vehicle: &Vehicle) -> Result<(), WorkshopError>;
    async fn delete(&self, id: i32) -> Result<(), WorkshopError>;
}

pub trait RepairOrderRepository: Send + Sync {
    async fn list(
        &self,
        filter: RepairOrderFilter,
        page: PageRequest,
    ) -> Result<Vec<RepairOrder>, WorkshopError>;
    async fn find(&self, id: i32) -> Result<Option<RepairOrder>, WorkshopError>;
    async fn create(&self, order: &RepairOrder) -> Result<RepairOrder, WorkshopError>;
    async fn update(&self, order: &RepairOrder) -> Result<(), WorkshopError>;
    /// Soft delete cascades the order's history and warehouse-use rows.
    async fn delete(&self, id: i32) -> Result<(), WorkshopError>;
    /// Sum of service prices over the order's history rows; 0 when none.
    async fn total_cost(&self, order_id: i32) -> Result<Decimal, WorkshopError>;
}

pub trait ProviderRepository: Send + Sync {
    async fn list(
        &self,
        matching_ids: Option<Vec<i32>>,
        page: PageRequest,
    ) -> Result<Vec<WarehouseProvider>, WorkshopError>;
    async fn find(&self, id: i32) -> Result<Option<WarehouseProvider>, WorkshopError>;
    async fn create(&self, provider: &WarehouseProvider)
    -> Result<WarehouseProvider, WorkshopError>;
    async fn update(&self, provider: &WarehouseProvider) -> Result<(), WorkshopError>;
    async fn delete(&self, id: i32) -> Result<(), WorkshopError>;
}

pub trait ItemRepository: Send + Sync {
    async fn list(
        &self,
        matching_ids: Option<Vec<i32>>,
        page: PageRequest,
    ) -> Result<Vec<WarehouseItem>, WorkshopError>;
    async fn find(&self, id: i32) -> Result<Option<WarehouseItem>, WorkshopError>;
    async fn create(&self, item: &WarehouseItem) -> Result<WarehouseItem, WorkshopError>;
    async fn update(&self, item: &WarehouseItem) -> Result<(), WorkshopError>;
    /// Soft delete cascades the item's restock rows; purge is refused while
    /// warehouse uses still reference the item.
    async fn delete(&self, id: i32) -> Result<(), WorkshopError>;
}

/// On-hand quantity of an item, derived from historical rows.
pub trait StockLedger: Send + Sync {
    /// `Σ restock amounts − Σ use amounts` for the item, optionally leaving
    /// one row out of its own side's sum (for re-validating that row's edit).
    async fn current_quantity(
        &self,
        item_id: i32,
        exclude_restock: Option<i32>,
        exclude_use: Option<i32>,
    ) -> Result<i64, WorkshopError>;
}

/// Repository for restock rows. Creates, updates and deletes re-run the
/// ledger check atomically with the row write.
pub trait RestockRepository: Send + Sync {
    async fn list_for_item(&self, item_id: i32) -> Result<Vec<WarehouseRestock>, WorkshopError>;
    async fn find(&self, id: i32) -> Result<Option<WarehouseRestock>, WorkshopError>;
    async fn create(&self, restock: &WarehouseRestock)
    -> Result<WarehouseRestock, WorkshopError>;
    async fn update(&self, restock: &WarehouseRestock) -> Result<(), WorkshopError>;
    async fn delete(&self, id: i32) -> Result<(), WorkshopError>;
}

/// Repository for warehouse-use rows. Creates and updates re-run the ledger
/// check atomically with the row write.
pub trait UseRepository: Send + Sync {
    async fn list_for_order(&self, order_id: i32) -> Result<Vec<WarehouseUse>, WorkshopError>;
    async fn find(&self, id: i32) -> Result<Option<WarehouseUse>, WorkshopError>;
    async fn create(&self, warehouse_use: &WarehouseUse) -> Result<WarehouseUse, WorkshopError>;
    async fn update(&self, warehouse_use: &WarehouseUse) -> Result<(), WorkshopError>;
    async fn delete(&self, id: i32) -> Result<(), WorkshopError>;
}

pub trait ServiceHistoryRepository: Send + Sync {
    async fn list_for_order(&self, order_id: i32) -> Result<Vec<ServiceHistory>, WorkshopError>;
    async fn find(&self, id: i32) -> Result<Option<ServiceHistory>, WorkshopError>;
    async fn create(&self, history: &ServiceHistory) -> Result<ServiceHistory, WorkshopError>;
    async fn update(&self, history: &ServiceHistory) -> Result<(), WorkshopError>;
    async fn delete(&self, id: i32) -> Result<(), WorkshopError>;
}

/// Full-text lookup over the per-entity search projections.
pub trait SearchPort: Send + Sync {
    async fn search(&self, kind: EntityKind, query: &str) -> Result<Vec<i32>, WorkshopError>;
}

use chrono::NaiveDate;
use rust_decimal::Decimal;

use autofix_domain::position::Position;

/// Shop employee. There is no separate removal flag: an employee with an
/// `end_date` is no longer active but stays for historical records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub patronymic: String,
    pub passport_info: String,
    pub position: Position,
    pub join_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub end_reason: String,
}

impl Employee {
    pub fn is_active(&self) -> bool {
        self.end_date.is_none()
    }

    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.last_name, self.first_name, self.patronymic)
    }
}

/// Catalog entry for a repair service with a fixed price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: i32,
    pub full_name: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub id: i32,
    pub manufacturer: String,
    pub model: String,
    pub year: i32,
    pub license_number: String,
    pub vin: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairOrder {
    pub id: i32,
    pub master_id: i32,
    pub client_id: i32,
    pub vehicle_id: i32,
    pub vehicle_mileage: i32,
    pub start_date: NaiveDate,
    pub finish_until: Option<NaiveDate>,
    pub finish_date: Option<NaiveDate>,
    pub is_cancelled: bool,
    pub complaints: String,
    pub diagnostic_results: String,
    pub comments: String,
    pub is_paid: bool,
    pub is_warranty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseProvider {
    pub id: i32,
    pub name: String,
    pub contact_info: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseItem {
    pub id: i32,
    pub name: String,
    pub item_type: String,
    pub price: Decimal,
}

/// Incoming stock row. Hard-deleted with its item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseRestock {
    pub id: i32,
    pub item_id: i32,
    pub provider_id: i32,
    pub amount: i32,
}

/// Consumption of an item by a repair order. Hard-deleted with its order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseUse {
    pub id: i32,
    pub repair_order_id: i32,
    pub item_id: i32,
    pub amount: i32,
}

/// One performed service line of a repair order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceHistory {
    pub id: i32,
    pub repair_order_id: i32,
    pub service_id: i32,
    pub finish_date: Option<NaiveDate>,
    pub comments: String,
}

/// List filter for employees. The default view hides ended employees.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    pub show_removed: bool,
    /// Ids returned by a search query. `None` means no search predicate.
    pub matching_ids: Option<Vec<i32>>,
}

/// List filter for repair orders. The default view hides cancelled orders
/// and orders that are both finished and paid.
#[derive(Debug, Clone, Default)]
pub struct RepairOrderFilter {
    pub master: Option<i32>,
    pub show_finished: bool,
    pub matching_ids: Option<Vec<i32>>,
}

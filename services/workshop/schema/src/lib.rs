//! sea-orm entities for the workshop database, one module per table.

pub mod clients;
pub mod employees;
pub mod repair_orders;
pub mod service_histories;
pub mod services;
pub mod vehicles;
pub mod warehouse_items;
pub mod warehouse_providers;
pub mod warehouse_restocks;
pub mod warehouse_uses;

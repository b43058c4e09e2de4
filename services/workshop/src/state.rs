use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbClientRepository, DbEmployeeRepository, DbProviderRepository, DbRepairOrderRepository,
    DbServiceHistoryRepository, DbServiceRepository, DbVehicleRepository, DbWarehouseRepository,
};
use crate::infra::search::DbSearchIndex;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn employee_repo(&self) -> DbEmployeeRepository {
        DbEmployeeRepository {
            db: self.db.clone(),
        }
    }

    pub fn service_repo(&self) -> DbServiceRepository {
        DbServiceRepository {
            db: self.db.clone(),
        }
    }

    pub fn client_repo(&self) -> DbClientRepository {
        DbClientRepository {
            db: self.db.clone(),
        }
    }

    pub fn vehicle_repo(&self) -> DbVehicleRepository {
        DbVehicleRepository {
            db: self.db.clone(),
        }
    }

    pub fn repair_order_repo(&self) -> DbRepairOrderRepository {
        DbRepairOrderRepository {
            db: self.db.clone(),
        }
    }

    pub fn provider_repo(&self) -> DbProviderRepository {
        DbProviderRepository {
            db: self.db.clone(),
        }
    }

    /// Items, restocks, uses and the quantity ledger share one repository.
    pub fn warehouse_repo(&self) -> DbWarehouseRepository {
        DbWarehouseRepository {
            db: self.db.clone(),
        }
    }

    pub fn service_history_repo(&self) -> DbServiceHistoryRepository {
        DbServiceHistoryRepository {
            db: self.db.clone(),
        }
    }

    pub fn search_index(&self) -> DbSearchIndex {
        DbSearchIndex {
            db: self.db.clone(),
        }
    }
}

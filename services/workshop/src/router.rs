use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use autofix_core::health::{healthz, readyz};
use autofix_core::middleware::request_id_layer;

use crate::handlers::{
    client::{create_client, delete_client, get_client, list_clients, update_client},
    employee::{create_employee, get_employee, list_employees, update_employee},
    repair_order::{create_order, delete_order, get_order, list_orders, update_order},
    service::{create_service, delete_service, get_service, list_services, update_service},
    service_history::{
        create_history, delete_history, get_history, list_histories, update_history,
    },
    vehicle::{create_vehicle, delete_vehicle, get_vehicle, list_vehicles, update_vehicle},
    warehouse::{
        create_item, create_provider, create_restock, create_use, delete_item, delete_provider,
        delete_restock, delete_use, get_item, get_provider, list_items, list_providers,
        list_restocks, list_uses, update_item, update_provider, update_restock, update_use,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Employees
        .route("/employees", get(list_employees))
        .route("/employees", post(create_employee))
        .route("/employees/{id}", get(get_employee))
        .route("/employees/{id}", put(update_employee))
        // Services
        .route("/services", get(list_services))
        .route("/services", post(create_service))
        .route("/services/{id}", get(get_service))
        .route("/services/{id}", put(update_service))
        .route("/services/{id}", delete(delete_service))
        // Clients
        .route("/clients", get(list_clients))
        .route("/clients", post(create_client))
        .route("/clients/{id}", get(get_client))
        .route("/clients/{id}", put(update_client))
        .route("/clients/{id}", delete(delete_client))
        // Vehicles
        .route("/vehicles", get(list_vehicles))
        .route("/vehicles", post(create_vehicle))
        .route("/vehicles/{id}", get(get_vehicle))
        .route("/vehicles/{id}", put(update_vehicle))
        .route("/vehicles/{id}", delete(delete_vehicle))
        // Repair orders
        .route("/repair-orders", get(list_orders))
        .route("/repair-orders", post(create_order))
        .route("/repair-orders/{id}", get(get_order))
        .route("/repair-orders/{id}", put(update_order))
        .route("/repair-orders/{id}", delete(delete_order))
        // Service histories
        .route("/repair-orders/{id}/service-histories", get(list_histories))
        .route(
            "/repair-orders/{id}/service-histories",
            post(create_history),
        )
        .route("/service-histories/{id}", get(get_history))
        .route("/service-histories/{id}", put(update_history))
        .route("/service-histories/{id}", delete(delete_history))
        // Warehouse uses
        .route("/repair-orders/{id}/warehouse-uses", get(list_uses))
        .route("/repair-orders/{id}/warehouse-uses", post(create_use))
        .route("/warehouse-uses/{id}", put(update_use))
        .route("/warehouse-uses/{id}", delete(delete_use))
        // Warehouse providers
        .route("/warehouse/providers", get(list_providers))
        .route("/warehouse/providers", post(create_provider))
        .route("/warehouse/providers/{id}", get(get_provider))
        .route("/warehouse/providers/{id}", put(update_provider))
        .route("/warehouse/providers/{id}", delete(delete_provider))
        // Warehouse items and restocks
        .route("/warehouse/items", get(list_items))
        .route("/warehouse/items", post(create_item))
        .route("/warehouse/items/{id}", get(get_item))
        .route("/warehouse/items/{id}", put(update_item))
        .route("/warehouse/items/{id}", delete(delete_item))
        .route("/warehouse/items/{id}/restocks", get(list_restocks))
        .route("/warehouse/items/{id}/restocks", post(create_restock))
        .route("/warehouse/restocks/{id}", put(update_restock))
        .route("/warehouse/restocks/{id}", delete(delete_restock))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}

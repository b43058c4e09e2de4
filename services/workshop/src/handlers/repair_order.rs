use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use autofix_auth_types::identity::EmployeeIdentity;
use autofix_domain::access::{EntityKind, restrict_fields};

use crate::domain::types::RepairOrder;
use crate::error::WorkshopError;
use crate::handlers::{flag, page_request};
use crate::state::AppState;
use crate::usecase::repair_order::{
    CreateOrderUseCase, DeleteOrderUseCase, GetOrderUseCase, ListOrdersUseCase, OrderListQuery,
    RepairOrderInput, UpdateOrderUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct OrderResponse {
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

impl From<RepairOrder> for OrderResponse {
    fn from(order: RepairOrder) -> Self {
        Self {
            id: order.id,
            master_id: order.master_id,
            client_id: order.client_id,
            vehicle_id: order.vehicle_id,
            vehicle_mileage: order.vehicle_mileage,
            start_date: order.start_date,
            finish_until: order.finish_until,
            finish_date: order.finish_date,
            is_cancelled: order.is_cancelled,
            complaints: order.complaints,
            diagnostic_results: order.diagnostic_results,
            comments: order.comments,
            is_paid: order.is_paid,
            is_warranty: order.is_warranty,
        }
    }
}

/// Detail view: the order plus its derived total and the per-field
/// permission map the presentation layer uses to disable inputs.
#[derive(Serialize)]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub total_cost: Decimal,
    pub editable_fields: BTreeMap<&'static str, bool>,
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct RepairOrderListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub search: Option<String>,
    pub show_finished: Option<String>,
    pub filter_master: Option<i32>,
}

#[derive(Deserialize)]
pub struct RepairOrderRequest {
    pub master_id: i32,
    pub client_id: i32,
    pub vehicle_id: i32,
    pub vehicle_mileage: i32,
    pub start_date: Option<NaiveDate>,
    pub finish_until: Option<NaiveDate>,
    pub finish_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_cancelled: bool,
    #[serde(default)]
    pub complaints: String,
    #[serde(default)]
    pub diagnostic_results: String,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub is_warranty: bool,
}

impl From<RepairOrderRequest> for RepairOrderInput {
    fn from(body: RepairOrderRequest) -> Self {
        Self {
            master_id: body.master_id,
            client_id: body.client_id,
            vehicle_id: body.vehicle_id,
            vehicle_mileage: body.vehicle_mileage,
            start_date: body.start_date,
            finish_until: body.finish_until,
            finish_date: body.finish_date,
            is_cancelled: body.is_cancelled,
            complaints: body.complaints,
            diagnostic_results: body.diagnostic_results,
            comments: body.comments,
            is_paid: body.is_paid,
            is_warranty: body.is_warranty,
        }
    }
}

// ── GET /repair-orders ───────────────────────────────────────────────────────

pub async fn list_orders(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Query(query): Query<RepairOrderListQuery>,
) -> Result<Json<Vec<OrderResponse>>, WorkshopError> {
    let usecase = ListOrdersUseCase {
        repo: state.repair_order_repo(),
        search: state.search_index(),
    };
    let orders = usecase
        .execute(
            identity.employee_id,
            identity.position,
            OrderListQuery {
                filter_master: query.filter_master,
                show_finished: flag(query.show_finished.as_deref()),
                search: query.search,
                page: page_request(query.per_page, query.page),
            },
        )
        .await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

// ── GET /repair-orders/{id} ──────────────────────────────────────────────────

pub async fn get_order(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OrderDetailResponse>, WorkshopError> {
    let usecase = GetOrderUseCase {
        repo: state.repair_order_repo(),
    };
    let (order, total_cost) = usecase
        .execute(identity.employee_id, identity.position, id)
        .await?;
    Ok(Json(OrderDetailResponse {
        order: order.into(),
        total_cost,
        editable_fields: restrict_fields(identity.position, EntityKind::RepairOrder),
    }))
}

// ── POST /repair-orders ──────────────────────────────────────────────────────

pub async fn create_order(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Json(body): Json<RepairOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), WorkshopError> {
    let usecase = CreateOrderUseCase {
        repo: state.repair_order_repo(),
        employees: state.employee_repo(),
        clients: state.client_repo(),
        vehicles: state.vehicle_repo(),
    };
    let order = usecase.execute(identity.position, body.into()).await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

// ── PUT /repair-orders/{id} ──────────────────────────────────────────────────

pub async fn update_order(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<RepairOrderRequest>,
) -> Result<Json<OrderResponse>, WorkshopError> {
    let usecase = UpdateOrderUseCase {
        repo: state.repair_order_repo(),
        employees: state.employee_repo(),
        clients: state.client_repo(),
        vehicles: state.vehicle_repo(),
    };
    let order = usecase
        .execute(identity.employee_id, identity.position, id, body.into())
        .await?;
    Ok(Json(order.into()))
}

// ── DELETE /repair-orders/{id} ───────────────────────────────────────────────

pub async fn delete_order(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, WorkshopError> {
    let usecase = DeleteOrderUseCase {
        repo: state.repair_order_repo(),
    };
    usecase.execute(identity.position, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use autofix_auth_types::identity::EmployeeIdentity;
use autofix_domain::access::{EntityKind, restrict_fields};

use crate::domain::types::ServiceHistory;
use crate::error::WorkshopError;
use crate::state::AppState;
use crate::usecase::service_history::{
    CreateHistoryUseCase, DeleteHistoryUseCase, GetHistoryUseCase, HistoryInput,
    ListHistoriesUseCase, UpdateHistoryUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HistoryResponse {
    pub id: i32,
    pub repair_order_id: i32,
    pub service_id: i32,
    pub finish_date: Option<NaiveDate>,
    pub comments: String,
}

impl From<ServiceHistory> for HistoryResponse {
    fn from(history: ServiceHistory) -> Self {
        Self {
            id: history.id,
            repair_order_id: history.repair_order_id,
            service_id: history.service_id,
            finish_date: history.finish_date,
            comments: history.comments,
        }
    }
}

#[derive(Serialize)]
pub struct HistoryDetailResponse {
    #[serde(flatten)]
    pub history: HistoryResponse,
    pub editable_fields: BTreeMap<&'static str, bool>,
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct HistoryRequest {
    pub service_id: i32,
    pub finish_date: Option<NaiveDate>,
    #[serde(default)]
    pub comments: String,
}

impl From<HistoryRequest> for HistoryInput {
    fn from(body: HistoryRequest) -> Self {
        Self {
            service_id: body.service_id,
            finish_date: body.finish_date,
            comments: body.comments,
        }
    }
}

// ── GET /repair-orders/{id}/service-histories ────────────────────────────────

pub async fn list_histories(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<Json<Vec<HistoryResponse>>, WorkshopError> {
    let usecase = ListHistoriesUseCase {
        repo: state.service_history_repo(),
        orders: state.repair_order_repo(),
    };
    let histories = usecase
        .execute(identity.employee_id, identity.position, order_id)
        .await?;
    Ok(Json(histories.into_iter().map(Into::into).collect()))
}

// ── GET /service-histories/{id} ──────────────────────────────────────────────

pub async fn get_history(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<HistoryDetailResponse>, WorkshopError> {
    let usecase = GetHistoryUseCase {
        repo: state.service_history_repo(),
        orders: state.repair_order_repo(),
    };
    let history = usecase
        .execute(identity.employee_id, identity.position, id)
        .await?;
    Ok(Json(HistoryDetailResponse {
        history: history.into(),
        editable_fields: restrict_fields(identity.position, EntityKind::ServiceHistory),
    }))
}

// ── POST /repair-orders/{id}/service-histories ───────────────────────────────

pub async fn create_history(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
    Json(body): Json<HistoryRequest>,
) -> Result<(StatusCode, Json<HistoryResponse>), WorkshopError> {
    let usecase = CreateHistoryUseCase {
        repo: state.service_history_repo(),
        orders: state.repair_order_repo(),
        services: state.service_repo(),
    };
    let history = usecase
        .execute(
            identity.employee_id,
            identity.position,
            order_id,
            body.into(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(history.into())))
}

// ── PUT /service-histories/{id} ──────────────────────────────────────────────

pub async fn update_history(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<HistoryRequest>,
) -> Result<Json<HistoryResponse>, WorkshopError> {
    let usecase = UpdateHistoryUseCase {
        repo: state.service_history_repo(),
        orders: state.repair_order_repo(),
        services: state.service_repo(),
    };
    let history = usecase
        .execute(identity.employee_id, identity.position, id, body.into())
        .await?;
    Ok(Json(history.into()))
}

// ── DELETE /service-histories/{id} ───────────────────────────────────────────

pub async fn delete_history(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, WorkshopError> {
    let usecase = DeleteHistoryUseCase {
        repo: state.service_history_repo(),
        orders: state.repair_order_repo(),
    };
    usecase
        .execute(identity.employee_id, identity.position, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

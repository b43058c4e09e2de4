use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use autofix_auth_types::identity::EmployeeIdentity;

use crate::domain::types::Service;
use crate::error::WorkshopError;
use crate::handlers::page_request;
use crate::state::AppState;
use crate::usecase::service::{
    CreateServiceUseCase, DeleteServiceUseCase, GetServiceUseCase, ListServicesUseCase,
    ServiceInput, UpdateServiceUseCase,
};

#[derive(Serialize)]
pub struct ServiceResponse {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
}

impl From<Service> for ServiceResponse {
    fn from(service: Service) -> Self {
        Self {
            id: service.id,
            name: service.name,
            price: service.price,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct ServiceListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub search: Option<String>,
}

#[derive(Deserialize)]
pub struct ServiceRequest {
    pub name: String,
    pub price: Decimal,
}

// ── GET /services ────────────────────────────────────────────────────────────

pub async fn list_services(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Query(query): Query<ServiceListQuery>,
) -> Result<Json<Vec<ServiceResponse>>, WorkshopError> {
    let usecase = ListServicesUseCase {
        repo: state.service_repo(),
        search: state.search_index(),
    };
    let services = usecase
        .execute(
            identity.position,
            query.search.as_deref(),
            page_request(query.per_page, query.page),
        )
        .await?;
    Ok(Json(services.into_iter().map(Into::into).collect()))
}

// ── GET /services/{id} ───────────────────────────────────────────────────────

pub async fn get_service(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ServiceResponse>, WorkshopError> {
    let usecase = GetServiceUseCase {
        repo: state.service_repo(),
    };
    let service = usecase.execute(identity.position, id).await?;
    Ok(Json(service.into()))
}

// ── POST /services ───────────────────────────────────────────────────────────

pub async fn create_service(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Json(body): Json<ServiceRequest>,
) -> Result<(StatusCode, Json<ServiceResponse>), WorkshopError> {
    let usecase = CreateServiceUseCase {
        repo: state.service_repo(),
    };
    let service = usecase
        .execute(
            identity.position,
            ServiceInput {
                name: body.name,
                price: body.price,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(service.into())))
}

// ── PUT /services/{id} ───────────────────────────────────────────────────────

pub async fn update_service(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ServiceRequest>,
) -> Result<Json<ServiceResponse>, WorkshopError> {
    let usecase = UpdateServiceUseCase {
        repo: state.service_repo(),
    };
    let service = usecase
        .execute(
            identity.position,
            id,
            ServiceInput {
                name: body.name,
                price: body.price,
            },
        )
        .await?;
    Ok(Json(service.into()))
}

// ── DELETE /services/{id} ────────────────────────────────────────────────────

pub async fn delete_service(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, WorkshopError> {
    let usecase = DeleteServiceUseCase {
        repo: state.service_repo(),
    };
    usecase.execute(identity.position, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

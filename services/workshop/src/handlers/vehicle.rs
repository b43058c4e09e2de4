use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use autofix_auth_types::identity::EmployeeIdentity;

use crate::domain::types::Vehicle;
use crate::error::WorkshopError;
use crate::handlers::page_request;
use crate::state::AppState;
use crate::usecase::vehicle::{
    CreateVehicleUseCase, DeleteVehicleUseCase, GetVehicleUseCase, ListVehiclesUseCase,
    UpdateVehicleUseCase, VehicleInput,
};

#[derive(Serialize)]
pub struct VehicleResponse {
    pub id: i32,
    pub manufacturer: String,
    pub model: String,
    pub year: i32,
    pub license_number: String,
    pub vin: String,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            manufacturer: vehicle.manufacturer,
            model: vehicle.model,
            year: vehicle.year,
            license_number: vehicle.license_number,
            vin: vehicle.vin,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct VehicleListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub search: Option<String>,
}

#[derive(Deserialize)]
pub struct VehicleRequest {
    pub manufacturer: String,
    pub model: String,
    pub year: i32,
    pub license_number: String,
    pub vin: String,
}

impl From<VehicleRequest> for VehicleInput {
    fn from(body: VehicleRequest) -> Self {
        Self {
            manufacturer: body.manufacturer,
            model: body.model,
            year: body.year,
            license_number: body.license_number,
            vin: body.vin,
        }
    }
}

// ── GET /vehicles ────────────────────────────────────────────────────────────

pub async fn list_vehicles(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Query(query): Query<VehicleListQuery>,
) -> Result<Json<Vec<VehicleResponse>>, WorkshopError> {
    let usecase = ListVehiclesUseCase {
        repo: state.vehicle_repo(),
        search: state.search_index(),
    };
    let vehicles = usecase
        .execute(
            identity.position,
            query.search.as_deref(),
            page_request(query.per_page, query.page),
        )
        .await?;
    Ok(Json(vehicles.into_iter().map(Into::into).collect()))
}

// ── GET /vehicles/{id} ───────────────────────────────────────────────────────

pub async fn get_vehicle(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<VehicleResponse>, WorkshopError> {
    let usecase = GetVehicleUseCase {
        repo: state.vehicle_repo(),
    };
    let vehicle = usecase.execute(identity.position, id).await?;
    Ok(Json(vehicle.into()))
}

// ── POST /vehicles ───────────────────────────────────────────────────────────

pub async fn create_vehicle(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Json(body): Json<VehicleRequest>,
) -> Result<(StatusCode, Json<VehicleResponse>), WorkshopError> {
    let usecase = CreateVehicleUseCase {
        repo: state.vehicle_repo(),
    };
    let vehicle = usecase.execute(identity.position, body.into()).await?;
    Ok((StatusCode::CREATED, Json(vehicle.into())))
}

// ── PUT /vehicles/{id} ───────────────────────────────────────────────────────

pub async fn update_vehicle(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<VehicleRequest>,
) -> Result<Json<VehicleResponse>, WorkshopError> {
    let usecase = UpdateVehicleUseCase {
        repo: state.vehicle_repo(),
    };
    let vehicle = usecase.execute(identity.position, id, body.into()).await?;
    Ok(Json(vehicle.into()))
}

// ── DELETE /vehicles/{id} ────────────────────────────────────────────────────

pub async fn delete_vehicle(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, WorkshopError> {
    let usecase = DeleteVehicleUseCase {
        repo: state.vehicle_repo(),
    };
    usecase.execute(identity.position, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use autofix_auth_types::identity::EmployeeIdentity;
use autofix_domain::position::Position;

use crate::domain::types::Employee;
use crate::error::WorkshopError;
use crate::handlers::{flag, page_request};
use crate::state::AppState;
use crate::usecase::employee::{
    CreateEmployeeUseCase, EmployeeInput, GetEmployeeUseCase, ListEmployeesUseCase,
    UpdateEmployeeUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EmployeeResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub patronymic: String,
    pub full_name: String,
    pub passport_info: String,
    pub position: Position,
    pub position_label: &'static str,
    pub join_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub end_reason: String,
    pub is_active: bool,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            full_name: employee.full_name(),
            is_active: employee.is_active(),
            position_label: employee.position.label(),
            id: employee.id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            patronymic: employee.patronymic,
            passport_info: employee.passport_info,
            position: employee.position,
            join_date: employee.join_date,
            end_date: employee.end_date,
            end_reason: employee.end_reason,
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct EmployeeListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub search: Option<String>,
    pub show_removed: Option<String>,
}

#[derive(Deserialize)]
pub struct EmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub patronymic: String,
    pub passport_info: String,
    pub position: Position,
    pub join_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_reason: String,
}

impl From<EmployeeRequest> for EmployeeInput {
    fn from(body: EmployeeRequest) -> Self {
        Self {
            first_name: body.first_name,
            last_name: body.last_name,
            patronymic: body.patronymic,
            passport_info: body.passport_info,
            position: body.position,
            join_date: body.join_date,
            end_date: body.end_date,
            end_reason: body.end_reason,
        }
    }
}

// ── GET /employees ───────────────────────────────────────────────────────────

pub async fn list_employees(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Query(query): Query<EmployeeListQuery>,
) -> Result<Json<Vec<EmployeeResponse>>, WorkshopError> {
    let usecase = ListEmployeesUseCase {
        repo: state.employee_repo(),
        search: state.search_index(),
    };
    let employees = usecase
        .execute(
            identity.position,
            flag(query.show_removed.as_deref()),
            query.search.as_deref(),
            page_request(query.per_page, query.page),
        )
        .await?;
    Ok(Json(employees.into_iter().map(Into::into).collect()))
}

// ── GET /employees/{id} ──────────────────────────────────────────────────────

pub async fn get_employee(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<EmployeeResponse>, WorkshopError> {
    let usecase = GetEmployeeUseCase {
        repo: state.employee_repo(),
    };
    let employee = usecase.execute(identity.position, id).await?;
    Ok(Json(employee.into()))
}

// ── POST /employees ──────────────────────────────────────────────────────────

pub async fn create_employee(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Json(body): Json<EmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeResponse>), WorkshopError> {
    let usecase = CreateEmployeeUseCase {
        repo: state.employee_repo(),
    };
    let employee = usecase.execute(identity.position, body.into()).await?;
    Ok((StatusCode::CREATED, Json(employee.into())))
}

// ── PUT /employees/{id} ──────────────────────────────────────────────────────

pub async fn update_employee(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<EmployeeRequest>,
) -> Result<Json<EmployeeResponse>, WorkshopError> {
    let usecase = UpdateEmployeeUseCase {
        repo: state.employee_repo(),
    };
    let employee = usecase.execute(identity.position, id, body.into()).await?;
    Ok(Json(employee.into()))
}

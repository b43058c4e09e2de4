use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use autofix_auth_types::identity::EmployeeIdentity;

use crate::domain::types::Client;
use crate::error::WorkshopError;
use crate::handlers::page_request;
use crate::state::AppState;
use crate::usecase::client::{
    ClientInput, CreateClientUseCase, DeleteClientUseCase, GetClientUseCase, ListClientsUseCase,
    UpdateClientUseCase,
};

#[derive(Serialize)]
pub struct ClientResponse {
    pub id: i32,
    pub full_name: String,
    pub phone_number: String,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            full_name: client.full_name,
            phone_number: client.phone_number,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct ClientListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub search: Option<String>,
}

#[derive(Deserialize)]
pub struct ClientRequest {
    pub full_name: String,
    pub phone_number: String,
}

// ── GET /clients ─────────────────────────────────────────────────────────────

pub async fn list_clients(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Query(query): Query<ClientListQuery>,
) -> Result<Json<Vec<ClientResponse>>, WorkshopError> {
    let usecase = ListClientsUseCase {
        repo: state.client_repo(),
        search: state.search_index(),
    };
    let clients = usecase
        .execute(
            identity.position,
            query.search.as_deref(),
            page_request(query.per_page, query.page),
        )
        .await?;
    Ok(Json(clients.into_iter().map(Into::into).collect()))
}

// ── GET /clients/{id} ────────────────────────────────────────────────────────

pub async fn get_client(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ClientResponse>, WorkshopError> {
    let usecase = GetClientUseCase {
        repo: state.client_repo(),
    };
    let client = usecase.execute(identity.position, id).await?;
    Ok(Json(client.into()))
}

// ── POST /clients ────────────────────────────────────────────────────────────

pub async fn create_client(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Json(body): Json<ClientRequest>,
) -> Result<(StatusCode, Json<ClientResponse>), WorkshopError> {
    let usecase = CreateClientUseCase {
        repo: state.client_repo(),
    };
    let client = usecase
        .execute(
            identity.position,
            ClientInput {
                full_name: body.full_name,
                phone_number: body.phone_number,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(client.into())))
}

// ── PUT /clients/{id} ────────────────────────────────────────────────────────

pub async fn update_client(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ClientRequest>,
) -> Result<Json<ClientResponse>, WorkshopError> {
    let usecase = UpdateClientUseCase {
        repo: state.client_repo(),
    };
    let client = usecase
        .execute(
            identity.position,
            id,
            ClientInput {
                full_name: body.full_name,
                phone_number: body.phone_number,
            },
        )
        .await?;
    Ok(Json(client.into()))
}

// ── DELETE /clients/{id} ─────────────────────────────────────────────────────

pub async fn delete_client(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, WorkshopError> {
    let usecase = DeleteClientUseCase {
        repo: state.client_repo(),
    };
    usecase.execute(identity.position, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

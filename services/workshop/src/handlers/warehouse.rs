use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use autofix_auth_types::identity::EmployeeIdentity;

use crate::domain::types::{WarehouseItem, WarehouseProvider, WarehouseRestock, WarehouseUse};
use crate::error::WorkshopError;
use crate::handlers::page_request;
use crate::state::AppState;
use crate::usecase::warehouse::{
    CreateItemUseCase, CreateProviderUseCase, CreateRestockUseCase, CreateUseUseCase,
    DeleteItemUseCase, DeleteProviderUseCase, DeleteRestockUseCase, DeleteUseUseCase,
    GetItemUseCase, GetProviderUseCase, ItemInput, ListItemsUseCase, ListProvidersUseCase,
    ListRestocksUseCase, ListUsesUseCase, ProviderInput, RestockInput, UpdateItemUseCase,
    UpdateProviderUseCase, UpdateRestockUseCase, UpdateUseUseCase, UseInput,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ProviderResponse {
    pub id: i32,
    pub name: String,
    pub contact_info: String,
}

impl From<WarehouseProvider> for ProviderResponse {
    fn from(provider: WarehouseProvider) -> Self {
        Self {
            id: provider.id,
            name: provider.name,
            contact_info: provider.contact_info,
        }
    }
}

#[derive(Serialize)]
pub struct ItemResponse {
    pub id: i32,
    pub name: String,
    pub item_type: String,
    pub price: Decimal,
}

impl From<WarehouseItem> for ItemResponse {
    fn from(item: WarehouseItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            item_type: item.item_type,
            price: item.price,
        }
    }
}

/// Detail view: the item plus its derived on-hand count.
#[derive(Serialize)]
pub struct ItemDetailResponse {
    #[serde(flatten)]
    pub item: ItemResponse,
    pub count: i64,
}

#[derive(Serialize)]
pub struct RestockResponse {
    pub id: i32,
    pub item_id: i32,
    pub provider_id: i32,
    pub amount: i32,
}

impl From<WarehouseRestock> for RestockResponse {
    fn from(restock: WarehouseRestock) -> Self {
        Self {
            id: restock.id,
            item_id: restock.item_id,
            provider_id: restock.provider_id,
            amount: restock.amount,
        }
    }
}

#[derive(Serialize)]
pub struct UseResponse {
    pub id: i32,
    pub repair_order_id: i32,
    pub item_id: i32,
    pub amount: i32,
}

impl From<WarehouseUse> for UseResponse {
    fn from(warehouse_use: WarehouseUse) -> Self {
        Self {
            id: warehouse_use.id,
            repair_order_id: warehouse_use.repair_order_id,
            item_id: warehouse_use.item_id,
            amount: warehouse_use.amount,
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct WarehouseListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub search: Option<String>,
}

#[derive(Deserialize)]
pub struct ProviderRequest {
    pub name: String,
    pub contact_info: String,
}

#[derive(Deserialize)]
pub struct ItemRequest {
    pub name: String,
    pub item_type: String,
    pub price: Decimal,
}

#[derive(Deserialize)]
pub struct RestockRequest {
    pub provider_id: i32,
    pub amount: i32,
}

#[derive(Deserialize)]
pub struct UseRequest {
    pub item_id: i32,
    pub amount: i32,
}

// ── GET /warehouse/providers ─────────────────────────────────────────────────

pub async fn list_providers(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Query(query): Query<WarehouseListQuery>,
) -> Result<Json<Vec<ProviderResponse>>, WorkshopError> {
    let usecase = ListProvidersUseCase {
        repo: state.provider_repo(),
        search: state.search_index(),
    };
    let providers = usecase
        .execute(
            identity.position,
            query.search.as_deref(),
            page_request(query.per_page, query.page),
        )
        .await?;
    Ok(Json(providers.into_iter().map(Into::into).collect()))
}

// ── GET /warehouse/providers/{id} ────────────────────────────────────────────

pub async fn get_provider(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProviderResponse>, WorkshopError> {
    let usecase = GetProviderUseCase {
        repo: state.provider_repo(),
    };
    let provider = usecase.execute(identity.position, id).await?;
    Ok(Json(provider.into()))
}

// ── POST /warehouse/providers ────────────────────────────────────────────────

pub async fn create_provider(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Json(body): Json<ProviderRequest>,
) -> Result<(StatusCode, Json<ProviderResponse>), WorkshopError> {
    let usecase = CreateProviderUseCase {
        repo: state.provider_repo(),
    };
    let provider = usecase
        .execute(
            identity.position,
            ProviderInput {
                name: body.name,
                contact_info: body.contact_info,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(provider.into())))
}

// ── PUT /warehouse/providers/{id} ────────────────────────────────────────────

pub async fn update_provider(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ProviderRequest>,
) -> Result<Json<ProviderResponse>, WorkshopError> {
    let usecase = UpdateProviderUseCase {
        repo: state.provider_repo(),
    };
    let provider = usecase
        .execute(
            identity.position,
            id,
            ProviderInput {
                name: body.name,
                contact_info: body.contact_info,
            },
        )
        .await?;
    Ok(Json(provider.into()))
}

// ── DELETE /warehouse/providers/{id} ─────────────────────────────────────────

pub async fn delete_provider(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, WorkshopError> {
    let usecase = DeleteProviderUseCase {
        repo: state.provider_repo(),
    };
    usecase.execute(identity.position, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /warehouse/items ─────────────────────────────────────────────────────

pub async fn list_items(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Query(query): Query<WarehouseListQuery>,
) -> Result<Json<Vec<ItemResponse>>, WorkshopError> {
    let usecase = ListItemsUseCase {
        repo: state.warehouse_repo(),
        search: state.search_index(),
    };
    let items = usecase
        .execute(
            identity.position,
            query.search.as_deref(),
            page_request(query.per_page, query.page),
        )
        .await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

// ── GET /warehouse/items/{id} ────────────────────────────────────────────────

pub async fn get_item(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ItemDetailResponse>, WorkshopError> {
    let usecase = GetItemUseCase {
        repo: state.warehouse_repo(),
    };
    let (item, count) = usecase.execute(identity.position, id).await?;
    Ok(Json(ItemDetailResponse {
        item: item.into(),
        count,
    }))
}

// ── POST /warehouse/items ────────────────────────────────────────────────────

pub async fn create_item(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Json(body): Json<ItemRequest>,
) -> Result<(StatusCode, Json<ItemResponse>), WorkshopError> {
    let usecase = CreateItemUseCase {
        repo: state.warehouse_repo(),
    };
    let item = usecase
        .execute(
            identity.position,
            ItemInput {
                name: body.name,
                item_type: body.item_type,
                price: body.price,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

// ── PUT /warehouse/items/{id} ────────────────────────────────────────────────

pub async fn update_item(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ItemRequest>,
) -> Result<Json<ItemResponse>, WorkshopError> {
    let usecase = UpdateItemUseCase {
        repo: state.warehouse_repo(),
    };
    let item = usecase
        .execute(
            identity.position,
            id,
            ItemInput {
                name: body.name,
                item_type: body.item_type,
                price: body.price,
            },
        )
        .await?;
    Ok(Json(item.into()))
}

// ── DELETE /warehouse/items/{id} ─────────────────────────────────────────────

pub async fn delete_item(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, WorkshopError> {
    let usecase = DeleteItemUseCase {
        repo: state.warehouse_repo(),
    };
    usecase.execute(identity.position, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /warehouse/items/{id}/restocks ───────────────────────────────────────

pub async fn list_restocks(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(item_id): Path<i32>,
) -> Result<Json<Vec<RestockResponse>>, WorkshopError> {
    let usecase = ListRestocksUseCase {
        repo: state.warehouse_repo(),
        items: state.warehouse_repo(),
    };
    let restocks = usecase.execute(identity.position, item_id).await?;
    Ok(Json(restocks.into_iter().map(Into::into).collect()))
}

// ── POST /warehouse/items/{id}/restocks ──────────────────────────────────────

pub async fn create_restock(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(item_id): Path<i32>,
    Json(body): Json<RestockRequest>,
) -> Result<(StatusCode, Json<RestockResponse>), WorkshopError> {
    let usecase = CreateRestockUseCase {
        repo: state.warehouse_repo(),
        items: state.warehouse_repo(),
        providers: state.provider_repo(),
    };
    let restock = usecase
        .execute(
            identity.position,
            item_id,
            RestockInput {
                provider_id: body.provider_id,
                amount: body.amount,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(restock.into())))
}

// ── PUT /warehouse/restocks/{id} ─────────────────────────────────────────────

pub async fn update_restock(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<RestockRequest>,
) -> Result<Json<RestockResponse>, WorkshopError> {
    let usecase = UpdateRestockUseCase {
        repo: state.warehouse_repo(),
        providers: state.provider_repo(),
    };
    let restock = usecase
        .execute(
            identity.position,
            id,
            RestockInput {
                provider_id: body.provider_id,
                amount: body.amount,
            },
        )
        .await?;
    Ok(Json(restock.into()))
}

// ── DELETE /warehouse/restocks/{id} ──────────────────────────────────────────

pub async fn delete_restock(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, WorkshopError> {
    let usecase = DeleteRestockUseCase {
        repo: state.warehouse_repo(),
    };
    usecase.execute(identity.position, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /repair-orders/{id}/warehouse-uses ───────────────────────────────────

pub async fn list_uses(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> Result<Json<Vec<UseResponse>>, WorkshopError> {
    let usecase = ListUsesUseCase {
        repo: state.warehouse_repo(),
        orders: state.repair_order_repo(),
    };
    let uses = usecase
        .execute(identity.employee_id, identity.position, order_id)
        .await?;
    Ok(Json(uses.into_iter().map(Into::into).collect()))
}

// ── POST /repair-orders/{id}/warehouse-uses ──────────────────────────────────

pub async fn create_use(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
    Json(body): Json<UseRequest>,
) -> Result<(StatusCode, Json<UseResponse>), WorkshopError> {
    let usecase = CreateUseUseCase {
        repo: state.warehouse_repo(),
        orders: state.repair_order_repo(),
        items: state.warehouse_repo(),
    };
    let warehouse_use = usecase
        .execute(
            identity.employee_id,
            identity.position,
            order_id,
            UseInput {
                item_id: body.item_id,
                amount: body.amount,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(warehouse_use.into())))
}

// ── PUT /warehouse-uses/{id} ─────────────────────────────────────────────────

pub async fn update_use(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UseRequest>,
) -> Result<Json<UseResponse>, WorkshopError> {
    let usecase = UpdateUseUseCase {
        repo: state.warehouse_repo(),
        orders: state.repair_order_repo(),
        items: state.warehouse_repo(),
    };
    let warehouse_use = usecase
        .execute(
            identity.employee_id,
            identity.position,
            id,
            UseInput {
                item_id: body.item_id,
                amount: body.amount,
            },
        )
        .await?;
    Ok(Json(warehouse_use.into()))
}

// ── DELETE /warehouse-uses/{id} ──────────────────────────────────────────────

pub async fn delete_use(
    identity: EmployeeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, WorkshopError> {
    let usecase = DeleteUseUseCase {
        repo: state.warehouse_repo(),
        orders: state.repair_order_repo(),
    };
    usecase
        .execute(identity.employee_id, identity.position, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

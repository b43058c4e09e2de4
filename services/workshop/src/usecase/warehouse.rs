use rust_decimal::Decimal;

use autofix_domain::access::{Action, EntityKind, can};
use autofix_domain::pagination::PageRequest;
use autofix_domain::position::Position;
use autofix_domain::validation::ValidationErrors;

use crate::domain::repository::{
    ItemRepository, ProviderRepository, RepairOrderRepository, RestockRepository, SearchPort,
    StockLedger, UseRepository,
};
use crate::domain::types::{WarehouseItem, WarehouseProvider, WarehouseRestock, WarehouseUse};
use crate::domain::validate::{validate_amount, validate_item, validate_provider};
use crate::error::WorkshopError;
use crate::usecase::matching_ids;
use crate::usecase::repair_order::authorized_order;

// ── Providers ────────────────────────────────────────────────────────────────

pub struct ProviderInput {
    pub name: String,
    pub contact_info: String,
}

pub struct ListProvidersUseCase<R: ProviderRepository, S: SearchPort> {
    pub repo: R,
    pub search: S,
}

impl<R: ProviderRepository, S: SearchPort> ListProvidersUseCase<R, S> {
    pub async fn execute(
        &self,
        caller: Position,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<WarehouseProvider>, WorkshopError> {
        if !can(caller, EntityKind::WarehouseProvider, Action::List) {
            return Err(WorkshopError::AccessDenied);
        }
        let matching_ids =
            matching_ids(&self.search, EntityKind::WarehouseProvider, search).await?;
        self.repo.list(matching_ids, page).await
    }
}

pub struct GetProviderUseCase<R: ProviderRepository> {
    pub repo: R,
}

impl<R: ProviderRepository> GetProviderUseCase<R> {
    pub async fn execute(
        &self,
        caller: Position,
        id: i32,
    ) -> Result<WarehouseProvider, WorkshopError> {
        if !can(caller, EntityKind::WarehouseProvider, Action::View) {
            return Err(WorkshopError::AccessDenied);
        }
        self.repo.find(id).await?.ok_or(WorkshopError::NotFound)
    }
}

pub struct CreateProviderUseCase<R: ProviderRepository> {
    pub repo: R,
}

impl<R: ProviderRepository> CreateProviderUseCase<R> {
    pub async fn execute(
        &self,
        caller: Position,
        input: ProviderInput,
    ) -> Result<WarehouseProvider, WorkshopError> {
        if !can(caller, EntityKind::WarehouseProvider, Action::Create) {
            return Err(WorkshopError::AccessDenied);
        }
        let provider = WarehouseProvider {
            id: 0,
            name: input.name,
            contact_info: input.contact_info,
        };
        validate_provider(&provider)?;
        self.repo.create(&provider).await
    }
}

pub struct UpdateProviderUseCase<R: ProviderRepository> {
    pub repo: R,
}

impl<R: ProviderRepository> UpdateProviderUseCase<R> {
    pub async fn execute(
        &self,
        caller: Position,
        id: i32,
        input: ProviderInput,
    ) -> Result<WarehouseProvider, WorkshopError> {
        if !can(caller, EntityKind::WarehouseProvider, Action::View) {
            return Err(WorkshopError::AccessDenied);
        }
        self.repo.find(id).await?.ok_or(WorkshopError::NotFound)?;
        let provider = WarehouseProvider {
            id,
            name: input.name,
            contact_info: input.contact_info,
        };
        validate_provider(&provider)?;
        self.repo.update(&provider).await?;
        Ok(provider)
    }
}

pub struct DeleteProviderUseCase<R: ProviderRepository> {
    pub repo: R,
}

impl<R: ProviderRepository> DeleteProviderUseCase<R> {
    pub async fn execute(&self, caller: Position, id: i32) -> Result<(), WorkshopError> {
        if !can(caller, EntityKind::WarehouseProvider, Action::Create) {
            return Err(WorkshopError::AccessDenied);
        }
        self.repo.delete(id).await
    }
}

// ── Items ────────────────────────────────────────────────────────────────────

pub struct ItemInput {
    pub name: String,
    pub item_type: String,
    pub price: Decimal,
}

pub struct ListItemsUseCase<R: ItemRepository, S: SearchPort> {
    pub repo: R,
    pub search: S,
}

impl<R: ItemRepository, S: SearchPort> ListItemsUseCase<R, S> {
    pub async fn execute(
        &self,
        caller: Position,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<WarehouseItem>, WorkshopError> {
        if !can(caller, EntityKind::WarehouseItem, Action::List) {
            return Err(WorkshopError::AccessDenied);
        }
        let matching_ids = matching_ids(&self.search, EntityKind::WarehouseItem, search).await?;
        self.repo.list(matching_ids, page).await
    }
}

pub struct GetItemUseCase<R: ItemRepository + StockLedger> {
    pub repo: R,
}

impl<R: ItemRepository + StockLedger> GetItemUseCase<R> {
    /// Returns the item together with its derived on-hand count.
    pub async fn execute(
        &self,
        caller: Position,
        id: i32,
    ) -> Result<(WarehouseItem, i64), WorkshopError> {
        if !can(caller, EntityKind::WarehouseItem, Action::View) {
            return Err(WorkshopError::AccessDenied);
        }
        let item = self.repo.find(id).await?.ok_or(WorkshopError::NotFound)?;
        let count = self.repo.current_quantity(id, None, None).await?;
        Ok((item, count))
    }
}

pub struct CreateItemUseCase<R: ItemRepository> {
    pub repo: R,
}

impl<R: ItemRepository> CreateItemUseCase<R> {
    pub async fn execute(
        &self,
        caller: Position,
        input: ItemInput,
    ) -> Result<WarehouseItem, WorkshopError> {
        if !can(caller, EntityKind::WarehouseItem, Action::Create) {
            return Err(WorkshopError::AccessDenied);
        }
        let item = WarehouseItem {
            id: 0,
            name: input.name,
            item_type: input.item_type,
            price: input.price,
        };
        validate_item(&item)?;
        self.repo.create(&item).await
    }
}

pub struct UpdateItemUseCase<R: ItemRepository> {
    pub repo: R,
}

impl<R: ItemRepository> UpdateItemUseCase<R> {
    pub async fn execute(
        &self,
        caller: Position,
        id: i32,
        input: ItemInput,
    ) -> Result<WarehouseItem, WorkshopError> {
        if !can(caller, EntityKind::WarehouseItem, Action::View) {
            return Err(WorkshopError::AccessDenied);
        }
        self.repo.find(id).await?.ok_or(WorkshopError::NotFound)?;
        let item = WarehouseItem {
            id,
            name: input.name,
            item_type: input.item_type,
            price: input.price,
        };
        validate_item(&item)?;
        self.repo.update(&item).await?;
        Ok(item)
    }
}

pub struct DeleteItemUseCase<R: ItemRepository> {
    pub repo: R,
}

impl<R: ItemRepository> DeleteItemUseCase<R> {
    pub async fn execute(&self, caller: Position, id: i32) -> Result<(), WorkshopError> {
        if !can(caller, EntityKind::WarehouseItem, Action::Create) {
            return Err(WorkshopError::AccessDenied);
        }
        self.repo.delete(id).await
    }
}

// ── Restocks ─────────────────────────────────────────────────────────────────

pub struct RestockInput {
    pub provider_id: i32,
    pub amount: i32,
}

pub struct ListRestocksUseCase<R: RestockRepository, I: ItemRepository> {
    pub repo: R,
    pub items: I,
}

impl<R: RestockRepository, I: ItemRepository> ListRestocksUseCase<R, I> {
    pub async fn execute(
        &self,
        caller: Position,
        item_id: i32,
    ) -> Result<Vec<WarehouseRestock>, WorkshopError> {
        if !can(caller, EntityKind::WarehouseRestock, Action::List) {
            return Err(WorkshopError::AccessDenied);
        }
        self.items
            .find(item_id)
            .await?
            .ok_or(WorkshopError::NotFound)?;
        self.repo.list_for_item(item_id).await
    }
}

pub struct CreateRestockUseCase<R, I, P>
where
    R: RestockRepository,
    I: ItemRepository,
    P: ProviderRepository,
{
    pub repo: R,
    pub items: I,
    pub providers: P,
}

impl<R, I, P> CreateRestockUseCase<R, I, P>
where
    R: RestockRepository,
    I: ItemRepository,
    P: ProviderRepository,
{
    pub async fn execute(
        &self,
        caller: Position,
        item_id: i32,
        input: RestockInput,
    ) -> Result<WarehouseRestock, WorkshopError> {
        if !can(caller, EntityKind::WarehouseRestock, Action::Create) {
            return Err(WorkshopError::AccessDenied);
        }
        self.items
            .find(item_id)
            .await?
            .ok_or(WorkshopError::NotFound)?;
        let mut errors = ValidationErrors::new();
        if let Err(e) = validate_amount(input.amount) {
            errors = e;
        }
        if self.providers.find(input.provider_id).await?.is_none() {
            errors.add("provider_id", "Поставщик не найден.");
        }
        errors.into_result()?;
        self.repo
            .create(&WarehouseRestock {
                id: 0,
                item_id,
                provider_id: input.provider_id,
                amount: input.amount,
            })
            .await
    }
}

pub struct UpdateRestockUseCase<R, P>
where
    R: RestockRepository,
    P: ProviderRepository,
{
    pub repo: R,
    pub providers: P,
}

impl<R, P> UpdateRestockUseCase<R, P>
where
    R: RestockRepository,
    P: ProviderRepository,
{
    pub async fn execute(
        &self,
        caller: Position,
        id: i32,
        input: RestockInput,
    ) -> Result<WarehouseRestock, WorkshopError> {
        if !can(caller, EntityKind::WarehouseRestock, Action::View) {
            return Err(WorkshopError::AccessDenied);
        }
        let existing = self.repo.find(id).await?.ok_or(WorkshopError::NotFound)?;
        let mut errors = ValidationErrors::new();
        if let Err(e) = validate_amount(input.amount) {
            errors = e;
        }
        if input.provider_id != existing.provider_id
            && self.providers.find(input.provider_id).await?.is_none()
        {
            errors.add("provider_id", "Поставщик не найден.");
        }
        errors.into_result()?;
        let restock = WarehouseRestock {
            id,
            item_id: existing.item_id,
            provider_id: input.provider_id,
            amount: input.amount,
        };
        self.repo.update(&restock).await?;
        Ok(restock)
    }
}

pub struct DeleteRestockUseCase<R: RestockRepository> {
    pub repo: R,
}

impl<R: RestockRepository> DeleteRestockUseCase<R> {
    pub async fn execute(&self, caller: Position, id: i32) -> Result<(), WorkshopError> {
        if !can(caller, EntityKind::WarehouseRestock, Action::Create) {
            return Err(WorkshopError::AccessDenied);
        }
        self.repo.delete(id).await
    }
}

// ── Warehouse uses ───────────────────────────────────────────────────────────

pub struct UseInput {
    pub item_id: i32,
    pub amount: i32,
}

/// Listing an order's consumed items follows the parent order's permission,
/// so everyone who can open the order sees its materials.
pub struct ListUsesUseCase<U: UseRepository, R: RepairOrderRepository> {
    pub repo: U,
    pub orders: R,
}

impl<U: UseRepository, R: RepairOrderRepository> ListUsesUseCase<U, R> {
    pub async fn execute(
        &self,
        caller_id: i32,
        position: Position,
        order_id: i32,
    ) -> Result<Vec<WarehouseUse>, WorkshopError> {
        authorized_order(&self.orders, caller_id, position, order_id).await?;
        self.repo.list_for_order(order_id).await
    }
}

pub struct CreateUseUseCase<U, R, I>
where
    U: UseRepository,
    R: RepairOrderRepository,
    I: ItemRepository,
{
    pub repo: U,
    pub orders: R,
    pub items: I,
}

impl<U, R, I> CreateUseUseCase<U, R, I>
where
    U: UseRepository,
    R: RepairOrderRepository,
    I: ItemRepository,
{
    pub async fn execute(
        &self,
        caller_id: i32,
        position: Position,
        order_id: i32,
        input: UseInput,
    ) -> Result<WarehouseUse, WorkshopError> {
        if !can(position, EntityKind::WarehouseUse, Action::Create) {
            return Err(WorkshopError::AccessDenied);
        }
        authorized_order(&self.orders, caller_id, position, order_id).await?;
        let mut errors = ValidationErrors::new();
        if let Err(e) = validate_amount(input.amount) {
            errors = e;
        }
        if self.items.find(input.item_id).await?.is_none() {
            errors.add("item_id", "Расходник не найден.");
        }
        errors.into_result()?;
        self.repo
            .create(&WarehouseUse {
                id: 0,
                repair_order_id: order_id,
                item_id: input.item_id,
                amount: input.amount,
            })
            .await
    }
}

pub struct UpdateUseUseCase<U, R, I>
where
    U: UseRepository,
    R: RepairOrderRepository,
    I: ItemRepository,
{
    pub repo: U,
    pub orders: R,
    pub items: I,
}

impl<U, R, I> UpdateUseUseCase<U, R, I>
where
    U: UseRepository,
    R: RepairOrderRepository,
    I: ItemRepository,
{
    pub async fn execute(
        &self,
        caller_id: i32,
        position: Position,
        id: i32,
        input: UseInput,
    ) -> Result<WarehouseUse, WorkshopError> {
        if !can(position, EntityKind::WarehouseUse, Action::View) {
            return Err(WorkshopError::AccessDenied);
        }
        let existing = self.repo.find(id).await?.ok_or(WorkshopError::NotFound)?;
        authorized_order(&self.orders, caller_id, position, existing.repair_order_id).await?;
        let mut errors = ValidationErrors::new();
        if let Err(e) = validate_amount(input.amount) {
            errors = e;
        }
        if input.item_id != existing.item_id && self.items.find(input.item_id).await?.is_none() {
            errors.add("item_id", "Расходник не найден.");
        }
        errors.into_result()?;
        let warehouse_use = WarehouseUse {
            id,
            repair_order_id: existing.repair_order_id,
            item_id: input.item_id,
            amount: input.amount,
        };
        self.repo.update(&warehouse_use).await?;
        Ok(warehouse_use)
    }
}

pub struct DeleteUseUseCase<U: UseRepository, R: RepairOrderRepository> {
    pub repo: U,
    pub orders: R,
}

impl<U: UseRepository, R: RepairOrderRepository> DeleteUseUseCase<U, R> {
    pub async fn execute(
        &self,
        caller_id: i32,
        position: Position,
        id: i32,
    ) -> Result<(), WorkshopError> {
        if !can(position, EntityKind::WarehouseUse, Action::Create) {
            return Err(WorkshopError::AccessDenied);
        }
        let existing = self.repo.find(id).await?.ok_or(WorkshopError::NotFound)?;
        authorized_order(&self.orders, caller_id, position, existing.repair_order_id).await?;
        self.repo.delete(id).await
    }
}

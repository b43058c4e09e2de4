use chrono::NaiveDate;

use autofix_domain::access::{Action, EntityKind, can, restrict_fields};
use autofix_domain::position::Position;
use autofix_domain::validation::ValidationErrors;

use crate::domain::repository::{
    RepairOrderRepository, ServiceHistoryRepository, ServiceRepository,
};
use crate::domain::types::ServiceHistory;
use crate::domain::validate::validate_service_history;
use crate::error::WorkshopError;
use crate::usecase::repair_order::authorized_order;

pub struct HistoryInput {
    pub service_id: i32,
    pub finish_date: Option<NaiveDate>,
    pub comments: String,
}

/// Listing an order's performed services follows the parent order's
/// permission, so everyone who can open the order sees its lines.
pub struct ListHistoriesUseCase<H: ServiceHistoryRepository, R: RepairOrderRepository> {
    pub repo: H,
    pub orders: R,
}

impl<H: ServiceHistoryRepository, R: RepairOrderRepository> ListHistoriesUseCase<H, R> {
    pub async fn execute(
        &self,
        caller_id: i32,
        position: Position,
        order_id: i32,
    ) -> Result<Vec<ServiceHistory>, WorkshopError> {
        authorized_order(&self.orders, caller_id, position, order_id).await?;
        self.repo.list_for_order(order_id).await
    }
}

pub struct GetHistoryUseCase<H: ServiceHistoryRepository, R: RepairOrderRepository> {
    pub repo: H,
    pub orders: R,
}

impl<H: ServiceHistoryRepository, R: RepairOrderRepository> GetHistoryUseCase<H, R> {
    pub async fn execute(
        &self,
        caller_id: i32,
        position: Position,
        id: i32,
    ) -> Result<ServiceHistory, WorkshopError> {
        if !can(position, EntityKind::ServiceHistory, Action::View) {
            return Err(WorkshopError::AccessDenied);
        }
        let history = self.repo.find(id).await?.ok_or(WorkshopError::NotFound)?;
        authorized_order(&self.orders, caller_id, position, history.repair_order_id).await?;
        Ok(history)
    }
}

pub struct CreateHistoryUseCase<H, R, S>
where
    H: ServiceHistoryRepository,
    R: RepairOrderRepository,
    S: ServiceRepository,
{
    pub repo: H,
    pub orders: R,
    pub services: S,
}

impl<H, R, S> CreateHistoryUseCase<H, R, S>
where
    H: ServiceHistoryRepository,
    R: RepairOrderRepository,
    S: ServiceRepository,
{
    pub async fn execute(
        &self,
        caller_id: i32,
        position: Position,
        order_id: i32,
        input: HistoryInput,
    ) -> Result<ServiceHistory, WorkshopError> {
        if !can(position, EntityKind::ServiceHistory, Action::Create) {
            return Err(WorkshopError::AccessDenied);
        }
        let order = authorized_order(&self.orders, caller_id, position, order_id).await?;
        let mut errors = ValidationErrors::new();
        if self.services.find(input.service_id).await?.is_none() {
            errors.add("service_id", "Услуга не найдена.");
        }
        let history = ServiceHistory {
            id: 0,
            repair_order_id: order_id,
            service_id: input.service_id,
            finish_date: input.finish_date,
            comments: input.comments,
        };
        if let Err(e) = validate_service_history(&history, order.start_date) {
            for (field, messages) in e.0 {
                for message in messages {
                    errors.add(&field, message);
                }
            }
        }
        errors.into_result()?;
        self.repo.create(&history).await
    }
}

pub struct UpdateHistoryUseCase<H, R, S>
where
    H: ServiceHistoryRepository,
    R: RepairOrderRepository,
    S: ServiceRepository,
{
    pub repo: H,
    pub orders: R,
    pub services: S,
}

impl<H, R, S> UpdateHistoryUseCase<H, R, S>
where
    H: ServiceHistoryRepository,
    R: RepairOrderRepository,
    S: ServiceRepository,
{
    pub async fn execute(
        &self,
        caller_id: i32,
        position: Position,
        id: i32,
        input: HistoryInput,
    ) -> Result<ServiceHistory, WorkshopError> {
        if !can(position, EntityKind::ServiceHistory, Action::View) {
            return Err(WorkshopError::AccessDenied);
        }
        let mut history = self.repo.find(id).await?.ok_or(WorkshopError::NotFound)?;
        let order =
            authorized_order(&self.orders, caller_id, position, history.repair_order_id).await?;

        let fields = restrict_fields(position, EntityKind::ServiceHistory);
        let editable = |field: &str| fields.get(field).copied().unwrap_or(true);

        let mut errors = ValidationErrors::new();
        if editable("service_id") && input.service_id != history.service_id {
            if self.services.find(input.service_id).await?.is_none() {
                errors.add("service_id", "Услуга не найдена.");
            }
            history.service_id = input.service_id;
        }
        if editable("finish_date") {
            history.finish_date = input.finish_date;
        }
        if editable("comments") {
            history.comments = input.comments;
        }

        if let Err(e) = validate_service_history(&history, order.start_date) {
            for (field, messages) in e.0 {
                for message in messages {
                    errors.add(&field, message);
                }
            }
        }
        errors.into_result()?;
        self.repo.update(&history).await?;
        Ok(history)
    }
}

pub struct DeleteHistoryUseCase<H: ServiceHistoryRepository, R: RepairOrderRepository> {
    pub repo: H,
    pub orders: R,
}

impl<H: ServiceHistoryRepository, R: RepairOrderRepository> DeleteHistoryUseCase<H, R> {
    pub async fn execute(
        &self,
        caller_id: i32,
        position: Position,
        id: i32,
    ) -> Result<(), WorkshopError> {
        if !can(position, EntityKind::ServiceHistory, Action::Create) {
            return Err(WorkshopError::AccessDenied);
        }
        let history = self.repo.find(id).await?.ok_or(WorkshopError::NotFound)?;
        authorized_order(&self.orders, caller_id, position, history.repair_order_id).await?;
        self.repo.delete(id).await
    }
}

use rust_decimal::Decimal;

use autofix_domain::access::{Action, EntityKind, can};
use autofix_domain::pagination::PageRequest;
use autofix_domain::position::Position;

use crate::domain::repository::{SearchPort, ServiceRepository};
use crate::domain::types::Service;
use crate::domain::validate::validate_service;
use crate::error::WorkshopError;
use crate::usecase::matching_ids;

pub struct ServiceInput {
    pub name: String,
    pub price: Decimal,
}

pub struct ListServicesUseCase<R: ServiceRepository, S: SearchPort> {
    pub repo: R,
    pub search: S,
}

impl<R: ServiceRepository, S: SearchPort> ListServicesUseCase<R, S> {
    pub async fn execute(
        &self,
        caller: Position,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Service>, WorkshopError> {
        if !can(caller, EntityKind::Service, Action::List) {
            return Err(WorkshopError::AccessDenied);
        }
        let matching_ids = matching_ids(&self.search, EntityKind::Service, search).await?;
        self.repo.list(matching_ids, page).await
    }
}

pub struct GetServiceUseCase<R: ServiceRepository> {
    pub repo: R,
}

impl<R: ServiceRepository> GetServiceUseCase<R> {
    pub async fn execute(&self, caller: Position, id: i32) -> Result<Service, WorkshopError> {
        if !can(caller, EntityKind::Service, Action::View) {
            return Err(WorkshopError::AccessDenied);
        }
        self.repo.find(id).await?.ok_or(WorkshopError::NotFound)
    }
}

pub struct CreateServiceUseCase<R: ServiceRepository> {
    pub repo: R,
}

impl<R: ServiceRepository> CreateServiceUseCase<R> {
    pub async fn execute(
        &self,
        caller: Position,
        input: ServiceInput,
    ) -> Result<Service, WorkshopError> {
        if !can(caller, EntityKind::Service, Action::Create) {
            return Err(WorkshopError::AccessDenied);
        }
        let service = Service {
            id: 0,
            name: input.name,
            price: input.price,
        };
        validate_service(&service)?;
        self.repo.create(&service).await
    }
}

pub struct UpdateServiceUseCase<R: ServiceRepository> {
    pub repo: R,
}

impl<R: ServiceRepository> UpdateServiceUseCase<R> {
    pub async fn execute(
        &self,
        caller: Position,
        id: i32,
        input: ServiceInput,
    ) -> Result<Service, WorkshopError> {
        if !can(caller, EntityKind::Service, Action::View) {
            return Err(WorkshopError::AccessDenied);
        }
        self.repo.find(id).await?.ok_or(WorkshopError::NotFound)?;
        let service = Service {
            id,
            name: input.name,
            price: input.price,
        };
        validate_service(&service)?;
        self.repo.update(&service).await?;
        Ok(service)
    }
}

pub struct DeleteServiceUseCase<R: ServiceRepository> {
    pub repo: R,
}

impl<R: ServiceRepository> DeleteServiceUseCase<R> {
    /// Deletion follows the create permission set, like the delete button
    /// in the original record card.
    pub async fn execute(&self, caller: Position, id: i32) -> Result<(), WorkshopError> {
        if !can(caller, EntityKind::Service, Action::Create) {
            return Err(WorkshopError::AccessDenied);
        }
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockServiceRepo {
        service: Option<Service>,
    }

    impl ServiceRepository for MockServiceRepo {
        async fn list(
            &self,
            _matching_ids: Option<Vec<i32>>,
            _page: PageRequest,
        ) -> Result<Vec<Service>, WorkshopError> {
            Ok(self.service.clone().into_iter().collect())
        }
        async fn find(&self, _id: i32) -> Result<Option<Service>, WorkshopError> {
            Ok(self.service.clone())
        }
        async fn create(&self, service: &Service) -> Result<Service, WorkshopError> {
            let mut created = service.clone();
            created.id = 1;
            Ok(created)
        }
        async fn update(&self, _service: &Service) -> Result<(), WorkshopError> {
            Ok(())
        }
        async fn delete(&self, _id: i32) -> Result<(), WorkshopError> {
            Ok(())
        }
    }

    fn oil_change() -> Service {
        Service {
            id: 1,
            name: "Замена масла".into(),
            price: Decimal::new(150_000, 2),
        }
    }

    #[tokio::test]
    async fn should_allow_service_manager_to_create() {
        let uc = CreateServiceUseCase {
            repo: MockServiceRepo { service: None },
        };
        let created = uc
            .execute(
                Position::ServiceManager,
                ServiceInput {
                    name: "Диагностика".into(),
                    price: Decimal::new(50_000, 2),
                },
            )
            .await
            .unwrap();
        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn should_deny_warehouse_manager() {
        let uc = GetServiceUseCase {
            repo: MockServiceRepo {
                service: Some(oil_change()),
            },
        };
        let result = uc.execute(Position::WarehouseManager, 1).await;
        assert!(matches!(result, Err(WorkshopError::AccessDenied)));
    }

    #[tokio::test]
    async fn should_reject_negative_price() {
        let uc = UpdateServiceUseCase {
            repo: MockServiceRepo {
                service: Some(oil_change()),
            },
        };
        let result = uc
            .execute(
                Position::ServiceManager,
                1,
                ServiceInput {
                    name: "Замена масла".into(),
                    price: Decimal::new(-1, 0),
                },
            )
            .await;
        assert!(matches!(result, Err(WorkshopError::Validation(_))));
    }

    #[tokio::test]
    async fn should_deny_delete_to_mechanic() {
        let uc = DeleteServiceUseCase {
            repo: MockServiceRepo {
                service: Some(oil_change()),
            },
        };
        let result = uc.execute(Position::Mechanic, 1).await;
        assert!(matches!(result, Err(WorkshopError::AccessDenied)));
    }
}

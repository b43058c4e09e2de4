use autofix_domain::access::{Action, EntityKind, can};
use autofix_domain::pagination::PageRequest;
use autofix_domain::position::Position;

use crate::domain::repository::{ClientRepository, SearchPort};
use crate::domain::types::Client;
use crate::domain::validate::validate_client;
use crate::error::WorkshopError;
use crate::usecase::matching_ids;

pub struct ClientInput {
    pub full_name: String,
    pub phone_number: String,
}

pub struct ListClientsUseCase<R: ClientRepository, S: SearchPort> {
    pub repo: R,
    pub search: S,
}

impl<R: ClientRepository, S: SearchPort> ListClientsUseCase<R, S> {
    pub async fn execute(
        &self,
        caller: Position,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Client>, WorkshopError> {
        if !can(caller, EntityKind::Client, Action::List) {
            return Err(WorkshopError::AccessDenied);
        }
        let matching_ids = matching_ids(&self.search, EntityKind::Client, search).await?;
        self.repo.list(matching_ids, page).await
    }
}

pub struct GetClientUseCase<R: ClientRepository> {
    pub repo: R,
}

impl<R: ClientRepository> GetClientUseCase<R> {
    pub async fn execute(&self, caller: Position, id: i32) -> Result<Client, WorkshopError> {
        if !can(caller, EntityKind::Client, Action::View) {
            return Err(WorkshopError::AccessDenied);
        }
        self.repo.find(id).await?.ok_or(WorkshopError::NotFound)
    }
}

pub struct CreateClientUseCase<R: ClientRepository> {
    pub repo: R,
}

impl<R: ClientRepository> CreateClientUseCase<R> {
    pub async fn execute(
        &self,
        caller: Position,
        input: ClientInput,
    ) -> Result<Client, WorkshopError> {
        if !can(caller, EntityKind::Client, Action::Create) {
            return Err(WorkshopError::AccessDenied);
        }
        let client = Client {
            id: 0,
            full_name: input.full_name,
            phone_number: input.phone_number,
        };
        validate_client(&client)?;
        self.repo.create(&client).await
    }
}

pub struct UpdateClientUseCase<R: ClientRepository> {
    pub repo: R,
}

impl<R: ClientRepository> UpdateClientUseCase<R> {
    pub async fn execute(
        &self,
        caller: Position,
        id: i32,
        input: ClientInput,
    ) -> Result<Client, WorkshopError> {
        if !can(caller, EntityKind::Client, Action::View) {
            return Err(WorkshopError::AccessDenied);
        }
        self.repo.find(id).await?.ok_or(WorkshopError::NotFound)?;
        let client = Client {
            id,
            full_name: input.full_name,
            phone_number: input.phone_number,
        };
        validate_client(&client)?;
        self.repo.update(&client).await?;
        Ok(client)
    }
}

pub struct DeleteClientUseCase<R: ClientRepository> {
    pub repo: R,
}

impl<R: ClientRepository> DeleteClientUseCase<R> {
    pub async fn execute(&self, caller: Position, id: i32) -> Result<(), WorkshopError> {
        if !can(caller, EntityKind::Client, Action::Create) {
            return Err(WorkshopError::AccessDenied);
        }
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockClientRepo {
        client: Option<Client>,
    }

    impl ClientRepository for MockClientRepo {
        async fn list(
            &self,
            _matching_ids: Option<Vec<i32>>,
            _page: PageRequest,
        ) -> Result<Vec<Client>, WorkshopError> {
            Ok(self.client.clone().into_iter().collect())
        }
        async fn find(&self, _id: i32) -> Result<Option<Client>, WorkshopError> {
            Ok(self.client.clone())
        }
        async fn create(&self, client: &Client) -> Result<Client, WorkshopError> {
            let mut created = client.clone();
            created.id = 1;
            Ok(created)
        }
        async fn update(&self, _client: &Client) -> Result<(), WorkshopError> {
            Ok(())
        }
        async fn delete(&self, _id: i32) -> Result<(), WorkshopError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn should_deny_cashier_access_to_clients() {
        let uc = GetClientUseCase {
            repo: MockClientRepo { client: None },
        };
        let result = uc.execute(Position::Cashier, 1).await;
        assert!(matches!(result, Err(WorkshopError::AccessDenied)));
    }

    #[tokio::test]
    async fn should_collect_all_required_field_errors() {
        let uc = CreateClientUseCase {
            repo: MockClientRepo { client: None },
        };
        let result = uc
            .execute(
                Position::ServiceManager,
                ClientInput {
                    full_name: "  ".into(),
                    phone_number: String::new(),
                },
            )
            .await;
        match result {
            Err(WorkshopError::Validation(errors)) => {
                assert!(errors.0.contains_key("full_name"));
                assert!(errors.0.contains_key("phone_number"));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }
}

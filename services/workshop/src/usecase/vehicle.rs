use autofix_domain::access::{Action, EntityKind, can};
use autofix_domain::pagination::PageRequest;
use autofix_domain::position::Position;

use crate::domain::repository::{SearchPort, VehicleRepository};
use crate::domain::types::Vehicle;
use crate::domain::validate::validate_vehicle;
use crate::error::WorkshopError;
use crate::usecase::matching_ids;

pub struct VehicleInput {
    pub manufacturer: String,
    pub model: String,
    pub year: i32,
    pub license_number: String,
    pub vin: String,
}

impl VehicleInput {
    fn into_vehicle(self, id: i32) -> Vehicle {
        Vehicle {
            id,
            manufacturer: self.manufacturer,
            model: self.model,
            year: self.year,
            license_number: self.license_number,
            vin: self.vin,
        }
    }
}

pub struct ListVehiclesUseCase<R: VehicleRepository, S: SearchPort> {
    pub repo: R,
    pub search: S,
}

impl<R: VehicleRepository, S: SearchPort> ListVehiclesUseCase<R, S> {
    pub async fn execute(
        &self,
        caller: Position,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Vehicle>, WorkshopError> {
        if !can(caller, EntityKind::Vehicle, Action::List) {
            return Err(WorkshopError::AccessDenied);
        }
        let matching_ids = matching_ids(&self.search, EntityKind::Vehicle, search).await?;
        self.repo.list(matching_ids, page).await
    }
}

pub struct GetVehicleUseCase<R: VehicleRepository> {
    pub repo: R,
}

impl<R: VehicleRepository> GetVehicleUseCase<R> {
    pub async fn execute(&self, caller: Position, id: i32) -> Result<Vehicle, WorkshopError> {
        if !can(caller, EntityKind::Vehicle, Action::View) {
            return Err(WorkshopError::AccessDenied);
        }
        self.repo.find(id).await?.ok_or(WorkshopError::NotFound)
    }
}

pub struct CreateVehicleUseCase<R: VehicleRepository> {
    pub repo: R,
}

impl<R: VehicleRepository> CreateVehicleUseCase<R> {
    pub async fn execute(
        &self,
        caller: Position,
        input: VehicleInput,
    ) -> Result<Vehicle, WorkshopError> {
        if !can(caller, EntityKind::Vehicle, Action::Create) {
            return Err(WorkshopError::AccessDenied);
        }
        let vehicle = input.into_vehicle(0);
        validate_vehicle(&vehicle)?;
        self.repo.create(&vehicle).await
    }
}

pub struct UpdateVehicleUseCase<R: VehicleRepository> {
    pub repo: R,
}

impl<R: VehicleRepository> UpdateVehicleUseCase<R> {
    pub async fn execute(
        &self,
        caller: Position,
        id: i32,
        input: VehicleInput,
    ) -> Result<Vehicle, WorkshopError> {
        if !can(caller, EntityKind::Vehicle, Action::View) {
            return Err(WorkshopError::AccessDenied);
        }
        self.repo.find(id).await?.ok_or(WorkshopError::NotFound)?;
        let vehicle = input.into_vehicle(id);
        validate_vehicle(&vehicle)?;
        self.repo.update(&vehicle).await?;
        Ok(vehicle)
    }
}

pub struct DeleteVehicleUseCase<R: VehicleRepository> {
    pub repo: R,
}

impl<R: VehicleRepository> DeleteVehicleUseCase<R> {
    pub async fn execute(&self, caller: Position, id: i32) -> Result<(), WorkshopError> {
        if !can(caller, EntityKind::Vehicle, Action::Create) {
            return Err(WorkshopError::AccessDenied);
        }
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockVehicleRepo {
        vehicle: Option<Vehicle>,
    }

    impl VehicleRepository for MockVehicleRepo {
        async fn list(
            &self,
            _matching_ids: Option<Vec<i32>>,
            _page: PageRequest,
        ) -> Result<Vec<Vehicle>, WorkshopError> {
            Ok(self.vehicle.clone().into_iter().collect())
        }
        async fn find(&self, _id: i32) -> Result<Option<Vehicle>, WorkshopError> {
            Ok(self.vehicle.clone())
        }
        async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, WorkshopError> {
            let mut created = vehicle.clone();
            created.id = 1;
            Ok(created)
        }
        async fn update(&self, _vehicle: &Vehicle) -> Result<(), WorkshopError> {
            Ok(())
        }
        async fn delete(&self, _id: i32) -> Result<(), WorkshopError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn should_reject_short_vin_and_bad_year_together() {
        let uc = CreateVehicleUseCase {
            repo: MockVehicleRepo { vehicle: None },
        };
        let result = uc
            .execute(
                Position::ServiceManager,
                VehicleInput {
                    manufacturer: "Lada".into(),
                    model: "Vesta".into(),
                    year: 1850,
                    license_number: "А123ВС77".into(),
                    vin: "SHORT".into(),
                },
            )
            .await;
        match result {
            Err(WorkshopError::Validation(errors)) => {
                assert!(errors.0.contains_key("vin"));
                assert!(errors.0.contains_key("year"));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn should_deny_mechanic_vehicle_edit() {
        let uc = UpdateVehicleUseCase {
            repo: MockVehicleRepo { vehicle: None },
        };
        let result = uc
            .execute(
                Position::Mechanic,
                1,
                VehicleInput {
                    manufacturer: "Lada".into(),
                    model: "Vesta".into(),
                    year: 2020,
                    license_number: "А123ВС77".into(),
                    vin: "X9999999999999999".into(),
                },
            )
            .await;
        assert!(matches!(result, Err(WorkshopError::AccessDenied)));
    }
}

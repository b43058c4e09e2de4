use chrono::NaiveDate;

use autofix_domain::access::{Action, EntityKind, can};
use autofix_domain::pagination::PageRequest;
use autofix_domain::position::Position;

use crate::domain::repository::{EmployeeRepository, SearchPort};
use crate::domain::types::{Employee, EmployeeFilter};
use crate::domain::validate::validate_employee;
use crate::error::WorkshopError;
use crate::usecase::matching_ids;

pub struct EmployeeInput {
    pub first_name: String,
    pub last_name: String,
    pub patronymic: String,
    pub passport_info: String,
    pub position: Position,
    pub join_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub end_reason: String,
}

impl EmployeeInput {
    fn into_employee(self, id: i32) -> Employee {
        Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            patronymic: self.patronymic,
            passport_info: self.passport_info,
            position: self.position,
            join_date: self.join_date,
            end_date: self.end_date,
            end_reason: self.end_reason,
        }
    }
}

// ── ListEmployees ────────────────────────────────────────────────────────────

pub struct ListEmployeesUseCase<R: EmployeeRepository, S: SearchPort> {
    pub repo: R,
    pub search: S,
}

impl<R: EmployeeRepository, S: SearchPort> ListEmployeesUseCase<R, S> {
    pub async fn execute(
        &self,
        caller: Position,
        show_removed: bool,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Employee>, WorkshopError> {
        if !can(caller, EntityKind::Employee, Action::List) {
            return Err(WorkshopError::AccessDenied);
        }
        let matching_ids = matching_ids(&self.search, EntityKind::Employee, search).await?;
        self.repo
            .list(
                EmployeeFilter {
                    show_removed,
                    matching_ids,
                },
                page,
            )
            .await
    }
}

// ── GetEmployee ──────────────────────────────────────────────────────────────

pub struct GetEmployeeUseCase<R: EmployeeRepository> {
    pub repo: R,
}

impl<R: EmployeeRepository> GetEmployeeUseCase<R> {
    pub async fn execute(&self, caller: Position, id: i32) -> Result<Employee, WorkshopError> {
        if !can(caller, EntityKind::Employee, Action::View) {
            return Err(WorkshopError::AccessDenied);
        }
        self.repo.find(id).await?.ok_or(WorkshopError::NotFound)
    }
}

// ── CreateEmployee ───────────────────────────────────────────────────────────

pub struct CreateEmployeeUseCase<R: EmployeeRepository> {
    pub repo: R,
}

impl<R: EmployeeRepository> CreateEmployeeUseCase<R> {
    pub async fn execute(
        &self,
        caller: Position,
        input: EmployeeInput,
    ) -> Result<Employee, WorkshopError> {
        if !can(caller, EntityKind::Employee, Action::Create) {
            return Err(WorkshopError::AccessDenied);
        }
        let employee = input.into_employee(0);
        validate_employee(&employee)?;
        self.repo.create(&employee).await
    }
}

// ── UpdateEmployee ───────────────────────────────────────────────────────────

pub struct UpdateEmployeeUseCase<R: EmployeeRepository> {
    pub repo: R,
}

impl<R: EmployeeRepository> UpdateEmployeeUseCase<R> {
    pub async fn execute(
        &self,
        caller: Position,
        id: i32,
        input: EmployeeInput,
    ) -> Result<Employee, WorkshopError> {
        if !can(caller, EntityKind::Employee, Action::View) {
            return Err(WorkshopError::AccessDenied);
        }
        self.repo.find(id).await?.ok_or(WorkshopError::NotFound)?;
        let employee = input.into_employee(id);
        validate_employee(&employee)?;
        self.repo.update(&employee).await?;
        Ok(employee)
    }
}

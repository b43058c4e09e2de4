use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use autofix_domain::access::{Action, EntityKind, can, restrict_fields};
use autofix_domain::pagination::PageRequest;
use autofix_domain::position::Position;
use autofix_domain::validation::ValidationErrors;

use crate::domain::repository::{
    ClientRepository, EmployeeRepository, RepairOrderRepository, SearchPort, VehicleRepository,
};
use crate::domain::types::{RepairOrder, RepairOrderFilter};
use crate::domain::validate::validate_repair_order;
use crate::error::WorkshopError;
use crate::usecase::matching_ids;

pub struct RepairOrderInput {
    pub master_id: i32,
    pub client_id: i32,
    pub vehicle_id: i32,
    pub vehicle_mileage: i32,
    /// Defaults to today when absent, as on the original intake form.
    pub start_date: Option<NaiveDate>,
    pub finish_until: Option<NaiveDate>,
    pub finish_date: Option<NaiveDate>,
    pub is_cancelled: bool,
    pub complaints: String,
    pub diagnostic_results: String,
    pub comments: String,
    pub is_paid: bool,
    pub is_warranty: bool,
}

pub struct OrderListQuery {
    pub filter_master: Option<i32>,
    pub show_finished: bool,
    pub search: Option<String>,
    pub page: PageRequest,
}

/// Fetch an order enforcing the type-level permission and the instance
/// narrowing: a Mechanic only reaches orders assigned to them.
pub(crate) async fn authorized_order<R: RepairOrderRepository>(
    repo: &R,
    caller_id: i32,
    position: Position,
    id: i32,
) -> Result<RepairOrder, WorkshopError> {
    if !can(position, EntityKind::RepairOrder, Action::View) {
        return Err(WorkshopError::AccessDenied);
    }
    let order = repo.find(id).await?.ok_or(WorkshopError::NotFound)?;
    if position == Position::Mechanic && order.master_id != caller_id {
        return Err(WorkshopError::AccessDenied);
    }
    Ok(order)
}

fn merge(into: &mut ValidationErrors, from: ValidationErrors) {
    for (field, messages) in from.0 {
        into.0.entry(field).or_default().extend(messages);
    }
}

async fn check_references<E, C, V>(
    errors: &mut ValidationErrors,
    employees: &E,
    clients: &C,
    vehicles: &V,
    order: &RepairOrder,
    previous: Option<&RepairOrder>,
) -> Result<(), WorkshopError>
where
    E: EmployeeRepository,
    C: ClientRepository,
    V: VehicleRepository,
{
    // Only re-resolve references the caller actually changed; an order may
    // legitimately keep pointing at an employee who has since left.
    if previous.is_none_or(|p| p.master_id != order.master_id) {
        match employees.find(order.master_id).await? {
            Some(master) if master.position == Position::Mechanic && master.is_active() => {}
            _ => errors.add("master_id", "Мастер должен быть действующим механиком."),
        }
    }
    if previous.is_none_or(|p| p.client_id != order.client_id)
        && clients.find(order.client_id).await?.is_none()
    {
        errors.add("client_id", "Клиент не найден.");
    }
    if previous.is_none_or(|p| p.vehicle_id != order.vehicle_id)
        && vehicles.find(order.vehicle_id).await?.is_none()
    {
        errors.add("vehicle_id", "Автомобиль не найден.");
    }
    Ok(())
}

// ── ListOrders ───────────────────────────────────────────────────────────────

pub struct ListOrdersUseCase<R: RepairOrderRepository, S: SearchPort> {
    pub repo: R,
    pub search: S,
}

impl<R: RepairOrderRepository, S: SearchPort> ListOrdersUseCase<R, S> {
    pub async fn execute(
        &self,
        caller_id: i32,
        position: Position,
        query: OrderListQuery,
    ) -> Result<Vec<RepairOrder>, WorkshopError> {
        if !can(position, EntityKind::RepairOrder, Action::List) {
            return Err(WorkshopError::AccessDenied);
        }
        // A mechanic is pinned to their own orders whatever the query says.
        let master = if position == Position::Mechanic {
            Some(caller_id)
        } else {
            query.filter_master
        };
        let matching_ids = matching_ids(
            &self.search,
            EntityKind::RepairOrder,
            query.search.as_deref(),
        )
        .await?;
        self.repo
            .list(
                RepairOrderFilter {
                    master,
                    show_finished: query.show_finished,
                    matching_ids,
                },
                query.page,
            )
            .await
    }
}

// ── GetOrder ─────────────────────────────────────────────────────────────────

pub struct GetOrderUseCase<R: RepairOrderRepository> {
    pub repo: R,
}

impl<R: RepairOrderRepository> GetOrderUseCase<R> {
    pub async fn execute(
        &self,
        caller_id: i32,
        position: Position,
        id: i32,
    ) -> Result<(RepairOrder, Decimal), WorkshopError> {
        let order = authorized_order(&self.repo, caller_id, position, id).await?;
        let total_cost = self.repo.total_cost(order.id).await?;
        Ok((order, total_cost))
    }
}

// ── CreateOrder ──────────────────────────────────────────────────────────────

pub struct CreateOrderUseCase<R, E, C, V>
where
    R: RepairOrderRepository,
    E: EmployeeRepository,
    C: ClientRepository,
    V: VehicleRepository,
{
    pub repo: R,
    pub employees: E,
    pub clients: C,
    pub vehicles: V,
}

impl<R, E, C, V> CreateOrderUseCase<R, E, C, V>
where
    R: RepairOrderRepository,
    E: EmployeeRepository,
    C: ClientRepository,
    V: VehicleRepository,
{
    pub async fn execute(
        &self,
        position: Position,
        input: RepairOrderInput,
    ) -> Result<RepairOrder, WorkshopError> {
        if !can(position, EntityKind::RepairOrder, Action::Create) {
            return Err(WorkshopError::AccessDenied);
        }
        let fields = restrict_fields(position, EntityKind::RepairOrder);
        let mut order = RepairOrder {
            id: 0,
            master_id: input.master_id,
            client_id: input.client_id,
            vehicle_id: input.vehicle_id,
            vehicle_mileage: input.vehicle_mileage,
            start_date: input.start_date.unwrap_or_else(|| Utc::now().date_naive()),
            finish_until: input.finish_until,
            finish_date: input.finish_date,
            is_cancelled: input.is_cancelled,
            complaints: input.complaints,
            diagnostic_results: input.diagnostic_results,
            comments: input.comments,
            // The payment flag belongs to the cashier; everyone else starts
            // orders unpaid.
            is_paid: if fields.get("is_paid").copied().unwrap_or(false) {
                input.is_paid
            } else {
                false
            },
            is_warranty: input.is_warranty,
        };
        let mut errors = ValidationErrors::new();
        check_references(
            &mut errors,
            &self.employees,
            &self.clients,
            &self.vehicles,
            &order,
            None,
        )
        .await?;
        if let Err(rule_errors) = validate_repair_order(&mut order) {
            merge(&mut errors, rule_errors);
        }
        errors.into_result()?;
        self.repo.create(&order).await
    }
}

// ── UpdateOrder ──────────────────────────────────────────────────────────────

pub struct UpdateOrderUseCase<R, E, C, V>
where
    R: RepairOrderRepository,
    E: EmployeeRepository,
    C: ClientRepository,
    V: VehicleRepository,
{
    pub repo: R,
    pub employees: E,
    pub clients: C,
    pub vehicles: V,
}

impl<R, E, C, V> UpdateOrderUseCase<R, E, C, V>
where
    R: RepairOrderRepository,
    E: EmployeeRepository,
    C: ClientRepository,
    V: VehicleRepository,
{
    pub async fn execute(
        &self,
        caller_id: i32,
        position: Position,
        id: i32,
        input: RepairOrderInput,
    ) -> Result<RepairOrder, WorkshopError> {
        let existing = authorized_order(&self.repo, caller_id, position, id).await?;
        let fields = restrict_fields(position, EntityKind::RepairOrder);
        let editable = |field: &str| fields.get(field).copied().unwrap_or(false);

        // Fields the caller may not edit silently keep their stored value,
        // exactly like disabled form fields.
        let mut order = existing.clone();
        if editable("master_id") {
            order.master_id = input.master_id;
        }
        if editable("client_id") {
            order.client_id = input.client_id;
        }
        if editable("vehicle_id") {
            order.vehicle_id = input.vehicle_id;
        }
        if editable("vehicle_mileage") {
            order.vehicle_mileage = input.vehicle_mileage;
        }
        if editable("start_date")
            && let Some(start_date) = input.start_date
        {
            order.start_date = start_date;
        }
        if editable("finish_until") {
            order.finish_until = input.finish_until;
        }
        if editable("finish_date") {
            order.finish_date = input.finish_date;
        }
        if editable("is_cancelled") {
            order.is_cancelled = input.is_cancelled;
        }
        if editable("complaints") {
            order.complaints = input.complaints;
        }
        if editable("diagnostic_results") {
            order.diagnostic_results = input.diagnostic_results;
        }
        if editable("comments") {
            order.comments = input.comments;
        }
        if editable("is_paid") {
            order.is_paid = input.is_paid;
        }
        if editable("is_warranty") {
            order.is_warranty = input.is_warranty;
        }

        let mut errors = ValidationErrors::new();
        check_references(
            &mut errors,
            &self.employees,
            &self.clients,
            &self.vehicles,
            &order,
            Some(&existing),
        )
        .await?;
        if let Err(rule_errors) = validate_repair_order(&mut order) {
            merge(&mut errors, rule_errors);
        }
        errors.into_result()?;
        self.repo.update(&order).await?;
        Ok(order)
    }
}

// ── DeleteOrder ──────────────────────────────────────────────────────────────

pub struct DeleteOrderUseCase<R: RepairOrderRepository> {
    pub repo: R,
}

impl<R: RepairOrderRepository> DeleteOrderUseCase<R> {
    pub async fn execute(&self, position: Position, id: i32) -> Result<(), WorkshopError> {
        if !can(position, EntityKind::RepairOrder, Action::Create) {
            return Err(WorkshopError::AccessDenied);
        }
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::domain::types::{Client, Employee, EmployeeFilter, Vehicle};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn order(id: i32, master_id: i32) -> RepairOrder {
        RepairOrder {
            id,
            master_id,
            client_id: 1,
            vehicle_id: 1,
            vehicle_mileage: 50_000,
            start_date: date(2024, 3, 1),
            finish_until: Some(date(2024, 3, 20)),
            finish_date: None,
            is_cancelled: false,
            complaints: "не заводится".into(),
            diagnostic_results: String::new(),
            comments: String::new(),
            is_paid: false,
            is_warranty: false,
        }
    }

    fn input_from(order: &RepairOrder) -> RepairOrderInput {
        RepairOrderInput {
            master_id: order.master_id,
            client_id: order.client_id,
            vehicle_id: order.vehicle_id,
            vehicle_mileage: order.vehicle_mileage,
            start_date: Some(order.start_date),
            finish_until: order.finish_until,
            finish_date: order.finish_date,
            is_cancelled: order.is_cancelled,
            complaints: order.complaints.clone(),
            diagnostic_results: order.diagnostic_results.clone(),
            comments: order.comments.clone(),
            is_paid: order.is_paid,
            is_warranty: order.is_warranty,
        }
    }

    struct MockOrderRepo {
        order: Option<RepairOrder>,
        seen_filter: Mutex<Option<RepairOrderFilter>>,
        updated: Mutex<Option<RepairOrder>>,
    }

    impl MockOrderRepo {
        fn with(order: Option<RepairOrder>) -> Self {
            Self {
                order,
                seen_filter: Mutex::new(None),
                updated: Mutex::new(None),
            }
        }
    }

    impl RepairOrderRepository for MockOrderRepo {
        async fn list(
            &self,
            filter: RepairOrderFilter,
            _page: PageRequest,
        ) -> Result<Vec<RepairOrder>, WorkshopError> {
            *self.seen_filter.lock().unwrap() = Some(filter);
            Ok(self.order.clone().into_iter().collect())
        }
        async fn find(&self, _id: i32) -> Result<Option<RepairOrder>, WorkshopError> {
            Ok(self.order.clone())
        }
        async fn create(&self, order: &RepairOrder) -> Result<RepairOrder, WorkshopError> {
            let mut created = order.clone();
            created.id = 1;
            Ok(created)
        }
        async fn update(&self, order: &RepairOrder) -> Result<(), WorkshopError> {
            *self.updated.lock().unwrap() = Some(order.clone());
            Ok(())
        }
        async fn delete(&self, _id: i32) -> Result<(), WorkshopError> {
            Ok(())
        }
        async fn total_cost(&self, _order_id: i32) -> Result<Decimal, WorkshopError> {
            Ok(Decimal::ZERO)
        }
    }

    struct MockEmployeeRepo {
        employee: Option<Employee>,
    }

    impl EmployeeRepository for MockEmployeeRepo {
        async fn list(
            &self,
            _filter: EmployeeFilter,
            _page: PageRequest,
        ) -> Result<Vec<Employee>, WorkshopError> {
            Ok(vec![])
        }
        async fn find(&self, _id: i32) -> Result<Option<Employee>, WorkshopError> {
            Ok(self.employee.clone())
        }
        async fn create(&self, employee: &Employee) -> Result<Employee, WorkshopError> {
            Ok(employee.clone())
        }
        async fn update(&self, _employee: &Employee) -> Result<(), WorkshopError> {
            Ok(())
        }
    }

    struct MockClientRepo;

    impl ClientRepository for MockClientRepo {
        async fn list(
            &self,
            _matching_ids: Option<Vec<i32>>,
            _page: PageRequest,
        ) -> Result<Vec<Client>, WorkshopError> {
            Ok(vec![])
        }
        async fn find(&self, id: i32) -> Result<Option<Client>, WorkshopError> {
            Ok(Some(Client {
                id,
                full_name: "Сидоров А.А.".into(),
                phone_number: "+79990001122".into(),
            }))
        }
        async fn create(&self, client: &Client) -> Result<Client, WorkshopError> {
            Ok(client.clone())
        }
        async fn update(&self, _client: &Client) -> Result<(), WorkshopError> {
            Ok(())
        }
        async fn delete(&self, _id: i32) -> Result<(), WorkshopError> {
            Ok(())
        }
    }

    struct MockVehicleRepo;

    impl VehicleRepository for MockVehicleRepo {
        async fn list(
            &self,
            _matching_ids: Option<Vec<i32>>,
            _page: PageRequest,
        ) -> Result<Vec<Vehicle>, WorkshopError> {
            Ok(vec![])
        }
        async fn find(&self, id: i32) -> Result<Option<Vehicle>, WorkshopError> {
            Ok(Some(Vehicle {
                id,
                manufacturer: "Lada".into(),
                model: "Vesta".into(),
                year: 2020,
                license_number: "А123ВС77".into(),
                vin: "X9999999999999999".into(),
            }))
        }
        async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, WorkshopError> {
            Ok(vehicle.clone())
        }
        async fn update(&self, _vehicle: &Vehicle) -> Result<(), WorkshopError> {
            Ok(())
        }
        async fn delete(&self, _id: i32) -> Result<(), WorkshopError> {
            Ok(())
        }
    }

    struct NoSearch;

    impl SearchPort for NoSearch {
        async fn search(
            &self,
            _kind: EntityKind,
            _query: &str,
        ) -> Result<Vec<i32>, WorkshopError> {
            Ok(vec![])
        }
    }

    fn active_mechanic(id: i32) -> Employee {
        Employee {
            id,
            first_name: "Иван".into(),
            last_name: "Петров".into(),
            patronymic: "Сергеевич".into(),
            passport_info: "1234 567890".into(),
            position: Position::Mechanic,
            join_date: date(2023, 1, 10),
            end_date: None,
            end_reason: String::new(),
        }
    }

    #[tokio::test]
    async fn should_pin_mechanic_list_to_own_orders() {
        let uc = ListOrdersUseCase {
            repo: MockOrderRepo::with(None),
            search: NoSearch,
        };
        uc.execute(
            42,
            Position::Mechanic,
            OrderListQuery {
                filter_master: Some(7),
                show_finished: false,
                search: None,
                page: PageRequest::default(),
            },
        )
        .await
        .unwrap();
        let filter = uc.repo.seen_filter.lock().unwrap().clone().unwrap();
        assert_eq!(filter.master, Some(42));
    }

    #[tokio::test]
    async fn should_deny_list_to_warehouse_manager() {
        let uc = ListOrdersUseCase {
            repo: MockOrderRepo::with(None),
            search: NoSearch,
        };
        let result = uc
            .execute(
                1,
                Position::WarehouseManager,
                OrderListQuery {
                    filter_master: None,
                    show_finished: false,
                    search: None,
                    page: PageRequest::default(),
                },
            )
            .await;
        assert!(matches!(result, Err(WorkshopError::AccessDenied)));
    }

    #[tokio::test]
    async fn should_deny_mechanic_another_masters_order() {
        let uc = GetOrderUseCase {
            repo: MockOrderRepo::with(Some(order(1, 7))),
        };
        let result = uc.execute(42, Position::Mechanic, 1).await;
        assert!(matches!(result, Err(WorkshopError::AccessDenied)));
    }

    #[tokio::test]
    async fn should_let_mechanic_read_own_order() {
        let uc = GetOrderUseCase {
            repo: MockOrderRepo::with(Some(order(1, 42))),
        };
        let (found, total_cost) = uc.execute(42, Position::Mechanic, 1).await.unwrap();
        assert_eq!(found.id, 1);
        assert_eq!(total_cost, Decimal::ZERO);
    }

    #[tokio::test]
    async fn should_reject_create_with_inactive_master() {
        let mut ended = active_mechanic(7);
        ended.end_date = Some(date(2024, 1, 1));
        let uc = CreateOrderUseCase {
            repo: MockOrderRepo::with(None),
            employees: MockEmployeeRepo {
                employee: Some(ended),
            },
            clients: MockClientRepo,
            vehicles: MockVehicleRepo,
        };
        let result = uc
            .execute(Position::ServiceManager, input_from(&order(0, 7)))
            .await;
        match result {
            Err(WorkshopError::Validation(errors)) => {
                assert!(errors.0.contains_key("master_id"));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn should_ignore_fields_mechanic_may_not_edit() {
        let existing = order(1, 42);
        let uc = UpdateOrderUseCase {
            repo: MockOrderRepo::with(Some(existing.clone())),
            employees: MockEmployeeRepo {
                employee: Some(active_mechanic(42)),
            },
            clients: MockClientRepo,
            vehicles: MockVehicleRepo,
        };
        let mut input = input_from(&existing);
        input.start_date = Some(date(2024, 1, 1));
        input.is_paid = true;
        input.finish_date = Some(date(2024, 3, 10));
        input.diagnostic_results = "замена стартера".into();
        let updated = uc.execute(42, Position::Mechanic, 1, input).await.unwrap();
        assert_eq!(updated.start_date, existing.start_date);
        assert!(!updated.is_paid);
        assert_eq!(updated.finish_date, Some(date(2024, 3, 10)));
        assert_eq!(updated.diagnostic_results, "замена стартера");
    }

    #[tokio::test]
    async fn should_derive_paid_for_finished_warranty_order() {
        let mut existing = order(1, 42);
        existing.is_warranty = true;
        let uc = UpdateOrderUseCase {
            repo: MockOrderRepo::with(Some(existing.clone())),
            employees: MockEmployeeRepo {
                employee: Some(active_mechanic(42)),
            },
            clients: MockClientRepo,
            vehicles: MockVehicleRepo,
        };
        let mut input = input_from(&existing);
        input.finish_date = Some(date(2024, 3, 12));
        input.is_paid = false;
        let updated = uc.execute(42, Position::Mechanic, 1, input).await.unwrap();
        assert!(updated.is_paid);
    }

    #[tokio::test]
    async fn should_deny_delete_to_cashier() {
        let uc = DeleteOrderUseCase {
            repo: MockOrderRepo::with(Some(order(1, 7))),
        };
        let result = uc.execute(Position::Cashier, 1).await;
        assert!(matches!(result, Err(WorkshopError::AccessDenied)));
    }
}
